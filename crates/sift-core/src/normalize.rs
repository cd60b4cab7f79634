//! # Record Normalizer
//!
//! Maps a raw, loosely-typed catalog record into a [`CatalogItem`].
//!
//! - Total: never fails, never panics
//! - Missing or wrong-typed fields become the field's default
//! - CSV strings become ordered lists, empty parts dropped
//! - Integer-like fields parse leniently; garbage becomes `None`, not zero
//!
//! A raw record looks like `{ "url": "...", "meta": { "title": "...", ... } }`.
//! Index builders may also emit typed top-level fields (`"tags": [..]`,
//! `"time_min": 12`); those are read when `meta` lacks the key.

use crate::CatalogItem;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Normalize one raw record.
#[must_use]
pub fn normalize(record: &Value) -> CatalogItem {
    let empty = Map::new();
    let meta = record
        .get("meta")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let field = |keys: &[&str]| -> Option<&Value> {
        keys.iter()
            .find_map(|k| meta.get(*k))
            .or_else(|| keys.iter().find_map(|k| record.get(*k)))
    };
    let text_of = |keys: &[&str]| field(keys).map(text).unwrap_or_default();

    CatalogItem {
        kind: text_of(&["kind"]).trim().to_lowercase(),
        slug: text_of(&["slug"]),
        url: record.get("url").map(text).unwrap_or_default(),
        title: text_of(&["title"]),
        summary: text_of(&["summary"]),
        image: text_of(&["image"]),
        tags: field(&["tags"]).map(list).unwrap_or_default(),
        diets: field(&["diets"]).map(list).unwrap_or_default(),
        category: text_of(&["category"]),
        method: text_of(&["method"]),
        time_min: field(&["time-min", "time_min"]).and_then(integer),
        serves: text_of(&["serves"]),
        difficulty: text_of(&["difficulty"]),
        published: text_of(&["published"]),
        meta: meta
            .iter()
            .filter(|(_, v)| v.is_string() || v.is_number())
            .map(|(k, v)| (k.clone(), text(v)))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Split a comma-separated string, trimming parts and dropping empty ones.
#[must_use]
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the leading integer of a string.
///
/// Leading whitespace and one sign are accepted, then decimal digits up to the
/// first non-digit. No digits yields `None`. Out-of-range values saturate.
#[must_use]
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &rest[..rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    })
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_csv(s),
        Value::Array(items) => items
            .iter()
            .map(text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| parse_leading_int(&n.to_string())),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record() {
        let raw = json!({
            "url": "posts/hello.html",
            "meta": {
                "kind": " Post ",
                "title": "Hello",
                "summary": "First post",
                "image": "img/hello.png",
                "tags": "rust, web ,,cli",
                "category": "Engineering",
                "time-min": "7",
                "published": "2024-03-01"
            }
        });

        let item = normalize(&raw);
        assert_eq!(item.kind, "post");
        assert_eq!(item.url, "posts/hello.html");
        assert_eq!(item.title, "Hello");
        assert_eq!(item.tags, vec!["rust", "web", "cli"]);
        assert_eq!(item.category, "Engineering");
        assert_eq!(item.time_min, Some(7));
        assert_eq!(item.published, "2024-03-01");
        assert_eq!(item.meta.get("time-min").map(String::as_str), Some("7"));
    }

    #[test]
    fn missing_meta_yields_defaults() {
        let item = normalize(&json!({ "url": "a.html" }));
        assert_eq!(item.url, "a.html");
        assert_eq!(item.title, "");
        assert!(item.tags.is_empty());
        assert_eq!(item.time_min, None);
    }

    #[test]
    fn non_object_meta_and_record_yield_defaults() {
        assert_eq!(normalize(&json!({ "meta": "nope" })), CatalogItem::default());
        assert_eq!(normalize(&json!(42)), CatalogItem::default());
        assert_eq!(normalize(&Value::Null), CatalogItem::default());
    }

    #[test]
    fn unparsable_time_is_absent_not_zero() {
        let item = normalize(&json!({ "meta": { "time-min": "soon" } }));
        assert_eq!(item.time_min, None);

        let item = normalize(&json!({ "meta": { "time-min": "" } }));
        assert_eq!(item.time_min, None);

        let item = normalize(&json!({ "meta": { "time-min": "0" } }));
        assert_eq!(item.time_min, Some(0));
    }

    #[test]
    fn wrong_typed_fields_degrade() {
        let item = normalize(&json!({
            "meta": { "title": true, "tags": { "a": 1 }, "time-min": [5] }
        }));
        assert_eq!(item.title, "");
        assert!(item.tags.is_empty());
        assert_eq!(item.time_min, None);
    }

    #[test]
    fn typed_top_level_fields_are_read() {
        let item = normalize(&json!({
            "url": "r/soup.html",
            "kind": "recipe",
            "diets": ["vegan", " gluten-free ", ""],
            "time_min": 25,
            "meta": { "title": "Soup" }
        }));
        assert_eq!(item.kind, "recipe");
        assert_eq!(item.diets, vec!["vegan", "gluten-free"]);
        assert_eq!(item.time_min, Some(25));
        assert_eq!(item.title, "Soup");
    }

    #[test]
    fn meta_wins_over_top_level() {
        let item = normalize(&json!({
            "title": "Top",
            "meta": { "title": "Meta" }
        }));
        assert_eq!(item.title, "Meta");
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  15 min"), Some(15));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int("1.5"), Some(1));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn csv_keeps_order() {
        assert_eq!(split_csv("b, a ,c"), vec!["b", "a", "c"]);
        assert!(split_csv(" , ,").is_empty());
    }

    #[test]
    fn fractional_number_time_truncates() {
        let item = normalize(&json!({ "meta": { "time-min": 12.5 } }));
        assert_eq!(item.time_min, Some(12));
    }
}
