//! # Catalog Diagnostics
//!
//! Authoring checks over raw catalog records.
//!
//! The normalizer silently repairs bad fields; these checks report them so a
//! site author can fix the source. Checking never fails and never changes
//! what the engine sees.

use crate::normalize::normalize;
use crate::primitives::MAX_TIME_MIN;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// What is wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingSlug,
    MissingTitle,
    InvalidTimeMin { value: String },
    InvalidPublished { value: String },
    DuplicateSlug { slug: String, kind: String },
}

/// One finding, attributed to the record's URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub url: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingSlug => write!(f, "metadata missing slug in {}", self.url),
            DiagnosticKind::MissingTitle => write!(f, "metadata missing title in {}", self.url),
            DiagnosticKind::InvalidTimeMin { value } => {
                write!(f, "metadata invalid time-min '{}' in {}", value, self.url)
            }
            DiagnosticKind::InvalidPublished { value } => write!(
                f,
                "metadata invalid published '{}' in {} (expected YYYY-MM-DD)",
                value, self.url
            ),
            DiagnosticKind::DuplicateSlug { slug, kind } => write!(
                f,
                "duplicate slug '{}' for kind '{}' in {}",
                slug, kind, self.url
            ),
        }
    }
}

/// Check every record, in catalog order.
///
/// Duplicate slugs are reported once per repeated record, after the
/// per-record findings.
#[must_use]
pub fn check_records(records: &[Value]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut seen: BTreeMap<(String, String), usize> = BTreeMap::new();
    let mut duplicates = Vec::new();

    for record in records {
        let item = normalize(record);
        let url = item.url.clone();

        if item.slug.trim().is_empty() {
            out.push(Diagnostic {
                url: url.clone(),
                kind: DiagnosticKind::MissingSlug,
            });
        }
        if item.title.trim().is_empty() {
            out.push(Diagnostic {
                url: url.clone(),
                kind: DiagnosticKind::MissingTitle,
            });
        }
        let bad_time = item
            .meta
            .get("time-min")
            .filter(|raw| !raw.is_empty() && !is_valid_time_min(raw));
        if let Some(raw) = bad_time {
            out.push(Diagnostic {
                url: url.clone(),
                kind: DiagnosticKind::InvalidTimeMin { value: raw.clone() },
            });
        }
        if !item.published.is_empty() && !is_date(&item.published) {
            out.push(Diagnostic {
                url: url.clone(),
                kind: DiagnosticKind::InvalidPublished {
                    value: item.published.clone(),
                },
            });
        }

        if !item.slug.is_empty() {
            let count = seen
                .entry((item.kind.clone(), item.slug.clone()))
                .or_insert(0);
            *count += 1;
            if *count > 1 {
                duplicates.push(Diagnostic {
                    url,
                    kind: DiagnosticKind::DuplicateSlug {
                        slug: item.slug,
                        kind: item.kind,
                    },
                });
            }
        }
    }

    out.extend(duplicates);
    out
}

/// A whole number in `0..=MAX_TIME_MIN`, digits only.
fn is_valid_time_min(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value
            .parse::<i64>()
            .is_ok_and(|n| (0..=MAX_TIME_MIN).contains(&n))
}

/// `YYYY-MM-DD` shape check (digits and dashes only; no calendar validation).
fn is_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(url: &str, meta: Value) -> Value {
        json!({ "url": url, "meta": meta })
    }

    #[test]
    fn clean_record_has_no_findings() {
        let records = vec![record(
            "a.html",
            json!({ "kind": "post", "slug": "a", "title": "A", "time-min": "5", "published": "2024-01-02" }),
        )];
        assert!(check_records(&records).is_empty());
    }

    #[test]
    fn missing_slug_and_title() {
        let records = vec![record("a.html", json!({ "kind": "post" }))];
        let kinds: Vec<_> = check_records(&records).into_iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::MissingSlug, DiagnosticKind::MissingTitle]
        );
    }

    #[test]
    fn invalid_time_and_date() {
        let records = vec![record(
            "a.html",
            json!({ "slug": "a", "title": "A", "time-min": "12min", "published": "March 3" }),
        )];
        let found = check_records(&records);
        assert_eq!(found.len(), 2);
        assert_eq!(
            found[0].kind,
            DiagnosticKind::InvalidTimeMin {
                value: "12min".to_string()
            }
        );
        assert!(found[1].to_string().contains("expected YYYY-MM-DD"));
    }

    #[test]
    fn time_out_of_range() {
        assert!(is_valid_time_min("1000000"));
        assert!(!is_valid_time_min("1000001"));
        assert!(!is_valid_time_min("-1"));
        assert!(!is_valid_time_min(""));
    }

    #[test]
    fn duplicate_slugs_within_kind() {
        let records = vec![
            record("a.html", json!({ "kind": "post", "slug": "x", "title": "A" })),
            record("b.html", json!({ "kind": "post", "slug": "x", "title": "B" })),
            record("c.html", json!({ "kind": "recipe", "slug": "x", "title": "C" })),
        ];
        let found = check_records(&records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "b.html");
        assert_eq!(
            found[0].kind,
            DiagnosticKind::DuplicateSlug {
                slug: "x".to_string(),
                kind: "post".to_string()
            }
        );
    }

    #[test]
    fn date_shape() {
        assert!(is_date("2024-08-01"));
        assert!(!is_date("2024-8-01"));
        assert!(!is_date("2024/08/01"));
    }
}
