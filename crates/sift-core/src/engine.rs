//! # Filter/Sort Engine
//!
//! Produces the filtered, sorted result list for one state.
//!
//! - Pure and deterministic; a full linear scan per call
//! - Facet and query matching is case-insensitive
//! - Sorting is stable, so equal keys keep catalog order
//! - Missing `time_min` sorts last in both time orderings

use crate::profile::{FacetField, FacetValue};
use crate::{CatalogItem, EngineState, Profile, SortOrder};
use std::cmp::Ordering;

/// Filter and sort `items` for `state`.
#[must_use]
pub fn run<'a>(
    items: &'a [CatalogItem],
    state: &EngineState,
    profile: &Profile,
) -> Vec<&'a CatalogItem> {
    let filter = Filter::new(state, profile);
    let mut results: Vec<&CatalogItem> = items.iter().filter(|i| filter.matches(i)).collect();
    sort_items(&mut results, state.sort, profile);
    results
}

/// Sort in place by `order`. Stable.
pub fn sort_items(items: &mut [&CatalogItem], order: SortOrder, profile: &Profile) {
    match order {
        SortOrder::Newest => {
            let field = profile.recency_field.as_str();
            items.sort_by(|a, b| b.text_field(field).cmp(a.text_field(field)));
        }
        SortOrder::TimeAsc => items.sort_by(|a, b| missing_last(a.time_min, b.time_min, false)),
        SortOrder::TimeDesc => items.sort_by(|a, b| missing_last(a.time_min, b.time_min, true)),
        SortOrder::TitleAsc => items.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// The lowercase text a free-text query is matched against.
///
/// Title, summary, scalar facet values, then list facet values, space-joined.
#[must_use]
pub fn haystack(item: &CatalogItem, profile: &Profile) -> String {
    let mut parts: Vec<&str> = vec![item.title.as_str(), item.summary.as_str()];
    let mut lists: Vec<String> = Vec::new();

    for spec in profile.facets() {
        match spec.field.read(item) {
            FacetValue::Scalar(value) => parts.push(value),
            FacetValue::List(values) => lists.push(values.join(" ")),
        }
    }
    parts.extend(lists.iter().map(String::as_str));

    parts.join(" ").to_lowercase()
}

fn normalize_term(value: &str) -> String {
    value.trim().to_lowercase()
}

fn missing_last(a: Option<i64>, b: Option<i64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Pre-normalized filter terms for one pass.
struct Filter<'p> {
    profile: &'p Profile,
    query: String,
    facets: [(&'p FacetField, String); 2],
}

impl<'p> Filter<'p> {
    fn new(state: &EngineState, profile: &'p Profile) -> Self {
        Self {
            profile,
            query: normalize_term(&state.query),
            facets: [
                (&profile.facet_a.field, normalize_term(&state.facet_a)),
                (&profile.facet_b.field, normalize_term(&state.facet_b)),
            ],
        }
    }

    fn matches(&self, item: &CatalogItem) -> bool {
        for (field, selected) in &self.facets {
            if selected.is_empty() {
                continue;
            }
            let hit = match field.read(item) {
                FacetValue::List(values) => values.iter().any(|v| normalize_term(v) == *selected),
                FacetValue::Scalar(value) => normalize_term(value) == *selected,
            };
            if !hit {
                return false;
            }
        }

        self.query.is_empty() || haystack(item, self.profile).contains(&self.query)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, published: &str) -> CatalogItem {
        CatalogItem {
            kind: "post".to_string(),
            title: title.to_string(),
            published: published.to_string(),
            ..CatalogItem::default()
        }
    }

    fn timed(title: &str, time_min: Option<i64>) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            time_min,
            ..CatalogItem::default()
        }
    }

    fn titles(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.title.clone()).collect()
    }

    fn state_with(sort: SortOrder) -> EngineState {
        EngineState {
            sort,
            ..EngineState::default()
        }
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(run(&[], &EngineState::default(), &Profile::blog()).is_empty());
    }

    #[test]
    fn newest_is_descending_and_stable() {
        let items = vec![
            post("old", "2024-01-01"),
            post("tie-first", "2024-05-01"),
            post("new", "2024-09-01"),
            post("tie-second", "2024-05-01"),
        ];
        let out = run(&items, &EngineState::default(), &Profile::blog());
        assert_eq!(titles(&out), vec!["new", "tie-first", "tie-second", "old"]);
    }

    #[test]
    fn time_orders_put_missing_last() {
        let items = vec![
            timed("none-1", None),
            timed("ten", Some(10)),
            timed("neg", Some(-5)),
            timed("none-2", None),
            timed("thirty", Some(30)),
        ];
        let profile = Profile::recipes();

        let asc = run(&items, &state_with(SortOrder::TimeAsc), &profile);
        assert_eq!(
            titles(&asc),
            vec!["neg", "ten", "thirty", "none-1", "none-2"]
        );

        let desc = run(&items, &state_with(SortOrder::TimeDesc), &profile);
        assert_eq!(
            titles(&desc),
            vec!["thirty", "ten", "neg", "none-1", "none-2"]
        );
    }

    #[test]
    fn title_asc_is_lexical() {
        let items = vec![timed("beta", None), timed("Zeta", None), timed("alpha", None)];
        let out = run(&items, &state_with(SortOrder::TitleAsc), &Profile::blog());
        assert_eq!(titles(&out), vec!["Zeta", "alpha", "beta"]);
    }

    #[test]
    fn list_facet_membership() {
        let items = vec![CatalogItem {
            title: "tagged".to_string(),
            tags: vec!["a".to_string(), "B".to_string()],
            ..CatalogItem::default()
        }];
        let profile = Profile::blog();

        let mut state = EngineState::default();
        state.facet_a = "b".to_string();
        assert_eq!(run(&items, &state, &profile).len(), 1);

        state.facet_a = "c".to_string();
        assert!(run(&items, &state, &profile).is_empty());
    }

    #[test]
    fn scalar_facet_is_case_insensitive_exact() {
        let items = vec![
            CatalogItem {
                method: "Oven".to_string(),
                ..CatalogItem::default()
            },
            CatalogItem {
                method: "Oven Roast".to_string(),
                ..CatalogItem::default()
            },
        ];
        let mut state = EngineState::default();
        state.facet_b = " oven ".to_string();

        let out = run(&items, &state, &Profile::recipes());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].method, "Oven");
    }

    #[test]
    fn query_spans_fields() {
        let item = CatalogItem {
            title: "Weeknight".to_string(),
            summary: "quick".to_string(),
            category: "Cooking".to_string(),
            tags: vec!["pasta".to_string()],
            ..CatalogItem::default()
        };
        let profile = Profile::blog();
        assert_eq!(haystack(&item, &profile), "weeknight quick cooking pasta");

        let items = vec![item];
        let mut state = EngineState::default();
        state.query = "QUICK COOK".to_string();
        assert_eq!(run(&items, &state, &profile).len(), 1);

        state.query = "risotto".to_string();
        assert!(run(&items, &state, &profile).is_empty());
    }

    #[test]
    fn all_filters_must_hold() {
        let items = vec![
            CatalogItem {
                title: "Lentil soup".to_string(),
                diets: vec!["vegan".to_string()],
                method: "stovetop".to_string(),
                ..CatalogItem::default()
            },
            CatalogItem {
                title: "Chicken soup".to_string(),
                method: "stovetop".to_string(),
                ..CatalogItem::default()
            },
        ];
        let state = EngineState {
            query: "soup".to_string(),
            facet_a: "vegan".to_string(),
            facet_b: "stovetop".to_string(),
            ..EngineState::default()
        };
        let out = run(&items, &state, &Profile::recipes());
        assert_eq!(titles(&out), vec!["Lentil soup"]);
    }

    #[test]
    fn recency_field_is_configurable() {
        let mut profile = Profile::blog();
        profile.recency_field = "updated".to_string();

        let mut a = post("a", "2024-01-01");
        a.meta.insert("updated".to_string(), "2024-12-01".to_string());
        let mut b = post("b", "2024-06-01");
        b.meta.insert("updated".to_string(), "2024-07-01".to_string());

        let items = vec![b, a];
        let out = run(&items, &EngineState::default(), &profile);
        assert_eq!(titles(&out), vec!["a", "b"]);
    }
}
