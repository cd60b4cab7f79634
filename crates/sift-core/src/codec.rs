//! # URL State Codec
//!
//! Bidirectional mapping between [`EngineState`] and a URL query string.
//!
//! - `decode` never fails: absent or tampered parameters take their defaults
//! - `encode` emits only non-default keys, so the default state encodes to `""`
//! - Key order is fixed: `q`, facet A, facet B, `sort`, `page`
//!
//! For every state with `page >= 1`, `decode(&encode(&s, p), p) == s`.

use crate::normalize::parse_leading_int;
use crate::primitives::{PAGE_KEY, QUERY_KEY, SORT_KEY};
use crate::{EngineState, Profile, SortOrder};
use url::form_urlencoded;

/// Decode a query string (with or without the leading `?`).
///
/// The first occurrence of a repeated key wins; unknown keys are ignored.
#[must_use]
pub fn decode(query: &str, profile: &Profile) -> EngineState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut q = None;
    let mut facet_a = None;
    let mut facet_b = None;
    let mut sort = None;
    let mut page = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            QUERY_KEY => &mut q,
            SORT_KEY => &mut sort,
            PAGE_KEY => &mut page,
            k if k == profile.facet_a.key => &mut facet_a,
            k if k == profile.facet_b.key => &mut facet_b,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    EngineState {
        query: q.unwrap_or_default(),
        facet_a: facet_a.unwrap_or_default(),
        facet_b: facet_b.unwrap_or_default(),
        sort: sort
            .as_deref()
            .and_then(SortOrder::from_param)
            .unwrap_or_default(),
        page: page.as_deref().map(decode_page).unwrap_or(1),
    }
}

/// Encode a state, omitting every key that holds its default value.
#[must_use]
pub fn encode(state: &EngineState, profile: &Profile) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if !state.query.is_empty() {
        out.append_pair(QUERY_KEY, &state.query);
    }
    if !state.facet_a.is_empty() {
        out.append_pair(&profile.facet_a.key, &state.facet_a);
    }
    if !state.facet_b.is_empty() {
        out.append_pair(&profile.facet_b.key, &state.facet_b);
    }
    if state.sort != SortOrder::Newest {
        out.append_pair(SORT_KEY, state.sort.as_str());
    }
    if state.page > 1 {
        out.append_pair(PAGE_KEY, &state.page.to_string());
    }

    out.finish()
}

/// The URL a history replace should write: `?query`, or `path` when empty.
#[must_use]
pub fn location_for(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("?{}", query)
    }
}

fn decode_page(value: &str) -> usize {
    match parse_leading_int(value) {
        Some(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => 1,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_example() {
        let state = decode("?q=soup&sort=title_asc&page=2", &Profile::recipes());
        assert_eq!(
            state,
            EngineState {
                query: "soup".to_string(),
                facet_a: String::new(),
                facet_b: String::new(),
                sort: SortOrder::TitleAsc,
                page: 2,
            }
        );
    }

    #[test]
    fn decode_empty_is_default() {
        assert_eq!(decode("", &Profile::blog()), EngineState::default());
        assert_eq!(decode("?", &Profile::blog()), EngineState::default());
    }

    #[test]
    fn decode_uses_profile_keys() {
        let qs = "tag=rust&category=Engineering&diet=vegan";
        let blog = decode(qs, &Profile::blog());
        assert_eq!(blog.facet_a, "rust");
        assert_eq!(blog.facet_b, "Engineering");

        let recipes = decode(qs, &Profile::recipes());
        assert_eq!(recipes.facet_a, "vegan");
        assert_eq!(recipes.facet_b, "");
    }

    #[test]
    fn tampered_values_fall_back() {
        let profile = Profile::blog();
        assert_eq!(decode("page=-4", &profile).page, 1);
        assert_eq!(decode("page=0", &profile).page, 1);
        assert_eq!(decode("page=abc", &profile).page, 1);
        assert_eq!(decode("page=", &profile).page, 1);
        assert_eq!(decode("page=3x", &profile).page, 3);
        assert_eq!(decode("sort=random", &profile).sort, SortOrder::Newest);
    }

    #[test]
    fn first_occurrence_wins() {
        let state = decode("q=first&q=second", &Profile::blog());
        assert_eq!(state.query, "first");
    }

    #[test]
    fn plus_and_percent_decoding() {
        let state = decode("q=tomato+soup%21", &Profile::blog());
        assert_eq!(state.query, "tomato soup!");
    }

    #[test]
    fn default_state_encodes_empty() {
        assert_eq!(encode(&EngineState::default(), &Profile::blog()), "");
    }

    #[test]
    fn encode_is_ordered_and_sparse() {
        let state = EngineState {
            query: "a b".to_string(),
            facet_a: "rust".to_string(),
            facet_b: String::new(),
            sort: SortOrder::TimeDesc,
            page: 3,
        };
        assert_eq!(
            encode(&state, &Profile::blog()),
            "q=a+b&tag=rust&sort=time_desc&page=3"
        );
    }

    #[test]
    fn location_uses_path_when_empty() {
        assert_eq!(location_for("/blog/", ""), "/blog/");
        assert_eq!(location_for("/blog/", "page=2"), "?page=2");
    }
}
