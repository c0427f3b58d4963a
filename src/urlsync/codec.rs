use std::borrow::Cow;

use crate::catalog::{Catalog, Dimension};
use crate::query::{QueryState, SortKey};

pub const SEARCH_KEY: &str = "search";
pub const SORT_KEY: &str = "sort";
pub const PAGE_KEY: &str = "page";

/// Decode a query string into a [`QueryState`], once, at mount.
///
/// Every key degrades independently: an invalid `sort` or `page` is dropped
/// in favour of the default, facet values never observed in the catalog are
/// ignored, and a `relevance` sort without an accompanying search falls back
/// to `default_sort`. A leading `?` is tolerated.
#[must_use]
pub fn seed_from_query(query: &str, catalog: &Catalog, default_sort: SortKey) -> QueryState {
    let mut state = QueryState::with_defaults(default_sort);

    for (key, value) in parse_pairs(query) {
        match key.as_str() {
            SEARCH_KEY => {
                state.search_text = value;
            }
            SORT_KEY => match SortKey::from_query_value(&value) {
                Some(sort) => state.sort = sort,
                None => tracing::warn!(%value, "ignoring unknown sort tag in URL"),
            },
            PAGE_KEY => match value.parse::<usize>() {
                Ok(page) if page >= 1 => state.page = page,
                _ => tracing::warn!(%value, "ignoring invalid page in URL"),
            },
            other => match Dimension::from_query_key(other) {
                Some(dimension) => {
                    if catalog.is_known_value(dimension, &value) {
                        state.filters.enable(dimension, value);
                    } else {
                        tracing::warn!(key = other, %value, "ignoring unknown facet value in URL");
                    }
                }
                None => tracing::warn!(key = other, "ignoring unknown query key in URL"),
            },
        }
    }

    if state.sort == SortKey::Relevance && !state.search_active() {
        state.sort = default_sort;
    }

    state
}

/// Encode a state as its canonical query string.
///
/// Inactive parts are omitted (`search` when empty, `page` when 1), so the
/// default state encodes as just its sort tag. Facet keys repeat once per
/// enabled value, in dimension order.
#[must_use]
pub fn write_query_string(state: &QueryState) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();

    if state.search_active() {
        pairs.push((SEARCH_KEY.to_string(), state.search_text.clone()));
    }
    pairs.push((SORT_KEY.to_string(), state.sort.as_query_value().to_string()));
    if state.page > 1 {
        pairs.push((PAGE_KEY.to_string(), state.page.to_string()));
    }
    for dimension in Dimension::ALL {
        if let Some(values) = state.filters.enabled_values(dimension) {
            for value in values {
                pairs.push((dimension.query_key().to_string(), value.clone()));
            }
        }
    }

    let encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    encoded.join("&")
}

/// Split a query string into decoded key/value pairs, dropping fragments
/// that fail to decode. `+` is read as a space for form-encoded inputs.
fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut pairs = Vec::new();

    for fragment in query.split('&') {
        if fragment.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match fragment.split_once('=') {
            Some((key, value)) => (key, value),
            None => (fragment, ""),
        };
        let Some(key) = decode(raw_key) else {
            tracing::warn!(fragment, "dropping undecodable query key");
            continue;
        };
        let Some(value) = decode(raw_value) else {
            tracing::warn!(fragment, "dropping undecodable query value");
            continue;
        };
        pairs.push((key, value));
    }

    pairs
}

fn decode(raw: &str) -> Option<String> {
    let plus_decoded: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&plus_decoded)
        .ok()
        .map(|decoded| decoded.into_owned())
}
