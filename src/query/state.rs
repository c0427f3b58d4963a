use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::Dimension;

/// Result-ordering keys selectable by the user.
///
/// `Relevance` is only meaningful while a search query is active; attempts
/// to select it otherwise fall back to the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Relevance,
    Name,
    ReleaseDate,
    FirstReleased,
    TotalInstalls,
}

impl SortKey {
    /// The string tag used in the `sort` query-string key.
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Name => "name",
            Self::ReleaseDate => "releaseDate",
            Self::FirstReleased => "firstReleased",
            Self::TotalInstalls => "totalInstalls",
        }
    }

    /// Parse a `sort` tag; unknown tags yield `None` and the caller falls
    /// back to its default.
    #[must_use]
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "relevance" => Some(Self::Relevance),
            "name" => Some(Self::Name),
            "releaseDate" => Some(Self::ReleaseDate),
            "firstReleased" => Some(Self::FirstReleased),
            "totalInstalls" => Some(Self::TotalInstalls),
            _ => None,
        }
    }
}

/// Enabled facet values per dimension.
///
/// Values are OR-ed within a dimension and AND-ed across dimensions; a
/// dimension with no enabled values imposes no constraint. Empty sets are
/// pruned so equality is insensitive to toggle history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    enabled: IndexMap<Dimension, BTreeSet<String>>,
}

impl FilterState {
    /// Whether no dimension is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Whether `value` is enabled for `dimension`.
    #[must_use]
    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.enabled
            .get(&dimension)
            .is_some_and(|values| values.contains(value))
    }

    /// The enabled values for `dimension`, if any are set.
    #[must_use]
    pub fn enabled_values(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        self.enabled.get(&dimension).filter(|values| !values.is_empty())
    }

    /// Dimensions that currently constrain the result set.
    pub fn active_dimensions(&self) -> impl Iterator<Item = (Dimension, &BTreeSet<String>)> {
        self.enabled
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(dimension, values)| (*dimension, values))
    }

    /// Enable `value` for `dimension`.
    pub fn enable(&mut self, dimension: Dimension, value: impl Into<String>) {
        self.enabled.entry(dimension).or_default().insert(value.into());
    }

    /// Flip `value` for `dimension`; two identical toggles cancel out.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let values = self.enabled.entry(dimension).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            self.enabled.shift_remove(&dimension);
        }
    }

    /// Drop every enabled value.
    pub fn clear(&mut self) {
        self.enabled.clear();
    }
}

/// The mutable root of a query session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub filters: FilterState,
    pub sort: SortKey,
    /// 1-based; the pipeline clamps the upper bound against the filtered
    /// result count.
    pub page: usize,
}

impl QueryState {
    /// Fresh state with no search, no filters, page 1.
    #[must_use]
    pub fn with_defaults(default_sort: SortKey) -> Self {
        Self {
            search_text: String::new(),
            filters: FilterState::default(),
            sort: default_sort,
            page: 1,
        }
    }

    /// Search is active only for a non-whitespace query.
    #[must_use]
    pub fn search_active(&self) -> bool {
        !self.search_text.trim().is_empty()
    }
}
