use std::sync::Arc;

use crate::catalog::{Catalog, Dimension};

use super::state::{QueryState, SortKey};

/// Handle returned by [`QueryStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the mutable [`QueryState`] and notifies subscribers on every
/// accepted mutation.
///
/// There is no ambient singleton: a store is an explicit value, handed to
/// the renderer and the URL synchronizer by whoever owns the session, and
/// it assumes cooperative single-writer access. Invalid requests (unknown
/// facet values, `Relevance` without an active query) are corrected to the
/// nearest valid state rather than surfaced as errors, because they are
/// reachable through hand-edited URLs.
pub struct QueryStore {
    catalog: Arc<Catalog>,
    default_sort: SortKey,
    state: QueryState,
    subscribers: Vec<(SubscriptionId, Box<dyn Fn(&QueryState)>)>,
    next_subscription: u64,
}

impl QueryStore {
    /// A store with default state for `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, default_sort: SortKey) -> Self {
        let state = QueryState::with_defaults(default_sort);
        Self::with_state(catalog, default_sort, state)
    }

    /// A store seeded with an existing state, e.g. one decoded from a URL.
    #[must_use]
    pub fn with_state(catalog: Arc<Catalog>, default_sort: SortKey, state: QueryState) -> Self {
        Self {
            catalog,
            default_sort,
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The catalog this store's session queries.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// A consistent, immutable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> QueryState {
        self.state.clone()
    }

    /// Register `subscriber` to run synchronously after every mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&QueryState) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(existing, _)| *existing != id);
    }

    /// Replace the search text.
    ///
    /// Activating search switches the sort to `Relevance`; clearing the
    /// text while sorted by `Relevance` reverts to the configured default.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let was_active = self.state.search_active();
        self.state.search_text = text.into();
        let active = self.state.search_active();

        if active && !was_active {
            self.state.sort = SortKey::Relevance;
        } else if !active && self.state.sort == SortKey::Relevance {
            self.state.sort = self.default_sort;
        }

        self.state.page = 1;
        self.notify();
    }

    /// Flip one facet value; a second identical toggle restores the
    /// previous state. Values never observed in the catalog are a no-op.
    pub fn toggle_facet(&mut self, dimension: Dimension, value: &str) {
        if !self.catalog.is_known_value(dimension, value) {
            tracing::debug!(?dimension, value, "ignoring unknown facet value");
            return;
        }
        self.state.filters.toggle(dimension, value);
        self.state.page = 1;
        self.notify();
    }

    /// Select a sort key; `Relevance` without an active query falls back
    /// to the configured default.
    pub fn set_sort(&mut self, key: SortKey) {
        self.state.sort = if key == SortKey::Relevance && !self.state.search_active() {
            self.default_sort
        } else {
            key
        };
        self.state.page = 1;
        self.notify();
    }

    /// Request a page. The lower bound is enforced here; the upper bound
    /// depends on the filtered count and is clamped by the pipeline.
    pub fn set_page(&mut self, page: usize) {
        self.state.page = page.max(1);
        self.notify();
    }

    /// Restore defaults, e.g. when leaving the search surface.
    pub fn reset(&mut self) {
        self.state = QueryState::with_defaults(self.default_sort);
        self.notify();
    }

    fn notify(&self) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }
    }
}
