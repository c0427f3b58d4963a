//! Client-side query engine for a plugin catalog.
//!
//! The crate indexes an already-fetched, immutable catalog of plugin
//! metadata and narrows it through free-text search with highlight spans,
//! multi-dimensional facet filtering (including PEP 440 interpreter
//! requirements), a family of sort comparators, and pagination. The mutable
//! query state lives in an observable [`QueryStore`]; a debounced
//! [`UrlSynchronizer`] keeps the result set reproducible from a shareable
//! query string.

pub mod app_dirs;
pub mod catalog;
pub mod facets;
pub mod logging;
pub mod matcher;
pub mod pipeline;
pub mod query;
pub mod sort;
pub mod urlsync;

pub use catalog::{Catalog, Dimension, PluginRecord};
pub use matcher::{MatchField, MatchQuality, RecordMatches, SearchMatch, match_record};
pub use pipeline::{ResultPage, run_query};
pub use query::{FilterState, QueryState, QueryStore, SortKey, SubscriptionId};
pub use urlsync::{
    ManualScheduler, MemoryUrlSink, ScheduleToken, Scheduler, UrlSink, UrlSynchronizer,
    seed_from_query, write_query_string,
};
