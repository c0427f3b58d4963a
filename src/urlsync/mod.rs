//! Two-way binding between query state and the address bar.
//!
//! Reading happens exactly once, through [`codec::seed_from_query`]; after
//! that the [`UrlSynchronizer`] only writes, batching store mutations behind
//! a debounce window so rapid keystrokes coalesce into one URL rewrite.

pub mod codec;
mod scheduler;
mod synchronizer;

pub use codec::{seed_from_query, write_query_string};
pub use scheduler::{ManualScheduler, ScheduleToken, Scheduler};
pub use synchronizer::{MemoryUrlSink, UrlSink, UrlSynchronizer};

#[cfg(test)]
mod tests;
