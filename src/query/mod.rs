//! Mutable query state and the observable store that owns it.

mod state;
mod store;

pub use state::{FilterState, QueryState, SortKey};
pub use store::{QueryStore, SubscriptionId};
