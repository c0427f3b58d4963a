use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::query::{QueryState, QueryStore, SubscriptionId};

use super::codec;
use super::scheduler::{ScheduleToken, Scheduler};

/// Receives the coalesced query-string rewrites.
///
/// In a browser host this wraps `history.replaceState`; tests use
/// [`MemoryUrlSink`].
pub trait UrlSink {
    fn replace_query(&mut self, query: &str);
}

/// Sink that records every write, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryUrlSink {
    writes: Rc<RefCell<Vec<String>>>,
}

impl MemoryUrlSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded writes, usable after the sink has been
    /// moved into a synchronizer.
    #[must_use]
    pub fn writes(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.writes)
    }
}

impl UrlSink for MemoryUrlSink {
    fn replace_query(&mut self, query: &str) {
        self.writes.borrow_mut().push(query.to_string());
    }
}

/// Debounces store mutations into coalesced URL rewrites.
///
/// The state machine is Idle → Pending on the first mutation (one timer
/// scheduled); further mutations within the window cancel and reschedule the
/// timer and replace the pending payload, so the eventual write carries only
/// the final value of every key. After the one-time seed (see
/// [`codec::seed_from_query`]) this component never reads the URL, which
/// rules out feedback loops between the two writers of shared state.
pub struct UrlSynchronizer {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    scheduler: Rc<RefCell<dyn Scheduler>>,
    sink: Box<dyn UrlSink>,
    debounce: Duration,
    pending: Option<QueryState>,
    timer: Option<ScheduleToken>,
}

impl UrlSynchronizer {
    /// Create a synchronizer writing through `sink`, with timers provided by
    /// `scheduler`.
    #[must_use]
    pub fn new(
        scheduler: Rc<RefCell<dyn Scheduler>>,
        sink: Box<dyn UrlSink>,
        debounce: Duration,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                scheduler,
                sink,
                debounce,
                pending: None,
                timer: None,
            })),
        }
    }

    /// Subscribe to `store`; every mutation from now on schedules a write.
    pub fn observe(&self, store: &mut QueryStore) -> SubscriptionId {
        let inner = Rc::clone(&self.inner);
        store.subscribe(move |state| Inner::on_mutation(&inner, state.clone()))
    }

    /// Whether a debounced write is still waiting for its timer.
    #[must_use]
    pub fn write_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }
}

impl Inner {
    fn on_mutation(handle: &Rc<RefCell<Inner>>, state: QueryState) {
        let mut inner = handle.borrow_mut();

        // Last writer wins: the payload is always the newest snapshot, and
        // the previous timer is cancelled so a stale payload can never fire.
        inner.pending = Some(state);
        if let Some(token) = inner.timer.take() {
            inner.scheduler.borrow_mut().cancel(token);
        }

        let callback_handle = Rc::clone(handle);
        let delay = inner.debounce;
        let scheduler = Rc::clone(&inner.scheduler);
        let token = scheduler
            .borrow_mut()
            .schedule(delay, Box::new(move || Inner::flush(&callback_handle)));
        inner.timer = Some(token);
    }

    fn flush(handle: &Rc<RefCell<Inner>>) {
        let mut inner = handle.borrow_mut();
        inner.timer = None;
        if let Some(state) = inner.pending.take() {
            let query = codec::write_query_string(&state);
            inner.sink.replace_query(&query);
        }
    }
}
