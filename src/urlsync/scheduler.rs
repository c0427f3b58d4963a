use std::time::Duration;

/// Identifies one scheduled timer so it can be cancelled before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleToken(u64);

/// A cancellable, reschedulable timeout source.
///
/// The synchronizer never owns a timer implementation; the host injects one,
/// which keeps the debounce machinery testable without a browser event loop.
pub trait Scheduler {
    /// Arrange for `callback` to run once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, callback: Box<dyn FnOnce()>) -> ScheduleToken;

    /// Drop a pending timer; cancelling an already-fired or unknown token
    /// is a no-op.
    fn cancel(&mut self, token: ScheduleToken);
}

struct PendingTimer {
    token: ScheduleToken,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

/// Deterministic scheduler driven by explicit [`ManualScheduler::advance`]
/// calls. Time only moves when the caller says so.
#[derive(Default)]
pub struct ManualScheduler {
    now: Duration,
    next_token: u64,
    pending: Vec<PendingTimer>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers that have not yet fired.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock by `delta`, firing due timers in deadline order.
    ///
    /// Callbacks scheduled while firing are themselves fired if their
    /// deadline falls within the already-advanced window.
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
        loop {
            let due_index = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due <= self.now)
                .min_by_key(|(_, timer)| timer.due)
                .map(|(index, _)| index);
            let Some(index) = due_index else {
                break;
            };
            let timer = self.pending.swap_remove(index);
            (timer.callback)();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, callback: Box<dyn FnOnce()>) -> ScheduleToken {
        self.next_token += 1;
        let token = ScheduleToken(self.next_token);
        self.pending.push(PendingTimer {
            token,
            due: self.now + delay,
            callback,
        });
        token
    }

    fn cancel(&mut self, token: ScheduleToken) {
        self.pending.retain(|timer| timer.token != token);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let handle = Rc::clone(&fired);
        let make = move |label: &'static str| -> Box<dyn FnOnce()> {
            let fired = Rc::clone(&handle);
            Box::new(move || fired.borrow_mut().push(label))
        };
        (fired, make)
    }

    #[test]
    fn timers_fire_only_when_time_passes() {
        let (fired, make) = recorder();
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(100), make("a"));

        scheduler.advance(Duration::from_millis(99));
        assert!(fired.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*fired.borrow(), vec!["a"]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let (fired, make) = recorder();
        let mut scheduler = ManualScheduler::new();
        let token = scheduler.schedule(Duration::from_millis(50), make("a"));
        scheduler.cancel(token);
        scheduler.advance(Duration::from_millis(100));
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn due_timers_fire_in_deadline_order() {
        let (fired, make) = recorder();
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(200), make("late"));
        scheduler.schedule(Duration::from_millis(100), make("early"));

        scheduler.advance(Duration::from_millis(250));
        assert_eq!(*fired.borrow(), vec!["early", "late"]);
    }

    #[test]
    fn cancelling_a_fired_token_is_a_no_op() {
        let (_, make) = recorder();
        let mut scheduler = ManualScheduler::new();
        let token = scheduler.schedule(Duration::from_millis(10), make("a"));
        scheduler.advance(Duration::from_millis(20));
        scheduler.cancel(token);
    }
}
