use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use instant::Instant;

/// Shared stop flag. Cancelling any clone stops every schedule holding one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Fixed-period task driven by the event loop.
///
/// The next run is due one period after the previous one was polled, so a
/// slow tick delays the following one instead of bunching ticks up.
#[derive(Debug)]
pub struct TickSchedule {
    period: Duration,
    next_due: Instant,
    token: CancelToken,
}

impl TickSchedule {
    /// First tick is due immediately at `start`.
    pub fn new(period: Duration, start: Instant, token: CancelToken) -> Self {
        Self {
            period,
            next_due: start,
            token,
        }
    }

    /// When the event loop should wake us next, or `None` once cancelled.
    pub fn deadline(&self) -> Option<Instant> {
        if self.token.is_cancelled() {
            None
        } else {
            Some(self.next_due)
        }
    }

    /// Returns true if a tick should run now, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.token.is_cancelled() || now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(120);

    #[test]
    fn test_first_tick_is_immediate() {
        let start = Instant::now();
        let mut sched = TickSchedule::new(PERIOD, start, CancelToken::new());
        assert_eq!(sched.deadline(), Some(start));
        assert!(sched.poll(start));
        assert_eq!(sched.deadline(), Some(start + PERIOD));
    }

    #[test]
    fn test_not_due_before_period() {
        let start = Instant::now();
        let mut sched = TickSchedule::new(PERIOD, start, CancelToken::new());
        assert!(sched.poll(start));
        assert!(!sched.poll(start + Duration::from_millis(119)));
        assert!(sched.poll(start + PERIOD));
    }

    #[test]
    fn test_late_poll_reschedules_from_now() {
        let start = Instant::now();
        let mut sched = TickSchedule::new(PERIOD, start, CancelToken::new());
        assert!(sched.poll(start));
        let late = start + Duration::from_millis(500);
        assert!(sched.poll(late));
        assert!(!sched.poll(late + Duration::from_millis(10)));
        assert_eq!(sched.deadline(), Some(late + PERIOD));
    }

    #[test]
    fn test_cancel_through_clone_stops_ticks() {
        let start = Instant::now();
        let token = CancelToken::new();
        let mut sched = TickSchedule::new(PERIOD, start, token.clone());
        assert!(sched.poll(start));

        token.cancel();
        assert!(sched.is_cancelled());
        assert_eq!(sched.deadline(), None);
        assert!(!sched.poll(start + PERIOD * 10));
    }
}
