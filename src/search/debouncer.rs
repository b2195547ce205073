use std::time::Duration;

use tokio::time::Instant;

/// Default trailing-edge delay between the last keystroke and the request.
pub const DEBOUNCE_MS: u64 = 500;

/// Pure debouncer: only handles timing.
/// No search logic, no I/O.
pub(super) struct Debouncer {
    delay: Duration,
    pub(super) last_event: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_event: None,
        }
    }

    /// Record input; restarts the window.
    pub(super) fn arm(&mut self) {
        self.last_event = Some(Instant::now());
    }

    pub(super) fn cancel(&mut self) {
        self.last_event = None;
    }

    /// When the pending window closes, if one is pending.
    pub(super) fn deadline(&self) -> Option<Instant> {
        self.last_event.map(|at| at + self.delay)
    }

    pub(super) fn is_ready(&self) -> bool {
        self.deadline().is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Consume the pending window if it has closed.
    pub(super) fn take_if_ready(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.last_event = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_idle() {
        let debouncer = Debouncer::new(Duration::from_millis(DEBOUNCE_MS));
        assert!(!debouncer.is_ready());
        assert!(debouncer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(DEBOUNCE_MS));
        debouncer.arm();
        tokio::time::advance(Duration::from_millis(400)).await;
        debouncer.arm();
        tokio::time::advance(Duration::from_millis(400)).await;
        assert!(!debouncer.take_if_ready());

        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(debouncer.take_if_ready());
        assert!(!debouncer.take_if_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.arm();
        debouncer.cancel();
        tokio::time::advance(Duration::from_millis(20)).await;
        assert!(!debouncer.is_ready());
    }
}
