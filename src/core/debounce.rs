//! Query debouncer for the browse view.
//!
//! Pure timing, no business logic: every method takes an explicit `Instant`
//! so tests can simulate time advancement instead of sleeping. Filtering
//! recomputes only after input has been quiet for the full window; any
//! keystroke inside the window restarts it, and only the most recent value
//! is ever delivered.

use std::time::{Duration, Instant};

/// Quiet window before a query value settles.
pub const DEBOUNCE_MS: u64 = 300;

/// Debounces rapid query edits into a single settled value.
#[derive(Debug)]
pub struct QueryDebouncer {
    /// Latest raw value, pending delivery
    pending: Option<String>,
    last_input: Option<Instant>,
    quiet: Duration,
}

impl QueryDebouncer {
    pub fn new() -> Self {
        Self::with_quiet(Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_quiet(quiet: Duration) -> Self {
        Self {
            pending: None,
            last_input: None,
            quiet,
        }
    }

    /// Record a query edit at `at`. Replaces any pending value and restarts
    /// the quiet window.
    pub fn note_input(&mut self, query: &str, at: Instant) {
        self.pending = Some(query.to_string());
        self.last_input = Some(at);
    }

    /// Discard any pending value (e.g. the view was reset wholesale).
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_input = None;
    }

    /// Take the settled value if the quiet window has elapsed at `now`.
    ///
    /// Returns `None` while input is still hot or nothing is pending.
    pub fn take_if_settled(&mut self, now: Instant) -> Option<String> {
        let last_input = self.last_input?;
        if now.duration_since(last_input) < self.quiet {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    /// Whether a value is waiting for its quiet window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time until the pending value can settle, for use as an event-poll
    /// timeout. Returns a long idle duration when nothing is pending.
    pub fn sleep_duration(&self, now: Instant) -> Duration {
        let Some(last_input) = self.last_input else {
            return Duration::from_secs(86400);
        };

        self.quiet
            .saturating_sub(now.duration_since(last_input))
            .max(Duration::from_millis(1))
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_empty_never_settles() {
        let mut debouncer = QueryDebouncer::new();
        assert!(!debouncer.is_pending());
        assert!(debouncer.take_if_settled(Instant::now()).is_none());
    }

    #[test]
    fn test_settles_after_quiet_window() {
        let mut debouncer = QueryDebouncer::new();
        let t0 = Instant::now();

        debouncer.note_input("se", t0);
        assert!(debouncer.take_if_settled(t0 + ms(299)).is_none());
        assert_eq!(debouncer.take_if_settled(t0 + ms(300)), Some("se".into()));
        // Delivered exactly once
        assert!(debouncer.take_if_settled(t0 + ms(600)).is_none());
    }

    #[test]
    fn test_keystroke_restarts_window() {
        let mut debouncer = QueryDebouncer::new();
        let t0 = Instant::now();

        debouncer.note_input("s", t0);
        debouncer.note_input("se", t0 + ms(200));
        debouncer.note_input("set", t0 + ms(400));

        // 300ms past the first keystroke but not the last: still hot
        assert!(debouncer.take_if_settled(t0 + ms(450)).is_none());
        // Only the most recent value is delivered
        assert_eq!(debouncer.take_if_settled(t0 + ms(700)), Some("set".into()));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = QueryDebouncer::new();
        let t0 = Instant::now();

        debouncer.note_input("abc", t0);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(debouncer.take_if_settled(t0 + ms(500)).is_none());
    }

    #[test]
    fn test_sleep_duration_idle() {
        let debouncer = QueryDebouncer::new();
        assert!(debouncer.sleep_duration(Instant::now()) >= Duration::from_secs(3600));
    }

    #[test]
    fn test_sleep_duration_counts_down() {
        let mut debouncer = QueryDebouncer::new();
        let t0 = Instant::now();

        debouncer.note_input("q", t0);
        assert_eq!(debouncer.sleep_duration(t0), ms(300));
        assert_eq!(debouncer.sleep_duration(t0 + ms(250)), ms(50));
        // Past the deadline: minimal wait so the caller polls immediately
        assert_eq!(debouncer.sleep_duration(t0 + ms(400)), ms(1));
    }

    #[test]
    fn test_custom_quiet_window() {
        let mut debouncer = QueryDebouncer::with_quiet(ms(50));
        let t0 = Instant::now();

        debouncer.note_input("x", t0);
        assert_eq!(debouncer.take_if_settled(t0 + ms(50)), Some("x".into()));
    }
}
