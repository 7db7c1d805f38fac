use std::time::Duration;

use tokio::time::Instant;

/// Quiet period between the last keystroke and the query it triggers.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(250);

/// Trailing-edge debouncer driven by an injected clock.
///
/// Each [`touch`](Self::touch) pushes the deadline out to `now + quiet`;
/// [`fire`](Self::fire) reports `true` exactly once after the deadline passes.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Records a change event, restarting the quiet period.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Consumes the pending trigger if the quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending trigger.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the pending trigger is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}
