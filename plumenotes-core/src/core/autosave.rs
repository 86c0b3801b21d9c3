//! Cancellable debounce deadline for the autosave policy.

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before an edit is persisted.
pub const AUTOSAVE_WINDOW: Duration = Duration::from_millis(500);

/// A single pending deadline, restarted on every trigger.
///
/// At most one deadline is pending at a time: scheduling while one is pending
/// replaces it, so rapid repeated triggers collapse into one firing. The
/// deadline is plain owned state rather than a detached timer, which makes
/// cancellation total — once cancelled (or dropped with its session), nothing
/// can fire later.
#[derive(Debug)]
pub struct AutosaveTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl AutosaveTimer {
    /// Creates a timer with the given quiet period.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Starts the deadline at `now + window`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Clears the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The instant the pending deadline will fire, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clears and reports the deadline if it has passed.
    ///
    /// Returns `true` exactly once per elapsed deadline; the caller performs
    /// the actual save.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
