use web_time::{Duration, Instant};

/// Quiet-period timer: every [`schedule`](Self::schedule) pushes the deadline
/// back, so a burst of changes fires once.
///
/// The owner drives it by passing the current instant; nothing runs on its
/// own.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clears the deadline and returns `true` once `now` has reached it.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
