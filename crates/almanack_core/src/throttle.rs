use std::time::{Duration, Instant};

/// How long the throttled loading flag outlives the raw flag.
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(1000);

/// Debounced view of a boolean flag, used to keep spinners from flickering.
///
/// Every edge of the watched flag arms a window; the toggle reads true while
/// the flag is set or the window is still open. Re-arming on the falling edge
/// keeps the toggle on for a full window after the flag drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleToggle {
    window: Duration,
    raw: bool,
    armed_until: Option<Instant>,
}

impl Default for ThrottleToggle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_WINDOW)
    }
}

impl ThrottleToggle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            raw: false,
            armed_until: None,
        }
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    pub fn set(&mut self, value: bool, now: Instant) {
        if value != self.raw {
            self.armed_until = Some(now + self.window);
        }
        self.raw = value;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.raw || self.armed_until.is_some_and(|until| now < until)
    }

    /// When the toggle will turn off on its own, if it is only held by the window.
    pub fn expires_at(&self) -> Option<Instant> {
        if self.raw {
            None
        } else {
            self.armed_until
        }
    }
}
