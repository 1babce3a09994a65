use std::{cell::Cell, time::Instant};

use crate::foundation::core::Millis;

/// Monotonic time source.
pub trait Clock {
    /// Current time; only differences between readings are meaningful.
    fn now(&self) -> Millis;
}

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose zero is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        let ms = self.origin.elapsed().as_millis();
        Millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Clock reading `start`.
    pub fn starting_at(start: Millis) -> Self {
        Self {
            now: Cell::new(start.0),
        }
    }

    /// Jump to `t`.
    pub fn set(&self, t: Millis) {
        self.now.set(t.0);
    }

    /// Move forward by `d`.
    pub fn advance(&self, d: Millis) {
        self.now.set(self.now.get().saturating_add(d.0));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now.get())
    }
}
