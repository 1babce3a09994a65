use std::{cell::Cell, rc::Rc};

/// Page-level scroll suspension.
pub trait ScrollLock {
    /// Suspend page scrolling.
    fn acquire(&self);
    /// Undo one `acquire`.
    fn release(&self);
}

/// Reference-counted scroll lock: scrolling stays suspended while any holder remains.
#[derive(Debug, Default)]
pub struct ScrollLatch {
    holders: Cell<usize>,
    acquisitions: Cell<usize>,
}

impl ScrollLatch {
    /// Unlocked latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one holder exists.
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    /// Current number of holders.
    pub fn holders(&self) -> usize {
        self.holders.get()
    }

    /// Total `acquire` calls ever made.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.get()
    }
}

impl ScrollLock for ScrollLatch {
    fn acquire(&self) {
        self.holders.set(self.holders.get() + 1);
        self.acquisitions.set(self.acquisitions.get() + 1);
    }

    fn release(&self) {
        let held = self.holders.get();
        if held == 0 {
            tracing::debug!("scroll lock released while not held");
            return;
        }
        self.holders.set(held - 1);
    }
}

/// Held scroll lock; releases exactly once, when dropped.
pub struct ScrollGuard {
    lock: Rc<dyn ScrollLock>,
}

impl ScrollGuard {
    /// Acquire `lock` for the guard's lifetime.
    pub fn acquire(lock: Rc<dyn ScrollLock>) -> Self {
        lock.acquire();
        Self { lock }
    }
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

impl std::fmt::Debug for ScrollGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollGuard").finish_non_exhaustive()
    }
}
