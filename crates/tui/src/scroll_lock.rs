use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Shell-wide lock that freezes list scrolling while a modal is open.
///
/// Every holder owns a [`ScrollLockGuard`]; the lock is held while at least
/// one guard is alive. Dropping the guard is the only way to release it.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> ScrollLockGuard {
        let holders = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(holders, "scroll lock acquired");
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let holders = self.holders.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::debug!(holders, "scroll lock released");
    }
}
