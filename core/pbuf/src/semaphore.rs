//! A counting semaphore implementation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use event_listener::{Event, Listener, listener};

/// A counting semaphore.
///
/// Allows a specified number of permits to be acquired. Permits live in an
/// atomic counter; acquisition succeeds by compare-exchanging the count
/// down, so each permit has exactly one owner. Threads that find the count
/// at zero park on an [`Event`] until a release notifies them.
pub struct Semaphore {
    count: AtomicUsize,
    event: Event,
}

impl Semaphore {
    /// Creates a new semaphore with the given number of permits.
    pub const fn new(permits: usize) -> Self {
        Self {
            count: AtomicUsize::new(permits),
            event: Event::new(),
        }
    }

    /// Acquires a permit, blocking until one is available.
    pub fn acquire(&self) {
        loop {
            let count = self.count.load(Ordering::Acquire);

            if count == 0 {
                listener!(self.event => listener);
                // A release may have slipped in between the load above and
                // the listener registration; parking now would miss its
                // notification, so look again first.
                if self.count.load(Ordering::Acquire) == 0 {
                    listener.wait();
                }
                continue;
            }

            match self.count.compare_exchange_weak(
                count,
                count - 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(_) => continue,
            }
        }
    }

    /// Tries to acquire a permit without blocking.
    ///
    /// Returns `true` if a permit was acquired. Fails only after observing
    /// a count of zero; losing a compare-exchange race to another thread
    /// retries with the freshly observed count instead of giving up.
    pub fn try_acquire(&self) -> bool {
        let mut count = self.count.load(Ordering::Relaxed);
        loop {
            if count == 0 {
                return false;
            }
            // Strong compare_exchange: a spurious failure here would turn
            // into a spurious "no permits" result.
            match self.count.compare_exchange(
                count,
                count - 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(observed) => count = observed,
            }
        }
    }

    /// Acquires a permit, blocking no later than `deadline`.
    ///
    /// Returns `true` if a permit was acquired. The deadline is absolute,
    /// so re-entering the wait after a wake that lost the permit race does
    /// not extend it. A wait that expires makes one final non-blocking
    /// attempt: a release racing the expiry must not be dropped.
    pub fn acquire_deadline(&self, deadline: Instant) -> bool {
        loop {
            let count = self.count.load(Ordering::Acquire);

            if count == 0 {
                listener!(self.event => listener);
                if self.count.load(Ordering::Acquire) == 0
                    && listener.wait_deadline(deadline).is_none()
                {
                    return self.try_acquire();
                }
                continue;
            }

            match self.count.compare_exchange_weak(
                count,
                count - 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(_) => continue,
            }
        }
    }

    /// Releases a permit.
    ///
    /// Note: This method allows releasing more permits than the semaphore
    /// was initialized with. Callers are responsible for ensuring balanced
    /// acquire/release.
    pub fn release(&self) {
        self.count.fetch_add(1, Ordering::Release);
        self.event.notify(1);
    }

    /// Returns the current number of available permits.
    pub fn available_permits(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}
