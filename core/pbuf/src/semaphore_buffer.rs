//! Counting-semaphore buffer strategy.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use ringstore::RingStore;

use crate::activity::{ActivityProbe, BufferOp, SilentProbe};
use crate::buffer::ProtectedBuffer;
use crate::error::{OfferTimeoutError, PollTimeoutError, TryGetError, TryPutError};
use crate::semaphore::Semaphore;

/// Bounded buffer coordinated by two counting semaphores.
///
/// `empty_slots` counts free slots and `full_slots` counts stored items,
/// so the permit counts *are* the availability state: a successful
/// acquisition atomically reserves one unit for the caller, and no
/// predicate re-check happens after waking. The mutex serializes only the
/// storage call itself. The complementary permit is released after the
/// mutex is dropped, so a woken thread is not woken into lock contention.
pub struct SemaphoreBuffer<T> {
    ring: Mutex<RingStore<T>>,
    empty_slots: Semaphore,
    full_slots: Semaphore,
    capacity: usize,
    probe: Arc<dyn ActivityProbe>,
}

impl<T: Send> SemaphoreBuffer<T> {
    /// Creates a buffer with room for `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_probe(capacity, Arc::new(SilentProbe))
    }

    /// Creates a buffer that reports completed operations to `probe`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_probe(capacity: usize, probe: Arc<dyn ActivityProbe>) -> Self {
        Self {
            ring: Mutex::new(RingStore::new(capacity)),
            empty_slots: Semaphore::new(capacity),
            full_slots: Semaphore::new(0),
            capacity,
            probe,
        }
    }

    /// Stores `item`. The caller must hold one `empty_slots` permit.
    fn store(&self, item: T) {
        let mut ring = self.ring.lock();
        let res = ring.put(item);
        assert!(res.is_ok(), "held a slot permit but the ring is full");
        drop(ring);
        self.full_slots.release();
    }

    /// Removes the oldest item. The caller must hold one `full_slots` permit.
    fn take(&self) -> T {
        let mut ring = self.ring.lock();
        let item = match ring.get() {
            Some(item) => item,
            None => unreachable!("held an item permit but the ring is empty"),
        };
        drop(ring);
        self.empty_slots.release();
        item
    }
}

impl<T: Send> ProtectedBuffer<T> for SemaphoreBuffer<T> {
    fn put(&self, item: T) {
        self.empty_slots.acquire();
        self.store(item);
        self.probe.record(BufferOp::Put, true);
    }

    fn get(&self) -> T {
        self.full_slots.acquire();
        let item = self.take();
        self.probe.record(BufferOp::Get, true);
        item
    }

    fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
        if !self.empty_slots.try_acquire() {
            self.probe.record(BufferOp::TryPut, false);
            return Err(TryPutError(item));
        }
        self.store(item);
        self.probe.record(BufferOp::TryPut, true);
        Ok(())
    }

    fn try_get(&self) -> Result<T, TryGetError> {
        if !self.full_slots.try_acquire() {
            self.probe.record(BufferOp::TryGet, false);
            return Err(TryGetError);
        }
        let item = self.take();
        self.probe.record(BufferOp::TryGet, true);
        Ok(item)
    }

    fn offer(&self, item: T, deadline: Instant) -> Result<(), OfferTimeoutError<T>> {
        if !self.empty_slots.acquire_deadline(deadline) {
            self.probe.record(BufferOp::Offer, false);
            return Err(OfferTimeoutError(item));
        }
        self.store(item);
        self.probe.record(BufferOp::Offer, true);
        Ok(())
    }

    fn poll(&self, deadline: Instant) -> Result<T, PollTimeoutError> {
        if !self.full_slots.acquire_deadline(deadline) {
            self.probe.record(BufferOp::Poll, false);
            return Err(PollTimeoutError);
        }
        let item = self.take();
        self.probe.record(BufferOp::Poll, true);
        Ok(item)
    }

    fn len(&self) -> usize {
        self.ring.lock().len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
