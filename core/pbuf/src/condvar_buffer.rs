//! Condition-variable buffer strategy.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};
use ringstore::RingStore;

use crate::activity::{ActivityProbe, BufferOp, SilentProbe};
use crate::buffer::ProtectedBuffer;
use crate::error::{OfferTimeoutError, PollTimeoutError, TryGetError, TryPutError};

/// Bounded buffer coordinated by a mutex and two condition variables.
///
/// The storage attempt itself is the wait predicate: an insert the ring
/// rejects means "full, wait on `not_full`"; an empty extraction means
/// "empty, wait on `not_empty`". Every wait sits in a loop, so a spurious
/// wake or a lost race for the freed slot sends the thread back to waiting
/// instead of letting it act on a stale precondition. One `notify_one` per
/// completed transition suffices: each success frees or fills exactly one
/// unit, and the loop absorbs wake-ups that arrive too late to win it.
pub struct CondvarBuffer<T> {
    ring: Mutex<RingStore<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
    probe: Arc<dyn ActivityProbe>,
}

impl<T: Send> CondvarBuffer<T> {
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
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
            probe,
        }
    }
}

impl<T: Send> ProtectedBuffer<T> for CondvarBuffer<T> {
    fn put(&self, mut item: T) {
        let mut ring = self.ring.lock();
        loop {
            match ring.put(item) {
                Ok(()) => break,
                Err(rejected) => {
                    item = rejected;
                    self.not_full.wait(&mut ring);
                }
            }
        }
        self.not_empty.notify_one();
        drop(ring);
        self.probe.record(BufferOp::Put, true);
    }

    fn get(&self) -> T {
        let mut ring = self.ring.lock();
        let item = loop {
            match ring.get() {
                Some(item) => break item,
                None => {
                    self.not_empty.wait(&mut ring);
                }
            }
        };
        self.not_full.notify_one();
        drop(ring);
        self.probe.record(BufferOp::Get, true);
        item
    }

    fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
        let mut ring = self.ring.lock();
        let res = ring.put(item);
        if res.is_ok() {
            self.not_empty.notify_one();
        }
        drop(ring);
        self.probe.record(BufferOp::TryPut, res.is_ok());
        res.map_err(TryPutError)
    }

    fn try_get(&self) -> Result<T, TryGetError> {
        let mut ring = self.ring.lock();
        let res = ring.get();
        if res.is_some() {
            self.not_full.notify_one();
        }
        drop(ring);
        self.probe.record(BufferOp::TryGet, res.is_some());
        res.ok_or(TryGetError)
    }

    fn offer(&self, mut item: T, deadline: Instant) -> Result<(), OfferTimeoutError<T>> {
        let mut ring = self.ring.lock();
        let mut timed_out = false;
        loop {
            match ring.put(item) {
                Ok(()) => {
                    self.not_empty.notify_one();
                    drop(ring);
                    self.probe.record(BufferOp::Offer, true);
                    return Ok(());
                }
                // The expired wait already granted one final attempt; a
                // slot freed by a notify racing the expiry was taken above.
                Err(rejected) if timed_out => {
                    drop(ring);
                    self.probe.record(BufferOp::Offer, false);
                    return Err(OfferTimeoutError(rejected));
                }
                Err(rejected) => {
                    item = rejected;
                    timed_out = self.not_full.wait_until(&mut ring, deadline).timed_out();
                }
            }
        }
    }

    fn poll(&self, deadline: Instant) -> Result<T, PollTimeoutError> {
        let mut ring = self.ring.lock();
        let mut timed_out = false;
        loop {
            match ring.get() {
                Some(item) => {
                    self.not_full.notify_one();
                    drop(ring);
                    self.probe.record(BufferOp::Poll, true);
                    return Ok(item);
                }
                None if timed_out => {
                    drop(ring);
                    self.probe.record(BufferOp::Poll, false);
                    return Err(PollTimeoutError);
                }
                None => {
                    timed_out = self.not_empty.wait_until(&mut ring, deadline).timed_out();
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.ring.lock().len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
