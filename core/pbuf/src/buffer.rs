//! The operation contract shared by both buffer strategies.

use std::sync::Arc;
use std::time::Instant;

use crate::activity::ActivityProbe;
use crate::condvar_buffer::CondvarBuffer;
use crate::error::{OfferTimeoutError, PollTimeoutError, TryGetError, TryPutError};
use crate::semaphore_buffer::SemaphoreBuffer;

/// Fixed-capacity producer/consumer buffer shared across threads.
///
/// Both synchronization strategies implement this trait, so callers and
/// test harnesses can treat them interchangeably. Every successful insert
/// raises [`len`](ProtectedBuffer::len) by exactly one and every successful
/// extract lowers it by exactly one; failed non-blocking and timed calls
/// leave the buffer untouched.
pub trait ProtectedBuffer<T: Send>: Send + Sync {
    /// Inserts `item`, blocking until a slot is free.
    fn put(&self, item: T);

    /// Removes the oldest item, blocking until one is available.
    fn get(&self) -> T;

    /// Inserts `item` if a slot is free right now.
    fn try_put(&self, item: T) -> Result<(), TryPutError<T>>;

    /// Removes the oldest item if one is available right now.
    fn try_get(&self) -> Result<T, TryGetError>;

    /// Inserts `item`, blocking no later than `deadline`.
    ///
    /// The deadline is absolute: re-entering the wait after a spurious
    /// wake or a lost race does not extend it.
    fn offer(&self, item: T, deadline: Instant) -> Result<(), OfferTimeoutError<T>>;

    /// Removes the oldest item, blocking no later than `deadline`.
    fn poll(&self, deadline: Instant) -> Result<T, PollTimeoutError>;

    /// Number of items currently buffered.
    fn len(&self) -> usize;

    /// `true` when nothing is buffered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed slot count chosen at construction.
    fn capacity(&self) -> usize;
}

/// Synchronization strategy selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Mutex plus two condition variables with predicate re-check loops.
    Condvar,
    /// Two counting semaphores plus a mutex around the storage call.
    Semaphore,
}

/// Creates a buffer with the given strategy and capacity.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn bounded<T: Send + 'static>(
    strategy: Strategy,
    capacity: usize,
) -> Box<dyn ProtectedBuffer<T>> {
    match strategy {
        Strategy::Condvar => Box::new(CondvarBuffer::new(capacity)),
        Strategy::Semaphore => Box::new(SemaphoreBuffer::new(capacity)),
    }
}

/// Same as [`bounded`], with an injected activity probe.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn bounded_with_probe<T: Send + 'static>(
    strategy: Strategy,
    capacity: usize,
    probe: Arc<dyn ActivityProbe>,
) -> Box<dyn ProtectedBuffer<T>> {
    match strategy {
        Strategy::Condvar => Box::new(CondvarBuffer::with_probe(capacity, probe)),
        Strategy::Semaphore => Box::new(SemaphoreBuffer::with_probe(capacity, probe)),
    }
}
