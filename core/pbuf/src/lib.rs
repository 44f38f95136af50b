// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Protected bounded buffer.
//!
//! This crate wraps the non-thread-safe [`ringstore::RingStore`] in a
//! synchronization protocol so any number of producer and consumer threads
//! can share one fixed-capacity FIFO buffer. Two interchangeable strategies
//! implement the same [`ProtectedBuffer`] contract:
//!
//! - [`CondvarBuffer`]: one mutex guarding the storage plus two condition
//!   variables (`not_full`, `not_empty`); every waiter re-checks its
//!   predicate in a loop on wake.
//! - [`SemaphoreBuffer`]: two counting [`Semaphore`]s whose permit counts
//!   mirror free slots and stored items, plus a mutex that serializes only
//!   the storage call itself; a taken permit is already a reservation, so
//!   no re-check happens after waking.
//!
//! Each strategy offers the same six operations: blocking `put`/`get`,
//! non-blocking `try_put`/`try_get`, and `offer`/`poll` bounded by an
//! absolute deadline. Completed operations are reported to an injected
//! [`ActivityProbe`], which defaults to discarding everything.
//!
//! # Examples
//!
//! ## Producer and consumer threads
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use pbuf::{bounded, ProtectedBuffer, Strategy};
//!
//! let buf: Arc<dyn ProtectedBuffer<u32>> = Arc::from(bounded::<u32>(Strategy::Condvar, 4));
//! let consumer = {
//!     let buf = Arc::clone(&buf);
//!     thread::spawn(move || buf.get())
//! };
//! buf.put(7);
//! assert_eq!(consumer.join().unwrap(), 7);
//! ```
//!
//! ## Non-blocking and timed operations
//! ```
//! use std::time::{Duration, Instant};
//!
//! use pbuf::{CondvarBuffer, ProtectedBuffer};
//!
//! let buf = CondvarBuffer::new(1);
//! assert!(buf.try_put(1).is_ok());
//! // Full: the rejected item rides back in the error.
//! assert_eq!(buf.try_put(2).unwrap_err().into_inner(), 2);
//! assert_eq!(buf.get(), 1);
//! // Empty: a timed extraction gives up at the deadline.
//! assert!(buf.poll(Instant::now() + Duration::from_millis(10)).is_err());
//! ```
//!
//! ## Counting semaphore
//! ```
//! use pbuf::Semaphore;
//!
//! static SEM: Semaphore = Semaphore::new(3);
//!
//! fn task() {
//!     SEM.acquire();
//!     // do work with the permit
//!     SEM.release();
//! }
//! ```

mod activity;
mod buffer;
mod condvar_buffer;
mod error;
mod semaphore;
mod semaphore_buffer;

pub use self::{
    activity::{ActivityProbe, BufferOp, LogProbe, SilentProbe},
    buffer::{ProtectedBuffer, Strategy, bounded, bounded_with_probe},
    condvar_buffer::CondvarBuffer,
    error::{OfferTimeoutError, PollTimeoutError, TryGetError, TryPutError},
    semaphore::Semaphore,
    semaphore_buffer::SemaphoreBuffer,
};
