//! Failure values for the non-blocking and timed buffer operations.
//!
//! Capacity exhaustion, emptiness, and deadline expiry are distinct types,
//! so a caller can tell "nothing happened, give up" apart from "nothing
//! happened, try again". Operations that reject an item hand it back inside
//! the error, so ownership of refused data never leaves the caller.

use std::error::Error;
use std::fmt;

/// Non-blocking insert found the buffer full.
///
/// Carries the rejected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryPutError<T>(pub T);

impl<T> TryPutError<T> {
    /// Recovers the rejected item.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("buffer full")
    }
}

impl<T: fmt::Debug> Error for TryPutError<T> {}

/// Non-blocking extract found the buffer empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryGetError;

impl fmt::Display for TryGetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("buffer empty")
    }
}

impl Error for TryGetError {}

/// Timed insert gave up: the deadline elapsed before a slot freed.
///
/// Carries the rejected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferTimeoutError<T>(pub T);

impl<T> OfferTimeoutError<T> {
    /// Recovers the rejected item.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for OfferTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deadline elapsed before a slot freed")
    }
}

impl<T: fmt::Debug> Error for OfferTimeoutError<T> {}

/// Timed extract gave up: the deadline elapsed before an item arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimeoutError;

impl fmt::Display for PollTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deadline elapsed before an item arrived")
    }
}

impl Error for PollTimeoutError {}
