//! Trade timestamps.

use core::fmt;

/// A point in time, in seconds, supplied by the caller.
///
/// The engine never reads a system clock: the external serializing
/// authority that delivers mutating calls also supplies the time each
/// trade settles at, which keeps every run deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch origin.
    pub const ZERO: Self = Self(0);

    /// Creates a `Timestamp` from raw seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw seconds value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
