//! Asset decimal places.

use crate::error::{DexError, Result};

/// Maximum allowed decimal places.
const MAX_DECIMALS: u8 = 18;

/// Represents the number of decimal places for an asset amount.
///
/// Valid range is `0..=18`.  The simulated base asset carries 18
/// decimals and the stable quote asset carries 6, matching the common
/// blockchain convention; construction is validated so values above 18
/// are rejected.
///
/// # Examples
///
/// ```
/// use simdex::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.unit(), 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAmount`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(DexError::InvalidAmount("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals`, the smallest-unit count of one whole unit.
    ///
    /// This is the scale factor the pool uses to express prices in
    /// quote smallest-units per one whole base unit.
    #[must_use]
    pub const fn unit(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }

    /// Converts a whole-unit amount to the smallest raw unit.
    ///
    /// For example, with `decimals = 6`, an input of `1` yields `1_000_000`.
    ///
    /// This operation cannot overflow because `u64::MAX * 10^18 < u128::MAX`.
    #[must_use]
    pub const fn scale_up(&self, whole: u64) -> u128 {
        (whole as u128) * self.unit()
    }

    /// Converts raw units back to a whole-unit amount, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the result does not
    /// fit in `u64`.
    pub const fn scale_down(&self, raw: u128) -> Result<u64> {
        let result = raw / self.unit();
        if result > u64::MAX as u128 {
            return Err(DexError::ArithmeticOverflow("scale_down result exceeds u64"));
        }
        Ok(result as u64)
    }
}
