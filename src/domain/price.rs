//! Integer spot price.

use core::fmt;

use super::{Amount, Decimals, Rounding};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// A spot price in quote smallest-units per one whole base unit.
///
/// With an 18-decimal base asset and a 6-decimal quote asset, a value
/// of `100_000_000` reads as "100 whole quote units per base unit".
/// The engine keeps prices integer-valued: they are derived from
/// integer reserves and a power-of-ten scale, never from floats.
///
/// # Examples
///
/// ```
/// use simdex::domain::{Amount, Decimals, Price};
///
/// let base_decimals = Decimals::new(18).expect("valid");
/// let price = Price::from_reserves(
///     Amount::new(10_000_000_000),                 // 10 000 quote units
///     Amount::new(100_000_000_000_000_000_000),    // 100 base units
///     base_decimals,
/// )
/// .expect("reserves are non-zero");
/// assert_eq!(price.get(), 100_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Price(u128);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Price` from a raw scaled value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying scaled value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `quote_reserve × 10^base_decimals / base_reserve`,
    /// rounding down.
    ///
    /// # Errors
    ///
    /// - [`DexError::ArithmeticOverflow`] if the scaled numerator does
    ///   not fit in `u128`.
    /// - [`DexError::InvariantViolation`] if `base_reserve` is zero;
    ///   callers must have validated initialization beforehand.
    pub fn from_reserves(
        quote_reserve: Amount,
        base_reserve: Amount,
        base_decimals: Decimals,
    ) -> Result<Self> {
        let value = quote_reserve.safe_mul_div(
            &Amount::new(base_decimals.unit()),
            &base_reserve,
            Rounding::Down,
        )?;
        Ok(Self(value.get()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
