//! Checked arithmetic trait for domain wrapper types.

use crate::domain::{Amount, Rounding};
use crate::error::{DexError, Result};

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns `Result<Self, DexError>` with a specific error
/// variant, so callers can distinguish an overflow from a division that
/// prior validation should have excluded.
///
/// # Contract
///
/// - **No panics** — all error conditions produce `Err`.
/// - **No saturation** — saturation hides bugs; errors propagate instead.
/// - Implementations must delegate to the inner type's checked operations.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the result exceeds
    /// the representable range.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the result exceeds
    /// the representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvariantViolation`] if `other` is zero —
    /// divisors are validated before any formula divides by them, so a
    /// zero here is a defect, not an input error.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self>;

    /// Computes `self × mul / div` with the intermediate product checked.
    ///
    /// This is the widened multiply-then-divide shape behind the price
    /// and quoting formulas.
    ///
    /// # Errors
    ///
    /// - [`DexError::ArithmeticOverflow`] if the product overflows.
    /// - [`DexError::InvariantViolation`] if `div` is zero.
    fn safe_mul_div(&self, mul: &Self, div: &Self, rounding: Rounding) -> Result<Self> {
        self.safe_mul(mul)?.safe_div(div, rounding)
    }
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(DexError::ArithmeticOverflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(DexError::ArithmeticOverflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self> {
        self.checked_mul(other)
            .ok_or(DexError::ArithmeticOverflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self> {
        self.checked_div(other, rounding)
            .ok_or(DexError::InvariantViolation("division by zero"))
    }
}
