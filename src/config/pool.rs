//! Configuration for the constant-product liquidity pool.

use crate::domain::{Amount, Decimals};
use crate::error::{DexError, Result};

/// Configuration for initializing the liquidity pool.
///
/// Defines the immutable initialization parameters: the starting
/// reserves of both assets and the base-asset decimals.
///
/// # Derived Values
///
/// - Initialization product: `k = base_reserve × quote_reserve`
/// - Initial price: `quote_reserve × 10^base_decimals / base_reserve`
///
/// # Validation
///
/// Both reserves must be non-zero; a pool with an empty side cannot
/// quote a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    base_reserve: Amount,
    quote_reserve: Amount,
    base_decimals: Decimals,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAmount`] if either reserve is zero.
    pub fn new(
        base_reserve: Amount,
        quote_reserve: Amount,
        base_decimals: Decimals,
    ) -> Result<Self> {
        let config = Self {
            base_reserve,
            quote_reserve,
            base_decimals,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAmount`] if either reserve is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_reserve.is_zero() {
            return Err(DexError::InvalidAmount("zero initial base reserve"));
        }
        if self.quote_reserve.is_zero() {
            return Err(DexError::InvalidAmount("zero initial quote reserve"));
        }
        Ok(())
    }

    /// Returns the initial base-asset reserve.
    pub const fn base_reserve(&self) -> Amount {
        self.base_reserve
    }

    /// Returns the initial quote-asset reserve.
    pub const fn quote_reserve(&self) -> Amount {
        self.quote_reserve
    }

    /// Returns the base-asset decimals.
    #[must_use]
    pub const fn base_decimals(&self) -> Decimals {
        self.base_decimals
    }
}
