//! Outcome of a settled trade.

use core::fmt;

use super::{AccountId, Amount, Price, Timestamp};
use crate::error::{DexError, Result};

/// The outcome of a settled trade: who traded, the direction, both
/// legs, and the post-trade price.
///
/// Records are transient — they are returned to the caller and emitted
/// as events, never retained as queryable state inside the engine.
/// Trade history is an external log's responsibility.
///
/// # Invariants
///
/// - `base_amount > 0` and `quote_amount > 0` — a settled trade always
///   moves value on both legs.
///
/// # Examples
///
/// ```
/// use simdex::domain::{AccountId, Amount, Price, Timestamp, TradeRecord};
///
/// let record = TradeRecord::new(
///     AccountId::from_bytes([7u8; 32]),
///     true,
///     Amount::new(1_000_000_000_000_000_000),
///     Amount::new(101_010_102),
///     Price::new(102_030_405),
///     Timestamp::new(1_700_000_000),
/// )
/// .expect("both legs are non-zero");
/// assert!(record.is_buy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TradeRecord {
    trader: AccountId,
    is_buy: bool,
    base_amount: Amount,
    quote_amount: Amount,
    price_after: Price,
    timestamp: Timestamp,
}

impl TradeRecord {
    /// Creates a new `TradeRecord` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAmount`] if either leg is zero.
    pub const fn new(
        trader: AccountId,
        is_buy: bool,
        base_amount: Amount,
        quote_amount: Amount,
        price_after: Price,
        timestamp: Timestamp,
    ) -> Result<Self> {
        if base_amount.is_zero() {
            return Err(DexError::InvalidAmount("base leg must be positive"));
        }
        if quote_amount.is_zero() {
            return Err(DexError::InvalidAmount("quote leg must be positive"));
        }
        Ok(Self {
            trader,
            is_buy,
            base_amount,
            quote_amount,
            price_after,
            timestamp,
        })
    }

    /// Returns the trading account.
    #[must_use]
    pub const fn trader(&self) -> AccountId {
        self.trader
    }

    /// Returns `true` for a buy (base out of the pool), `false` for a sell.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        self.is_buy
    }

    /// Returns the base-asset leg.
    pub const fn base_amount(&self) -> Amount {
        self.base_amount
    }

    /// Returns the quote-asset leg.
    pub const fn quote_amount(&self) -> Amount {
        self.quote_amount
    }

    /// Returns the pool price immediately after settlement.
    pub const fn price_after(&self) -> Price {
        self.price_after
    }

    /// Returns the settlement time supplied by the caller.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_buy { "buy" } else { "sell" };
        write!(
            f,
            "TradeRecord({side} base={} quote={} price={} at {})",
            self.base_amount, self.quote_amount, self.price_after, self.timestamp
        )
    }
}
