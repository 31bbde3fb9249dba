//! Constant-product liquidity pool.
//!
//! The pricing invariant is `reserve_base × reserve_quote ≥ k`, where
//! `k` is the reserve product fixed at initialization.  There is no
//! trading fee: quotes are derived directly from `k`, and rounding —
//! always in the pool's favor — is the only thing that can push the
//! product above it.
//!
//! # Quoting (buy: base out, quote in)
//!
//! 1. `remaining = reserve_base − base_out`
//! 2. `quote_in = ⌈k / remaining⌉ − reserve_quote`
//!
//! The ceiling rounds the amount owed to the pool upward, so truncation
//! can never leave the pool insolvent.  The sell direction mirrors this
//! with the payout floored.

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, Decimals, PoolSnapshot, Price, Rounding, Timestamp, TradeRecord,
};
use crate::error::{DexError, Result};
use crate::events::{Event, EventSink};
use crate::math::CheckedArithmetic;

/// A constant-product pool holding an 18-decimal simulated base asset
/// against a 6-decimal stable quote asset.
///
/// Created once in an uninitialized state; reserves are set exactly
/// once by the owner via [`initialize`](Self::initialize) and mutated
/// only by settled trades.  Reserve commits are all-or-nothing: a read
/// can never observe a partially-updated pair.
///
/// The pool's reserves are a cached view of balances the trading facade
/// moves on the actual ledgers within the same settlement call; the
/// pool itself never touches a ledger.
///
/// # Example
///
/// ```
/// use simdex::config::PoolConfig;
/// use simdex::domain::{AccountId, Amount, Decimals};
/// use simdex::pool::ConstantProductPool;
///
/// let owner = AccountId::from_bytes([1u8; 32]);
/// let mut pool = ConstantProductPool::new(owner);
/// let config = PoolConfig::new(
///     Amount::new(100_000_000_000_000_000_000), // 100 base units
///     Amount::new(10_000_000_000),              // 10 000 quote units
///     Decimals::new(18).expect("valid"),
/// )
/// .expect("valid config");
///
/// pool.initialize(owner, &config).expect("first initialization");
/// let price = pool.current_price().expect("initialized");
/// assert_eq!(price.get(), 100_000_000); // 100 quote units per base unit
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    owner: AccountId,
    reserve_base: Amount,
    reserve_quote: Amount,
    initial_k: Amount,
    base_decimals: Decimals,
    initialized: bool,
}

impl ConstantProductPool {
    /// Creates an uninitialized pool owned by `owner`.
    #[must_use]
    pub const fn new(owner: AccountId) -> Self {
        Self {
            owner,
            reserve_base: Amount::ZERO,
            reserve_quote: Amount::ZERO,
            initial_k: Amount::ZERO,
            base_decimals: Decimals::ZERO,
            initialized: false,
        }
    }

    /// Returns the owning identity.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Returns `true` once reserves have been set.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the current base-asset reserve.
    pub const fn reserve_base(&self) -> Amount {
        self.reserve_base
    }

    /// Returns the current quote-asset reserve.
    pub const fn reserve_quote(&self) -> Amount {
        self.reserve_quote
    }

    /// Sets the reserves and fixes the invariant product.  Succeeds
    /// exactly once per pool instance; owner-only.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `caller` is not the owner.
    /// - [`DexError::AlreadyInitialized`] on any call after the first.
    /// - [`DexError::InvalidAmount`] if either configured reserve is zero.
    /// - [`DexError::ArithmeticOverflow`] if the reserve product does
    ///   not fit in `u128`.
    pub fn initialize(&mut self, caller: AccountId, config: &PoolConfig) -> Result<()> {
        if caller != self.owner {
            return Err(DexError::Unauthorized);
        }
        if self.initialized {
            return Err(DexError::AlreadyInitialized);
        }
        config.validate()?;

        let k = config.base_reserve().safe_mul(&config.quote_reserve())?;
        self.reserve_base = config.base_reserve();
        self.reserve_quote = config.quote_reserve();
        self.initial_k = k;
        self.base_decimals = config.base_decimals();
        self.initialized = true;
        Ok(())
    }

    /// Returns the spot price in quote smallest-units per one whole
    /// base unit.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotInitialized`] while reserves are unset;
    /// the zero-reserve division is guarded here, never left to a
    /// runtime trap.
    pub fn current_price(&self) -> Result<Price> {
        self.ensure_initialized()?;
        Price::from_reserves(self.reserve_quote, self.reserve_base, self.base_decimals)
    }

    /// Returns the quote needed to take `base_out` units of the base
    /// asset out of the pool while holding the invariant.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] while reserves are unset.
    /// - [`DexError::InvalidAmount`] if `base_out` is zero.
    /// - [`DexError::InsufficientLiquidity`] if `base_out` would drain
    ///   or exceed the base reserve.
    pub fn calculate_buy_amount(&self, base_out: Amount) -> Result<Amount> {
        self.ensure_initialized()?;
        if base_out.is_zero() {
            return Err(DexError::InvalidAmount("zero trade amount"));
        }
        let Some(remaining) = self.reserve_base.checked_sub(&base_out) else {
            return Err(DexError::InsufficientLiquidity);
        };
        if remaining.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        let required_quote = self.initial_k.safe_div(&remaining, Rounding::Up)?;
        // Rounding accretion can leave the current quote reserve already
        // above the requirement; the cost then saturates at zero.
        Ok(required_quote
            .checked_sub(&self.reserve_quote)
            .unwrap_or(Amount::ZERO))
    }

    /// Returns the quote paid out for adding `base_in` units of the
    /// base asset to the pool.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] while reserves are unset.
    /// - [`DexError::InvalidAmount`] if `base_in` is zero.
    /// - [`DexError::ArithmeticOverflow`] if the grown base reserve
    ///   does not fit in `u128`.
    pub fn calculate_sell_amount(&self, base_in: Amount) -> Result<Amount> {
        self.ensure_initialized()?;
        if base_in.is_zero() {
            return Err(DexError::InvalidAmount("zero trade amount"));
        }
        let grown = self.reserve_base.safe_add(&base_in)?;
        // Ceiling on the quote the pool keeps floors the payout.
        let retained = self.initial_k.safe_div(&grown, Rounding::Up)?;
        Ok(self
            .reserve_quote
            .checked_sub(&retained)
            .unwrap_or(Amount::ZERO))
    }

    /// Applies a trade to the reserves, re-checks the invariant, and
    /// emits [`Event::TradeExecuted`].
    ///
    /// Crate-internal: only the trading facade settles, after it has
    /// validated and executed the ledger legs.  Both reserves are
    /// computed before either is written, so any failure leaves the
    /// prior state fully intact.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] while reserves are unset.
    /// - [`DexError::InvalidAmount`] if either leg is zero.
    /// - [`DexError::InsufficientLiquidity`] if the trade would drain a
    ///   reserve.
    /// - [`DexError::InvariantViolation`] if the post-trade product
    ///   falls below the initialization product — a defect upstream
    ///   validation should have made impossible.
    pub(crate) fn settle_trade<S: EventSink>(
        &mut self,
        trader: AccountId,
        is_buy: bool,
        base_amount: Amount,
        quote_amount: Amount,
        now: Timestamp,
        sink: &S,
    ) -> Result<TradeRecord> {
        self.ensure_initialized()?;
        if base_amount.is_zero() || quote_amount.is_zero() {
            return Err(DexError::InvalidAmount("zero settlement leg"));
        }

        let (new_base, new_quote) = if is_buy {
            let Some(new_base) = self.reserve_base.checked_sub(&base_amount) else {
                return Err(DexError::InsufficientLiquidity);
            };
            if new_base.is_zero() {
                return Err(DexError::InsufficientLiquidity);
            }
            (new_base, self.reserve_quote.safe_add(&quote_amount)?)
        } else {
            let Some(new_quote) = self.reserve_quote.checked_sub(&quote_amount) else {
                return Err(DexError::InsufficientLiquidity);
            };
            (self.reserve_base.safe_add(&base_amount)?, new_quote)
        };

        let product = new_base.safe_mul(&new_quote)?;
        if product < self.initial_k {
            return Err(DexError::InvariantViolation(
                "reserve product fell below the initialization product",
            ));
        }

        // Everything fallible happens before the commit, so the write
        // below is all-or-nothing.
        let price_after = Price::from_reserves(new_quote, new_base, self.base_decimals)?;
        let record = TradeRecord::new(trader, is_buy, base_amount, quote_amount, price_after, now)?;

        self.reserve_base = new_base;
        self.reserve_quote = new_quote;
        sink.record(Event::TradeExecuted {
            trader,
            is_buy,
            base_amount,
            quote_amount,
            price_after,
            timestamp: now,
        });
        Ok(record)
    }

    /// Returns a point-in-time snapshot: both reserves, the current
    /// reserve product, and the aggregate liquidity figure
    /// `isqrt(reserve_base × reserve_quote)`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::NotInitialized`] while reserves are unset.
    pub fn snapshot(&self) -> Result<PoolSnapshot> {
        self.ensure_initialized()?;
        let product = self.reserve_base.safe_mul(&self.reserve_quote)?;
        let liquidity = Amount::new(Self::isqrt(product.get()));
        Ok(PoolSnapshot::new(
            self.reserve_base,
            self.reserve_quote,
            product,
            liquidity,
        ))
    }

    const fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(DexError::NotInitialized);
        }
        Ok(())
    }

    /// Integer square root via Newton's method.
    fn isqrt(n: u128) -> u128 {
        if n == 0 {
            return 0;
        }
        let mut x = n;
        let mut y = x.div_ceil(2);
        while y < x {
            x = y;
            y = (x + n / x) / 2;
        }
        x
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::events::MemoryLog;

    // -- helpers --------------------------------------------------------------

    /// 100 base units at 18 decimals.
    const BASE_RESERVE: u128 = 100_000_000_000_000_000_000;
    /// 10 000 quote units at 6 decimals.
    const QUOTE_RESERVE: u128 = 10_000_000_000;
    /// One whole base unit.
    const ONE_BASE: u128 = 1_000_000_000_000_000_000;

    fn owner() -> AccountId {
        AccountId::from_bytes([1u8; 32])
    }

    fn trader() -> AccountId {
        AccountId::from_bytes([7u8; 32])
    }

    fn d18() -> Decimals {
        let Ok(d) = Decimals::new(18) else {
            panic!("valid decimals");
        };
        d
    }

    fn config(base: u128, quote: u128) -> PoolConfig {
        let Ok(cfg) = PoolConfig::new(Amount::new(base), Amount::new(quote), d18()) else {
            panic!("valid config");
        };
        cfg
    }

    fn make_pool() -> ConstantProductPool {
        let mut pool = ConstantProductPool::new(owner());
        let Ok(()) = pool.initialize(owner(), &config(BASE_RESERVE, QUOTE_RESERVE)) else {
            panic!("initialization should succeed");
        };
        pool
    }

    // -- initialize -----------------------------------------------------------

    #[test]
    fn initialize_sets_reserves() {
        let pool = make_pool();
        assert!(pool.is_initialized());
        assert_eq!(pool.reserve_base(), Amount::new(BASE_RESERVE));
        assert_eq!(pool.reserve_quote(), Amount::new(QUOTE_RESERVE));
    }

    #[test]
    fn initialize_twice_rejected() {
        let mut pool = make_pool();
        let result = pool.initialize(owner(), &config(1, 1));
        assert_eq!(result, Err(DexError::AlreadyInitialized));
    }

    #[test]
    fn initialize_non_owner_rejected() {
        let mut pool = ConstantProductPool::new(owner());
        let result = pool.initialize(trader(), &config(BASE_RESERVE, QUOTE_RESERVE));
        assert_eq!(result, Err(DexError::Unauthorized));
        assert!(!pool.is_initialized());
    }

    #[test]
    fn initialize_overflowing_product_rejected() {
        let mut pool = ConstantProductPool::new(owner());
        let result = pool.initialize(owner(), &config(u128::MAX, 2));
        assert!(matches!(result, Err(DexError::ArithmeticOverflow(_))));
        assert!(!pool.is_initialized());
    }

    // -- current_price --------------------------------------------------------

    #[test]
    fn price_before_initialization_rejected() {
        let pool = ConstantProductPool::new(owner());
        assert_eq!(pool.current_price(), Err(DexError::NotInitialized));
    }

    #[test]
    fn initial_price_is_quote_per_whole_base() {
        let pool = make_pool();
        let Ok(price) = pool.current_price() else {
            panic!("expected Ok");
        };
        // 10 000 quote over 100 base = 100 quote units per base unit.
        assert_eq!(price.get(), 100_000_000);
    }

    // -- calculate_buy_amount -------------------------------------------------

    #[test]
    fn buy_quote_matches_invariant_formula() {
        let pool = make_pool();
        let Ok(quote_in) = pool.calculate_buy_amount(Amount::new(ONE_BASE)) else {
            panic!("expected Ok");
        };
        // ceil(1e30 / 99e18) - 1e10 = 10101010102 - 10000000000
        assert_eq!(quote_in, Amount::new(101_010_102));
    }

    #[test]
    fn buy_zero_rejected() {
        let pool = make_pool();
        let result = pool.calculate_buy_amount(Amount::ZERO);
        assert!(matches!(result, Err(DexError::InvalidAmount(_))));
    }

    #[test]
    fn buy_entire_reserve_rejected() {
        let pool = make_pool();
        let result = pool.calculate_buy_amount(Amount::new(BASE_RESERVE));
        assert_eq!(result, Err(DexError::InsufficientLiquidity));
    }

    #[test]
    fn buy_more_than_reserve_rejected() {
        let pool = make_pool();
        let result = pool.calculate_buy_amount(Amount::new(BASE_RESERVE + 1));
        assert_eq!(result, Err(DexError::InsufficientLiquidity));
    }

    #[test]
    fn buy_before_initialization_rejected() {
        let pool = ConstantProductPool::new(owner());
        assert_eq!(
            pool.calculate_buy_amount(Amount::new(1)),
            Err(DexError::NotInitialized)
        );
    }

    #[test]
    fn buy_quote_grows_with_size() {
        let pool = make_pool();
        let Ok(small) = pool.calculate_buy_amount(Amount::new(ONE_BASE)) else {
            panic!("expected Ok");
        };
        let Ok(large) = pool.calculate_buy_amount(Amount::new(10 * ONE_BASE)) else {
            panic!("expected Ok");
        };
        // Ten times the base costs more than ten times the quote: slippage.
        let Some(ten_small) = small.checked_mul(&Amount::new(10)) else {
            panic!("no overflow");
        };
        assert!(large > ten_small);
    }

    // -- calculate_sell_amount ------------------------------------------------

    #[test]
    fn sell_payout_matches_invariant_formula() {
        let pool = make_pool();
        let Ok(quote_out) = pool.calculate_sell_amount(Amount::new(ONE_BASE)) else {
            panic!("expected Ok");
        };
        // 1e10 - ceil(1e30 / 101e18) = 10000000000 - 9900990100
        assert_eq!(quote_out, Amount::new(99_009_900));
    }

    #[test]
    fn sell_zero_rejected() {
        let pool = make_pool();
        let result = pool.calculate_sell_amount(Amount::ZERO);
        assert!(matches!(result, Err(DexError::InvalidAmount(_))));
    }

    #[test]
    fn sell_payout_grows_with_size() {
        let pool = make_pool();
        let Ok(one) = pool.calculate_sell_amount(Amount::new(ONE_BASE)) else {
            panic!("expected Ok");
        };
        let Ok(two) = pool.calculate_sell_amount(Amount::new(2 * ONE_BASE)) else {
            panic!("expected Ok");
        };
        assert!(two > one);
    }

    #[test]
    fn sell_pays_less_than_buy_costs() {
        // The spread from rounding always favors the pool.
        let pool = make_pool();
        let amount = Amount::new(ONE_BASE);
        let Ok(buy_cost) = pool.calculate_buy_amount(amount) else {
            panic!("expected Ok");
        };
        let Ok(sell_payout) = pool.calculate_sell_amount(amount) else {
            panic!("expected Ok");
        };
        assert!(sell_payout < buy_cost);
    }

    // -- settle_trade ---------------------------------------------------------

    #[test]
    fn settle_buy_updates_reserves_and_emits() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let Ok(quote_in) = pool.calculate_buy_amount(Amount::new(ONE_BASE)) else {
            panic!("expected Ok");
        };

        let Ok(record) = pool.settle_trade(
            trader(),
            true,
            Amount::new(ONE_BASE),
            quote_in,
            Timestamp::new(99),
            &log,
        ) else {
            panic!("settlement should succeed");
        };

        assert_eq!(pool.reserve_base(), Amount::new(BASE_RESERVE - ONE_BASE));
        assert_eq!(
            pool.reserve_quote(),
            Amount::new(QUOTE_RESERVE + 101_010_102)
        );
        assert_eq!(record.quote_amount(), quote_in);
        // New price: floor(10101010102 / 99) scaled = 102030405.
        assert_eq!(record.price_after(), Price::new(102_030_405));
        assert_eq!(
            log.last(),
            Some(Event::TradeExecuted {
                trader: trader(),
                is_buy: true,
                base_amount: Amount::new(ONE_BASE),
                quote_amount: quote_in,
                price_after: Price::new(102_030_405),
                timestamp: Timestamp::new(99),
            })
        );
    }

    #[test]
    fn settle_sell_updates_reserves() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let Ok(quote_out) = pool.calculate_sell_amount(Amount::new(ONE_BASE)) else {
            panic!("expected Ok");
        };

        let Ok(record) = pool.settle_trade(
            trader(),
            false,
            Amount::new(ONE_BASE),
            quote_out,
            Timestamp::new(100),
            &log,
        ) else {
            panic!("settlement should succeed");
        };

        assert_eq!(pool.reserve_base(), Amount::new(BASE_RESERVE + ONE_BASE));
        assert_eq!(
            pool.reserve_quote(),
            Amount::new(QUOTE_RESERVE - 99_009_900)
        );
        assert!(!record.is_buy());
    }

    #[test]
    fn settle_preserves_invariant_floor() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let Some(k0) = Amount::new(BASE_RESERVE).checked_mul(&Amount::new(QUOTE_RESERVE)) else {
            panic!("product fits u128");
        };

        for step in 1..=5u64 {
            let amount = Amount::new(u128::from(step) * ONE_BASE / 3 + 1);
            let Ok(quote_in) = pool.calculate_buy_amount(amount) else {
                panic!("quote should succeed");
            };
            if quote_in.is_zero() {
                continue;
            }
            let Ok(_) = pool.settle_trade(
                trader(),
                true,
                amount,
                quote_in,
                Timestamp::new(step),
                &log,
            ) else {
                panic!("settlement should succeed");
            };
            let Some(product) = pool.reserve_base().checked_mul(&pool.reserve_quote()) else {
                panic!("product fits u128");
            };
            assert!(product >= k0);
        }
    }

    #[test]
    fn settle_underpaid_buy_is_fatal() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let before = (pool.reserve_base(), pool.reserve_quote());

        // One quote smallest-unit for a whole base unit: the product
        // would collapse, which settlement must refuse.
        let result = pool.settle_trade(
            trader(),
            true,
            Amount::new(ONE_BASE),
            Amount::new(1),
            Timestamp::ZERO,
            &log,
        );

        assert!(matches!(result, Err(DexError::InvariantViolation(_))));
        assert_eq!((pool.reserve_base(), pool.reserve_quote()), before);
        assert!(log.is_empty());
    }

    #[test]
    fn settle_draining_buy_rejected() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let result = pool.settle_trade(
            trader(),
            true,
            Amount::new(BASE_RESERVE),
            Amount::new(QUOTE_RESERVE),
            Timestamp::ZERO,
            &log,
        );
        assert_eq!(result, Err(DexError::InsufficientLiquidity));
    }

    #[test]
    fn settle_overdrawn_sell_rejected() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let result = pool.settle_trade(
            trader(),
            false,
            Amount::new(ONE_BASE),
            Amount::new(QUOTE_RESERVE + 1),
            Timestamp::ZERO,
            &log,
        );
        assert_eq!(result, Err(DexError::InsufficientLiquidity));
    }

    #[test]
    fn settle_zero_leg_rejected() {
        let mut pool = make_pool();
        let log = MemoryLog::new();
        let result = pool.settle_trade(
            trader(),
            true,
            Amount::ZERO,
            Amount::new(1),
            Timestamp::ZERO,
            &log,
        );
        assert!(matches!(result, Err(DexError::InvalidAmount(_))));
    }

    // -- snapshot -------------------------------------------------------------

    #[test]
    fn snapshot_reports_consistent_state() {
        let pool = make_pool();
        let Ok(snap) = pool.snapshot() else {
            panic!("expected Ok");
        };
        assert_eq!(snap.reserve_base(), Amount::new(BASE_RESERVE));
        assert_eq!(snap.reserve_quote(), Amount::new(QUOTE_RESERVE));
        // k = 1e20 * 1e10 = 1e30; isqrt = 1e15.
        assert_eq!(
            snap.invariant(),
            Amount::new(1_000_000_000_000_000_000_000_000_000_000)
        );
        assert_eq!(snap.total_liquidity(), Amount::new(1_000_000_000_000_000));
    }

    #[test]
    fn snapshot_before_initialization_rejected() {
        let pool = ConstantProductPool::new(owner());
        assert!(matches!(pool.snapshot(), Err(DexError::NotInitialized)));
    }

    // -- isqrt ----------------------------------------------------------------

    #[test]
    fn isqrt_exact_squares() {
        assert_eq!(ConstantProductPool::isqrt(0), 0);
        assert_eq!(ConstantProductPool::isqrt(1), 1);
        assert_eq!(ConstantProductPool::isqrt(144), 12);
        assert_eq!(
            ConstantProductPool::isqrt(1_000_000_000_000_000_000_000_000_000_000),
            1_000_000_000_000_000
        );
    }

    #[test]
    fn isqrt_floors_between_squares() {
        assert_eq!(ConstantProductPool::isqrt(2), 1);
        assert_eq!(ConstantProductPool::isqrt(143), 11);
        assert_eq!(ConstantProductPool::isqrt(145), 12);
    }
}
