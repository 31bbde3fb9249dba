//! Trading facade over the pool and the asset ledgers.
//!
//! [`TradingDesk`] orchestrates end-user buys and sells: it quotes
//! against the pool, validates every ledger precondition up front,
//! executes both ledger legs, and settles the reserves last — so the
//! only step that can mutate pool state runs after everything that
//! could legitimately fail has already succeeded.  A reentrancy guard
//! is held for the full duration of every mutating call.

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, PoolSnapshot, Price, Timestamp, TradeRecord};
use crate::error::{DexError, Result};
use crate::events::{Event, EventSink};
use crate::guard::CallGuard;
use crate::ledger::FungibleLedger;
use crate::pool::ConstantProductPool;

/// The buy/sell facade for the simulated asset.
///
/// The desk owns the pool and holds shared references to the two asset
/// ledgers and the event sink.  `pool_account` is the identity that
/// custodies the pool's balances on both ledgers: buyers pre-approve
/// quote spending to it, and the desk moves base out of it.
///
/// Every mutating call either completes in full — both ledger legs
/// moved, reserves settled, events emitted — or aborts with no visible
/// side effect.  If a nonconforming ledger fails *after* a leg has
/// moved, the desk puts the moved leg back before surfacing the error.
///
/// # Example
///
/// ```
/// use simdex::config::PoolConfig;
/// use simdex::domain::{AccountId, Amount, Decimals, Timestamp};
/// use simdex::events::MemoryLog;
/// use simdex::ledger::{FungibleLedger, MemoryLedger};
/// use simdex::pool::ConstantProductPool;
/// use simdex::trading::TradingDesk;
///
/// let owner = AccountId::from_bytes([1u8; 32]);
/// let pool_account = AccountId::from_bytes([2u8; 32]);
/// let trader = AccountId::from_bytes([3u8; 32]);
///
/// let base = MemoryLedger::new();
/// let quote = MemoryLedger::new();
/// let log = MemoryLog::new();
///
/// // Setup: fund the pool account and the trader.
/// let base_reserve = Amount::new(100_000_000_000_000_000_000);
/// let quote_reserve = Amount::new(10_000_000_000);
/// base.mint(pool_account, base_reserve).expect("mint");
/// quote.mint(pool_account, quote_reserve).expect("mint");
/// quote.mint(trader, Amount::new(1_000_000_000)).expect("mint");
///
/// let mut pool = ConstantProductPool::new(owner);
/// let config = PoolConfig::new(base_reserve, quote_reserve, Decimals::new(18).expect("valid"))
///     .expect("valid config");
/// pool.initialize(owner, &config).expect("initialize");
///
/// let mut desk = TradingDesk::new(pool, pool_account, &base, &quote, &log);
///
/// // Buy one whole base unit.
/// let one_base = Amount::new(1_000_000_000_000_000_000);
/// quote.approve(trader, pool_account, Amount::new(200_000_000)).expect("approve");
/// let record = desk.buy(trader, one_base, Timestamp::new(1)).expect("buy");
///
/// assert_eq!(base.balance_of(trader), one_base);
/// assert_eq!(record.quote_amount(), Amount::new(101_010_102));
/// ```
#[derive(Debug)]
pub struct TradingDesk<'a, B, Q, S>
where
    B: FungibleLedger,
    Q: FungibleLedger,
    S: EventSink,
{
    pool: ConstantProductPool,
    pool_account: AccountId,
    base: &'a B,
    quote: &'a Q,
    sink: &'a S,
    guard: CallGuard,
}

impl<'a, B, Q, S> TradingDesk<'a, B, Q, S>
where
    B: FungibleLedger,
    Q: FungibleLedger,
    S: EventSink,
{
    /// Creates a desk over an (initialized or not) pool and its ledgers.
    pub fn new(
        pool: ConstantProductPool,
        pool_account: AccountId,
        base: &'a B,
        quote: &'a Q,
        sink: &'a S,
    ) -> Self {
        Self {
            pool,
            pool_account,
            base,
            quote,
            sink,
            guard: CallGuard::new(),
        }
    }

    /// Returns the pool's custodial identity on both ledgers.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns a view of the pool.
    #[must_use]
    pub const fn pool(&self) -> &ConstantProductPool {
        &self.pool
    }

    /// Initializes the pool through the desk; passes `caller` through
    /// to the pool's owner check unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstantProductPool::initialize`] errors.
    pub fn initialize_pool(&mut self, caller: AccountId, config: &PoolConfig) -> Result<()> {
        self.pool.initialize(caller, config)
    }

    /// Returns the current spot price.  Pure delegation.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstantProductPool::current_price`] errors.
    pub fn current_price(&self) -> Result<Price> {
        self.pool.current_price()
    }

    /// Returns a point-in-time pool snapshot.  Pure delegation.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstantProductPool::snapshot`] errors.
    pub fn pool_info(&self) -> Result<PoolSnapshot> {
        self.pool.snapshot()
    }

    /// Returns `identity`'s balance of the simulated base asset.
    #[must_use]
    pub fn asset_balance(&self, identity: AccountId) -> Amount {
        self.base.balance_of(identity)
    }

    /// Buys `base_amount` of the simulated asset for the quoted cost.
    ///
    /// The trader must have pre-approved at least the cost to the pool
    /// account on the quote ledger.  Quote moves trader → pool, base
    /// moves pool → trader, reserves settle, and both
    /// [`Event::TradeExecuted`] and [`Event::AssetTraded`] are emitted.
    ///
    /// # Errors
    ///
    /// - [`DexError::ReentrancyBlocked`] if a settlement is in progress.
    /// - [`DexError::NotInitialized`], [`DexError::InvalidAmount`],
    ///   [`DexError::InsufficientLiquidity`] from quoting.
    /// - [`DexError::InsufficientAllowance`] /
    ///   [`DexError::InsufficientBalance`] for quote-ledger shortfalls.
    pub fn buy(
        &mut self,
        trader: AccountId,
        base_amount: Amount,
        now: Timestamp,
    ) -> Result<TradeRecord> {
        let _scope = self.guard.enter()?;

        let quote_in = self.pool.calculate_buy_amount(base_amount)?;
        if quote_in.is_zero() {
            return Err(DexError::InvalidAmount("trade too small to price"));
        }
        if self.quote.allowance(trader, self.pool_account) < quote_in {
            return Err(DexError::InsufficientAllowance);
        }
        if self.quote.balance_of(trader) < quote_in {
            return Err(DexError::InsufficientBalance);
        }
        if self.base.balance_of(self.pool_account) < base_amount {
            return Err(DexError::InsufficientLiquidity);
        }

        self.quote
            .transfer_from(self.pool_account, trader, self.pool_account, quote_in)?;
        if let Err(err) = self.base.transfer(self.pool_account, trader, base_amount) {
            self.refund_quote(trader, quote_in)?;
            return Err(err);
        }

        match self
            .pool
            .settle_trade(trader, true, base_amount, quote_in, now, self.sink)
        {
            Ok(record) => {
                self.sink.record(Event::AssetTraded {
                    trader,
                    is_buy: true,
                    base_amount,
                    quote_amount: quote_in,
                    price_after: record.price_after(),
                });
                Ok(record)
            }
            Err(err) => {
                // Settlement was fully pre-validated; a failure here is
                // a defect.  Put both legs back before surfacing it.
                self.reclaim_base(trader, base_amount)?;
                self.refund_quote(trader, quote_in)?;
                Err(err)
            }
        }
    }

    /// Sells `base_amount` of the simulated asset for the quoted payout.
    ///
    /// Base moves trader → pool, quote moves pool → trader, reserves
    /// settle, and both trade events are emitted.  No allowance is
    /// involved: the trader authorizes the base leg directly.
    ///
    /// # Errors
    ///
    /// - [`DexError::ReentrancyBlocked`] if a settlement is in progress.
    /// - [`DexError::NotInitialized`], [`DexError::InvalidAmount`] from
    ///   quoting.
    /// - [`DexError::InsufficientBalance`] if the trader holds less
    ///   base than `base_amount`.
    /// - [`DexError::InsufficientLiquidity`] if the pool account cannot
    ///   cover the payout.
    pub fn sell(
        &mut self,
        trader: AccountId,
        base_amount: Amount,
        now: Timestamp,
    ) -> Result<TradeRecord> {
        let _scope = self.guard.enter()?;

        let quote_out = self.pool.calculate_sell_amount(base_amount)?;
        if quote_out.is_zero() {
            return Err(DexError::InvalidAmount("trade too small to price"));
        }
        if self.base.balance_of(trader) < base_amount {
            return Err(DexError::InsufficientBalance);
        }
        if self.quote.balance_of(self.pool_account) < quote_out {
            return Err(DexError::InsufficientLiquidity);
        }

        self.base.transfer(trader, self.pool_account, base_amount)?;
        if let Err(err) = self.quote.transfer(self.pool_account, trader, quote_out) {
            self.reclaim_base_to(trader, base_amount)?;
            return Err(err);
        }

        match self
            .pool
            .settle_trade(trader, false, base_amount, quote_out, now, self.sink)
        {
            Ok(record) => {
                self.sink.record(Event::AssetTraded {
                    trader,
                    is_buy: false,
                    base_amount,
                    quote_amount: quote_out,
                    price_after: record.price_after(),
                });
                Ok(record)
            }
            Err(err) => {
                self.reclaim_base_to(trader, base_amount)?;
                self.reclaim_quote(trader, quote_out)?;
                Err(err)
            }
        }
    }

    /// Returns a received quote leg to the trader.
    fn refund_quote(&self, trader: AccountId, amount: Amount) -> Result<()> {
        self.quote
            .transfer(self.pool_account, trader, amount)
            .map_err(|_| DexError::InvariantViolation("trade compensation failed"))
    }

    /// Pulls an already-delivered base leg back into the pool account.
    fn reclaim_base(&self, trader: AccountId, amount: Amount) -> Result<()> {
        self.base
            .transfer(trader, self.pool_account, amount)
            .map_err(|_| DexError::InvariantViolation("trade compensation failed"))
    }

    /// Returns a received base leg to the trader.
    fn reclaim_base_to(&self, trader: AccountId, amount: Amount) -> Result<()> {
        self.base
            .transfer(self.pool_account, trader, amount)
            .map_err(|_| DexError::InvariantViolation("trade compensation failed"))
    }

    /// Pulls an already-paid quote leg back into the pool account.
    fn reclaim_quote(&self, trader: AccountId, amount: Amount) -> Result<()> {
        self.quote
            .transfer(trader, self.pool_account, amount)
            .map_err(|_| DexError::InvariantViolation("trade compensation failed"))
    }
}
