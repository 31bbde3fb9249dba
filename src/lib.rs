//! # Simdex
//!
//! Constant-product exchange engine for a simulated 18-decimal asset
//! priced in a 6-decimal stable unit, with a trading facade and an
//! owner-gated custody vault.
//!
//! The crate provides three cooperating components over abstract
//! balance-and-allowance ledgers:
//!
//! - **[`ConstantProductPool`](pool::ConstantProductPool)** — owns the
//!   reserve state for both assets and exposes pricing and settlement
//!   primitives under the invariant `reserve_base × reserve_quote ≥ k`.
//! - **[`TradingDesk`](trading::TradingDesk)** — orchestrates end-user
//!   buys and sells: quote, validate, move both ledger legs, settle.
//! - **[`CustodyVault`](custody::CustodyVault)** — receives validated
//!   stable-asset deposits and disburses them only on the owner's
//!   authority; fully independent of the pool.
//!
//! All arithmetic is checked integer `u128` with explicit rounding,
//! always in the pool's favor.  Every mutating call either completes in
//! full or aborts with no visible side effect, and a call-scoped guard
//! rejects nested settlement attempts.
//!
//! # Quick Start
//!
//! ```rust
//! use simdex::prelude::*;
//!
//! let owner = AccountId::from_bytes([1u8; 32]);
//! let pool_account = AccountId::from_bytes([2u8; 32]);
//! let trader = AccountId::from_bytes([3u8; 32]);
//!
//! // Two ledger instances (stable quote asset, simulated base asset)
//! // and an append-only event log.
//! let base = MemoryLedger::new();
//! let quote = MemoryLedger::new();
//! let log = MemoryLog::new();
//!
//! // Setup: fund the pool's custodial account and the trader.
//! let base_reserve = Amount::new(100_000_000_000_000_000_000); // 100 units
//! let quote_reserve = Amount::new(10_000_000_000); // 10 000 units
//! base.mint(pool_account, base_reserve).expect("mint");
//! quote.mint(pool_account, quote_reserve).expect("mint");
//! quote.mint(trader, Amount::new(1_000_000_000)).expect("mint");
//!
//! // Initialize the pool: fixes k = base_reserve × quote_reserve.
//! let mut pool = ConstantProductPool::new(owner);
//! let config = PoolConfig::new(
//!     base_reserve,
//!     quote_reserve,
//!     Decimals::new(18).expect("valid decimals"),
//! )
//! .expect("valid config");
//! pool.initialize(owner, &config).expect("first initialization");
//!
//! // Trade: buy one whole base unit.
//! let mut desk = TradingDesk::new(pool, pool_account, &base, &quote, &log);
//! let one_base = Amount::new(1_000_000_000_000_000_000);
//! quote
//!     .approve(trader, pool_account, Amount::new(200_000_000))
//!     .expect("approve");
//! let record = desk.buy(trader, one_base, Timestamp::new(1)).expect("buy");
//!
//! assert_eq!(record.quote_amount(), Amount::new(101_010_102));
//! assert_eq!(desk.asset_balance(trader), one_base);
//! assert_eq!(log.len(), 2); // TradeExecuted + AssetTraded
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │ TradingDesk   │     │ CustodyVault  │
//! └──────┬───────┘     └──────┬───────┘
//!        │ quote / settle      │ deposit / disburse
//!        ▼                     │
//! ┌──────────────┐            │
//! │ ConstantPro-  │            │
//! │ ductPool      │            │
//! └──────┬───────┘            │
//!        │ transfer legs       │ transfer / transferFrom
//!        ▼                     ▼
//! ┌─────────────────────────────────┐     ┌───────────┐
//! │ FungibleLedger (base / quote)    │     │ EventSink  │
//! └─────────────────────────────────┘     └───────────┘
//! ```
//!
//! The pool never touches a ledger: its reserves are a cached view the
//! desk keeps consistent with actual ledger transfers within the same
//! settlement call.  The custody vault runs on its own path and never
//! touches reserves.
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Price`](domain::Price), [`AccountId`](domain::AccountId), … |
//! | [`ledger`] | [`FungibleLedger`](ledger::FungibleLedger) capability trait + [`MemoryLedger`](ledger::MemoryLedger) |
//! | [`events`] | [`Event`](events::Event), [`EventSink`](events::EventSink), [`MemoryLog`](events::MemoryLog) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) initialization blueprint |
//! | [`pool`]   | [`ConstantProductPool`](pool::ConstantProductPool), the pricing core |
//! | [`trading`] | [`TradingDesk`](trading::TradingDesk) buy/sell facade |
//! | [`custody`] | [`CustodyVault`](custody::CustodyVault) owner-gated custody |
//! | [`math`]   | [`CheckedArithmetic`](math::CheckedArithmetic) checked ops over domain types |
//! | [`error`]  | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod custody;
pub mod domain;
pub mod error;
pub mod events;
mod guard;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod trading;
