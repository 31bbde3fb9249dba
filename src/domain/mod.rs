//! Fundamental domain value types used throughout the exchange engine.
//!
//! This module contains the core value types that model the exchange
//! domain: amounts, identities, decimal scaling, prices, timestamps and
//! trade outcomes.  All types use newtypes with validated constructors
//! to enforce invariants.

mod account_id;
mod amount;
mod decimals;
mod pool_snapshot;
mod price;
mod rounding;
mod timestamp;
mod trade_record;

pub use account_id::AccountId;
pub use amount::Amount;
pub use decimals::Decimals;
pub use pool_snapshot::PoolSnapshot;
pub use price::Price;
pub use rounding::Rounding;
pub use timestamp::Timestamp;
pub use trade_record::TradeRecord;
