//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use simdex::prelude::*;
//! ```
//!
//! This re-exports the domain value types, the error type, the
//! collaborator traits, and the three engine components so that
//! consumers don't need to import from individual submodules.

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, Decimals, PoolSnapshot, Price, Rounding, Timestamp, TradeRecord,
};

// Re-export error types
pub use crate::error::{DexError, Result};

// Re-export collaborator traits and reference implementations
pub use crate::events::{Event, EventSink, MemoryLog};
pub use crate::ledger::{FungibleLedger, MemoryLedger};

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export configuration
pub use crate::config::PoolConfig;

// Re-export the engine components
pub use crate::custody::CustodyVault;
pub use crate::pool::ConstantProductPool;
pub use crate::trading::TradingDesk;
