//! Fungible-asset ledgers.
//!
//! The engine never owns raw balances: it moves them through the
//! [`FungibleLedger`] capability interface, one instance per asset
//! (stable quote asset, simulated base asset).  [`MemoryLedger`] is the
//! in-repo reference implementation used by tests and demo setups.

mod fungible;
mod memory;

pub use fungible::FungibleLedger;
pub use memory::MemoryLedger;
