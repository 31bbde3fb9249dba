//! Pool configuration.
//!
//! This module contains [`PoolConfig`], the declarative blueprint for
//! initializing the liquidity pool: both initial reserves plus the
//! base-asset decimals that fix the price scale.

mod pool;

pub use pool::PoolConfig;
