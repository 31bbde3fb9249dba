//! The liquidity pool.
//!
//! [`ConstantProductPool`] owns the reserve state for both assets and
//! exposes the pricing and settlement primitives everything else is
//! built on.  Settlement itself is crate-internal: only the trading
//! facade can reach it.

mod constant_product;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::ConstantProductPool;
