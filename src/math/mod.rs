//! Arithmetic utilities for pricing calculations.
//!
//! This module provides the [`CheckedArithmetic`] trait, which lifts the
//! option-returning checked operations on [`Amount`](crate::domain::Amount)
//! to `Result`s with specific error variants, plus the widened
//! multiply-then-divide every pricing formula is built from.
//!
//! All arithmetic in the engine is checked `u128`: a reserve product in
//! the documented operating range fits with ample headroom, and anything
//! that does not fit is an error, never a silent wrap.

mod checked;

pub use checked::CheckedArithmetic;
