//! Unified error type for the exchange engine.
//!
//! All fallible operations across the crate return [`DexError`] as their
//! error type.  Every error aborts the triggering call atomically: no
//! partial mutation is retained and nothing is retried internally.
//! Errors propagate synchronously to the immediate caller with the
//! specific kind, so external collaborators can render them unchanged.

use core::fmt;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, DexError>;

/// Unified error enum for pool, trading and custody operations.
///
/// [`DexError::InvariantViolation`] and [`DexError::ArithmeticOverflow`]
/// signal that prior defensive checks were bypassed; they mark a
/// programming defect, not a recoverable user error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexError {
    /// Caller is not the owner of the component it tried to drive.
    Unauthorized,
    /// The pool has no reserves yet; initialize it first.
    NotInitialized,
    /// The pool was already initialized; initialization runs exactly once.
    AlreadyInitialized,
    /// An input amount is zero or otherwise malformed.
    InvalidAmount(&'static str),
    /// Pool reserves cannot cover the requested trade.
    InsufficientLiquidity,
    /// A ledger account balance is too small for the operation.
    InsufficientBalance,
    /// The ledger allowance granted to the spender is too small.
    InsufficientAllowance,
    /// The custody balance does not cover the requested disbursement.
    InsufficientCustodyBalance,
    /// Batch recipients and amounts differ in length (or are empty).
    ArityMismatch,
    /// A settlement was attempted while another one is in progress.
    ReentrancyBlocked,
    /// An internal invariant failed after validation; a defect, fatal.
    InvariantViolation(&'static str),
    /// Checked arithmetic overflowed (or underflowed) mid-computation.
    ArithmeticOverflow(&'static str),
}

impl fmt::Display for DexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "caller is not the owner"),
            Self::NotInitialized => write!(f, "pool is not initialized"),
            Self::AlreadyInitialized => write!(f, "pool is already initialized"),
            Self::InvalidAmount(msg) => write!(f, "invalid amount: {msg}"),
            Self::InsufficientLiquidity => write!(f, "insufficient pool liquidity"),
            Self::InsufficientBalance => write!(f, "insufficient ledger balance"),
            Self::InsufficientAllowance => write!(f, "insufficient ledger allowance"),
            Self::InsufficientCustodyBalance => {
                write!(f, "insufficient custody balance")
            }
            Self::ArityMismatch => {
                write!(f, "recipients and amounts must have equal, non-zero length")
            }
            Self::ReentrancyBlocked => write!(f, "nested settlement rejected"),
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            Self::ArithmeticOverflow(msg) => write!(f, "arithmetic overflow: {msg}"),
        }
    }
}

impl std::error::Error for DexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            format!("{}", DexError::Unauthorized),
            "caller is not the owner"
        );
        assert_eq!(
            format!("{}", DexError::InvalidAmount("zero deposit")),
            "invalid amount: zero deposit"
        );
        assert_eq!(
            format!("{}", DexError::InvariantViolation("reserve product dropped")),
            "invariant violation: reserve product dropped"
        );
    }

    #[test]
    fn equality_distinguishes_variants() {
        assert_eq!(DexError::NotInitialized, DexError::NotInitialized);
        assert_ne!(DexError::NotInitialized, DexError::AlreadyInitialized);
        assert_ne!(DexError::InvalidAmount("a"), DexError::InvalidAmount("b"));
    }

    #[test]
    fn copy_semantics() {
        let a = DexError::ReentrancyBlocked;
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn debug_format_contains_variant() {
        let dbg = format!("{:?}", DexError::ArityMismatch);
        assert!(dbg.contains("ArityMismatch"));
    }
}
