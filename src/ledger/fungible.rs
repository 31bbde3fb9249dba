//! Capability interface for balance-and-allowance ledgers.

use crate::domain::{AccountId, Amount};
use crate::error::Result;

/// A fungible-asset ledger with standard balance/allowance semantics.
///
/// Components depend on this interface abstractly, never on a concrete
/// asset type.  Methods take `&self`: implementations use interior
/// mutability so the trading desk and the custody vault can hold shared
/// references to the same ledger instance within a single-threaded
/// simulation.
///
/// There is no ambient caller in a library, so the authorizing identity
/// is always an explicit parameter: `transfer` is authorized by `from`,
/// `transfer_from` by the allowance `owner` granted to `spender`.
///
/// # Contract
///
/// - Transfers are atomic: on any error, no balance or allowance changes.
/// - `mint` is a privileged setup/test operation; the engine itself
///   never calls it.
/// - Implementations must not call back into the component driving them.
pub trait FungibleLedger {
    /// Returns the balance of `owner`.
    #[must_use]
    fn balance_of(&self, owner: AccountId) -> Amount;

    /// Returns the remaining allowance `owner` has granted to `spender`.
    #[must_use]
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount;

    /// Sets the allowance `owner` grants to `spender`, replacing any
    /// previous value.
    ///
    /// # Errors
    ///
    /// Implementations may reject malformed approvals; the reference
    /// implementation accepts all of them.
    fn approve(&self, owner: AccountId, spender: AccountId, amount: Amount) -> Result<()>;

    /// Moves `amount` from `from` to `to`, authorized by `from`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
    ///   if `from` holds less than `amount`.
    /// - [`DexError::ArithmeticOverflow`](crate::error::DexError::ArithmeticOverflow)
    ///   if the credit would overflow.
    fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<()>;

    /// Moves `amount` from `owner` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`](crate::error::DexError::InsufficientAllowance)
    ///   if the allowance is less than `amount`.
    /// - [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
    ///   if `owner` holds less than `amount`.
    fn transfer_from(
        &self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()>;

    /// Credits `amount` to `to` out of thin air.  Privileged; used only
    /// by tests, demos and deployment-style setup.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`](crate::error::DexError::ArithmeticOverflow)
    /// if the credit would overflow.
    fn mint(&self, to: AccountId, amount: Amount) -> Result<()>;
}
