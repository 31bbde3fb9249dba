//! In-memory reference ledger.

use core::cell::RefCell;
use std::collections::BTreeMap;

use super::FungibleLedger;
use crate::domain::{AccountId, Amount};
use crate::error::{DexError, Result};

/// An in-memory balance-and-allowance ledger.
///
/// The reference [`FungibleLedger`] implementation: one instance per
/// asset, standard semantics throughout.  Zero-amount transfers succeed
/// without touching state, and a `transfer_from` consumes exactly the
/// amount moved from the granted allowance.
///
/// Interior mutability (`RefCell` over `BTreeMap`s) lets every
/// component share one instance by reference; the type is
/// single-threaded by design, like the rest of the engine.
///
/// # Examples
///
/// ```
/// use simdex::domain::{AccountId, Amount};
/// use simdex::ledger::{FungibleLedger, MemoryLedger};
///
/// let ledger = MemoryLedger::new();
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let bob = AccountId::from_bytes([2u8; 32]);
///
/// ledger.mint(alice, Amount::new(1_000)).expect("mint");
/// ledger.transfer(alice, bob, Amount::new(400)).expect("transfer");
/// assert_eq!(ledger.balance_of(alice), Amount::new(600));
/// assert_eq!(ledger.balance_of(bob), Amount::new(400));
/// ```
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: RefCell<BTreeMap<AccountId, Amount>>,
    allowances: RefCell<BTreeMap<(AccountId, AccountId), Amount>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sum of all balances.
    ///
    /// Test aid: transfers conserve this total, only `mint` grows it.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ArithmeticOverflow`] if the sum does not fit
    /// in `u128`.
    pub fn total_supply(&self) -> Result<Amount> {
        self.balances
            .borrow()
            .values()
            .try_fold(Amount::ZERO, |acc, balance| {
                acc.checked_add(balance)
                    .ok_or(DexError::ArithmeticOverflow("total supply overflow"))
            })
    }
}

impl FungibleLedger for MemoryLedger {
    fn balance_of(&self, owner: AccountId) -> Amount {
        self.balances
            .borrow()
            .get(&owner)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .borrow()
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(&self, owner: AccountId, spender: AccountId, amount: Amount) -> Result<()> {
        self.allowances.borrow_mut().insert((owner, spender), amount);
        Ok(())
    }

    fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let mut balances = self.balances.borrow_mut();
        let from_balance = balances.get(&from).copied().unwrap_or(Amount::ZERO);
        let Some(new_from) = from_balance.checked_sub(&amount) else {
            return Err(DexError::InsufficientBalance);
        };
        if from == to {
            return Ok(());
        }
        let to_balance = balances.get(&to).copied().unwrap_or(Amount::ZERO);
        let new_to = to_balance
            .checked_add(&amount)
            .ok_or(DexError::ArithmeticOverflow("ledger credit overflow"))?;
        // Both sides validated; commit together.
        balances.insert(from, new_from);
        balances.insert(to, new_to);
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let key = (owner, spender);
        let granted = self
            .allowances
            .borrow()
            .get(&key)
            .copied()
            .unwrap_or(Amount::ZERO);
        let Some(remaining) = granted.checked_sub(&amount) else {
            return Err(DexError::InsufficientAllowance);
        };
        self.transfer(owner, to, amount)?;
        self.allowances.borrow_mut().insert(key, remaining);
        Ok(())
    }

    fn mint(&self, to: AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.borrow_mut();
        let balance = balances.get(&to).copied().unwrap_or(Amount::ZERO);
        let credited = balance
            .checked_add(&amount)
            .ok_or(DexError::ArithmeticOverflow("mint overflow"))?;
        balances.insert(to, credited);
        Ok(())
    }
}
