//! Owner-gated custody of the stable asset.
//!
//! [`CustodyVault`] receives validated deposits from anyone and
//! disburses only on the owner's authority.  It is fully independent of
//! the pool: it holds its own custodial account on the quote ledger and
//! never touches reserves.

use crate::domain::{AccountId, Amount};
use crate::error::{DexError, Result};
use crate::events::{Event, EventSink};
use crate::ledger::FungibleLedger;
use crate::math::CheckedArithmetic;

/// A segregated stable-asset balance under owner-only control.
///
/// The vault tracks an internal `held` figure that increases only via
/// validated deposits and decreases only via owner-authorized
/// disbursements; it authorizes `send` and `batch_send`.  The
/// [`balance`](Self::balance) view delegates to the ledger, so stray
/// direct transfers into the custodial account are visible there and
/// are swept by [`withdraw_all`](Self::withdraw_all).
///
/// Both `owner` and the custodial `account` are fixed at construction.
///
/// # Example
///
/// ```
/// use simdex::custody::CustodyVault;
/// use simdex::domain::{AccountId, Amount};
/// use simdex::events::MemoryLog;
/// use simdex::ledger::{FungibleLedger, MemoryLedger};
///
/// let owner = AccountId::from_bytes([1u8; 32]);
/// let vault_account = AccountId::from_bytes([2u8; 32]);
/// let user = AccountId::from_bytes([3u8; 32]);
///
/// let ledger = MemoryLedger::new();
/// let log = MemoryLog::new();
/// ledger.mint(user, Amount::new(100_000_000)).expect("mint");
///
/// let mut vault = CustodyVault::new(owner, vault_account, &ledger, &log);
///
/// ledger.approve(user, vault_account, Amount::new(100_000_000)).expect("approve");
/// vault.deposit(user, Amount::new(100_000_000)).expect("deposit");
/// assert_eq!(vault.balance(), Amount::new(100_000_000));
/// ```
#[derive(Debug)]
pub struct CustodyVault<'a, L, S>
where
    L: FungibleLedger,
    S: EventSink,
{
    owner: AccountId,
    account: AccountId,
    held: Amount,
    ledger: &'a L,
    sink: &'a S,
}

impl<'a, L, S> CustodyVault<'a, L, S>
where
    L: FungibleLedger,
    S: EventSink,
{
    /// Creates an empty vault owned by `owner`, custodying funds under
    /// `account` on `ledger`.
    pub fn new(owner: AccountId, account: AccountId, ledger: &'a L, sink: &'a S) -> Self {
        Self {
            owner,
            account,
            held: Amount::ZERO,
            ledger,
            sink,
        }
    }

    /// Returns the owning identity.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Returns the custodial account identity.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the deposit-tracked balance that authorizes
    /// disbursements.
    pub const fn held(&self) -> Amount {
        self.held
    }

    /// Returns the custodial account's balance on the ledger.
    ///
    /// Pure view; may exceed [`held`](Self::held) if funds were
    /// transferred in directly rather than deposited.
    #[must_use]
    pub fn balance(&self) -> Amount {
        self.ledger.balance_of(self.account)
    }

    /// Pulls `amount` from `caller` into custody.
    ///
    /// The caller must have approved at least `amount` to the custodial
    /// account beforehand.  Emits [`Event::FundsReceived`].
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidAmount`] if `amount` is zero.
    /// - [`DexError::InsufficientAllowance`] /
    ///   [`DexError::InsufficientBalance`] for ledger shortfalls.
    pub fn deposit(&mut self, caller: AccountId, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Err(DexError::InvalidAmount("zero deposit"));
        }
        if self.ledger.allowance(caller, self.account) < amount {
            return Err(DexError::InsufficientAllowance);
        }
        if self.ledger.balance_of(caller) < amount {
            return Err(DexError::InsufficientBalance);
        }

        self.ledger
            .transfer_from(self.account, caller, self.account, amount)?;
        self.held = self.held.safe_add(&amount)?;
        self.sink.record(Event::FundsReceived {
            from: caller,
            amount,
        });
        Ok(())
    }

    /// Transfers `amount` from custody to `to`.  Owner-only.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `caller` is not the owner.
    /// - [`DexError::InsufficientCustodyBalance`] if the held balance
    ///   does not cover `amount`.
    pub fn send(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.ensure_owner(caller)?;
        let Some(remaining) = self.held.checked_sub(&amount) else {
            return Err(DexError::InsufficientCustodyBalance);
        };
        self.ledger.transfer(self.account, to, amount)?;
        self.held = remaining;
        Ok(())
    }

    /// Transfers `amounts[i]` to `recipients[i]` for every `i`.
    /// Owner-only; whole-batch atomic.
    ///
    /// All validation — arity, checked total, custody cover — precedes
    /// the first transfer, so a rejected batch leaves the ledger
    /// untouched.  The held balance decreases once, by the total.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `caller` is not the owner.
    /// - [`DexError::ArityMismatch`] if the slices differ in length or
    ///   are empty.
    /// - [`DexError::ArithmeticOverflow`] if the total does not fit.
    /// - [`DexError::InsufficientCustodyBalance`] if the held balance
    ///   does not cover the total.
    /// - [`DexError::InvariantViolation`] if the ledger fails mid-batch
    ///   after validation — a nonconforming collaborator.
    pub fn batch_send(
        &mut self,
        caller: AccountId,
        recipients: &[AccountId],
        amounts: &[Amount],
    ) -> Result<()> {
        self.ensure_owner(caller)?;
        if recipients.len() != amounts.len() || recipients.is_empty() {
            return Err(DexError::ArityMismatch);
        }

        let total = amounts
            .iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.safe_add(amount))?;
        let Some(remaining) = self.held.checked_sub(&total) else {
            return Err(DexError::InsufficientCustodyBalance);
        };

        // The custodial ledger balance always covers `held`, so a
        // conforming ledger cannot fail past this point.
        for (recipient, amount) in recipients.iter().zip(amounts) {
            self.ledger
                .transfer(self.account, *recipient, *amount)
                .map_err(|_| {
                    DexError::InvariantViolation("ledger failed mid-batch after validation")
                })?;
        }
        self.held = remaining;
        Ok(())
    }

    /// Sweeps the custodial account's entire ledger balance to the
    /// owner.  Owner-only.
    ///
    /// Returns the swept amount; afterwards [`balance`](Self::balance)
    /// is zero and the held figure is reset.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `caller` is not the owner.
    /// - Ledger transfer errors propagate unchanged.
    pub fn withdraw_all(&mut self, caller: AccountId) -> Result<Amount> {
        self.ensure_owner(caller)?;
        let swept = self.ledger.balance_of(self.account);
        if !swept.is_zero() {
            self.ledger.transfer(self.account, self.owner, swept)?;
        }
        self.held = Amount::ZERO;
        Ok(swept)
    }

    fn ensure_owner(&self, caller: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(DexError::Unauthorized);
        }
        Ok(())
    }
}
