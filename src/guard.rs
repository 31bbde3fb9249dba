//! Call-scoped reentrancy guard.
//!
//! A settlement call transfers control to an external ledger mid-flight;
//! a hostile or buggy ledger must not be able to start a second
//! settlement while the first is in progress.  The guard is engaged for
//! the full duration of every mutating facade call and released when
//! the returned scope drops, on success and error paths alike.

use core::cell::Cell;

use crate::error::{DexError, Result};

/// A single-slot guard: at most one settlement scope exists at a time.
#[derive(Debug, Default)]
pub(crate) struct CallGuard {
    active: Cell<bool>,
}

impl CallGuard {
    /// Creates a released guard.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Engages the guard for the duration of the returned scope.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ReentrancyBlocked`] if a scope is already
    /// live.
    pub(crate) fn enter(&self) -> Result<CallScope<'_>> {
        if self.active.replace(true) {
            return Err(DexError::ReentrancyBlocked);
        }
        Ok(CallScope { flag: &self.active })
    }
}

/// Live settlement scope; releases the guard on drop.
#[derive(Debug)]
pub(crate) struct CallScope<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for CallScope<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn enter_succeeds_when_released() {
        let guard = CallGuard::new();
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn nested_enter_is_blocked() {
        let guard = CallGuard::new();
        let Ok(_scope) = guard.enter() else {
            panic!("first enter should succeed");
        };
        assert_eq!(guard.enter().err(), Some(DexError::ReentrancyBlocked));
    }

    #[test]
    fn scope_drop_releases() {
        let guard = CallGuard::new();
        {
            let Ok(_scope) = guard.enter() else {
                panic!("first enter should succeed");
            };
        }
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn release_happens_on_early_exit_too() {
        let guard = CallGuard::new();
        fn failing_settlement(guard: &CallGuard) -> Result<()> {
            let _scope = guard.enter()?;
            Err(DexError::InsufficientBalance)
        }
        assert_eq!(
            failing_settlement(&guard),
            Err(DexError::InsufficientBalance)
        );
        assert!(guard.enter().is_ok());
    }
}
