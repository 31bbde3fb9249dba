//! Event emission into an external append-only log.
//!
//! Trade history is not core state.  Every component emits into an
//! [`EventSink`] owned by the caller; the engine itself retains nothing.
//! [`MemoryLog`] is the in-repo sink used by tests and demo drivers.

use core::cell::RefCell;

use crate::domain::{AccountId, Amount, Price, Timestamp};

/// An event emitted by the engine.
///
/// Events are plain copies of the settled values; replaying a log
/// reconstructs the full trade history without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Emitted by the pool when a trade settles against the reserves.
    TradeExecuted {
        /// The trading account.
        trader: AccountId,
        /// `true` for a buy (base out of the pool), `false` for a sell.
        is_buy: bool,
        /// The base-asset leg.
        base_amount: Amount,
        /// The quote-asset leg.
        quote_amount: Amount,
        /// The pool price immediately after settlement.
        price_after: Price,
        /// The settlement time supplied by the caller.
        timestamp: Timestamp,
    },
    /// Emitted by the trading facade after the full trade completes.
    AssetTraded {
        /// The trading account.
        trader: AccountId,
        /// `true` for a buy, `false` for a sell.
        is_buy: bool,
        /// The base-asset leg.
        base_amount: Amount,
        /// The quote-asset leg.
        quote_amount: Amount,
        /// The pool price immediately after settlement.
        price_after: Price,
    },
    /// Emitted by the custody vault on a validated deposit.
    FundsReceived {
        /// The depositing account.
        from: AccountId,
        /// The deposited amount.
        amount: Amount,
    },
}

/// An append-only destination for engine events.
///
/// Sinks take `&self` so several components can share one log; a sink
/// must never fail and must never call back into the emitting component.
pub trait EventSink {
    /// Appends one event to the log.
    fn record(&self, event: Event);
}

/// An in-memory event log.
///
/// # Examples
///
/// ```
/// use simdex::domain::{AccountId, Amount};
/// use simdex::events::{Event, EventSink, MemoryLog};
///
/// let log = MemoryLog::new();
/// log.record(Event::FundsReceived {
///     from: AccountId::from_bytes([1u8; 32]),
///     amount: Amount::new(100),
/// });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLog {
    events: RefCell<Vec<Event>>,
}

impl MemoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Returns a copy of all recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns the most recently recorded event, if any.
    #[must_use]
    pub fn last(&self) -> Option<Event> {
        self.events.borrow().last().copied()
    }
}

impl EventSink for MemoryLog {
    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}
