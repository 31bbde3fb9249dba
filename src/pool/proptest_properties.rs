//! Property-based tests for the pool's pricing invariants.
//!
//! The properties hold for every reachable pool state:
//!
//! 1. **Invariant preservation** — the reserve product never drops
//!    below the initialization product across any trade sequence.
//! 2. **Monotonicity** — the quote cost of a buy is non-decreasing in
//!    the base amount taken out, and the payout of a sell is
//!    non-decreasing in the base amount added.
//! 3. **Price direction** — a settled buy never decreases the spot
//!    price; a settled sell never increases it.
//! 4. **No round-trip profit** — buying then selling the same base
//!    amount never returns more quote than it cost.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::ConstantProductPool;
use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, Decimals, Timestamp};
use crate::events::MemoryLog;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn owner() -> AccountId {
    AccountId::from_bytes([1u8; 32])
}

fn trader() -> AccountId {
    AccountId::from_bytes([7u8; 32])
}

fn make_pool(reserve_base: u128, reserve_quote: u128) -> ConstantProductPool {
    let Ok(decimals) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    let Ok(config) = PoolConfig::new(
        Amount::new(reserve_base),
        Amount::new(reserve_quote),
        decimals,
    ) else {
        panic!("valid config");
    };
    let mut pool = ConstantProductPool::new(owner());
    let Ok(()) = pool.initialize(owner(), &config) else {
        panic!("initialization should succeed");
    };
    pool
}

/// Settles a quoted buy; returns `false` when the trade is unquotable
/// (too large, or priced at zero after rounding accretion).
fn try_buy(pool: &mut ConstantProductPool, base_out: u128, log: &MemoryLog) -> bool {
    let amount = Amount::new(base_out);
    let Ok(quote_in) = pool.calculate_buy_amount(amount) else {
        return false;
    };
    if quote_in.is_zero() {
        return false;
    }
    let Ok(_) = pool.settle_trade(trader(), true, amount, quote_in, Timestamp::ZERO, log) else {
        panic!("a quoted buy must settle");
    };
    true
}

/// Settles a quoted sell; returns `false` when the payout rounds to zero.
fn try_sell(pool: &mut ConstantProductPool, base_in: u128, log: &MemoryLog) -> bool {
    let amount = Amount::new(base_in);
    let Ok(quote_out) = pool.calculate_sell_amount(amount) else {
        return false;
    };
    if quote_out.is_zero() {
        return false;
    }
    let Ok(_) = pool.settle_trade(trader(), false, amount, quote_out, Timestamp::ZERO, log) else {
        panic!("a quoted sell must settle");
    };
    true
}

fn product(pool: &ConstantProductPool) -> u128 {
    let Some(product) = pool.reserve_base().checked_mul(&pool.reserve_quote()) else {
        panic!("reserve product fits u128 in the tested range");
    };
    product.get()
}

// Reserve ranges keep the product far below u128::MAX while spanning
// six orders of magnitude on each side.
const BASE_RANGE: core::ops::RangeInclusive<u128> =
    1_000_000_000_000u128..=1_000_000_000_000_000_000_000;
const QUOTE_RANGE: core::ops::RangeInclusive<u128> = 1_000_000u128..=1_000_000_000_000;

proptest! {
    #[test]
    fn invariant_never_drops_below_initialization_product(
        reserve_base in BASE_RANGE,
        reserve_quote in QUOTE_RANGE,
        ops in proptest::collection::vec((any::<bool>(), 1u128..=3_000), 1..20),
    ) {
        let mut pool = make_pool(reserve_base, reserve_quote);
        let log = MemoryLog::new();
        let k0 = product(&pool);

        for (is_buy, bps) in ops {
            let base_amount = pool.reserve_base().get() / 10_000 * bps;
            if base_amount == 0 {
                continue;
            }
            if is_buy {
                try_buy(&mut pool, base_amount, &log);
            } else {
                try_sell(&mut pool, base_amount, &log);
            }
            prop_assert!(product(&pool) >= k0);
        }
    }

    #[test]
    fn buy_quote_is_monotone_in_base_out(
        reserve_base in BASE_RANGE,
        reserve_quote in QUOTE_RANGE,
        lo_bps in 1u128..=4_000,
        extra_bps in 1u128..=4_000,
    ) {
        let pool = make_pool(reserve_base, reserve_quote);
        let lo = reserve_base / 10_000 * lo_bps;
        let hi = reserve_base / 10_000 * (lo_bps + extra_bps);
        prop_assume!(lo > 0 && hi > lo && hi < reserve_base);

        let Ok(quote_lo) = pool.calculate_buy_amount(Amount::new(lo)) else {
            panic!("lo quote should succeed");
        };
        let Ok(quote_hi) = pool.calculate_buy_amount(Amount::new(hi)) else {
            panic!("hi quote should succeed");
        };
        prop_assert!(quote_hi >= quote_lo);
    }

    #[test]
    fn sell_payout_is_monotone_in_base_in(
        reserve_base in BASE_RANGE,
        reserve_quote in QUOTE_RANGE,
        lo_bps in 1u128..=4_000,
        extra_bps in 1u128..=4_000,
    ) {
        let pool = make_pool(reserve_base, reserve_quote);
        let lo = reserve_base / 10_000 * lo_bps;
        let hi = reserve_base / 10_000 * (lo_bps + extra_bps);
        prop_assume!(lo > 0 && hi > lo);

        let Ok(payout_lo) = pool.calculate_sell_amount(Amount::new(lo)) else {
            panic!("lo payout should succeed");
        };
        let Ok(payout_hi) = pool.calculate_sell_amount(Amount::new(hi)) else {
            panic!("hi payout should succeed");
        };
        prop_assert!(payout_hi >= payout_lo);
    }

    #[test]
    fn buy_never_decreases_price_and_sell_never_increases_it(
        reserve_base in BASE_RANGE,
        reserve_quote in QUOTE_RANGE,
        bps in 1u128..=5_000,
    ) {
        let mut pool = make_pool(reserve_base, reserve_quote);
        let log = MemoryLog::new();
        let base_amount = reserve_base / 10_000 * bps;
        prop_assume!(base_amount > 0);

        let Ok(before) = pool.current_price() else {
            panic!("price should be available");
        };
        if try_buy(&mut pool, base_amount, &log) {
            let Ok(after_buy) = pool.current_price() else {
                panic!("price should be available");
            };
            prop_assert!(after_buy >= before);
        }

        let Ok(mid) = pool.current_price() else {
            panic!("price should be available");
        };
        if try_sell(&mut pool, base_amount, &log) {
            let Ok(after_sell) = pool.current_price() else {
                panic!("price should be available");
            };
            prop_assert!(after_sell <= mid);
        }
    }

    #[test]
    fn round_trip_never_profits(
        reserve_base in BASE_RANGE,
        reserve_quote in QUOTE_RANGE,
        bps in 1u128..=4_000,
    ) {
        let mut pool = make_pool(reserve_base, reserve_quote);
        let log = MemoryLog::new();
        let base_amount = reserve_base / 10_000 * bps;
        prop_assume!(base_amount > 0);

        let amount = Amount::new(base_amount);
        let Ok(paid) = pool.calculate_buy_amount(amount) else {
            panic!("buy quote should succeed");
        };
        prop_assume!(!paid.is_zero());
        let Ok(_) = pool.settle_trade(trader(), true, amount, paid, Timestamp::ZERO, &log) else {
            panic!("quoted buy must settle");
        };

        let Ok(returned) = pool.calculate_sell_amount(amount) else {
            panic!("sell quote should succeed");
        };
        prop_assert!(returned <= paid);
    }
}
