// ============================================================================
// POOL INVARIANTS
// ============================================================================
//
// Properties every reachable pool state must satisfy. The contract tests
// check them after each operation.
//
// 1. PRICE: sqrt price inside the global bounds, tick is the floor tick of
//    the price (or one below it right after crossing a tick downward)
// 2. REINVESTMENT: reinvestment liquidity and share supply never drop
//    below the seeded floor
// 3. FEES: global fee growth only moves forward
// 4. SWAPS: deltas have opposite signs, price moves toward the limit
//    without passing it
// 5. TICKS: an uninitialized tick is fully zeroed
//
// ============================================================================

use elastic_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
use elastic_types::{PoolState, TickInfo, MAX_SQRT_RATIO, MIN_LIQUIDITY, MIN_SQRT_RATIO};

/// MIN_SQRT_RATIO <= sqrt_price_x96 < MAX_SQRT_RATIO
pub fn price_in_bounds(state: &PoolState) -> bool {
    state.sqrt_price_x96 >= MIN_SQRT_RATIO && state.sqrt_price_x96 < MAX_SQRT_RATIO
}

/// tick == floor_tick(sqrt_price), or the price sits exactly on tick + 1
/// after a downward crossing
pub fn tick_consistent_with_price(state: &PoolState) -> bool {
    match get_tick_at_sqrt_ratio(state.sqrt_price_x96) {
        Ok(tick) if tick == state.tick => true,
        Ok(tick) if tick == state.tick + 1 => {
            get_sqrt_ratio_at_tick(tick) == Ok(state.sqrt_price_x96)
        }
        _ => false,
    }
}

/// Reinvestment state of a priced pool keeps its seeded floor
pub fn reinvestment_floor_held(state: &PoolState) -> bool {
    state.reinvest_liquidity >= MIN_LIQUIDITY && state.share_supply >= MIN_LIQUIDITY
}

/// Fee growth is modular, so forward progress is a small wrapping difference
pub fn fee_growth_monotonic(old_fee_growth: u128, new_fee_growth: u128) -> bool {
    new_fee_growth.wrapping_sub(old_fee_growth) < u128::MAX / 2
}

/// One side is paid in, the other paid out (either may be zero)
pub fn swap_deltas_opposite_signs(delta_qty0: i128, delta_qty1: i128) -> bool {
    !(delta_qty0 > 0 && delta_qty1 > 0) && !(delta_qty0 < 0 && delta_qty1 < 0)
}

/// Price moved toward the limit and did not pass it
pub fn swap_respects_limit(will_up_tick: bool, before: u128, after: u128, limit: u128) -> bool {
    if will_up_tick {
        before <= after && after <= limit
    } else {
        limit <= after && after <= before
    }
}

/// An uninitialized tick carries no residual state
pub fn tick_cleared(info: &TickInfo) -> bool {
    info.liquidity_gross == 0 && info.liquidity_net == 0 && info.fee_growth_outside_x96 == 0
}

/// Check every single-state invariant at once
pub fn state_valid(state: &PoolState) -> bool {
    price_in_bounds(state)
        && tick_consistent_with_price(state)
        && reinvestment_floor_held(state)
        && !state.locked
}

#[cfg(test)]
mod tests {
    use super::*;
    use elastic_types::Q96;

    fn state(sqrt_price_x96: u128, tick: i32) -> PoolState {
        PoolState {
            sqrt_price_x96,
            tick,
            liquidity: 0,
            reinvest_liquidity: MIN_LIQUIDITY,
            reinvest_liquidity_last: MIN_LIQUIDITY,
            fee_growth_global_x96: Q96,
            share_supply: MIN_LIQUIDITY,
            locked: false,
        }
    }

    #[test]
    fn test_price_in_bounds() {
        assert!(price_in_bounds(&state(Q96, 0)));
        assert!(price_in_bounds(&state(MIN_SQRT_RATIO, 0)));
        assert!(!price_in_bounds(&state(MAX_SQRT_RATIO, 0)));
        assert!(!price_in_bounds(&state(MIN_SQRT_RATIO - 1, 0)));
    }

    #[test]
    fn test_tick_consistent_with_price() {
        assert!(tick_consistent_with_price(&state(Q96, 0)));
        // crossed tick 0 downward
        assert!(tick_consistent_with_price(&state(Q96, -1)));
        assert!(!tick_consistent_with_price(&state(Q96 + 1, -1)));
        assert!(!tick_consistent_with_price(&state(Q96, 1)));
    }

    #[test]
    fn test_fee_growth_monotonic() {
        assert!(fee_growth_monotonic(100, 200));
        assert!(fee_growth_monotonic(100, 100));
        assert!(fee_growth_monotonic(u128::MAX, 5));
        assert!(!fee_growth_monotonic(200, 100));
    }

    #[test]
    fn test_swap_deltas_opposite_signs() {
        assert!(swap_deltas_opposite_signs(100, -50));
        assert!(swap_deltas_opposite_signs(-100, 50));
        assert!(swap_deltas_opposite_signs(100, 0));
        assert!(!swap_deltas_opposite_signs(100, 100));
        assert!(!swap_deltas_opposite_signs(-100, -100));
    }

    #[test]
    fn test_swap_respects_limit() {
        assert!(swap_respects_limit(true, 100, 150, 150));
        assert!(!swap_respects_limit(true, 100, 160, 150));
        assert!(!swap_respects_limit(true, 100, 90, 150));
        assert!(swap_respects_limit(false, 100, 60, 50));
        assert!(!swap_respects_limit(false, 100, 40, 50));
    }

    #[test]
    fn test_tick_cleared() {
        assert!(tick_cleared(&TickInfo::default()));
        let info = TickInfo {
            liquidity_gross: 0,
            liquidity_net: 0,
            fee_growth_outside_x96: 1,
        };
        assert!(!tick_cleared(&info));
    }
}
