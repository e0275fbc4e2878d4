use crate::error::PoolError;
use crate::storage::{get_tick, get_tick_bitmap_word, remove_tick, set_tick, set_tick_bitmap_word};
use elastic_math::add_delta;
use soroban_sdk::Env;

/// Apply a liquidity delta to one edge of a range.
/// Returns true if the tick was flipped (initialized or uninitialized).
///
/// The entry is written even when gross liquidity drops to zero; the caller
/// reads its fee snapshot and then calls [`clear`].
pub fn update(
    env: &Env,
    tick: i32,
    tick_current: i32,
    liquidity_delta: i128,
    fee_growth_global_x96: u128,
    is_lower: bool,
    max_liquidity: u128,
) -> Result<bool, PoolError> {
    let mut info = get_tick(env, tick);

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = add_delta(liquidity_gross_before, liquidity_delta)?;

    if liquidity_gross_after > max_liquidity {
        return Err(PoolError::TickLiquidityOverflow);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    // growth below a fresh tick is assumed to have happened below it
    if liquidity_gross_before == 0 && tick <= tick_current {
        info.fee_growth_outside_x96 = fee_growth_global_x96;
    }

    info.liquidity_gross = liquidity_gross_after;

    // Lower edge adds liquidity when crossed upward, upper edge removes it
    info.liquidity_net = if is_lower {
        info.liquidity_net.checked_add(liquidity_delta)
    } else {
        info.liquidity_net.checked_sub(liquidity_delta)
    }
    .ok_or(PoolError::Overflow)?;

    set_tick(env, tick, &info);

    Ok(flipped)
}

/// Cross a tick during a swap.
/// Returns liquidity_net; the caller negates it when moving down.
pub fn cross(env: &Env, tick: i32, fee_growth_global_x96: u128) -> i128 {
    let mut info = get_tick(env, tick);
    info.fee_growth_outside_x96 = fee_growth_global_x96.wrapping_sub(info.fee_growth_outside_x96);
    set_tick(env, tick, &info);
    info.liquidity_net
}

/// Drop a tick whose gross liquidity returned to zero
pub fn clear(env: &Env, tick: i32) {
    remove_tick(env, tick);
}

/// Fee growth accrued inside [tick_lower, tick_upper), modulo 2^128
pub fn get_fee_growth_inside(
    env: &Env,
    tick_lower: i32,
    tick_upper: i32,
    tick_current: i32,
    fee_growth_global_x96: u128,
) -> u128 {
    let lower = get_tick(env, tick_lower).fee_growth_outside_x96;
    let upper = get_tick(env, tick_upper).fee_growth_outside_x96;

    let fee_growth_below = if tick_current >= tick_lower {
        lower
    } else {
        fee_growth_global_x96.wrapping_sub(lower)
    };

    let fee_growth_above = if tick_current < tick_upper {
        upper
    } else {
        fee_growth_global_x96.wrapping_sub(upper)
    };

    fee_growth_global_x96
        .wrapping_sub(fee_growth_below)
        .wrapping_sub(fee_growth_above)
}

// === Tick Bitmap Operations ===
// Using u128 per word (128 ticks per word)

/// Tick index in units of tick spacing, rounded toward negative infinity
fn compress(tick: i32, tick_spacing: i32) -> i32 {
    tick.div_euclid(tick_spacing)
}

fn position(compressed: i32) -> (i32, u8) {
    (compressed >> 7, compressed.rem_euclid(128) as u8)
}

/// Toggle a tick's membership in the tick index
pub fn flip_tick(env: &Env, tick: i32, tick_spacing: i32) -> Result<(), PoolError> {
    if tick % tick_spacing != 0 {
        return Err(PoolError::TickNotAligned);
    }

    let (word_pos, bit_pos) = position(compress(tick, tick_spacing));
    let mask = 1u128 << bit_pos;
    let word = get_tick_bitmap_word(env, word_pos);
    set_tick_bitmap_word(env, word_pos, word ^ mask);
    Ok(())
}

/// Whether `tick` is a member of the tick index
#[cfg(test)]
pub fn is_flipped(env: &Env, tick: i32, tick_spacing: i32) -> bool {
    let (word_pos, bit_pos) = position(compress(tick, tick_spacing));
    get_tick_bitmap_word(env, word_pos) & (1u128 << bit_pos) != 0
}

/// Find the next initialized tick within one word
/// Returns (tick, initialized)
pub fn next_initialized_tick_within_one_word(
    env: &Env,
    tick: i32,
    tick_spacing: i32,
    lte: bool, // less than or equal (searching left)
) -> (i32, bool) {
    let compressed = compress(tick, tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);

        // bits at or below the current position
        let mask = (1u128 << bit_pos) - 1 + (1u128 << bit_pos);
        let masked = get_tick_bitmap_word(env, word_pos) & mask;

        let initialized = masked != 0;
        let next = if initialized {
            let msb = 127 - masked.leading_zeros() as i32;
            ((word_pos * 128) + msb) * tick_spacing
        } else {
            (word_pos * 128) * tick_spacing
        };

        (next, initialized)
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);

        // bits at or above the next position
        let mask = !((1u128 << bit_pos) - 1);
        let masked = get_tick_bitmap_word(env, word_pos) & mask;

        let initialized = masked != 0;
        let next = if initialized {
            let lsb = masked.trailing_zeros() as i32;
            ((word_pos * 128) + lsb) * tick_spacing
        } else {
            ((word_pos * 128) + 127) * tick_spacing
        };

        (next, initialized)
    }
}
