#![no_std]

mod callback;
mod pool;
mod position;
mod tick;

pub use callback::*;
pub use pool::*;
pub use position::*;
pub use tick::*;

/// Q96 constant (2^96), the fixed-point identity for prices and fee growth
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 representation (originally -887272 for uint160)
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
/// Limited by u128 representation (originally 887272 for uint160)
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price (at MIN_TICK)
pub const MIN_SQRT_RATIO: u128 = 18447090764788882728;

/// Maximum sqrt price (at MAX_TICK)
pub const MAX_SQRT_RATIO: u128 = 340275971719517849884101479065584693834;

/// Fee rate unit: fees are expressed in parts per ten-thousand
pub const BPS: u128 = 10_000;
pub const TWO_BPS: u128 = 20_000;

/// Largest fee rate a pool accepts (10%)
pub const MAX_FEE_BPS: u32 = 1_000;

/// Largest tick spacing a pool accepts
pub const MAX_TICK_SPACING: i32 = 16_384;

/// Reinvestment liquidity seeded when a pool is unlocked.
/// Keeps the share price math away from a zero denominator.
pub const MIN_LIQUIDITY: u128 = 100_000;

/// Max ticks a single swap step may travel (~5% price movement).
/// The fee approximation in the swap step only holds over short distances.
pub const MAX_TICK_DISTANCE: i32 = 480;

/// Calculate maximum liquidity per tick for a given tick spacing
pub fn max_liquidity_per_tick(tick_spacing: i32) -> u128 {
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    u128::MAX / num_ticks
}
