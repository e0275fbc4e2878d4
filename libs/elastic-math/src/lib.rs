#![no_std]

pub mod full_math;
pub mod liquidity_math;
pub mod quad_math;
pub mod reinvestment_math;
pub mod safe_cast;
pub mod swap_math;
pub mod tick_math;

pub use full_math::*;
pub use liquidity_math::*;
pub use quad_math::*;
pub use reinvestment_math::*;
pub use safe_cast::*;
pub use swap_math::*;
pub use tick_math::*;

use soroban_sdk::contracterror;

/// Failures raised by the fixed-point primitives
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MathError {
    DivisionByZero = 1,
    /// Result does not fit the target width
    Overflow = 2,
    /// Narrowing or sign cast out of range
    CastOverflow = 3,
    TickOutOfBounds = 4,
    SqrtPriceOutOfBounds = 5,
    LiquidityUnderflow = 6,
    LiquidityOverflow = 7,
}
