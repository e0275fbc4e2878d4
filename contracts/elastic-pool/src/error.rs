use elastic_math::MathError;
use soroban_sdk::contracterror;

/// Errors returned by the pool entry points
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Lifecycle errors (100-199)
    /// Pool parameters were already set
    AlreadyInitialized = 100,
    /// Pool parameters were never set
    NotInitialized = 101,
    /// Initial price was already set
    AlreadyUnlocked = 102,
    /// Another operation holds the lock, or the pool has no price yet
    Locked = 103,

    // Validation errors (200-299)
    /// token0 must sort strictly before token1
    InvalidTokenOrder = 200,
    /// Fee must be in (0, MAX_FEE_BPS]
    InvalidFee = 201,
    /// Tick spacing must be in (0, MAX_TICK_SPACING]
    InvalidTickSpacing = 202,
    /// Lower tick must be below upper tick
    InvalidTickRange = 203,
    TickOutOfBounds = 204,
    /// Tick is not a multiple of the tick spacing
    TickNotAligned = 205,
    ZeroQuantity = 206,
    /// Price limit on the wrong side of the current price, or out of bounds
    InvalidPriceLimit = 207,
    InvalidInitialPrice = 208,

    // Capacity errors (300-399)
    /// Tick gross liquidity would exceed the per-tick cap
    TickLiquidityOverflow = 300,
    /// Position holds less liquidity than requested
    InsufficientLiquidity = 301,
    /// Owner holds fewer reinvestment shares than requested
    InsufficientShares = 302,

    // Settlement errors (400-499)
    /// Callback left the pool short of token0
    LackingQty0 = 400,
    /// Callback left the pool short of token1
    LackingQty1 = 401,

    // Arithmetic errors (500-599)
    DivisionByZero = 500,
    Overflow = 501,
    CastOverflow = 502,
    SqrtPriceOutOfBounds = 503,
    LiquidityUnderflow = 504,
    LiquidityOverflow = 505,
}

impl From<MathError> for PoolError {
    fn from(error: MathError) -> Self {
        match error {
            MathError::DivisionByZero => PoolError::DivisionByZero,
            MathError::Overflow => PoolError::Overflow,
            MathError::CastOverflow => PoolError::CastOverflow,
            MathError::TickOutOfBounds => PoolError::TickOutOfBounds,
            MathError::SqrtPriceOutOfBounds => PoolError::SqrtPriceOutOfBounds,
            MathError::LiquidityUnderflow => PoolError::LiquidityUnderflow,
            MathError::LiquidityOverflow => PoolError::LiquidityOverflow,
        }
    }
}
