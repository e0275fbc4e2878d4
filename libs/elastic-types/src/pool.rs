use soroban_sdk::{contracttype, Address};

/// Current pool state - stored in Instance storage for frequent access
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt(price) as Q64.96, zero until the pool is unlocked
    pub sqrt_price_x96: u128,
    /// Current tick index
    pub tick: i32,
    /// Liquidity of positions in range at the current price
    pub liquidity: u128,
    /// Liquidity accumulated from swap fees
    pub reinvest_liquidity: u128,
    /// Reinvestment liquidity at the last share checkpoint
    pub reinvest_liquidity_last: u128,
    /// Reinvestment shares earned per unit of liquidity (Q96, wrapping)
    pub fee_growth_global_x96: u128,
    /// Outstanding reinvestment shares
    pub share_supply: u128,
    /// Reentrancy guard; also set while the pool is not yet priced
    pub locked: bool,
}

impl PoolState {
    /// State of a pool whose parameters are set but which has no price yet
    pub fn unpriced() -> Self {
        Self {
            sqrt_price_x96: 0,
            tick: 0,
            liquidity: 0,
            reinvest_liquidity: 0,
            reinvest_liquidity_last: 0,
            fee_growth_global_x96: 0,
            share_supply: 0,
            locked: true,
        }
    }
}

/// Pool configuration - immutable after creation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Swap fee in parts per ten-thousand
    pub fee_bps: u32,
    /// Tick spacing for this pool
    pub tick_spacing: i32,
    /// Maximum liquidity per tick
    pub max_liquidity_per_tick: u128,
}

/// Snapshot of the three liquidity figures that drive share minting
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityState {
    pub liquidity: u128,
    pub reinvest_liquidity: u128,
    pub reinvest_liquidity_last: u128,
}
