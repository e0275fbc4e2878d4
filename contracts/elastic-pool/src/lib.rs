#![no_std]

mod error;
mod events;
#[cfg(test)]
mod invariants;
mod liquidity;
mod position;
mod reinvest;
mod settlement;
mod storage;
mod swap;
mod tick;

pub use error::PoolError;

use elastic_types::{
    max_liquidity_per_tick, LiquidityState, PoolConfig, PoolState, PositionInfo, PositionKey,
    TickInfo, MAX_FEE_BPS, MAX_TICK_SPACING,
};
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env};
use storage::{
    get_config, get_position, get_share_balance, get_state, get_tick, has_config, set_config,
    set_state,
};

#[contract]
pub struct ElasticPool;

#[contractimpl]
impl ElasticPool {
    /// Set the immutable pool parameters. The pool stays locked until
    /// `unlock_pool` sets its price.
    pub fn initialize(
        env: Env,
        token0: Address,
        token1: Address,
        fee_bps: u32,
        tick_spacing: i32,
    ) -> Result<(), PoolError> {
        if has_config(&env) {
            return Err(PoolError::AlreadyInitialized);
        }
        if token0 >= token1 {
            return Err(PoolError::InvalidTokenOrder);
        }
        if fee_bps == 0 || fee_bps > MAX_FEE_BPS {
            return Err(PoolError::InvalidFee);
        }
        if tick_spacing <= 0 || tick_spacing > MAX_TICK_SPACING {
            return Err(PoolError::InvalidTickSpacing);
        }

        let config = PoolConfig {
            token0,
            token1,
            fee_bps,
            tick_spacing,
            max_liquidity_per_tick: max_liquidity_per_tick(tick_spacing),
        };
        set_config(&env, &config);
        set_state(&env, &PoolState::unpriced());
        Ok(())
    }

    /// Set the initial price; `sender` pays for the reinvestment floor
    /// through `mint_callback`.
    ///
    /// # Returns
    /// (qty0, qty1) - Token amounts received
    pub fn unlock_pool(
        env: Env,
        sender: Address,
        initial_sqrt_p: u128,
        data: Bytes,
    ) -> Result<(u128, u128), PoolError> {
        sender.require_auth();
        liquidity::unlock_pool(&env, sender, initial_sqrt_p, data)
    }

    /// Add liquidity to `owner`'s position; `sender` pays through
    /// `mint_callback`, which receives `data` unchanged.
    ///
    /// # Returns
    /// (qty0, qty1) - Token amounts deposited
    pub fn mint(
        env: Env,
        sender: Address,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        qty: u128,
        data: Bytes,
    ) -> Result<(u128, u128), PoolError> {
        sender.require_auth();
        liquidity::mint(&env, sender, owner, tick_lower, tick_upper, qty, data)
    }

    /// Remove liquidity from a position
    ///
    /// # Returns
    /// (qty0, qty1) - Token amounts paid to `owner`
    pub fn burn(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        qty: u128,
    ) -> Result<(u128, u128), PoolError> {
        owner.require_auth();
        liquidity::burn(&env, owner, tick_lower, tick_upper, qty)
    }

    /// Redeem reinvestment shares for tokens at the current price
    ///
    /// # Returns
    /// (qty0, qty1) - Token amounts paid to `owner`
    pub fn burn_shares(env: Env, owner: Address, qty: u128) -> Result<(u128, u128), PoolError> {
        owner.require_auth();
        reinvest::burn_shares(&env, owner, qty)
    }

    /// Execute a swap
    ///
    /// # Arguments
    /// * `recipient` - Address to receive output tokens
    /// * `swap_qty` - Positive for exact input, negative for exact output
    /// * `is_token0` - Whether `swap_qty` is denominated in token0
    /// * `limit_sqrt_p` - Price limit for the swap
    ///
    /// # Returns
    /// (delta_qty0, delta_qty1) - Negative values are amounts paid out
    pub fn swap(
        env: Env,
        sender: Address,
        recipient: Address,
        swap_qty: i128,
        is_token0: bool,
        limit_sqrt_p: u128,
        data: Bytes,
    ) -> Result<(i128, i128), PoolError> {
        sender.require_auth();
        swap::execute_swap(&env, sender, recipient, swap_qty, is_token0, limit_sqrt_p, data)
    }

    // === Reinvestment shares ===

    pub fn transfer_shares(env: Env, from: Address, to: Address, qty: u128) -> Result<(), PoolError> {
        from.require_auth();
        reinvest::transfer_shares(&env, &from, &to, qty)
    }

    pub fn share_balance(env: Env, owner: Address) -> u128 {
        get_share_balance(&env, &owner)
    }

    pub fn share_supply(env: Env) -> Result<u128, PoolError> {
        Ok(get_state(&env)?.share_supply)
    }

    // === View Functions ===

    pub fn get_config(env: Env) -> Result<PoolConfig, PoolError> {
        get_config(&env)
    }

    pub fn get_state(env: Env) -> Result<PoolState, PoolError> {
        get_state(&env)
    }

    /// Active, reinvestment and last-checkpointed reinvestment liquidity
    pub fn get_liquidity_state(env: Env) -> Result<LiquidityState, PoolError> {
        let state = get_state(&env)?;
        Ok(LiquidityState {
            liquidity: state.liquidity,
            reinvest_liquidity: state.reinvest_liquidity,
            reinvest_liquidity_last: state.reinvest_liquidity_last,
        })
    }

    pub fn get_fee_growth_global(env: Env) -> Result<u128, PoolError> {
        Ok(get_state(&env)?.fee_growth_global_x96)
    }

    pub fn get_tick(env: Env, tick: i32) -> TickInfo {
        get_tick(&env, tick)
    }

    pub fn get_position(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> PositionInfo {
        let key = PositionKey {
            owner,
            tick_lower,
            tick_upper,
        };
        get_position(&env, &key)
    }

    pub fn is_locked(env: Env) -> Result<bool, PoolError> {
        Ok(get_state(&env)?.locked)
    }

    pub fn sqrt_price_x96(env: Env) -> Result<u128, PoolError> {
        Ok(get_state(&env)?.sqrt_price_x96)
    }

    pub fn tick(env: Env) -> Result<i32, PoolError> {
        Ok(get_state(&env)?.tick)
    }

    /// Active liquidity, excluding reinvestment liquidity
    pub fn liquidity(env: Env) -> Result<u128, PoolError> {
        Ok(get_state(&env)?.liquidity)
    }

    pub fn token0(env: Env) -> Result<Address, PoolError> {
        Ok(get_config(&env)?.token0)
    }

    pub fn token1(env: Env) -> Result<Address, PoolError> {
        Ok(get_config(&env)?.token1)
    }

    pub fn fee(env: Env) -> Result<u32, PoolError> {
        Ok(get_config(&env)?.fee_bps)
    }

    pub fn tick_spacing(env: Env) -> Result<i32, PoolError> {
        Ok(get_config(&env)?.tick_spacing)
    }
}
