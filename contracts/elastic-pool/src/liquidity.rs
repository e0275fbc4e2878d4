use crate::error::PoolError;
use crate::events::{emit_burn, emit_initialize, emit_mint};
use crate::position;
use crate::reinvest::{mint_shares, sync_fee_growth, transfer_shares};
use crate::settlement::{balance, pay, verify_received};
use crate::storage::{get_config, get_position, get_state, lock, release, set_state};
use crate::tick::{clear as clear_tick, flip_tick, get_fee_growth_inside, update as update_tick};
use elastic_math::{
    add_delta, get_amounts_for_liquidity, get_qtys_for_initial_lockup, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio, rev_to_i128, to_i128,
};
use elastic_types::{
    PoolCallbackClient, PoolConfig, PoolState, PositionKey, MAX_SQRT_RATIO, MAX_TICK,
    MIN_LIQUIDITY, MIN_SQRT_RATIO, MIN_TICK, Q96,
};
use soroban_sdk::{Address, Bytes, Env};

/// Set the initial price and seed the reinvestment liquidity floor.
///
/// The sender pays for `MIN_LIQUIDITY` of reinvestment liquidity through
/// `mint_callback`; the matching shares stay with the pool.
pub fn unlock_pool(
    env: &Env,
    sender: Address,
    initial_sqrt_p: u128,
    data: Bytes,
) -> Result<(u128, u128), PoolError> {
    let config = get_config(env)?;
    let state = get_state(env)?;
    if state.sqrt_price_x96 != 0 {
        return Err(PoolError::AlreadyUnlocked);
    }
    if !(MIN_SQRT_RATIO..MAX_SQRT_RATIO).contains(&initial_sqrt_p) {
        return Err(PoolError::InvalidInitialPrice);
    }

    let tick = get_tick_at_sqrt_ratio(initial_sqrt_p)?;
    let (qty0, qty1) = get_qtys_for_initial_lockup(initial_sqrt_p, MIN_LIQUIDITY)?;

    let mut state = PoolState {
        sqrt_price_x96: initial_sqrt_p,
        tick,
        liquidity: 0,
        reinvest_liquidity: MIN_LIQUIDITY,
        reinvest_liquidity_last: MIN_LIQUIDITY,
        fee_growth_global_x96: Q96,
        share_supply: MIN_LIQUIDITY,
        locked: true,
    };
    mint_shares(env, &env.current_contract_address(), MIN_LIQUIDITY)?;
    set_state(env, &state);

    collect_payment(env, &config, &sender, qty0, qty1, data)?;

    release(env, &mut state);
    emit_initialize(env, initial_sqrt_p, tick);

    Ok((qty0, qty1))
}

/// Add liquidity to `owner`'s position, paid for by `sender`
pub fn mint(
    env: &Env,
    sender: Address,
    owner: Address,
    tick_lower: i32,
    tick_upper: i32,
    qty: u128,
    data: Bytes,
) -> Result<(u128, u128), PoolError> {
    if qty == 0 {
        return Err(PoolError::ZeroQuantity);
    }

    let config = get_config(env)?;
    validate_ticks(tick_lower, tick_upper, config.tick_spacing)?;
    let mut state = lock(env)?;

    let (qty0, qty1) = tweak_position(
        env,
        &config,
        &mut state,
        &owner,
        tick_lower,
        tick_upper,
        to_i128(qty)?,
    )?;
    set_state(env, &state);

    collect_payment(env, &config, &sender, qty0, qty1, data)?;

    release(env, &mut state);
    emit_mint(env, &sender, &owner, tick_lower, tick_upper, qty, qty0, qty1);

    Ok((qty0, qty1))
}

/// Remove liquidity from `owner`'s position and pay out the tokens
pub fn burn(
    env: &Env,
    owner: Address,
    tick_lower: i32,
    tick_upper: i32,
    qty: u128,
) -> Result<(u128, u128), PoolError> {
    if qty == 0 {
        return Err(PoolError::ZeroQuantity);
    }

    let config = get_config(env)?;
    validate_ticks(tick_lower, tick_upper, config.tick_spacing)?;
    let mut state = lock(env)?;

    let key = PositionKey {
        owner: owner.clone(),
        tick_lower,
        tick_upper,
    };
    if get_position(env, &key).liquidity < qty {
        return Err(PoolError::InsufficientLiquidity);
    }

    let (qty0, qty1) = tweak_position(
        env,
        &config,
        &mut state,
        &owner,
        tick_lower,
        tick_upper,
        rev_to_i128(qty)?,
    )?;

    pay(env, &config.token0, &owner, qty0)?;
    pay(env, &config.token1, &owner, qty1)?;

    release(env, &mut state);
    emit_burn(env, &owner, tick_lower, tick_upper, qty, qty0, qty1);

    Ok((qty0, qty1))
}

/// Shared path of mint and burn: checkpoints reinvestment, updates both
/// range edges and the position, and returns the token quantities
/// (rounded up when adding, down when removing).
fn tweak_position(
    env: &Env,
    config: &PoolConfig,
    state: &mut PoolState,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: i128,
) -> Result<(u128, u128), PoolError> {
    let fee_growth_global = sync_fee_growth(env, state, true)?;

    let flipped_lower = update_tick(
        env,
        tick_lower,
        state.tick,
        liquidity_delta,
        fee_growth_global,
        true,
        config.max_liquidity_per_tick,
    )?;
    let flipped_upper = update_tick(
        env,
        tick_upper,
        state.tick,
        liquidity_delta,
        fee_growth_global,
        false,
        config.max_liquidity_per_tick,
    )?;

    let fee_growth_inside =
        get_fee_growth_inside(env, tick_lower, tick_upper, state.tick, fee_growth_global);

    let key = PositionKey {
        owner: owner.clone(),
        tick_lower,
        tick_upper,
    };
    let fee_shares = position::update(env, &key, liquidity_delta, fee_growth_inside)?;
    if fee_shares > 0 {
        transfer_shares(env, &env.current_contract_address(), owner, fee_shares)?;
    }

    // Update the tick index; emptied ticks are cleared after their snapshot was read
    if flipped_lower {
        flip_tick(env, tick_lower, config.tick_spacing)?;
        if liquidity_delta < 0 {
            clear_tick(env, tick_lower);
        }
    }
    if flipped_upper {
        flip_tick(env, tick_upper, config.tick_spacing)?;
        if liquidity_delta < 0 {
            clear_tick(env, tick_upper);
        }
    }

    // Active liquidity only changes for ranges containing the current tick
    if state.tick >= tick_lower && state.tick < tick_upper {
        state.liquidity = add_delta(state.liquidity, liquidity_delta)?;
    }

    let (qty0, qty1) = get_amounts_for_liquidity(
        state.sqrt_price_x96,
        get_sqrt_ratio_at_tick(tick_lower)?,
        get_sqrt_ratio_at_tick(tick_upper)?,
        liquidity_delta.unsigned_abs(),
        liquidity_delta > 0,
    )?;

    Ok((qty0, qty1))
}

/// Request `qty0`/`qty1` from `sender` through `mint_callback` and check the
/// balances actually grew by that much.
fn collect_payment(
    env: &Env,
    config: &PoolConfig,
    sender: &Address,
    qty0: u128,
    qty1: u128,
    data: Bytes,
) -> Result<(), PoolError> {
    let balance0_before = balance(env, &config.token0);
    let balance1_before = balance(env, &config.token1);

    PoolCallbackClient::new(env, sender).mint_callback(&qty0, &qty1, &data);

    verify_received(env, &config.token0, balance0_before, qty0, PoolError::LackingQty0)?;
    verify_received(env, &config.token1, balance1_before, qty1, PoolError::LackingQty1)?;
    Ok(())
}

/// Validate tick parameters
pub fn validate_ticks(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<(), PoolError> {
    if tick_lower >= tick_upper {
        return Err(PoolError::InvalidTickRange);
    }
    if tick_lower < MIN_TICK || tick_upper > MAX_TICK {
        return Err(PoolError::TickOutOfBounds);
    }
    if tick_lower % tick_spacing != 0 || tick_upper % tick_spacing != 0 {
        return Err(PoolError::TickNotAligned);
    }
    Ok(())
}
