use crate::error::PoolError;
use crate::events::emit_swap;
use crate::reinvest::mint_shares;
use crate::settlement::{balance, pay, verify_received};
use crate::storage::{get_config, lock, release, set_state, MAX_TICK_CROSSINGS_PER_SWAP};
use crate::tick::{cross, next_initialized_tick_within_one_word};
use elastic_math::{
    add_delta, calc_fee_growth_increment, calc_rmint_qty, compute_swap_step,
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
};
use elastic_types::{
    PoolCallbackClient, MAX_SQRT_RATIO, MAX_TICK, MAX_TICK_DISTANCE, MIN_SQRT_RATIO, MIN_TICK,
};
use soroban_sdk::{log, Address, Bytes, Env};

/// Reinvestment checkpoint carried through the swap loop and committed once
/// at the end, only if a tick was crossed.
struct CrossingCache {
    reinvest_liquidity_last: u128,
    share_supply: u128,
    fee_growth_global_x96: u128,
    minted_shares: u128,
}

/// Execute a swap
///
/// # Arguments
/// * `swap_qty` - Positive for exact input, negative for exact output
/// * `is_token0` - Whether `swap_qty` is denominated in token0
/// * `limit_sqrt_p` - Price the swap must not move past
///
/// # Returns
/// (delta_qty0, delta_qty1) - Positive values are owed to the pool
///
/// At most `MAX_TICK_CROSSINGS_PER_SWAP` initialized ticks are crossed; a
/// swap hitting that cap settles the part filled so far.
pub fn execute_swap(
    env: &Env,
    sender: Address,
    recipient: Address,
    swap_qty: i128,
    is_token0: bool,
    limit_sqrt_p: u128,
    data: Bytes,
) -> Result<(i128, i128), PoolError> {
    if swap_qty == 0 {
        return Err(PoolError::ZeroQuantity);
    }

    let config = get_config(env)?;
    let mut state = lock(env)?;

    let is_exact_input = swap_qty > 0;
    // exact input of token0 or exact output of token1 pushes the price down
    let will_up_tick = is_exact_input != is_token0;

    let limit_ok = if will_up_tick {
        limit_sqrt_p > state.sqrt_price_x96 && limit_sqrt_p < MAX_SQRT_RATIO
    } else {
        limit_sqrt_p < state.sqrt_price_x96 && limit_sqrt_p > MIN_SQRT_RATIO
    };
    if !limit_ok {
        return Err(PoolError::InvalidPriceLimit);
    }

    let mut specified_amount = swap_qty;
    let mut returned_amount: i128 = 0;
    let mut sqrt_p = state.sqrt_price_x96;
    let mut current_tick = state.tick;
    let mut base_l = state.liquidity;
    let mut reinvest_l = state.reinvest_liquidity;
    let mut cache = CrossingCache {
        reinvest_liquidity_last: state.reinvest_liquidity_last,
        share_supply: state.share_supply,
        fee_growth_global_x96: state.fee_growth_global_x96,
        minted_shares: 0,
    };
    let mut tick_crossings: u32 = 0;

    while specified_amount != 0
        && sqrt_p != limit_sqrt_p
        && tick_crossings < MAX_TICK_CROSSINGS_PER_SWAP
    {
        let (next_tick, initialized) = next_initialized_tick_within_one_word(
            env,
            current_tick,
            config.tick_spacing,
            !will_up_tick,
        );
        let next_tick = next_tick.clamp(MIN_TICK, MAX_TICK);

        // Bound the step so the fee approximation stays accurate
        let temp_next_tick = if will_up_tick {
            next_tick.min(current_tick + MAX_TICK_DISTANCE)
        } else {
            next_tick.max(current_tick - MAX_TICK_DISTANCE)
        };

        let start_sqrt_p = sqrt_p;
        let next_sqrt_p = get_sqrt_ratio_at_tick(temp_next_tick)?;
        let target_sqrt_p = if will_up_tick == (next_sqrt_p > limit_sqrt_p) {
            limit_sqrt_p
        } else {
            next_sqrt_p
        };

        let liquidity = base_l.checked_add(reinvest_l).ok_or(PoolError::Overflow)?;
        let step = compute_swap_step(
            liquidity,
            sqrt_p,
            target_sqrt_p,
            config.fee_bps,
            specified_amount,
            is_exact_input,
            is_token0,
        )?;

        specified_amount = specified_amount
            .checked_sub(step.used_amount)
            .ok_or(PoolError::Overflow)?;
        returned_amount = returned_amount
            .checked_add(step.returned_amount)
            .ok_or(PoolError::Overflow)?;
        reinvest_l = reinvest_l.checked_add(step.delta_l).ok_or(PoolError::Overflow)?;
        sqrt_p = step.next_sqrt_p;

        if sqrt_p != next_sqrt_p {
            // stopped inside the range
            if sqrt_p != start_sqrt_p {
                current_tick = get_tick_at_sqrt_ratio(sqrt_p)?;
            }
            break;
        }

        current_tick = if will_up_tick {
            temp_next_tick
        } else {
            temp_next_tick - 1
        };

        // reached a word boundary or the distance bound, nothing to cross
        if temp_next_tick != next_tick || !initialized {
            continue;
        }

        let minted = calc_rmint_qty(
            reinvest_l,
            cache.reinvest_liquidity_last,
            base_l,
            cache.share_supply,
        )?;
        if minted != 0 {
            cache.share_supply = cache.share_supply.checked_add(minted).ok_or(PoolError::Overflow)?;
            cache.minted_shares = cache.minted_shares.checked_add(minted).ok_or(PoolError::Overflow)?;
            let increment = calc_fee_growth_increment(minted, base_l)?;
            cache.fee_growth_global_x96 = cache.fee_growth_global_x96.wrapping_add(increment);
        }
        cache.reinvest_liquidity_last = reinvest_l;

        let liquidity_net = cross(env, next_tick, cache.fee_growth_global_x96);
        let liquidity_net = if will_up_tick {
            liquidity_net
        } else {
            liquidity_net.checked_neg().ok_or(PoolError::Overflow)?
        };
        base_l = add_delta(base_l, liquidity_net)?;

        tick_crossings += 1;
    }

    if tick_crossings >= MAX_TICK_CROSSINGS_PER_SWAP && specified_amount != 0 {
        log!(env, "swap truncated at crossing cap", specified_amount);
    }

    state.sqrt_price_x96 = sqrt_p;
    state.tick = current_tick;
    state.liquidity = base_l;
    state.reinvest_liquidity = reinvest_l;
    if tick_crossings > 0 {
        state.reinvest_liquidity_last = cache.reinvest_liquidity_last;
        state.share_supply = cache.share_supply;
        state.fee_growth_global_x96 = cache.fee_growth_global_x96;
        if cache.minted_shares > 0 {
            mint_shares(env, &env.current_contract_address(), cache.minted_shares)?;
        }
    }
    set_state(env, &state);

    let filled = swap_qty
        .checked_sub(specified_amount)
        .ok_or(PoolError::Overflow)?;
    let (delta_qty0, delta_qty1) = if is_token0 {
        (filled, returned_amount)
    } else {
        (returned_amount, filled)
    };

    // Pay out first, then collect the inbound leg through the callback
    if delta_qty0 < 0 {
        pay(env, &config.token0, &recipient, delta_qty0.unsigned_abs())?;
    }
    if delta_qty1 < 0 {
        pay(env, &config.token1, &recipient, delta_qty1.unsigned_abs())?;
    }

    let balance0_before = balance(env, &config.token0);
    let balance1_before = balance(env, &config.token1);

    PoolCallbackClient::new(env, &sender).swap_callback(&delta_qty0, &delta_qty1, &data);

    if delta_qty0 > 0 {
        verify_received(
            env,
            &config.token0,
            balance0_before,
            delta_qty0.unsigned_abs(),
            PoolError::LackingQty0,
        )?;
    }
    if delta_qty1 > 0 {
        verify_received(
            env,
            &config.token1,
            balance1_before,
            delta_qty1.unsigned_abs(),
            PoolError::LackingQty1,
        )?;
    }

    release(env, &mut state);
    emit_swap(
        env,
        &sender,
        &recipient,
        delta_qty0,
        delta_qty1,
        state.sqrt_price_x96,
        state.liquidity,
        state.tick,
        tick_crossings,
    );

    Ok((delta_qty0, delta_qty1))
}

