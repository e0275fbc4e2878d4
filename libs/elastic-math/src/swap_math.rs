use crate::full_math::{mul_div_ceiling_u256, mul_div_floor_u256, u256_to_u128};
use crate::quad_math::get_smaller_root_of_quad_eqn;
use crate::safe_cast::{rev_to_i128, to_i128};
use crate::MathError;
use elastic_types::{BPS, Q96, TWO_BPS};
use ethnum::U256;

/// Result of a single swap step computation
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapStepResult {
    /// Part of the specified amount consumed by this step (same sign as the
    /// specified amount)
    pub used_amount: i128,
    /// Delta of the other token; negative when the pool pays it out
    pub returned_amount: i128,
    /// Fee collected during the step, as reinvestment liquidity
    pub delta_l: u128,
    /// The sqrt price after this step
    pub next_sqrt_p: u128,
}

#[inline]
fn u(value: u128) -> U256 {
    U256::new(value)
}

fn narrow(value: U256) -> Result<u128, MathError> {
    u256_to_u128(value).ok_or(MathError::Overflow)
}

/// a - b as a signed 128-bit value
fn signed_sub(a: U256, b: U256) -> Result<i128, MathError> {
    if a >= b {
        to_i128(narrow(a - b)?)
    } else {
        rev_to_i128(narrow(b - a)?)
    }
}

fn checked_sub(a: U256, b: U256) -> Result<U256, MathError> {
    a.checked_sub(b).ok_or(MathError::Overflow)
}

fn checked_mul(a: U256, b: U256) -> Result<U256, MathError> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

/// Compute one swap step within a single tick range
///
/// # Arguments
/// * `liquidity` - Active plus reinvestment liquidity of the range
/// * `current_sqrt_p` - Current sqrt price
/// * `target_sqrt_p` - Next tick boundary or price limit
/// * `fee_bps` - Fee in basis points (30 = 0.3%)
/// * `specified_amount` - Remaining amount (positive = exact input, negative = exact output)
/// * `is_exact_input` - Whether `specified_amount` is an input amount
/// * `is_token0` - Whether `specified_amount` is denominated in token0
pub fn compute_swap_step(
    liquidity: u128,
    current_sqrt_p: u128,
    target_sqrt_p: u128,
    fee_bps: u32,
    specified_amount: i128,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<SwapStepResult, MathError> {
    if current_sqrt_p == target_sqrt_p {
        return Ok(SwapStepResult {
            used_amount: 0,
            returned_amount: 0,
            delta_l: 0,
            next_sqrt_p: current_sqrt_p,
        });
    }

    let reach_amount = calc_reach_amount(
        liquidity,
        current_sqrt_p,
        target_sqrt_p,
        fee_bps,
        is_exact_input,
        is_token0,
    )?;

    let stops_before_target = if is_exact_input {
        reach_amount > specified_amount
    } else {
        reach_amount <= specified_amount
    };

    let (used_amount, delta_l, next_sqrt_p) = if stops_before_target {
        let abs_delta = specified_amount.unsigned_abs();
        let delta_l = estimate_incremental_liquidity(
            abs_delta,
            liquidity,
            current_sqrt_p,
            fee_bps,
            is_exact_input,
            is_token0,
        )?;
        let next_sqrt_p = calc_final_price(
            abs_delta,
            liquidity,
            delta_l,
            current_sqrt_p,
            is_exact_input,
            is_token0,
        )?;
        (specified_amount, delta_l, next_sqrt_p)
    } else {
        let delta_l = calc_incremental_liquidity(
            reach_amount.unsigned_abs(),
            liquidity,
            current_sqrt_p,
            target_sqrt_p,
            is_exact_input,
            is_token0,
        )?;
        (reach_amount, delta_l, target_sqrt_p)
    };

    let returned_amount = calc_returned_amount(
        liquidity,
        delta_l,
        current_sqrt_p,
        next_sqrt_p,
        is_exact_input,
        is_token0,
    )?;

    Ok(SwapStepResult {
        used_amount,
        returned_amount,
        delta_l,
        next_sqrt_p,
    })
}

/// Amount of the specified token needed to move the price from `current_sqrt_p`
/// to `target_sqrt_p`, fee included. Negative for exact output.
pub fn calc_reach_amount(
    liquidity: u128,
    current_sqrt_p: u128,
    target_sqrt_p: u128,
    fee_bps: u32,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<i128, MathError> {
    let liquidity = u(liquidity);
    let current = u(current_sqrt_p);
    let target = u(target_sqrt_p);
    let fee = u(fee_bps as u128);
    let two_bps = u(TWO_BPS);
    let abs_price_diff = u(current_sqrt_p.abs_diff(target_sqrt_p));

    if is_exact_input {
        if is_token0 {
            // numerator = 2 * L * |diff|, denominator = 2 * target - fee * current
            let denominator = checked_sub(two_bps * target, fee * current)?;
            let numerator = mul_div_floor_u256(liquidity, two_bps * abs_price_diff, denominator)?;
            to_i128(narrow(mul_div_floor_u256(numerator, u(Q96), current)?)?)
        } else {
            let denominator = checked_sub(two_bps * current, fee * target)?;
            let numerator = mul_div_floor_u256(liquidity, two_bps * abs_price_diff, denominator)?;
            to_i128(narrow(mul_div_floor_u256(numerator, current, u(Q96))?)?)
        }
    } else if is_token0 {
        let denominator = checked_sub(two_bps * current, fee * target)?;
        let numerator = checked_sub(denominator, fee * current)?;
        let numerator = mul_div_floor_u256(liquidity << 96, numerator, denominator)?;
        let amount = mul_div_floor_u256(numerator, abs_price_diff, current)? / target;
        rev_to_i128(narrow(amount)?)
    } else {
        let denominator = checked_sub(two_bps * target, fee * current)?;
        let numerator = checked_sub(denominator, fee * target)?;
        let numerator = mul_div_floor_u256(liquidity, numerator, denominator)?;
        rev_to_i128(narrow(mul_div_floor_u256(numerator, abs_price_diff, u(Q96))?)?)
    }
}

/// Fee liquidity collected when the step stops short of its target.
///
/// Exact input uses the closed-form approximation; exact output solves
/// `fee * x^2 - 2 * b * x + c = 0` for its smaller root.
pub fn estimate_incremental_liquidity(
    abs_delta: u128,
    liquidity: u128,
    current_sqrt_p: u128,
    fee_bps: u32,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<u128, MathError> {
    let abs_delta = u(abs_delta);
    let current = u(current_sqrt_p);
    let fee = u(fee_bps as u128);

    let delta_l = if is_exact_input {
        if is_token0 {
            mul_div_floor_u256(current, abs_delta * fee, u(TWO_BPS) << 96)?
        } else {
            mul_div_floor_u256(u(Q96), abs_delta * fee, u(TWO_BPS) * current)?
        }
    } else {
        let liquidity = u(liquidity);
        let a = fee;
        let mut b = u(BPS - fee_bps as u128) * liquidity;
        let mut c = checked_mul(fee * liquidity, abs_delta)?;
        if is_token0 {
            b = checked_sub(b, mul_div_floor_u256(u(BPS) * abs_delta, current, u(Q96))?)?;
            c = mul_div_floor_u256(c, current, u(Q96))?;
        } else {
            b = checked_sub(b, mul_div_floor_u256(u(BPS) * abs_delta, u(Q96), current)?)?;
            c = mul_div_floor_u256(c, u(Q96), current)?;
        }
        get_smaller_root_of_quad_eqn(a, b, c)?
    };
    narrow(delta_l)
}

/// Fee liquidity collected when the step reaches its target price exactly
pub fn calc_incremental_liquidity(
    abs_delta: u128,
    liquidity: u128,
    current_sqrt_p: u128,
    next_sqrt_p: u128,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<u128, MathError> {
    let abs_delta = u(abs_delta);
    let liquidity_wide = u(liquidity);
    let current = u(current_sqrt_p);
    let next = u(next_sqrt_p);

    let new_liquidity = if is_token0 {
        // L / sqrt_p is the token0 reserve
        let reserve = mul_div_floor_u256(liquidity_wide, u(Q96), current)?;
        let reserve = shift_reserve(reserve, abs_delta, is_exact_input)?;
        mul_div_floor_u256(next, reserve, u(Q96))?
    } else {
        // L * sqrt_p is the token1 reserve
        let reserve = mul_div_floor_u256(liquidity_wide, current, u(Q96))?;
        let reserve = shift_reserve(reserve, abs_delta, is_exact_input)?;
        mul_div_floor_u256(reserve, u(Q96), next)?
    };

    if new_liquidity > liquidity_wide {
        narrow(new_liquidity - liquidity_wide)
    } else {
        Ok(0)
    }
}

fn shift_reserve(reserve: U256, abs_delta: U256, is_exact_input: bool) -> Result<U256, MathError> {
    if is_exact_input {
        reserve.checked_add(abs_delta).ok_or(MathError::Overflow)
    } else {
        checked_sub(reserve, abs_delta)
    }
}

/// Price reached after trading `abs_delta` without hitting the target
pub fn calc_final_price(
    abs_delta: u128,
    liquidity: u128,
    delta_l: u128,
    current_sqrt_p: u128,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<u128, MathError> {
    let abs_delta = u(abs_delta);
    let liquidity = u(liquidity);
    let grown = liquidity + u(delta_l);
    let current = u(current_sqrt_p);

    let next = if is_token0 {
        let tmp = mul_div_floor_u256(abs_delta, current, u(Q96))?;
        if is_exact_input {
            mul_div_ceiling_u256(grown, current, liquidity + tmp)?
        } else {
            mul_div_floor_u256(grown, current, checked_sub(liquidity, tmp)?)?
        }
    } else {
        let tmp = mul_div_floor_u256(abs_delta, u(Q96), current)?;
        if is_exact_input {
            mul_div_floor_u256(liquidity + tmp, current, grown)?
        } else {
            mul_div_ceiling_u256(checked_sub(liquidity, tmp)?, current, grown)?
        }
    };
    narrow(next)
}

/// Delta of the non-specified token for a step from `current_sqrt_p` to
/// `next_sqrt_p`; rounded in the pool's favor.
pub fn calc_returned_amount(
    liquidity: u128,
    delta_l: u128,
    current_sqrt_p: u128,
    next_sqrt_p: u128,
    is_exact_input: bool,
    is_token0: bool,
) -> Result<i128, MathError> {
    let liquidity = u(liquidity);
    let current = u(current_sqrt_p);
    let next = u(next_sqrt_p);

    let returned = if is_token0 {
        let fee_qty1 = mul_div_ceiling_u256(u(delta_l), next, u(Q96))?;
        if is_exact_input {
            // price moves down, token1 leaves the pool
            let out = mul_div_floor_u256(liquidity, checked_sub(current, next)?, u(Q96))?;
            signed_sub(fee_qty1, out)?
        } else {
            let owed = mul_div_ceiling_u256(liquidity, checked_sub(next, current)?, u(Q96))?;
            to_i128(narrow(fee_qty1 + owed)?)?
        }
    } else {
        let after = mul_div_ceiling_u256(liquidity + u(delta_l), u(Q96), next)?;
        let before = mul_div_floor_u256(liquidity, u(Q96), current)?;
        signed_sub(after, before)?
    };

    // a lone unit of rounding dust is never paid out on exact input
    if is_exact_input && returned == 1 {
        return Ok(0);
    }
    Ok(returned)
}
