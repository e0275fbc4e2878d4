use crate::full_math::{div_ceiling, mul_div_ceiling, mul_div_ceiling_u256, mul_div_floor, mul_div_floor_u256, u256_to_u128};
use crate::MathError;
use elastic_types::Q96;
use ethnum::U256;

/// Token0 quantity for `liquidity` between two sqrt prices
/// delta_x = L * (sqrt_pb - sqrt_pa) / (sqrt_pa * sqrt_pb)
///
/// Round up when the pool receives the tokens, down when it pays them out.
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };
    if sqrt_ratio_lower == 0 {
        return Err(MathError::DivisionByZero);
    }

    let numerator1 = U256::new(liquidity) << 96;
    let numerator2 = U256::new(sqrt_ratio_upper - sqrt_ratio_lower);
    let upper = U256::new(sqrt_ratio_upper);
    let lower = U256::new(sqrt_ratio_lower);

    let amount = if round_up {
        div_ceiling(mul_div_ceiling_u256(numerator1, numerator2, upper)?, lower)?
    } else {
        mul_div_floor_u256(numerator1, numerator2, upper)? / lower
    };
    u256_to_u128(amount).ok_or(MathError::Overflow)
}

/// Token1 quantity for `liquidity` between two sqrt prices
/// delta_y = L * (sqrt_pb - sqrt_pa)
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let diff = sqrt_ratio_a_x96.abs_diff(sqrt_ratio_b_x96);
    if round_up {
        mul_div_ceiling(liquidity, diff, Q96)
    } else {
        mul_div_floor(liquidity, diff, Q96)
    }
}

/// Token quantities backing `liquidity` over a price range at the current price
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: u128,
    sqrt_ratio_lower_x96: u128,
    sqrt_ratio_upper_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<(u128, u128), MathError> {
    if sqrt_ratio_x96 <= sqrt_ratio_lower_x96 {
        // Below range - all token0
        let amount0 = get_amount0_delta(sqrt_ratio_lower_x96, sqrt_ratio_upper_x96, liquidity, round_up)?;
        Ok((amount0, 0))
    } else if sqrt_ratio_x96 < sqrt_ratio_upper_x96 {
        // In range - both tokens
        let amount0 = get_amount0_delta(sqrt_ratio_x96, sqrt_ratio_upper_x96, liquidity, round_up)?;
        let amount1 = get_amount1_delta(sqrt_ratio_lower_x96, sqrt_ratio_x96, liquidity, round_up)?;
        Ok((amount0, amount1))
    } else {
        // Above range - all token1
        let amount1 = get_amount1_delta(sqrt_ratio_lower_x96, sqrt_ratio_upper_x96, liquidity, round_up)?;
        Ok((0, amount1))
    }
}

/// Quantities required to seed `liquidity` of reinvestment liquidity at `sqrt_price_x96`
pub fn get_qtys_for_initial_lockup(
    sqrt_price_x96: u128,
    liquidity: u128,
) -> Result<(u128, u128), MathError> {
    let qty0 = mul_div_ceiling(liquidity, Q96, sqrt_price_x96)?;
    let qty1 = mul_div_ceiling(liquidity, sqrt_price_x96, Q96)?;
    Ok((qty0, qty1))
}

/// Quantities released when `liquidity` of reinvestment liquidity is burnt
pub fn get_qtys_from_burn_shares(
    sqrt_price_x96: u128,
    liquidity: u128,
) -> Result<(u128, u128), MathError> {
    let qty0 = mul_div_floor(liquidity, Q96, sqrt_price_x96)?;
    let qty1 = mul_div_floor(liquidity, sqrt_price_x96, Q96)?;
    Ok((qty0, qty1))
}

/// Add a signed liquidity delta to an unsigned liquidity value
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, MathError> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(MathError::LiquidityUnderflow)
    } else {
        liquidity
            .checked_add(delta as u128)
            .ok_or(MathError::LiquidityOverflow)
    }
}
