use crate::MathError;
use ethnum::U256;
use primitive_types::{U256 as PU256, U512};
use soroban_fixed_point_math::FixedPoint;

/// floor(a * b / denominator) with a 512-bit intermediate product
pub fn mul_div_floor_u256(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator == U256::ZERO {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, _) = wide_div_rem(a, b, denominator)?;
    Ok(quotient)
}

/// ceil(a * b / denominator) with a 512-bit intermediate product
pub fn mul_div_ceiling_u256(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator == U256::ZERO {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = wide_div_rem(a, b, denominator)?;
    if remainder == U256::ZERO {
        Ok(quotient)
    } else {
        quotient.checked_add(U256::ONE).ok_or(MathError::Overflow)
    }
}

/// floor(a * b / denominator) for u128 operands (rounds down)
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    // Native path when a * b fits in 128 bits
    if let Some(result) = a.fixed_mul_floor(b, denominator) {
        return Ok(result);
    }
    let result = mul_div_floor_u256(U256::new(a), U256::new(b), U256::new(denominator))?;
    u256_to_u128(result).ok_or(MathError::Overflow)
}

/// ceil(a * b / denominator) for u128 operands (rounds up)
pub fn mul_div_ceiling(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    if let Some(result) = a.fixed_mul_ceil(b, denominator) {
        return Ok(result);
    }
    let result = mul_div_ceiling_u256(U256::new(a), U256::new(b), U256::new(denominator))?;
    u256_to_u128(result).ok_or(MathError::Overflow)
}

/// Unsigned division with rounding up
pub fn div_ceiling(a: U256, b: U256) -> Result<U256, MathError> {
    if b == U256::ZERO {
        return Err(MathError::DivisionByZero);
    }
    let quotient = a / b;
    if a % b == U256::ZERO {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}

/// Returns the value if it fits in 128 bits
pub fn u256_to_u128(value: U256) -> Option<u128> {
    let (hi, lo) = value.into_words();
    if hi == 0 {
        Some(lo)
    } else {
        None
    }
}

fn to_wide(value: U256) -> PU256 {
    let (hi, lo) = value.into_words();
    PU256([lo as u64, (lo >> 64) as u64, hi as u64, (hi >> 64) as u64])
}

/// Narrow a 512-bit value back to 256 bits, None if the high half is set
fn from_wide(value: U512) -> Option<U256> {
    let U512(words) = value;
    if words[4..].iter().any(|word| *word != 0) {
        return None;
    }
    let lo = words[0] as u128 | (words[1] as u128) << 64;
    let hi = words[2] as u128 | (words[3] as u128) << 64;
    Some(U256::from_words(hi, lo))
}

/// (a * b) / denominator and its remainder, product held at 512 bits
fn wide_div_rem(a: U256, b: U256, denominator: U256) -> Result<(U256, U256), MathError> {
    let product = to_wide(a).full_mul(to_wide(b));
    let (quotient, remainder) = product.div_mod(U512::from(to_wide(denominator)));
    let quotient = from_wide(quotient).ok_or(MathError::Overflow)?;
    let remainder = from_wide(remainder).ok_or(MathError::Overflow)?;
    Ok((quotient, remainder))
}
