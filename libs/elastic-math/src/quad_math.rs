use crate::MathError;
use ethnum::U256;

/// Smaller root of a*x^2 - 2*b*x + c = 0, i.e. (b - sqrt(b^2 - a*c)) / a.
/// Requires b > 0 and b^2 >= a*c.
pub fn get_smaller_root_of_quad_eqn(a: U256, b: U256, c: U256) -> Result<U256, MathError> {
    if a == U256::ZERO {
        return Err(MathError::DivisionByZero);
    }
    let b_squared = b.checked_mul(b).ok_or(MathError::Overflow)?;
    let ac = a.checked_mul(c).ok_or(MathError::Overflow)?;
    let discriminant = b_squared.checked_sub(ac).ok_or(MathError::Overflow)?;
    Ok((b - sqrt(discriminant)) / a)
}

/// Integer square root (Babylonian method), rounded down
pub fn sqrt(y: U256) -> U256 {
    if y > U256::new(3) {
        let mut z = y;
        let mut x = (y >> 1) + U256::ONE;
        while x < z {
            z = x;
            x = (y / x + x) >> 1;
        }
        z
    } else if y != U256::ZERO {
        U256::ONE
    } else {
        U256::ZERO
    }
}
