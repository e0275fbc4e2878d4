use crate::MathError;

/// u128 -> i128, fails above i128::MAX
pub fn to_i128(value: u128) -> Result<i128, MathError> {
    i128::try_from(value).map_err(|_| MathError::CastOverflow)
}

/// u128 -> -i128, the negated value of a quantity paid out
pub fn rev_to_i128(value: u128) -> Result<i128, MathError> {
    Ok(-to_i128(value)?)
}

/// i128 -> u128, fails on negative input
pub fn to_u128(value: i128) -> Result<u128, MathError> {
    u128::try_from(value).map_err(|_| MathError::CastOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_i128_in_range() {
        assert_eq!(to_i128(0), Ok(0));
        assert_eq!(to_i128(i128::MAX as u128), Ok(i128::MAX));
    }

    #[test]
    fn test_to_i128_out_of_range() {
        assert_eq!(to_i128(i128::MAX as u128 + 1), Err(MathError::CastOverflow));
        assert_eq!(to_i128(u128::MAX), Err(MathError::CastOverflow));
    }

    #[test]
    fn test_rev_to_i128() {
        assert_eq!(rev_to_i128(5), Ok(-5));
        assert_eq!(rev_to_i128(i128::MAX as u128), Ok(-i128::MAX));
        assert_eq!(rev_to_i128(u128::MAX), Err(MathError::CastOverflow));
    }

    #[test]
    fn test_to_u128_rejects_negative() {
        assert_eq!(to_u128(7), Ok(7));
        assert_eq!(to_u128(-1), Err(MathError::CastOverflow));
    }
}
