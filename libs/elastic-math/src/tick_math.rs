use crate::MathError;
use elastic_types::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use ethnum::U256;

/// sqrt(1.0001^-1) in Q128, used for odd ticks
const SQRT_1_0001_NEG_1: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// sqrt(1.0001^-(2^i)) in Q128 for i = 1..=18
const SQRT_1_0001_NEG_POW2: [u128; 18] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
];

// 1 / log2(sqrt(1.0001)) in Q64 is 255738958999603826347141; split into
// 64-bit halves so the product with a Q64 log stays inside i128.
const LOG_SQRT10001_HI: i128 = 13863;
const LOG_SQRT10001_LO: u128 = 11745905768312294533;

// Error bounds of the log approximation, in Q64 tick units
const TICK_LOW_ERROR: i128 = 184476617836266587;
const TICK_HIGH_ERROR: i128 = 15793544031827761794;

/// Calculate sqrt(1.0001^tick) * 2^96
///
/// Rounds up, so the result is the smallest Q96 value not below the true price.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<u128, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfBounds);
    }

    let abs_tick = tick.unsigned_abs();

    // Ratio in Q128, computed for the negative tick
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::new(SQRT_1_0001_NEG_1)
    } else {
        U256::ONE << 128
    };
    for (i, factor) in SQRT_1_0001_NEG_POW2.iter().enumerate() {
        if abs_tick & (1 << (i + 1)) != 0 {
            ratio = (ratio * U256::new(*factor)) >> 128;
        }
    }

    // Invert if tick is positive
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q96, rounding up
    let (hi, lo) = ratio.into_words();
    let shifted = (hi << 96) | (lo >> 32);
    let round_up = u128::from(lo & 0xffff_ffff != 0);
    Ok(shifted + round_up)
}

/// Get the greatest tick whose sqrt price is <= `sqrt_price_x96`
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: u128) -> Result<i32, MathError> {
    if !(MIN_SQRT_RATIO..=MAX_SQRT_RATIO).contains(&sqrt_price_x96) {
        return Err(MathError::SqrtPriceOutOfBounds);
    }

    // Normalise so bit 127 is set; msb is the integer part of log2
    let leading = sqrt_price_x96.leading_zeros();
    let msb = 127 - leading as i128;
    let mut r = sqrt_price_x96 << leading;

    // log2(sqrt_price) in signed Q64
    let mut log_2: i128 = (msb - 96) << 64;
    for i in 0..14 {
        let (hi, lo) = ((U256::new(r) * U256::new(r)) >> 127u32).into_words();
        // hi is the overflow bit of the square
        log_2 |= (hi as i128) << (63 - i);
        r = if hi != 0 { (lo >> 1) | (1 << 127) } else { lo };
    }

    // log_sqrt10001 = log_2 * (1 / log2(sqrt(1.0001))), still Q64
    let whole = log_2 >> 64;
    let frac = (log_2 as u128) & 0xffff_ffff_ffff_ffff;
    let log_sqrt10001 = log_2 * LOG_SQRT10001_HI
        + whole * LOG_SQRT10001_LO as i128
        + ((frac * LOG_SQRT10001_LO) >> 64) as i128;

    let tick_low = (((log_sqrt10001 - TICK_LOW_ERROR) >> 64) as i32).max(MIN_TICK);
    let tick_high = (((log_sqrt10001 + 1 + TICK_HIGH_ERROR) >> 64) as i32).min(MAX_TICK);

    if tick_low >= tick_high {
        return Ok(tick_low);
    }
    if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elastic_types::Q96;
    use proptest::prelude::*;

    // === get_sqrt_ratio_at_tick tests ===

    #[test]
    fn test_get_sqrt_ratio_at_tick_zero() {
        assert_eq!(get_sqrt_ratio_at_tick(0), Ok(Q96));
    }

    #[test]
    fn test_known_tick_values() {
        assert_eq!(get_sqrt_ratio_at_tick(1), Ok(79232123823359799118286999568));
        assert_eq!(get_sqrt_ratio_at_tick(-1), Ok(79224201403219477170569942574));
        assert_eq!(get_sqrt_ratio_at_tick(10), Ok(79267784519130042428790663799));
        assert_eq!(get_sqrt_ratio_at_tick(60), Ok(79466191966197645195421774833));
        assert_eq!(get_sqrt_ratio_at_tick(-60), Ok(78990846045029531151608375686));
        // 1.0001^6931 ~ 2, so sqrt ~ 1.414
        assert_eq!(get_sqrt_ratio_at_tick(6931), Ok(112040957517951813098925484553));
        assert_eq!(get_sqrt_ratio_at_tick(100000), Ok(11755562826496067164730007768450));
        assert_eq!(get_sqrt_ratio_at_tick(-100000), Ok(533968626430936354154228408));
    }

    #[test]
    fn test_tick_bounds() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK), Ok(MIN_SQRT_RATIO));
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK), Ok(MAX_SQRT_RATIO));
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK + 1), Ok(18448013096269411587));
        assert_eq!(
            get_sqrt_ratio_at_tick(MAX_TICK - 1),
            Ok(340258959196860441002220642289651527916)
        );
    }

    #[test]
    fn test_get_sqrt_ratio_out_of_bounds() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK - 1), Err(MathError::TickOutOfBounds));
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK + 1), Err(MathError::TickOutOfBounds));
    }

    #[test]
    fn test_get_sqrt_ratio_at_tick_monotonic() {
        let mut prev_sqrt = get_sqrt_ratio_at_tick(-10000).unwrap();
        for tick in -9999..=10000 {
            let sqrt = get_sqrt_ratio_at_tick(tick).unwrap();
            assert!(sqrt > prev_sqrt, "sqrt_price should be strictly increasing at {}", tick);
            prev_sqrt = sqrt;
        }
    }

    // === get_tick_at_sqrt_ratio tests ===

    #[test]
    fn test_get_tick_at_sqrt_ratio_simple_prices() {
        assert_eq!(get_tick_at_sqrt_ratio(Q96), Ok(0));
        // price 4 and price 1/4
        assert_eq!(get_tick_at_sqrt_ratio(Q96 * 2), Ok(13863));
        assert_eq!(get_tick_at_sqrt_ratio(Q96 / 2), Ok(-13864));
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio_bounds() {
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO), Ok(MIN_TICK));
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO + 1), Ok(MIN_TICK));
        assert_eq!(get_tick_at_sqrt_ratio(MAX_SQRT_RATIO), Ok(MAX_TICK));
        assert_eq!(get_tick_at_sqrt_ratio(MAX_SQRT_RATIO - 1), Ok(MAX_TICK - 1));
    }

    #[test]
    fn test_get_tick_at_sqrt_ratio_out_of_bounds() {
        assert_eq!(
            get_tick_at_sqrt_ratio(MIN_SQRT_RATIO - 1),
            Err(MathError::SqrtPriceOutOfBounds)
        );
        assert_eq!(
            get_tick_at_sqrt_ratio(MAX_SQRT_RATIO + 1),
            Err(MathError::SqrtPriceOutOfBounds)
        );
    }

    #[test]
    fn test_roundtrip_across_full_range() {
        for tick in (MIN_TICK..=MAX_TICK).step_by(997) {
            let sqrt_price = get_sqrt_ratio_at_tick(tick).unwrap();
            assert_eq!(get_tick_at_sqrt_ratio(sqrt_price), Ok(tick));
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip(tick in MIN_TICK..=MAX_TICK) {
            let sqrt_price = get_sqrt_ratio_at_tick(tick).unwrap();
            prop_assert_eq!(get_tick_at_sqrt_ratio(sqrt_price), Ok(tick));
            if tick > MIN_TICK {
                prop_assert_eq!(get_tick_at_sqrt_ratio(sqrt_price - 1), Ok(tick - 1));
            }
        }

        #[test]
        fn prop_tick_is_floor(sqrt_price in MIN_SQRT_RATIO..MAX_SQRT_RATIO) {
            let tick = get_tick_at_sqrt_ratio(sqrt_price).unwrap();
            prop_assert!(get_sqrt_ratio_at_tick(tick).unwrap() <= sqrt_price);
            prop_assert!(get_sqrt_ratio_at_tick(tick + 1).unwrap() > sqrt_price);
        }

        #[test]
        fn prop_strictly_increasing(tick in MIN_TICK..MAX_TICK) {
            prop_assert!(get_sqrt_ratio_at_tick(tick).unwrap() < get_sqrt_ratio_at_tick(tick + 1).unwrap());
        }
    }
}
