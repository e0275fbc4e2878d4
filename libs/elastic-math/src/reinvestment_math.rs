use crate::full_math::mul_div_floor;
use crate::MathError;
use elastic_types::Q96;

/// Reinvestment shares to mint for the growth of reinvestment liquidity since
/// the last checkpoint.
///
/// Only the part of the growth owed to active positions is minted, so the
/// value of existing shares is preserved:
/// `lp_contribution = L * (rL - rL_last) / (L + rL)`,
/// `minted = supply * lp_contribution / rL_last`.
pub fn calc_rmint_qty(
    reinvest_liquidity: u128,
    reinvest_liquidity_last: u128,
    base_liquidity: u128,
    share_supply: u128,
) -> Result<u128, MathError> {
    if reinvest_liquidity <= reinvest_liquidity_last || base_liquidity == 0 {
        return Ok(0);
    }
    let growth = reinvest_liquidity - reinvest_liquidity_last;
    let total = base_liquidity
        .checked_add(reinvest_liquidity)
        .ok_or(MathError::Overflow)?;
    let lp_contribution = mul_div_floor(base_liquidity, growth, total)?;
    mul_div_floor(share_supply, lp_contribution, reinvest_liquidity_last)
}

/// Fee growth per unit of active liquidity for `minted` new shares (Q96)
pub fn calc_fee_growth_increment(minted: u128, base_liquidity: u128) -> Result<u128, MathError> {
    mul_div_floor(minted, Q96, base_liquidity)
}

/// Reinvestment liquidity released by burning `shares` out of `share_supply`
pub fn calc_burn_delta(
    shares: u128,
    reinvest_liquidity: u128,
    share_supply: u128,
) -> Result<u128, MathError> {
    mul_div_floor(shares, reinvest_liquidity, share_supply)
}
