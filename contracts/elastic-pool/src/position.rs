use crate::error::PoolError;
use crate::storage::{get_position, set_position};
use elastic_math::{add_delta, mul_div_floor, MathError};
use elastic_types::{PositionKey, Q96};
use soroban_sdk::Env;

/// Apply a liquidity delta to a position and advance its fee snapshot.
///
/// Returns the reinvestment shares earned by the prior liquidity since the
/// last snapshot; the caller moves them to the owner.
pub fn update(
    env: &Env,
    key: &PositionKey,
    liquidity_delta: i128,
    fee_growth_inside_x96: u128,
) -> Result<u128, PoolError> {
    let mut position = get_position(env, key);

    let fee_growth_delta = fee_growth_inside_x96.wrapping_sub(position.fee_growth_inside_last_x96);
    let fee_shares = if position.liquidity > 0 && fee_growth_delta > 0 {
        mul_div_floor(fee_growth_delta, position.liquidity, Q96)?
    } else {
        0
    };

    position.liquidity = add_delta(position.liquidity, liquidity_delta).map_err(|e| match e {
        MathError::LiquidityUnderflow => PoolError::InsufficientLiquidity,
        other => PoolError::from(other),
    })?;
    position.fee_growth_inside_last_x96 = fee_growth_inside_x96;

    set_position(env, key, &position);

    Ok(fee_shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::Address;

    fn key(env: &Env) -> PositionKey {
        PositionKey {
            owner: Address::generate(env),
            tick_lower: -100,
            tick_upper: 100,
        }
    }

    #[test]
    fn test_first_mint_earns_nothing() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let key = key(&env);
            assert_eq!(update(&env, &key, 1_000, Q96 * 5), Ok(0));

            let position = get_position(&env, &key);
            assert_eq!(position.liquidity, 1_000);
            assert_eq!(position.fee_growth_inside_last_x96, Q96 * 5);
        });
    }

    #[test]
    fn test_fee_shares_from_prior_liquidity() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let key = key(&env);
            update(&env, &key, 1_000_000, 0).unwrap();

            // growth of 1.5 per unit of liquidity
            let growth = Q96 + Q96 / 2;
            assert_eq!(update(&env, &key, 0, growth), Ok(1_500_000));
            assert_eq!(get_position(&env, &key).fee_growth_inside_last_x96, growth);

            // nothing new to claim
            assert_eq!(update(&env, &key, -1_000_000, growth), Ok(0));
            assert_eq!(get_position(&env, &key).liquidity, 0);
        });
    }

    #[test]
    fn test_fee_shares_across_wrap() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let key = key(&env);
            update(&env, &key, 1_000, u128::MAX - Q96 + 1).unwrap();
            assert_eq!(update(&env, &key, 0, 0), Ok(1_000));
        });
    }

    #[test]
    fn test_emptied_position_is_kept() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let key = key(&env);
            update(&env, &key, 10, Q96).unwrap();
            update(&env, &key, -10, Q96 * 2).unwrap();

            let position = get_position(&env, &key);
            assert_eq!(position.liquidity, 0);
            assert_eq!(position.fee_growth_inside_last_x96, Q96 * 2);
        });
    }

    #[test]
    fn test_burn_more_than_held() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let key = key(&env);
            update(&env, &key, 10, Q96).unwrap();
            assert_eq!(update(&env, &key, -11, Q96), Err(PoolError::InsufficientLiquidity));
        });
    }
}
