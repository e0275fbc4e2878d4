use crate::error::PoolError;
use elastic_math::to_i128;
use soroban_sdk::{log, token, Address, Env};

/// Pool's balance of `token`
pub fn balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Transfer `amount` of `token` from the pool to `to`
pub fn pay(env: &Env, token: &Address, to: &Address, amount: u128) -> Result<(), PoolError> {
    if amount > 0 {
        let amount = to_i128(amount)?;
        token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    }
    Ok(())
}

/// Check that the pool's balance grew by at least `required` since `before`
pub fn verify_received(
    env: &Env,
    token: &Address,
    before: i128,
    required: u128,
    shortfall: PoolError,
) -> Result<(), PoolError> {
    if required == 0 {
        return Ok(());
    }
    let required = to_i128(required)?;
    let expected = before.checked_add(required).ok_or(PoolError::Overflow)?;
    let after = balance(env, token);
    if after < expected {
        log!(env, "settlement short", token.clone(), expected, after);
        return Err(shortfall);
    }
    Ok(())
}
