use crate::error::PoolError;
use crate::events::{emit_burn_shares, emit_transfer_shares};
use crate::settlement::pay;
use crate::storage::{get_config, get_share_balance, lock, release, set_share_balance};
use elastic_math::{calc_burn_delta, calc_fee_growth_increment, calc_rmint_qty, get_qtys_from_burn_shares};
use elastic_types::PoolState;
use soroban_sdk::{Address, Env};

/// Mint reinvestment shares for fees collected since the last checkpoint.
///
/// New shares go to the pool's own balance and raise the global fee growth.
/// Returns the updated global fee growth.
pub fn sync_fee_growth(
    env: &Env,
    state: &mut PoolState,
    update_reinvest_last: bool,
) -> Result<u128, PoolError> {
    let minted = calc_rmint_qty(
        state.reinvest_liquidity,
        state.reinvest_liquidity_last,
        state.liquidity,
        state.share_supply,
    )?;
    if minted != 0 {
        state.share_supply = state
            .share_supply
            .checked_add(minted)
            .ok_or(PoolError::Overflow)?;
        mint_shares(env, &env.current_contract_address(), minted)?;
        let increment = calc_fee_growth_increment(minted, state.liquidity)?;
        state.fee_growth_global_x96 = state.fee_growth_global_x96.wrapping_add(increment);
    }
    if update_reinvest_last {
        state.reinvest_liquidity_last = state.reinvest_liquidity;
    }
    Ok(state.fee_growth_global_x96)
}

// === Share ledger ===

/// Credit shares to `to`. Supply is tracked in [`PoolState::share_supply`].
pub fn mint_shares(env: &Env, to: &Address, qty: u128) -> Result<(), PoolError> {
    let balance = get_share_balance(env, to)
        .checked_add(qty)
        .ok_or(PoolError::Overflow)?;
    set_share_balance(env, to, balance);
    Ok(())
}

fn debit_shares(env: &Env, from: &Address, qty: u128) -> Result<(), PoolError> {
    let balance = get_share_balance(env, from)
        .checked_sub(qty)
        .ok_or(PoolError::InsufficientShares)?;
    set_share_balance(env, from, balance);
    Ok(())
}

/// Move shares between holders
pub fn transfer_shares(env: &Env, from: &Address, to: &Address, qty: u128) -> Result<(), PoolError> {
    debit_shares(env, from, qty)?;
    mint_shares(env, to, qty)?;
    emit_transfer_shares(env, from, to, qty);
    Ok(())
}

/// Redeem `qty` reinvestment shares of `owner` for tokens at the current price
pub fn burn_shares(env: &Env, owner: Address, qty: u128) -> Result<(u128, u128), PoolError> {
    if qty == 0 {
        return Err(PoolError::ZeroQuantity);
    }

    let config = get_config(env)?;
    let mut state = lock(env)?;

    sync_fee_growth(env, &mut state, false)?;

    // supply after the sync mint, before this burn
    let delta_l = calc_burn_delta(qty, state.reinvest_liquidity, state.share_supply)?;
    state.reinvest_liquidity = state
        .reinvest_liquidity
        .checked_sub(delta_l)
        .ok_or(PoolError::LiquidityUnderflow)?;
    state.reinvest_liquidity_last = state.reinvest_liquidity;

    debit_shares(env, &owner, qty)?;
    state.share_supply -= qty;

    let (qty0, qty1) = get_qtys_from_burn_shares(state.sqrt_price_x96, delta_l)?;
    pay(env, &config.token0, &owner, qty0)?;
    pay(env, &config.token1, &owner, qty1)?;

    release(env, &mut state);
    emit_burn_shares(env, &owner, qty, qty0, qty1, state.reinvest_liquidity);

    Ok((qty0, qty1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{get_share_balance, get_state, set_state};
    use elastic_types::{MIN_LIQUIDITY, Q96};
    use soroban_sdk::testutils::Address as _;

    fn active_state() -> PoolState {
        PoolState {
            sqrt_price_x96: Q96,
            tick: 0,
            liquidity: 1_000_000_000,
            reinvest_liquidity: 100_500,
            reinvest_liquidity_last: 100_000,
            fee_growth_global_x96: Q96,
            share_supply: MIN_LIQUIDITY,
            locked: false,
        }
    }

    #[test]
    fn test_sync_mints_to_pool_and_grows_fees() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let mut state = active_state();
            let fee_growth = sync_fee_growth(&env, &mut state, true).unwrap();

            assert_eq!(state.share_supply, MIN_LIQUIDITY + 499);
            assert_eq!(get_share_balance(&env, &contract_id), 499);
            assert_eq!(fee_growth, Q96 + 39534853094617904459178);
            assert_eq!(state.reinvest_liquidity_last, 100_500);
        });
    }

    #[test]
    fn test_sync_without_checkpoint() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let mut state = active_state();
            sync_fee_growth(&env, &mut state, false).unwrap();
            assert_eq!(state.reinvest_liquidity_last, 100_000);

            // unchanged growth mints nothing
            let mut settled = active_state();
            settled.reinvest_liquidity = settled.reinvest_liquidity_last;
            assert_eq!(sync_fee_growth(&env, &mut settled, true), Ok(Q96));
            assert_eq!(settled.share_supply, MIN_LIQUIDITY);
        });
    }

    #[test]
    fn test_transfer_shares() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            let alice = Address::generate(&env);
            let bob = Address::generate(&env);
            mint_shares(&env, &alice, 1_000).unwrap();

            transfer_shares(&env, &alice, &bob, 400).unwrap();
            assert_eq!(get_share_balance(&env, &alice), 600);
            assert_eq!(get_share_balance(&env, &bob), 400);

            assert_eq!(
                transfer_shares(&env, &alice, &bob, 601),
                Err(PoolError::InsufficientShares)
            );
        });
    }

    #[test]
    fn test_burn_shares_requires_quantity() {
        let env = Env::default();
        let contract_id = env.register(crate::ElasticPool, ());
        env.as_contract(&contract_id, || {
            set_state(&env, &active_state());
            let owner = Address::generate(&env);
            assert_eq!(burn_shares(&env, owner, 0), Err(PoolError::ZeroQuantity));
            assert!(!get_state(&env).unwrap().locked);
        });
    }
}
