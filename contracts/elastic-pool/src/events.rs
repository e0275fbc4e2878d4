// Pool events. Each event has a single symbol topic and a tuple payload.

use soroban_sdk::{Address, Env, Symbol};

/// Emitted once when the initial price is set
/// Topics: ("initialize",)
/// Data: (sqrt_p, tick)
pub fn emit_initialize(env: &Env, sqrt_p: u128, tick: i32) {
    env.events()
        .publish((Symbol::new(env, "initialize"),), (sqrt_p, tick));
}

/// Topics: ("mint",)
/// Data: (sender, owner, tick_lower, tick_upper, qty, qty0, qty1)
#[allow(clippy::too_many_arguments)]
pub fn emit_mint(
    env: &Env,
    sender: &Address,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    qty: u128,
    qty0: u128,
    qty1: u128,
) {
    env.events().publish(
        (Symbol::new(env, "mint"),),
        (
            sender.clone(),
            owner.clone(),
            tick_lower,
            tick_upper,
            qty,
            qty0,
            qty1,
        ),
    );
}

/// Topics: ("burn",)
/// Data: (owner, tick_lower, tick_upper, qty, qty0, qty1)
pub fn emit_burn(
    env: &Env,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    qty: u128,
    qty0: u128,
    qty1: u128,
) {
    env.events().publish(
        (Symbol::new(env, "burn"),),
        (owner.clone(), tick_lower, tick_upper, qty, qty0, qty1),
    );
}

/// Topics: ("burn_shares",)
/// Data: (owner, qty, qty0, qty1, reinvest_l)
pub fn emit_burn_shares(
    env: &Env,
    owner: &Address,
    qty: u128,
    qty0: u128,
    qty1: u128,
    reinvest_l: u128,
) {
    env.events().publish(
        (Symbol::new(env, "burn_shares"),),
        (owner.clone(), qty, qty0, qty1, reinvest_l),
    );
}

/// Topics: ("transfer_shares",)
/// Data: (from, to, qty)
pub fn emit_transfer_shares(env: &Env, from: &Address, to: &Address, qty: u128) {
    env.events().publish(
        (Symbol::new(env, "transfer_shares"),),
        (from.clone(), to.clone(), qty),
    );
}

/// Topics: ("swap",)
/// Data: (sender, recipient, delta_qty0, delta_qty1, sqrt_p, liquidity, tick, ticks_crossed)
#[allow(clippy::too_many_arguments)]
pub fn emit_swap(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    delta_qty0: i128,
    delta_qty1: i128,
    sqrt_p: u128,
    liquidity: u128,
    tick: i32,
    ticks_crossed: u32,
) {
    env.events().publish(
        (Symbol::new(env, "swap"),),
        (
            sender.clone(),
            recipient.clone(),
            delta_qty0,
            delta_qty1,
            sqrt_p,
            liquidity,
            tick,
            ticks_crossed,
        ),
    );
}
