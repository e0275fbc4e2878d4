use soroban_sdk::{contractclient, Bytes, Env};

/// Interface a caller contract implements to settle with the pool.
///
/// The pool never trusts what the callback reports; it checks its own token
/// balances after the call returns.
#[contractclient(name = "PoolCallbackClient")]
pub trait PoolCallback {
    /// Pay `qty0` of token0 and `qty1` of token1 to the pool.
    /// Invoked by `unlock_pool` and `mint`.
    fn mint_callback(env: Env, qty0: u128, qty1: u128, data: Bytes);

    /// Settle a swap. Positive deltas are owed to the pool.
    fn swap_callback(env: Env, delta_qty0: i128, delta_qty1: i128, data: Bytes);
}
