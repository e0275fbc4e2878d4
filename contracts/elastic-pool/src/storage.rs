use crate::error::PoolError;
use elastic_types::{PoolConfig, PoolState, PositionInfo, PositionKey, TickInfo};
use soroban_sdk::{contracttype, Address, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS
// ============================================================================
// - Write entries per tx: 50 entries / 132 KB
// - Read entries per tx: 100 entries / 200 KB
//
// Each tick and each tick-index word is its own persistent entry. A swap
// crossing writes one tick entry per crossing, so the crossing count is
// capped below the write limit with room left for state, token balances
// and the share ledger.
// ============================================================================

/// Maximum number of tick crossings per swap; the remainder stays unfilled
pub const MAX_TICK_CROSSINGS_PER_SWAP: u32 = 40;

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Immutable pool parameters (Instance storage)
    Config,
    /// Price, liquidity and reinvestment state (Instance storage)
    State,
    /// Tick data: tick_index -> TickInfo (Persistent storage)
    Tick(i32),
    /// Tick index: word_position -> u128 bitmap (Persistent storage)
    TickBitmap(i32),
    /// Position data: PositionKey -> PositionInfo (Persistent storage)
    Position(PositionKey),
    /// Reinvestment share balance: owner -> u128 (Persistent storage)
    ShareBalance(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<PoolConfig, PoolError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(PoolError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<PoolState, PoolError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(PoolError::NotInitialized)
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

/// Take the pool lock and return the state it guards.
///
/// An unpriced pool stays locked until `unlock_pool`, so this also rejects
/// every operation before the initial price is set.
pub fn lock(env: &Env) -> Result<PoolState, PoolError> {
    let mut state = get_state(env)?;
    if state.locked {
        return Err(PoolError::Locked);
    }
    state.locked = true;
    set_state(env, &state);
    Ok(state)
}

/// Persist `state` and release the lock
pub fn release(env: &Env, state: &mut PoolState) {
    state.locked = false;
    set_state(env, state);
}

// === Tick ===

pub fn get_tick(env: &Env, tick: i32) -> TickInfo {
    let key = DataKey::Tick(tick);
    let info = env.storage().persistent().get(&key);
    if info.is_some() {
        extend_persistent_ttl(env, &key);
    }
    info.unwrap_or_default()
}

pub fn set_tick(env: &Env, tick: i32, info: &TickInfo) {
    let key = DataKey::Tick(tick);
    env.storage().persistent().set(&key, info);
    extend_persistent_ttl(env, &key);
}

pub fn remove_tick(env: &Env, tick: i32) {
    env.storage().persistent().remove(&DataKey::Tick(tick));
}

// === Tick Bitmap ===

pub fn get_tick_bitmap_word(env: &Env, word_pos: i32) -> u128 {
    let key = DataKey::TickBitmap(word_pos);
    env.storage().persistent().get(&key).unwrap_or(0u128)
}

pub fn set_tick_bitmap_word(env: &Env, word_pos: i32, bitmap: u128) {
    let key = DataKey::TickBitmap(word_pos);
    if bitmap == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &bitmap);
        extend_persistent_ttl(env, &key);
    }
}

// === Position ===

pub fn get_position(env: &Env, key: &PositionKey) -> PositionInfo {
    let data_key = DataKey::Position(key.clone());
    env.storage()
        .persistent()
        .get(&data_key)
        .unwrap_or_default()
}

/// Positions are kept after their liquidity reaches zero so the fee
/// snapshot survives.
pub fn set_position(env: &Env, key: &PositionKey, info: &PositionInfo) {
    let data_key = DataKey::Position(key.clone());
    env.storage().persistent().set(&data_key, info);
    extend_persistent_ttl(env, &data_key);
}

// === Reinvestment shares ===

pub fn get_share_balance(env: &Env, owner: &Address) -> u128 {
    let key = DataKey::ShareBalance(owner.clone());
    env.storage().persistent().get(&key).unwrap_or(0u128)
}

pub fn set_share_balance(env: &Env, owner: &Address, balance: u128) {
    let key = DataKey::ShareBalance(owner.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        extend_persistent_ttl(env, &key);
    }
}
