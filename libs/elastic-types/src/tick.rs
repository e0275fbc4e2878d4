use soroban_sdk::contracttype;

/// Information stored for each referenced tick
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick
    pub liquidity_gross: u128,
    /// Net liquidity change when tick is crossed (+ when moving right)
    pub liquidity_net: i128,
    /// Fee growth on the side of the tick away from the current price (Q96)
    pub fee_growth_outside_x96: u128,
}

impl TickInfo {
    /// A tick is initialized while any position references it
    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross != 0
    }
}
