use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Upper bound on boxes bought in a single purchase.
pub const MAX_PER_TX: u32 = 10;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// CW20 token the boxes are paid in (GEM)
    pub payment_token: Addr,
    /// NFT registry the sale holds the minter role on
    pub collectible: Addr,
    /// Price of one box in payment-token base units. Always > 0.
    pub unit_price: Uint128,
    pub paused: bool,
}

/// Metadata indices `1..=capacity`, handed out without replacement.
#[cw_serde]
pub struct SalePool {
    pub capacity: u32,
    /// Live slots of the shuffle; also the number of unallocated indices.
    pub remaining: u32,
}

impl SalePool {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            remaining: capacity,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining == 0
    }
}

#[cw_serde]
#[derive(Default)]
pub struct SaleStats {
    pub total_minted: u64,
    /// Lifetime revenue. Withdrawals do not reduce it.
    pub total_revenue: Uint128,
}

// ---- Storage keys ----

pub const CONFIG: Item<Config> = Item::new("config");
pub const POOL: Item<SalePool> = Item::new("pool");
/// Sparse swap table of the shuffle: slot -> index. A missing slot `s` holds `s + 1`.
pub const POOL_SLOTS: Map<u32, u32> = Map::new("pool_slots");
/// metadata index -> token id it was bound to
pub const ALLOCATED: Map<u32, u64> = Map::new("allocated");
pub const STATS: Item<SaleStats> = Item::new("stats");
pub const USER_MINT_COUNT: Map<&Addr, u64> = Map::new("user_mint_count");

/// Pending owner for 2-step ownership transfer
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");
