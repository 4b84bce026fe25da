use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Default collection size.
pub fn default_max_supply() -> u32 {
    20
}

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub name: String,
    pub symbol: String,
    /// Prefix of every token URI; the metadata index and ".json" are appended.
    pub base_uri: String,
    pub max_supply: u32,
}

#[cw_serde]
pub struct TokenInfo {
    pub owner: Addr,
    pub approved: Option<Addr>,
    /// Key into the off-chain metadata catalog, bound after mint.
    pub metadata_index: Option<u32>,
}

// ---- Storage keys ----

pub const CONFIG: Item<Config> = Item::new("config");
/// Number of tokens ever minted. Token ids are `1..=TOTAL_SUPPLY`.
pub const TOTAL_SUPPLY: Item<u32> = Item::new("total_supply");
pub const TOKENS: Map<u64, TokenInfo> = Map::new("tokens");
pub const BALANCES: Map<&Addr, u64> = Map::new("balances");
/// (owner, token_id) -> () for paged per-owner listing
pub const OWNED_TOKENS: Map<(&Addr, u64), ()> = Map::new("owned_tokens");
pub const MINTERS: Map<&Addr, bool> = Map::new("minters");
