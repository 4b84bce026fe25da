use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

pub use cw20_base::msg::{ExecuteMsg, QueryMsg};

pub fn default_name() -> String {
    "Gem Token".to_string()
}

pub fn default_symbol() -> String {
    "GEM".to_string()
}

pub fn default_decimals() -> u8 {
    6
}

/// 10,000,000 GEM at 6 decimals.
pub fn default_initial_supply() -> Uint128 {
    Uint128::new(10_000_000_000_000)
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Receives the initial supply and holds the minter role.
    /// Defaults to the instantiating account.
    pub owner: Option<String>,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Uint128,
    /// Optional hard cap on total supply (None = uncapped)
    pub cap: Option<Uint128>,
}

impl Default for InstantiateMsg {
    fn default() -> Self {
        Self {
            owner: None,
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            initial_supply: default_initial_supply(),
            cap: None,
        }
    }
}

#[cw_serde]
pub struct MigrateMsg {}
