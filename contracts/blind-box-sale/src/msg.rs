use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// CW20 payment token (GEM) contract address
    pub payment_token: String,
    /// Collectible registry contract address
    pub collectible: String,
    /// Price of one box in payment-token base units
    pub unit_price: Uint128,
    /// Sale owner. Defaults to the instantiating account.
    pub owner: Option<String>,
    /// Size of the metadata index pool. Defaults to the registry's max supply.
    pub capacity: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Buy `quantity` blind boxes. Requires a CW20 allowance of
    /// `unit_price * quantity` granted to this contract.
    Purchase { quantity: u32 },

    /// Owner: set the unit price (must be > 0)
    SetPrice { price: Uint128 },

    /// Owner: stop accepting purchases
    Pause {},

    /// Owner: resume accepting purchases
    Unpause {},

    /// Owner: send collected GEM to `recipient` (amount 0 = entire balance)
    Withdraw { recipient: String, amount: Uint128 },

    /// Owner: propose a new owner (step 1 of 2-step transfer)
    TransferOwnership { new_owner: String },

    /// Pending owner: accept ownership (step 2 of 2-step transfer)
    AcceptOwnership {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Uint128)]
    Price {},

    #[returns(bool)]
    Paused {},

    #[returns(u64)]
    TotalMinted {},

    #[returns(Uint128)]
    TotalRevenue {},

    #[returns(u32)]
    RemainingIndices {},

    #[returns(u64)]
    UserMintCount { address: String },

    /// False for indices outside `1..=capacity`
    #[returns(bool)]
    IsIndexUsed { index: u32 },

    #[returns(AllocatedIndicesResponse)]
    AllocatedIndices {
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    #[returns(ContractInfoResponse)]
    ContractInfo {},

    #[returns(UserInfoResponse)]
    UserInfo { address: String },

    #[returns(OwnershipResponse)]
    Ownership {},
}

// ---- Response types ----

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub payment_token: Addr,
    pub collectible: Addr,
    pub unit_price: Uint128,
    pub paused: bool,
    pub capacity: u32,
    pub max_per_tx: u32,
}

#[cw_serde]
pub struct Allocation {
    pub index: u32,
    pub token_id: u64,
}

#[cw_serde]
pub struct AllocatedIndicesResponse {
    pub allocations: Vec<Allocation>,
}

#[cw_serde]
pub struct ContractInfoResponse {
    pub unit_price: Uint128,
    pub capacity: u32,
    /// Boxes still purchasable, bounded by both the pool and the registry
    pub remaining: u32,
    pub total_minted: u64,
    pub total_revenue: Uint128,
    pub sold_out: bool,
    pub paused: bool,
}

#[cw_serde]
pub struct UserInfoResponse {
    pub payment_balance: Uint128,
    /// Allowance granted to this sale contract
    pub payment_allowance: Uint128,
    pub nft_balance: u64,
    pub mint_count: u64,
}

#[cw_serde]
pub struct OwnershipResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
}
