use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    /// Hard cap on tokens ever minted. Default: 20.
    #[serde(default = "crate::state::default_max_supply")]
    pub max_supply: u32,
    /// Optional initial holder of the minter role (e.g. the sale contract).
    pub minter: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Minter: mint the next token id to `owner`
    Mint { owner: String },

    /// Minter: mint `amount` sequential token ids to `owner`
    MintBatch { owner: String, amount: u32 },

    /// Minter: bind a metadata index to an existing token
    SetTokenMetadata { token_id: u64, metadata_index: u32 },

    /// Minter: bind metadata indices to several tokens, pairwise
    SetTokenMetadataBatch {
        token_ids: Vec<u64>,
        metadata_indices: Vec<u32>,
    },

    /// Admin: replace the token URI prefix
    SetBaseUri { base_uri: String },

    /// Admin: grant the minter role
    GrantMinter { address: String },

    /// Admin: revoke the minter role
    RevokeMinter { address: String },

    /// Owner or approved spender: move a token
    TransferNft { recipient: String, token_id: u64 },

    /// Owner: approve a single spender for a token
    Approve { spender: String, token_id: u64 },

    /// Owner: clear the approval on a token
    Revoke { token_id: u64 },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CollectionInfoResponse)]
    CollectionInfo {},

    #[returns(u32)]
    MaxSupply {},

    #[returns(u32)]
    TotalSupply {},

    #[returns(u32)]
    RemainingSupply {},

    #[returns(bool)]
    IsSoldOut {},

    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },

    #[returns(BalanceResponse)]
    Balance { owner: String },

    #[returns(TokenUriResponse)]
    TokenUri { token_id: u64 },

    #[returns(String)]
    BaseUri {},

    #[returns(TokenInfoResponse)]
    TokenInfo { token_id: u64 },

    #[returns(bool)]
    IsMinter { address: String },

    #[returns(ApprovalResponse)]
    Approval { token_id: u64 },

    #[returns(TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

// ---- Response types ----

#[cw_serde]
pub struct CollectionInfoResponse {
    pub admin: Addr,
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub max_supply: u32,
    pub total_supply: u32,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: u64,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub token_uri: String,
}

#[cw_serde]
pub struct TokenInfoResponse {
    pub token_id: u64,
    pub owner: Addr,
    pub approved: Option<Addr>,
    pub metadata_index: Option<u32>,
    pub token_uri: String,
}

#[cw_serde]
pub struct ApprovalResponse {
    pub spender: Option<Addr>,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<u64>,
}
