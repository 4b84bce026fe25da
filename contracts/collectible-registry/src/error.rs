use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Caller is not an authorized minter")]
    NotMinter,

    #[error("Max supply exceeded: max {max}, minted {minted}, requested {requested}")]
    MaxSupplyExceeded { max: u32, minted: u32, requested: u32 },

    #[error("Invalid amount: must be between 1 and {max}")]
    InvalidAmount { max: u32 },

    #[error("Invalid max supply: must be greater than zero")]
    InvalidMaxSupply,

    #[error("Token does not exist: {token_id}")]
    TokenNotFound { token_id: u64 },

    #[error("Invalid metadata index {index}: must be between 1 and {max}")]
    InvalidMetadataIndex { index: u32, max: u32 },

    #[error("Token ids and metadata indices length mismatch: {ids} ids, {indices} indices")]
    LengthMismatch { ids: usize, indices: usize },
}
