use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Sale is paused")]
    OperationPaused,

    #[error("Invalid amount: must be between 1 and {max}")]
    InvalidAmount { max: u32 },

    #[error("Not enough NFTs remaining: {remaining} left, requested {requested}")]
    SupplyExhausted { remaining: u32, requested: u32 },

    #[error("Insufficient GEM balance: need {need}, have {have}")]
    InsufficientBalance { need: String, have: String },

    #[error("Insufficient GEM allowance: need {need}, have {have}")]
    InsufficientAllowance { need: String, have: String },

    #[error("Invalid price: must be greater than zero")]
    InvalidPrice,

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Invalid pool capacity: must be between 1 and {max}")]
    InvalidCapacity { max: u32 },

    #[error("No pending ownership transfer")]
    NoPendingOwner,
}
