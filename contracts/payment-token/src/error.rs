use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Cw20(#[from] cw20_base::ContractError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Burn exceeds balance: balance {balance}, amount {amount}")]
    BurnExceedsBalance { balance: String, amount: String },

    #[error("Invalid decimals: max {max}, got {got}")]
    InvalidDecimals { max: u8, got: u8 },
}
