pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
pub mod pool;
pub mod query;
pub mod state;

pub use crate::error::ContractError;

#[cfg(test)]
pub mod testing;
#[cfg(test)]
mod multitest;
