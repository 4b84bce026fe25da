pub mod contract;
pub mod error;
pub mod msg;
