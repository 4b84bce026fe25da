pub mod admin;
pub mod purchase;
pub mod withdraw;
