pub mod account;
pub mod articles;
pub mod health;
