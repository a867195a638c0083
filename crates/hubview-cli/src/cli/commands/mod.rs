//! CLI command handlers.

pub mod account;
pub mod config;
pub mod health;
