//! Core hubview library (config, logging, backend API client).

pub mod api;
pub mod config;
pub mod logging;
