//! Core tdx library (task model, session storage, API clients, config).

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod task;
