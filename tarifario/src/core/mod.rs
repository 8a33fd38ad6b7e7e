//! Core runtime: environment configuration and application state

pub mod config;
pub mod state;

pub use config::Config;
pub use state::AppState;
