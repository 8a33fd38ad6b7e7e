//! Tarifário - hotel pricing and quoting engine
//!
//! # Overview
//!
//! Single-operator tool: room categories, seasonal rates, meal surcharges and
//! promotions go in; price tables and WhatsApp-ready quotes come out.
//!
//! ```text
//! tarifario/src/
//! ├── core/       # env config, application state
//! ├── db/         # key-value store + repositories
//! ├── pricing/    # season classifier, stay calculator, promotion rules
//! ├── rendering/  # quote documents and messages
//! ├── backup/     # signed export/import, legacy adapter
//! ├── services/   # quote lifecycle, access gate, delivery sinks
//! └── utils/      # logger, money, formatting, validation
//! ```

pub mod backup;
pub mod core;
pub mod db;
pub mod pricing;
pub mod rendering;
pub mod services;
pub mod utils;

pub use core::{AppState, Config};
pub use pricing::{PricingEngine, PricingResult, StayRequest};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

/// Load `.env`, then start logging from the environment config
pub fn setup_environment() -> Config {
    // a missing .env is fine
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
