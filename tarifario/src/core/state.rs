use std::sync::Arc;

use shared::error::AppResult;
use shared::models::{Configuration, RoomCategory};

use crate::core::Config;
use crate::db::Storage;
use crate::db::repository::{category, config as config_repo};
use crate::pricing::PricingEngine;

/// Application state - the runtime config plus the opened storage
///
/// Cloning is cheap; the storage is shared.
///
/// # Example
///
/// ```ignore
/// let state = AppState::open(Config::from_env())?;
/// let engine = state.pricing_engine()?;
/// ```
#[derive(Clone)]
pub struct AppState {
    config: Config,
    storage: Arc<Storage>,
}

impl AppState {
    /// Open the file store under `config.work_dir`
    pub fn open(config: Config) -> AppResult<Self> {
        let storage = Storage::open_dir(&config.work_dir)?;
        tracing::info!(work_dir = %config.work_dir, "Storage ready");
        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    /// Volatile state, nothing touches the disk
    pub fn in_memory(config: Config) -> Self {
        Self {
            config,
            storage: Arc::new(Storage::in_memory()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Current stored configuration
    pub fn settings(&self) -> AppResult<Configuration> {
        Ok(config_repo::load(&self.storage)?)
    }

    pub fn catalog(&self) -> AppResult<Vec<RoomCategory>> {
        Ok(category::find_all(&self.storage)?)
    }

    /// Engine over a snapshot of the stored configuration
    pub fn pricing_engine(&self) -> AppResult<PricingEngine> {
        Ok(PricingEngine::new(self.settings()?))
    }
}
