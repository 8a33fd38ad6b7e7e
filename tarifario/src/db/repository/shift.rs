//! Shift Configuration Repository

use super::RepoResult;
use crate::db::store::{Storage, keys};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::error::AppError;
use shared::models::ShiftConfig;

pub fn load(storage: &Storage) -> RepoResult<ShiftConfig> {
    Ok(storage.get(keys::SHIFT_CONFIG)?.unwrap_or_default())
}

pub fn validate(config: &ShiftConfig) -> RepoResult<()> {
    validate_required_text(&config.first_worker, "firstWorker", MAX_NAME_LEN)?;
    validate_required_text(&config.second_worker, "secondWorker", MAX_NAME_LEN)?;
    if let Some(day) = config.off_days.iter().find(|d| **d > 6) {
        return Err(AppError::validation(format!(
            "Off day {} is not a weekday (0 = Sunday .. 6 = Saturday)",
            day
        ))
        .into());
    }
    Ok(())
}

pub fn save(storage: &Storage, mut config: ShiftConfig) -> RepoResult<ShiftConfig> {
    config.off_days.sort_unstable();
    config.off_days.dedup();
    validate(&config)?;
    storage.set(keys::SHIFT_CONFIG, &config)?;
    tracing::info!(off_days = ?config.off_days, "Shift configuration saved");
    Ok(config)
}
