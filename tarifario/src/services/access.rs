//! Access gate
//!
//! The operator PIN is stored as the SHA-256 hex of `pin + salt`. An empty
//! hash means no PIN is set and the gate is open. No attempt counting.

use rand::RngCore;
use sha2::{Digest, Sha256};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Configuration;

use crate::core::AppState;
use crate::db::repository::config as config_repo;

pub const MIN_PIN_LEN: usize = 3;

/// SHA-256 hex of `pin` followed by `salt`
pub fn hash_pin(pin: &str, salt: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    if let Some(salt) = salt {
        hasher.update(salt.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// 16 random bytes as hex
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Whether `pin` opens the gate of `config`
pub fn verify_pin(config: &Configuration, pin: &str) -> bool {
    if !config.has_pin() {
        return true;
    }
    hash_pin(pin, config.pin_salt.as_deref()) == config.pin_hash
}

/// Change (or clear, with an empty `new_pin`) the operator PIN
///
/// `confirmation` must repeat `new_pin`. The current PIN is only checked when
/// one is set.
pub fn change_pin(state: &AppState, current_pin: &str, new_pin: &str, confirmation: &str) -> AppResult<()> {
    if new_pin != confirmation {
        return Err(AppError::new(ErrorCode::PinMismatch));
    }
    if !new_pin.is_empty() && new_pin.chars().count() < MIN_PIN_LEN {
        return Err(AppError::with_message(
            ErrorCode::PinTooShort,
            format!("PIN must have at least {} characters", MIN_PIN_LEN),
        ));
    }

    let mut config = state.settings()?;
    if !verify_pin(&config, current_pin) {
        tracing::warn!("PIN change refused: current PIN incorrect");
        return Err(AppError::new(ErrorCode::InvalidPin));
    }

    if new_pin.is_empty() {
        config.pin_hash.clear();
        config.pin_salt = None;
    } else {
        let salt = generate_salt();
        config.pin_hash = hash_pin(new_pin, Some(&salt));
        config.pin_salt = Some(salt);
    }
    config_repo::save(state.storage(), config)?;
    tracing::info!(cleared = new_pin.is_empty(), "Operator PIN updated");
    Ok(())
}

/// Fail with `InvalidPin` unless `pin` opens the gate
pub fn require_pin(state: &AppState, pin: &str) -> AppResult<()> {
    if verify_pin(&state.settings()?, pin) {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::InvalidPin))
    }
}
