//! Configuration Repository
//!
//! The configuration is a singleton. Reads never fail for a missing
//! document; the factory settings stand in.

use super::RepoResult;
use crate::db::store::{Storage, keys};
use crate::utils::time::{parse_date, parse_time};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_percent, validate_required_text,
};
use chrono::Days;
use shared::error::AppError;
use shared::models::{Configuration, Meal};

pub fn load(storage: &Storage) -> RepoResult<Configuration> {
    Ok(storage.get(keys::CONFIG)?.unwrap_or_default())
}

/// Keep the high season non-empty: an end on or before the start moves to
/// the day after the start
pub fn normalize_season(config: &mut Configuration) {
    let start = config.high_season_start.trim();
    let end = config.high_season_end.trim();
    if start.is_empty() || end.is_empty() {
        return;
    }
    if let (Ok(start), Ok(end)) = (parse_date(start), parse_date(end))
        && end <= start
        && let Some(fixed) = start.checked_add_days(Days::new(1))
    {
        tracing::warn!(%start, %end, %fixed, "High season end not after start, adjusted");
        config.high_season_end = fixed.format("%Y-%m-%d").to_string();
    }
}

pub fn validate(config: &Configuration) -> RepoResult<()> {
    validate_required_text(&config.hotel_name, "hotelName", MAX_NAME_LEN)?;
    for (field, value) in [
        ("lunchPrice", config.lunch_price),
        ("dinnerPrice", config.dinner_price),
        ("snackPrice", config.snack_price),
        ("kwhRate", config.kwh_rate),
    ] {
        validate_amount(value, field)?;
    }
    validate_percent(config.promotion.discount_percent, "promotion.discountPercent")?;
    validate_percent(config.templates.deposit_percent, "templates.depositPercent")?;

    for (field, value) in [
        ("highSeasonStart", &config.high_season_start),
        ("highSeasonEnd", &config.high_season_end),
    ] {
        if !value.trim().is_empty() {
            parse_date(value).map_err(|e| e.with_detail("field", field))?;
        }
    }

    for meal in [Meal::Breakfast, Meal::Lunch, Meal::AfternoonSnack, Meal::Dinner] {
        let window = config.meals.window(meal);
        if !window.active {
            continue;
        }
        let start = parse_time(&window.start)?;
        let end = parse_time(&window.end)?;
        if end < start {
            return Err(AppError::validation(format!(
                "{} window ends before it starts ({} - {})",
                meal.label(),
                window.start,
                window.end
            ))
            .into());
        }
    }

    let t = &config.templates;
    for (field, value) in [
        ("templates.title", &t.title),
        ("templates.configTitle", &t.config_title),
        ("templates.configDescription", &t.config_description),
        ("templates.mealsNote", &t.meals_note),
        ("templates.schedule", &t.schedule),
        ("templates.payment", &t.payment),
        ("templates.observations", &t.observations),
        ("templates.footer", &t.footer),
    ] {
        if value.len() > MAX_NOTE_LEN {
            return Err(AppError::validation(format!("{field} is too long")).into());
        }
    }
    Ok(())
}

/// Normalize, validate and store; returns what was written
pub fn save(storage: &Storage, mut config: Configuration) -> RepoResult<Configuration> {
    normalize_season(&mut config);
    validate(&config)?;
    storage.set(keys::CONFIG, &config)?;
    tracing::info!("Configuration saved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_missing_document_yields_defaults() {
        let storage = Storage::in_memory();
        assert_eq!(load(&storage).unwrap(), Configuration::default());
    }

    #[test]
    fn test_season_end_before_start_adjusted() {
        let storage = Storage::in_memory();
        let config = Configuration {
            high_season_start: "2026-01-10".to_string(),
            high_season_end: "2026-01-10".to_string(),
            ..Configuration::default()
        };
        let saved = save(&storage, config).unwrap();
        assert_eq!(saved.high_season_end, "2026-01-11");
        assert_eq!(load(&storage).unwrap().high_season_end, "2026-01-11");
    }

    #[test]
    fn test_unset_season_allowed() {
        let storage = Storage::in_memory();
        let config = Configuration {
            high_season_end: String::new(),
            ..Configuration::default()
        };
        assert!(save(&storage, config).is_ok());
    }

    #[test]
    fn test_invalid_values_leave_store_untouched() {
        let storage = Storage::in_memory();
        let mut config = Configuration::default();
        config.lunch_price = -5.0;
        let err: AppError = save(&storage, config).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert!(storage.keys().unwrap().is_empty());

        let mut config = Configuration::default();
        config.meals.dinner.start = "25:00".to_string();
        assert!(save(&storage, config).is_err());

        let mut config = Configuration::default();
        config.high_season_start = "15/12/2025".to_string();
        assert!(save(&storage, config).is_err());
    }

    #[test]
    fn test_inactive_window_not_checked() {
        let storage = Storage::in_memory();
        let mut config = Configuration::default();
        config.meals.lunch.active = false;
        config.meals.lunch.start = "??".to_string();
        assert!(save(&storage, config).is_ok());
    }
}
