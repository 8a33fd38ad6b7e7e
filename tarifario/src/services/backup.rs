//! Backup export and import over the stored documents

use chrono::{Local, NaiveDateTime};
use shared::error::AppResult;

use crate::backup::{BackupCodec, BackupDocument, BackupSnapshot, ImportBundle};
use crate::core::AppState;
use crate::db::repository::{
    category, config as config_repo, promotion, quick_quote, quote, shift,
};

/// What an import wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub configuration: bool,
    pub categories: Option<usize>,
    pub promotions: Option<usize>,
    pub official_quotes: Option<usize>,
    pub quick_quotes: Option<usize>,
    pub shift_config: bool,
    pub legacy: bool,
}

/// Read every stored section into a snapshot
pub fn snapshot(state: &AppState) -> AppResult<BackupSnapshot> {
    let storage = state.storage();
    Ok(BackupSnapshot {
        configuration: config_repo::load(storage)?,
        categories: category::find_all(storage)?,
        promotions: promotion::find_all(storage)?,
        official_quotes: quote::find_all(storage)?,
        quick_quotes: quick_quote::find_all(storage)?,
        shift_config: shift::load(storage)?,
    })
}

pub fn export(state: &AppState) -> AppResult<BackupDocument> {
    export_at(state, Local::now().naive_local())
}

pub fn export_at(state: &AppState, exported_at: NaiveDateTime) -> AppResult<BackupDocument> {
    BackupCodec::export(&snapshot(state)?, exported_at)
}

/// Check every present section before anything is written
fn validate_bundle(bundle: &mut ImportBundle) -> AppResult<()> {
    if let Some(config) = bundle.configuration.as_mut() {
        config_repo::normalize_season(config);
        config_repo::validate(config)?;
    }
    for c in bundle.categories.iter().flatten() {
        category::validate(c)?;
    }
    for p in bundle.promotions.iter().flatten() {
        promotion::validate(p)?;
    }
    for q in bundle.official_quotes.iter().flatten() {
        quote::validate(q)?;
    }
    for q in bundle.quick_quotes.iter().flatten() {
        quick_quote::validate(q)?;
    }
    if let Some(shifts) = &bundle.shift_config {
        shift::validate(shifts)?;
    }
    Ok(())
}

/// Decode, verify and write a backup
///
/// Any failure before the first write leaves the store untouched; sections
/// absent from the document keep their stored value.
pub fn import(state: &AppState, json: &str) -> AppResult<ImportSummary> {
    let current = state.settings()?;
    let mut bundle = BackupCodec::import(json, &current)?;
    validate_bundle(&mut bundle)?;

    let storage = state.storage();
    let mut summary = ImportSummary {
        legacy: bundle.legacy,
        ..ImportSummary::default()
    };
    if let Some(config) = bundle.configuration {
        config_repo::save(storage, config)?;
        summary.configuration = true;
    }
    if let Some(categories) = bundle.categories {
        category::save_all(storage, &categories)?;
        summary.categories = Some(categories.len());
    }
    if let Some(promotions) = bundle.promotions {
        promotion::save_all(storage, &promotions)?;
        summary.promotions = Some(promotions.len());
    }
    if let Some(quotes) = bundle.official_quotes {
        quote::save_all(storage, &quotes)?;
        summary.official_quotes = Some(quotes.len());
    }
    if let Some(quotes) = bundle.quick_quotes {
        quick_quote::save_all(storage, &quotes)?;
        summary.quick_quotes = Some(quotes.len());
    }
    if let Some(shifts) = bundle.shift_config {
        shift::save(storage, shifts)?;
        summary.shift_config = true;
    }

    tracing::info!(legacy = summary.legacy, ?summary, "Backup imported");
    Ok(summary)
}

/// Drop every stored document; the next read sees factory defaults
pub fn reset(state: &AppState) -> AppResult<usize> {
    let removed = state.storage().clear()?;
    tracing::warn!(removed, "All stored data cleared");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use shared::error::ErrorCode;
    use shared::models::{Configuration, PromotionCreate};

    fn state() -> AppState {
        AppState::in_memory(Config::with_work_dir("unused"))
    }

    #[test]
    fn test_round_trip_between_stores() {
        let source = state();
        let mut config = Configuration::default();
        config.hotel_name = "Pousada Sol".to_string();
        config_repo::save(source.storage(), config.clone()).unwrap();
        promotion::create(
            source.storage(),
            PromotionCreate {
                name: "Réveillon".to_string(),
                discount_percent: 10.0,
                min_nights: Some(2),
                applies_high_season: None,
                low_season_message: None,
            },
        )
        .unwrap();

        let json = export(&source).unwrap().to_json_pretty().unwrap();
        let target = state();
        let summary = import(&target, &json).unwrap();
        assert!(summary.configuration);
        assert_eq!(summary.categories, Some(2));
        assert_eq!(summary.promotions, Some(1));
        assert!(!summary.legacy);

        assert_eq!(snapshot(&target).unwrap(), snapshot(&source).unwrap());
    }

    #[test]
    fn test_invalid_section_writes_nothing() {
        let source = state();
        let mut doc = export(&source).unwrap();
        if let Some(categories) = doc.categories.as_mut() {
            categories[0].capacity = 0;
        }
        // re-sign the tampered content so only validation can reject it
        let tampered = BackupSnapshot {
            categories: doc.categories.clone().unwrap_or_default(),
            ..snapshot(&source).unwrap()
        };
        let json = BackupCodec::export(&tampered, doc.export_date)
            .unwrap()
            .to_json_pretty()
            .unwrap();

        let target = state();
        let mut config = Configuration::default();
        config.hotel_name = "Antes".to_string();
        config_repo::save(target.storage(), config).unwrap();

        let err = import(&target, &json).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryInvalidCapacity);
        assert_eq!(target.settings().unwrap().hotel_name, "Antes");
    }

    #[test]
    fn test_rejected_signature() {
        let target = state();
        let err = import(&target, r#"{"version":"1.0.0","signature":"x"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupSignatureMismatch);
        assert!(target.storage().keys().unwrap().is_empty());
    }

    #[test]
    fn test_reset() {
        let state = state();
        config_repo::save(state.storage(), Configuration::default()).unwrap();
        assert_eq!(reset(&state).unwrap(), 1);
        assert_eq!(state.settings().unwrap(), Configuration::default());
    }
}
