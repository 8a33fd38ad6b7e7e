//! Backup export / import
//!
//! A backup is one JSON document holding every persisted collection plus a
//! signature. The signature is the base64 of the canonical document (keys
//! sorted, `signature` removed) followed by the format version. It catches
//! accidental edits and truncation; it is not a cryptographic seal.
//!
//! Documents from the previous system are recognised by shape and handed to
//! [`legacy::migrate`], so the codec itself only ever parses the current
//! format.

pub mod legacy;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Configuration, Promotion, QuickQuote, RoomCategory, SavedQuote, ShiftConfig};

/// Current document format
pub const VERSION: &str = "1.0.0";

/// Everything an export captures
#[derive(Debug, Clone, PartialEq)]
pub struct BackupSnapshot {
    pub configuration: Configuration,
    pub categories: Vec<RoomCategory>,
    pub promotions: Vec<Promotion>,
    pub official_quotes: Vec<SavedQuote>,
    pub quick_quotes: Vec<QuickQuote>,
    pub shift_config: ShiftConfig,
}

/// On-disk backup document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: String,
    pub export_date: NaiveDateTime,
    #[serde(default)]
    pub configuration: Option<Configuration>,
    #[serde(default)]
    pub categories: Option<Vec<RoomCategory>>,
    #[serde(default)]
    pub promotions: Option<Vec<Promotion>>,
    #[serde(default)]
    pub official_quotes: Option<Vec<SavedQuote>>,
    #[serde(default)]
    pub quick_quotes: Option<Vec<QuickQuote>>,
    #[serde(default)]
    pub shift_config: Option<ShiftConfig>,
    #[serde(default)]
    pub signature: String,
}

impl BackupDocument {
    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sections decoded from a backup; `None` sections are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBundle {
    pub configuration: Option<Configuration>,
    pub categories: Option<Vec<RoomCategory>>,
    pub promotions: Option<Vec<Promotion>>,
    pub official_quotes: Option<Vec<SavedQuote>>,
    pub quick_quotes: Option<Vec<QuickQuote>>,
    pub shift_config: Option<ShiftConfig>,
    /// Set when the bundle came from the previous system's format
    pub legacy: bool,
}

impl ImportBundle {
    /// Number of sections that will be written
    pub fn section_count(&self) -> usize {
        [
            self.configuration.is_some(),
            self.categories.is_some(),
            self.promotions.is_some(),
            self.official_quotes.is_some(),
            self.quick_quotes.is_some(),
            self.shift_config.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Canonical text of a document value: sorted keys, no `signature`
fn canonical(value: &Value) -> AppResult<String> {
    let mut value = value.clone();
    if let Value::Object(map) = &mut value {
        map.remove("signature");
    }
    // serde_json's default map is ordered by key
    Ok(serde_json::to_string(&value)?)
}

fn sign(value: &Value) -> AppResult<String> {
    let mut payload = canonical(value)?;
    payload.push_str(VERSION);
    Ok(STANDARD.encode(payload.as_bytes()))
}

fn major(version: &str) -> Option<u64> {
    version.split('.').next()?.trim().parse().ok()
}

fn invalid_file(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::BackupInvalidFile, msg)
}

pub struct BackupCodec;

impl BackupCodec {
    /// Build a signed document from a snapshot, stamped `exported_at`
    pub fn export(snapshot: &BackupSnapshot, exported_at: NaiveDateTime) -> AppResult<BackupDocument> {
        let mut document = BackupDocument {
            version: VERSION.to_string(),
            export_date: exported_at,
            configuration: Some(snapshot.configuration.clone()),
            categories: Some(snapshot.categories.clone()),
            promotions: Some(snapshot.promotions.clone()),
            official_quotes: Some(snapshot.official_quotes.clone()),
            quick_quotes: Some(snapshot.quick_quotes.clone()),
            shift_config: Some(snapshot.shift_config.clone()),
            signature: String::new(),
        };
        document.signature = sign(&serde_json::to_value(&document)?)?;
        tracing::info!(
            categories = snapshot.categories.len(),
            quotes = snapshot.official_quotes.len(),
            "Backup exported"
        );
        Ok(document)
    }

    /// Decode and verify a backup
    ///
    /// `current` is only read for documents in the previous system's format,
    /// whose settings are merged over it.
    pub fn import(json: &str, current: &Configuration) -> AppResult<ImportBundle> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| invalid_file(format!("Backup is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(invalid_file("Backup must be a JSON object"));
        }

        if legacy::is_legacy(&value) {
            tracing::info!("Legacy backup detected");
            return legacy::migrate(&value, current);
        }

        let version = value
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_file("Backup has no version"))?;
        if major(version) != major(VERSION) {
            return Err(AppError::with_message(
                ErrorCode::BackupUnsupportedVersion,
                format!("Unsupported backup version {}", version),
            )
            .with_detail("version", version));
        }

        let stored = value
            .get("signature")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if stored != sign(&value)? {
            return Err(AppError::with_message(
                ErrorCode::BackupSignatureMismatch,
                "Backup signature does not match its content; the file was modified or is corrupt",
            ));
        }

        let document: BackupDocument = serde_json::from_value(value)
            .map_err(|e| invalid_file(format!("Backup content is malformed: {}", e)))?;
        Ok(ImportBundle {
            configuration: document.configuration,
            categories: document.categories,
            promotions: document.promotions,
            official_quotes: document.official_quotes,
            quick_quotes: document.quick_quotes,
            shift_config: document.shift_config,
            legacy: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::category::default_categories;
    use chrono::NaiveDate;

    fn exported_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn snapshot() -> BackupSnapshot {
        BackupSnapshot {
            configuration: Configuration::default(),
            categories: default_categories(),
            promotions: vec![],
            official_quotes: vec![],
            quick_quotes: vec![],
            shift_config: ShiftConfig::default(),
        }
    }

    #[test]
    fn test_round_trip() {
        let doc = BackupCodec::export(&snapshot(), exported_at()).unwrap();
        assert_eq!(doc.version, VERSION);
        assert!(!doc.signature.is_empty());

        let json = doc.to_json_pretty().unwrap();
        let bundle = BackupCodec::import(&json, &Configuration::default()).unwrap();
        assert_eq!(bundle.configuration, Some(Configuration::default()));
        assert_eq!(bundle.categories, Some(default_categories()));
        assert_eq!(bundle.section_count(), 6);
        assert!(!bundle.legacy);
    }

    #[test]
    fn test_signature_ignores_key_order() {
        let doc = BackupCodec::export(&snapshot(), exported_at()).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        // Rebuild the object with reversed insertion order
        let Value::Object(map) = value else { unreachable!() };
        let reversed: Vec<String> = map
            .iter()
            .rev()
            .map(|(k, v)| format!("{}:{}", serde_json::to_string(k).unwrap(), v))
            .collect();
        let json = format!("{{{}}}", reversed.join(","));
        assert!(BackupCodec::import(&json, &Configuration::default()).is_ok());
    }

    #[test]
    fn test_tampered_document_rejected() {
        let doc = BackupCodec::export(&snapshot(), exported_at()).unwrap();
        let json = doc.to_json_pretty().unwrap().replace("380.0", "1.0");
        let err = BackupCodec::import(&json, &Configuration::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupSignatureMismatch);
    }

    #[test]
    fn test_missing_signature_rejected() {
        let mut doc = BackupCodec::export(&snapshot(), exported_at()).unwrap();
        doc.signature.clear();
        let err = BackupCodec::import(&doc.to_json_pretty().unwrap(), &Configuration::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupSignatureMismatch);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let json = r#"{"version":"2.0","exportDate":"2025-12-01T10:30:00","signature":""}"#;
        let err = BackupCodec::import(json, &Configuration::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupUnsupportedVersion);
    }

    #[test]
    fn test_garbage_rejected() {
        for json in ["not json", "[1,2]", r#"{"exportDate":"x"}"#] {
            let err = BackupCodec::import(json, &Configuration::default()).unwrap_err();
            assert_eq!(err.code, ErrorCode::BackupInvalidFile, "{json}");
        }
    }

    #[test]
    fn test_partial_document_keeps_missing_sections_empty() {
        let mut value = serde_json::json!({
            "version": VERSION,
            "exportDate": "2025-12-01T10:30:00",
            "shiftConfig": {"firstWorker": "Ana"}
        });
        let signature = sign(&value).unwrap();
        value["signature"] = Value::String(signature);
        let bundle = BackupCodec::import(&value.to_string(), &Configuration::default()).unwrap();
        assert_eq!(bundle.section_count(), 1);
        assert_eq!(bundle.shift_config.unwrap().first_worker, "Ana");
    }
}
