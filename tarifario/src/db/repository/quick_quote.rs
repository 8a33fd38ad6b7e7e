//! Quick Quote History Repository
//!
//! Entries are write-once. The history is capped; the oldest entries fall
//! off the end.

use super::{RepoError, RepoResult};
use crate::db::store::{Storage, keys};
use shared::error::AppError;
use shared::models::QuickQuote;

/// Default number of entries kept
pub const HISTORY_LIMIT: usize = 50;

pub fn validate(quote: &QuickQuote) -> RepoResult<()> {
    if quote.id.trim().is_empty() {
        return Err(AppError::required("id").into());
    }
    if quote.text.trim().is_empty() {
        return Err(AppError::required("text").into());
    }
    Ok(())
}

/// History, newest first
pub fn find_all(storage: &Storage) -> RepoResult<Vec<QuickQuote>> {
    Ok(storage.get(keys::QUICK_QUOTE_HISTORY)?.unwrap_or_default())
}

pub fn find_by_id(storage: &Storage, id: &str) -> RepoResult<QuickQuote> {
    find_all(storage)?
        .into_iter()
        .find(|q| q.id == id)
        .ok_or_else(|| RepoError::NotFound(format!("Quick quote {} not found", id)))
}

/// Prepend an entry and trim the history to `limit`
pub fn push(storage: &Storage, quote: QuickQuote, limit: usize) -> RepoResult<()> {
    validate(&quote)?;
    let mut all = find_all(storage)?;
    if all.iter().any(|q| q.id == quote.id) {
        return Err(RepoError::Duplicate(format!(
            "Quick quote {} already recorded",
            quote.id
        )));
    }
    all.insert(0, quote);
    all.truncate(limit.max(1));
    storage.set(keys::QUICK_QUOTE_HISTORY, &all)?;
    tracing::debug!(entries = all.len(), "Quick quote history updated");
    Ok(())
}

/// Replace the history wholesale (backup import)
pub fn save_all(storage: &Storage, quotes: &[QuickQuote]) -> RepoResult<()> {
    for quote in quotes {
        validate(quote)?;
    }
    storage.set(keys::QUICK_QUOTE_HISTORY, &quotes)?;
    Ok(())
}

pub fn clear(storage: &Storage) -> RepoResult<()> {
    storage.remove(keys::QUICK_QUOTE_HISTORY)?;
    tracing::info!("Quick quote history cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::SeasonKind;

    fn entry(id: usize) -> QuickQuote {
        let at = NaiveDate::from_ymd_opt(2025, 12, 20)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        QuickQuote {
            id: id.to_string(),
            generated_at: at,
            category_id: "standard".to_string(),
            category_name: "Standard".to_string(),
            check_in: at,
            check_out: at,
            nights: 1,
            quantity: 1,
            nightly_rate: 380.0,
            season: SeasonKind::High,
            total: 380.0,
            text: "texto".to_string(),
        }
    }

    #[test]
    fn test_history_capped_newest_first() {
        let storage = Storage::in_memory();
        for i in 0..55 {
            push(&storage, entry(i), HISTORY_LIMIT).unwrap();
        }
        let all = find_all(&storage).unwrap();
        assert_eq!(all.len(), HISTORY_LIMIT);
        assert_eq!(all[0].id, "54");
        assert_eq!(all[49].id, "5");
        assert!(matches!(find_by_id(&storage, "0"), Err(RepoError::NotFound(_))));
    }

    #[test]
    fn test_write_once() {
        let storage = Storage::in_memory();
        push(&storage, entry(1), HISTORY_LIMIT).unwrap();
        assert!(matches!(
            push(&storage, entry(1), HISTORY_LIMIT),
            Err(RepoError::Duplicate(_))
        ));
    }

    #[test]
    fn test_clear() {
        let storage = Storage::in_memory();
        push(&storage, entry(1), HISTORY_LIMIT).unwrap();
        clear(&storage).unwrap();
        assert!(find_all(&storage).unwrap().is_empty());
    }
}
