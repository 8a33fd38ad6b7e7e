//! Official Quote Repository

use super::RepoResult;
use crate::db::store::{Storage, keys};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use shared::error::{AppError, ErrorCode};
use shared::models::SavedQuote;

pub fn not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::QuoteNotFound, format!("Quote {} not found", id))
        .with_detail("id", id)
}

pub fn validate(quote: &SavedQuote) -> RepoResult<()> {
    validate_required_text(&quote.id, "id", MAX_NAME_LEN)?;
    validate_required_text(&quote.title, "title", MAX_NAME_LEN)?;
    if quote.client.len() > MAX_NAME_LEN || quote.event.len() > MAX_NAME_LEN {
        return Err(AppError::validation("Client or event name is too long").into());
    }
    if quote.notes.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("Quote notes are too long").into());
    }
    if quote.check_out <= quote.check_in {
        return Err(AppError::with_message(
            ErrorCode::InvalidStay,
            "Check-out must be after check-in",
        )
        .with_detail("id", quote.id.clone())
        .into());
    }
    if quote.items.iter().any(|i| i.quantity == 0) {
        return Err(AppError::validation("Quote items need a quantity of at least 1").into());
    }
    Ok(())
}

/// Saved quotes, newest first
pub fn find_all(storage: &Storage) -> RepoResult<Vec<SavedQuote>> {
    Ok(storage.get(keys::OFFICIAL_QUOTES)?.unwrap_or_default())
}

pub fn find_by_id(storage: &Storage, id: &str) -> RepoResult<Option<SavedQuote>> {
    Ok(find_all(storage)?.into_iter().find(|q| q.id == id))
}

pub fn save_all(storage: &Storage, quotes: &[SavedQuote]) -> RepoResult<()> {
    for quote in quotes {
        validate(quote)?;
    }
    storage.set(keys::OFFICIAL_QUOTES, &quotes)?;
    Ok(())
}

/// Insert or replace by id; new quotes go to the front
pub fn upsert(storage: &Storage, quote: &SavedQuote) -> RepoResult<()> {
    validate(quote)?;
    let mut all = find_all(storage)?;
    match all.iter_mut().find(|q| q.id == quote.id) {
        Some(existing) => *existing = quote.clone(),
        None => all.insert(0, quote.clone()),
    }
    save_all(storage, &all)?;
    tracing::info!(id = %quote.id, status = ?quote.status, "Official quote saved");
    Ok(())
}

pub fn delete(storage: &Storage, id: &str) -> RepoResult<()> {
    let mut all = find_all(storage)?;
    let before = all.len();
    all.retain(|q| q.id != id);
    if all.len() == before {
        return Err(not_found(id).into());
    }
    save_all(storage, &all)
}
