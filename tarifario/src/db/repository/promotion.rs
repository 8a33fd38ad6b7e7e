//! Promotion Repository

use super::RepoResult;
use crate::db::store::{Storage, keys};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_percent, validate_required_text};
use shared::error::{AppError, ErrorCode};
use shared::models::{Promotion, PromotionCreate, PromotionUpdate};
use shared::util::new_id;

fn not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::PromotionNotFound, format!("Promotion {} not found", id))
        .with_detail("id", id)
}

pub fn validate(promotion: &Promotion) -> RepoResult<()> {
    validate_required_text(&promotion.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&promotion.low_season_message, "lowSeasonMessage", MAX_NOTE_LEN)?;
    validate_percent(promotion.discount_percent, "discountPercent").map_err(|e| {
        AppError::with_message(ErrorCode::PromotionInvalidDiscount, e.message)
    })?;
    Ok(())
}

pub fn find_all(storage: &Storage) -> RepoResult<Vec<Promotion>> {
    Ok(storage.get(keys::PROMOTIONS)?.unwrap_or_default())
}

pub fn find_by_id(storage: &Storage, id: &str) -> RepoResult<Option<Promotion>> {
    Ok(find_all(storage)?.into_iter().find(|p| p.id == id))
}

pub fn save_all(storage: &Storage, promotions: &[Promotion]) -> RepoResult<()> {
    for promotion in promotions {
        validate(promotion)?;
    }
    storage.set(keys::PROMOTIONS, &promotions)?;
    tracing::info!(count = promotions.len(), "Saved promotions");
    Ok(())
}

pub fn create(storage: &Storage, data: PromotionCreate) -> RepoResult<Promotion> {
    let promotion = Promotion {
        id: new_id(),
        name: data.name.trim().to_string(),
        discount_percent: data.discount_percent,
        min_nights: data.min_nights.unwrap_or(0),
        applies_high_season: data.applies_high_season.unwrap_or(false),
        low_season_message: data.low_season_message.filter(|m| !m.trim().is_empty()),
    };
    validate(&promotion)?;
    let mut all = find_all(storage)?;
    all.push(promotion.clone());
    save_all(storage, &all)?;
    Ok(promotion)
}

pub fn update(storage: &Storage, id: &str, data: PromotionUpdate) -> RepoResult<Promotion> {
    let mut all = find_all(storage)?;
    let promotion = all
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| not_found(id))?;
    if let Some(name) = data.name {
        promotion.name = name.trim().to_string();
    }
    if let Some(pct) = data.discount_percent {
        promotion.discount_percent = pct;
    }
    if let Some(n) = data.min_nights {
        promotion.min_nights = n;
    }
    if let Some(high) = data.applies_high_season {
        promotion.applies_high_season = high;
    }
    if let Some(msg) = data.low_season_message {
        promotion.low_season_message = Some(msg).filter(|m| !m.trim().is_empty());
    }
    let updated = promotion.clone();
    save_all(storage, &all)?;
    Ok(updated)
}

pub fn delete(storage: &Storage, id: &str) -> RepoResult<()> {
    let mut all = find_all(storage)?;
    let before = all.len();
    all.retain(|p| p.id != id);
    if all.len() == before {
        return Err(not_found(id).into());
    }
    save_all(storage, &all)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pct: f64) -> PromotionCreate {
        PromotionCreate {
            name: "Pix".to_string(),
            discount_percent: pct,
            min_nights: Some(3),
            applies_high_season: Some(true),
            low_season_message: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_crud() {
        let storage = Storage::in_memory();
        assert!(find_all(&storage).unwrap().is_empty());

        let created = create(&storage, payload(15.0)).unwrap();
        assert_eq!(created.low_season_message, None);

        let updated = update(
            &storage,
            &created.id,
            PromotionUpdate {
                discount_percent: Some(10.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.discount_percent, 10.0);
        assert_eq!(find_by_id(&storage, &created.id).unwrap(), Some(updated));

        delete(&storage, &created.id).unwrap();
        let err: AppError = delete(&storage, &created.id).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::PromotionNotFound);
    }

    #[test]
    fn test_discount_out_of_range() {
        let storage = Storage::in_memory();
        let err: AppError = create(&storage, payload(120.0)).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::PromotionInvalidDiscount);
        assert!(find_all(&storage).unwrap().is_empty());
    }
}
