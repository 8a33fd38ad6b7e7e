//! Room Category Repository

use super::{RepoError, RepoResult};
use crate::db::store::{Storage, keys};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_optional_text,
    validate_required_text,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{OccupancyGroup, RoomCategory, RoomCategoryCreate, RoomCategoryUpdate};
use shared::util::new_id;

/// Catalog shipped with a fresh install
pub fn default_categories() -> Vec<RoomCategory> {
    let amenities = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
    vec![
        RoomCategory {
            id: "standard".to_string(),
            name: "Standard".to_string(),
            capacity: 2,
            double_beds: 1,
            single_beds: 0,
            high_with_breakfast: 380.0,
            high_no_breakfast: 350.0,
            low_with_breakfast: 280.0,
            low_no_breakfast: 250.0,
            is_active: true,
            description: None,
            occupancy: OccupancyGroup::Unset,
            unit_numbers: vec!["01".to_string(), "02".to_string()],
            amenities: amenities(&["Wi-Fi", "TV"]),
        },
        RoomCategory {
            id: "luxo".to_string(),
            name: "Luxo".to_string(),
            capacity: 3,
            double_beds: 1,
            single_beds: 1,
            high_with_breakfast: 580.0,
            high_no_breakfast: 550.0,
            low_with_breakfast: 430.0,
            low_no_breakfast: 400.0,
            is_active: true,
            description: Some("Quarto com vista para o mar".to_string()),
            occupancy: OccupancyGroup::Unset,
            unit_numbers: vec!["03".to_string(), "04".to_string()],
            amenities: amenities(&["Wi-Fi", "TV", "Frigobar"]),
        },
    ]
}

/// Field checks applied before any category is written
pub fn validate(category: &RoomCategory) -> RepoResult<()> {
    validate_required_text(&category.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&category.description, "description", MAX_NOTE_LEN)?;
    if category.capacity == 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryInvalidCapacity,
            format!("Category '{}' must host at least one guest", category.name),
        )
        .into());
    }
    for (field, value) in [
        ("highWithBreakfast", category.high_with_breakfast),
        ("highNoBreakfast", category.high_no_breakfast),
        ("lowWithBreakfast", category.low_with_breakfast),
        ("lowNoBreakfast", category.low_no_breakfast),
    ] {
        validate_amount(value, field).map_err(|e| {
            AppError::with_message(ErrorCode::CategoryInvalidPrice, e.message)
                .with_detail("category", category.name.clone())
        })?;
    }
    for text in category.unit_numbers.iter().chain(&category.amenities) {
        validate_required_text(text, "unit or amenity", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// All categories; a store that never saw a catalog yields the defaults
pub fn find_all(storage: &Storage) -> RepoResult<Vec<RoomCategory>> {
    Ok(storage
        .get::<Vec<RoomCategory>>(keys::CATEGORIES)?
        .unwrap_or_else(default_categories))
}

pub fn find_active(storage: &Storage) -> RepoResult<Vec<RoomCategory>> {
    Ok(find_all(storage)?
        .into_iter()
        .filter(|c| c.is_active)
        .collect())
}

pub fn find_by_id(storage: &Storage, id: &str) -> RepoResult<Option<RoomCategory>> {
    Ok(find_all(storage)?.into_iter().find(|c| c.id == id))
}

/// Replace the whole catalog after validating every entry
pub fn save_all(storage: &Storage, categories: &[RoomCategory]) -> RepoResult<()> {
    for category in categories {
        validate(category)?;
    }
    let mut seen = std::collections::HashSet::new();
    for category in categories {
        if !seen.insert(category.id.as_str()) {
            return Err(RepoError::Duplicate(format!(
                "Category id '{}' appears twice",
                category.id
            )));
        }
    }
    storage.set(keys::CATEGORIES, &categories)?;
    tracing::info!(count = categories.len(), "Saved room catalog");
    Ok(())
}

pub fn create(storage: &Storage, data: RoomCategoryCreate) -> RepoResult<RoomCategory> {
    let mut all = find_all(storage)?;
    if all.iter().any(|c| c.name.eq_ignore_ascii_case(data.name.trim())) {
        return Err(RepoError::Duplicate(format!(
            "Category '{}' already exists",
            data.name
        )));
    }
    let category = RoomCategory {
        id: new_id(),
        name: data.name.trim().to_string(),
        capacity: data.capacity.unwrap_or(2),
        double_beds: data.double_beds.unwrap_or(0),
        single_beds: data.single_beds.unwrap_or(0),
        high_with_breakfast: data.high_with_breakfast.unwrap_or(0.0),
        high_no_breakfast: data.high_no_breakfast.unwrap_or(0.0),
        low_with_breakfast: data.low_with_breakfast.unwrap_or(0.0),
        low_no_breakfast: data.low_no_breakfast.unwrap_or(0.0),
        is_active: true,
        description: data.description.filter(|d| !d.trim().is_empty()),
        occupancy: data.occupancy.unwrap_or_default(),
        unit_numbers: data.unit_numbers,
        amenities: data.amenities,
    };
    validate(&category)?;
    all.push(category.clone());
    save_all(storage, &all)?;
    Ok(category)
}

pub fn update(storage: &Storage, id: &str, data: RoomCategoryUpdate) -> RepoResult<RoomCategory> {
    let mut all = find_all(storage)?;
    let category = all
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::category_not_found(id))?;

    if let Some(name) = data.name {
        category.name = name.trim().to_string();
    }
    if let Some(v) = data.capacity {
        category.capacity = v;
    }
    if let Some(v) = data.double_beds {
        category.double_beds = v;
    }
    if let Some(v) = data.single_beds {
        category.single_beds = v;
    }
    if let Some(v) = data.high_with_breakfast {
        category.high_with_breakfast = v;
    }
    if let Some(v) = data.high_no_breakfast {
        category.high_no_breakfast = v;
    }
    if let Some(v) = data.low_with_breakfast {
        category.low_with_breakfast = v;
    }
    if let Some(v) = data.low_no_breakfast {
        category.low_no_breakfast = v;
    }
    if let Some(v) = data.is_active {
        category.is_active = v;
    }
    if let Some(v) = data.description {
        category.description = Some(v).filter(|d| !d.trim().is_empty());
    }
    if let Some(v) = data.occupancy {
        category.occupancy = v;
    }
    if let Some(v) = data.unit_numbers {
        category.unit_numbers = v;
    }
    if let Some(v) = data.amenities {
        category.amenities = v;
    }
    let updated = category.clone();
    save_all(storage, &all)?;
    Ok(updated)
}

/// Remove a category; saved quotes keep their snapshot
pub fn delete(storage: &Storage, id: &str) -> RepoResult<bool> {
    let mut all = find_all(storage)?;
    let before = all.len();
    all.retain(|c| c.id != id);
    if all.len() == before {
        return Ok(false);
    }
    save_all(storage, &all)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(name: &str) -> RoomCategoryCreate {
        RoomCategoryCreate {
            name: name.to_string(),
            capacity: Some(2),
            double_beds: Some(1),
            single_beds: None,
            high_with_breakfast: Some(400.0),
            high_no_breakfast: Some(370.0),
            low_with_breakfast: Some(300.0),
            low_no_breakfast: Some(270.0),
            description: None,
            occupancy: None,
            unit_numbers: vec!["05".to_string()],
            amenities: vec![],
        }
    }

    #[test]
    fn test_fresh_store_has_defaults() {
        let storage = Storage::in_memory();
        let all = find_all(&storage).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Standard");
        assert_eq!(all[1].description.as_deref(), Some("Quarto com vista para o mar"));
    }

    #[test]
    fn test_create_update_delete() {
        let storage = Storage::in_memory();
        let created = create(&storage, create_payload("Master")).unwrap();
        assert_eq!(find_all(&storage).unwrap().len(), 3);

        let updated = update(
            &storage,
            &created.id,
            RoomCategoryUpdate {
                high_with_breakfast: Some(420.0),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.high_with_breakfast, 420.0);
        assert_eq!(find_active(&storage).unwrap().len(), 2);

        assert!(delete(&storage, &created.id).unwrap());
        assert!(!delete(&storage, &created.id).unwrap());
        assert!(find_by_id(&storage, &created.id).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let storage = Storage::in_memory();
        let err = create(&storage, create_payload("standard")).unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[test]
    fn test_negative_price_rejected_without_write() {
        let storage = Storage::in_memory();
        let mut payload = create_payload("Barato");
        payload.low_no_breakfast = Some(-1.0);
        let err: AppError = create(&storage, payload).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::CategoryInvalidPrice);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_update_unknown_category() {
        let storage = Storage::in_memory();
        let err: AppError = update(&storage, "nope", RoomCategoryUpdate::default())
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut category = default_categories().remove(0);
        category.capacity = 0;
        let err: AppError = validate(&category).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::CategoryInvalidCapacity);
    }
}
