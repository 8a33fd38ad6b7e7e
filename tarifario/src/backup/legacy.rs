//! Previous-system backup adapter
//!
//! Old exports carry a `cabecalho` header and a `t` array of rooms, with
//! abbreviated keys:
//!
//! | key  | meaning                                          |
//! |------|--------------------------------------------------|
//! | `f`  | festival label                                   |
//! | `a`  | lunch price                                      |
//! | `k`  | kWh rate                                         |
//! | `u`  | total units                                      |
//! | `ai` | high season start                                |
//! | `af` | high season end                                  |
//! | `c`  | global amenities (array)                         |
//! | `h`  | meal windows `{cafe, almoco, janta}: [start, end, active]` |
//! | `p`  | promotion `{ativo, pct, min, txt, somenteAlta, msgBaixa}` |
//! | `t`  | rooms                                            |
//!
//! Settings are merged over the current configuration; rooms replace the
//! catalog.

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Configuration, MealWindow, OccupancyGroup, RoomCategory};
use shared::util::new_id;

use super::ImportBundle;

pub fn is_legacy(value: &Value) -> bool {
    value.get("cabecalho").is_some_and(|v| !v.is_null()) && value.get("t").is_some_and(|v| !v.is_null())
}

fn number(value: &Value) -> Option<f64> {
    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// `[start, end, active]`; missing times fall back to `default`
fn window(value: Option<&Value>, default: &MealWindow) -> Option<MealWindow> {
    let arr = value?.as_array()?;
    let time = |i: usize, fallback: &str| {
        arr.get(i)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };
    Some(MealWindow {
        start: time(0, &default.start),
        end: time(1, &default.end),
        active: arr.get(2).and_then(Value::as_bool) == Some(true),
    })
}

fn price_pair(room: &Value, key: &str) -> (f64, f64) {
    let at = |i: usize| {
        room.get(key)
            .and_then(|v| v.get(i))
            .and_then(number)
            .unwrap_or(0.0)
    };
    (at(0), at(1))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn count(room: &Value, key: &str) -> u32 {
    room.get(key)
        .and_then(number)
        .map(|n| n.max(0.0) as u32)
        .unwrap_or(0)
}

fn room(value: &Value) -> RoomCategory {
    let (high_with, high_without) = price_pair(value, "alta");
    let (low_with, low_without) = price_pair(value, "baixa");
    let occupancy = match value.get("grupo").and_then(Value::as_str) {
        Some("casal") => OccupancyGroup::Double,
        Some("solteiro") => OccupancyGroup::Single,
        _ => OccupancyGroup::Unset,
    };
    RoomCategory {
        id: new_id(),
        name: text(value.get("nome"))
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Sem nome".to_string()),
        capacity: match count(value, "cap") {
            0 => 2,
            n => n,
        },
        double_beds: count(value, "casal"),
        single_beds: count(value, "solteiro"),
        high_with_breakfast: high_with,
        high_no_breakfast: high_without,
        low_with_breakfast: low_with,
        low_no_breakfast: low_without,
        is_active: true,
        description: text(value.get("desc")).filter(|d| !d.trim().is_empty()),
        occupancy,
        unit_numbers: string_list(value.get("numeros_uhs")),
        amenities: string_list(value.get("comodidades")),
    }
}

/// Convert a legacy document into an import bundle
pub fn migrate(value: &Value, current: &Configuration) -> AppResult<ImportBundle> {
    let rooms = value.get("t").and_then(Value::as_array).ok_or_else(|| {
        AppError::with_message(ErrorCode::BackupLegacyInvalid, "Legacy backup has no room list")
    })?;

    let mut config = current.clone();
    if let Some(label) = text(value.get("f")) {
        config.festival_label = label;
    }
    if let Some(price) = value.get("a").and_then(number) {
        config.lunch_price = price;
    }
    if let Some(rate) = value.get("k").and_then(number) {
        config.kwh_rate = rate;
    }
    if let Some(units) = value.get("u").and_then(number) {
        config.total_units = units.max(0.0) as u32;
    }
    if let Some(start) = text(value.get("ai")).filter(|s| !s.is_empty()) {
        config.high_season_start = start;
    }
    if let Some(end) = text(value.get("af")).filter(|s| !s.is_empty()) {
        config.high_season_end = end;
    }
    if value.get("c").is_some_and(Value::is_array) {
        config.global_amenities = string_list(value.get("c")).join(", ");
    }
    if let Some(hours) = value.get("h") {
        let defaults = Configuration::default().meals;
        if let Some(w) = window(hours.get("cafe"), &defaults.breakfast) {
            config.meals.breakfast = w;
        }
        if let Some(w) = window(hours.get("almoco"), &defaults.lunch) {
            config.meals.lunch = w;
        }
        if let Some(w) = window(hours.get("janta"), &defaults.dinner) {
            config.meals.dinner = w;
        }
    }
    if let Some(promo) = value.get("p").filter(|p| p.is_object()) {
        let flag = |key: &str| promo.get(key).and_then(Value::as_bool) == Some(true);
        config.promotion.active = flag("ativo");
        config.promotion.discount_percent = promo.get("pct").and_then(number).unwrap_or(0.0);
        config.promotion.min_nights = promo
            .get("min")
            .and_then(number)
            .map(|n| n.max(0.0) as u32)
            .unwrap_or(0);
        config.promotion.text = text(promo.get("txt")).unwrap_or_default();
        config.promotion.only_high_season = flag("somenteAlta");
        config.promotion.show_message_in_low_season = flag("msgBaixa");
    }

    let categories: Vec<RoomCategory> = rooms.iter().filter(|r| r.is_object()).map(room).collect();
    tracing::info!(rooms = categories.len(), "Legacy backup migrated");

    Ok(ImportBundle {
        configuration: Some(config),
        categories: Some(categories),
        legacy: true,
        ..ImportBundle::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_doc() -> Value {
        json!({
            "cabecalho": {"sistema": "HP"},
            "f": "São João",
            "a": "42",
            "k": 2.1,
            "u": 12,
            "ai": "2025-06-01",
            "af": "2025-06-30",
            "c": [" Wi-Fi ", "TV"],
            "h": {"cafe": ["06:30", "", true], "janta": ["19:00", "22:00"]},
            "p": {"ativo": true, "pct": 10, "min": 2, "txt": "Pix", "somenteAlta": true},
            "t": [
                {"nome": "Suíte", "cap": 3, "alta": [500, 470], "baixa": [400, 370],
                 "casal": 1, "solteiro": 1, "grupo": "casal", "numeros_uhs": ["07", 8],
                 "comodidades": ["Frigobar"], "desc": "Vista"},
                {"alta": [300]}
            ]
        })
    }

    #[test]
    fn test_detection() {
        assert!(is_legacy(&legacy_doc()));
        assert!(!is_legacy(&json!({"version": "1.0.0"})));
        assert!(!is_legacy(&json!({"cabecalho": {}})));
    }

    #[test]
    fn test_settings_merged_over_current() {
        let mut current = Configuration::default();
        current.pin_hash = "abc".to_string();
        let bundle = migrate(&legacy_doc(), &current).unwrap();
        assert!(bundle.legacy);
        let config = bundle.configuration.unwrap();
        assert_eq!(config.pin_hash, "abc");
        assert_eq!(config.festival_label, "São João");
        assert_eq!(config.lunch_price, 42.0);
        assert_eq!(config.dinner_price, 35.0);
        assert_eq!(config.kwh_rate, 2.1);
        assert_eq!(config.total_units, 12);
        assert_eq!(config.high_season_start, "2025-06-01");
        assert_eq!(config.global_amenities, "Wi-Fi, TV");
        assert_eq!(config.meals.breakfast, MealWindow {
            start: "06:30".to_string(),
            end: "10:00".to_string(),
            active: true,
        });
        assert!(!config.meals.dinner.active);
        assert_eq!(config.meals.lunch, Configuration::default().meals.lunch);
        assert!(config.promotion.active);
        assert_eq!(config.promotion.discount_percent, 10.0);
        assert_eq!(config.promotion.min_nights, 2);
        assert!(config.promotion.only_high_season);
        assert!(!config.promotion.show_message_in_low_season);
    }

    #[test]
    fn test_rooms_replace_catalog() {
        let bundle = migrate(&legacy_doc(), &Configuration::default()).unwrap();
        let rooms = bundle.categories.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, "Suíte");
        assert_eq!(rooms[0].high_no_breakfast, 470.0);
        assert_eq!(rooms[0].occupancy, OccupancyGroup::Double);
        assert_eq!(rooms[0].unit_numbers, vec!["07", "8"]);
        assert_eq!(rooms[0].description.as_deref(), Some("Vista"));

        assert_eq!(rooms[1].name, "Sem nome");
        assert_eq!(rooms[1].capacity, 2);
        assert_eq!(rooms[1].high_with_breakfast, 300.0);
        assert_eq!(rooms[1].high_no_breakfast, 0.0);
        assert!(bundle.promotions.is_none());
    }

    #[test]
    fn test_room_list_must_be_array() {
        let err = migrate(&json!({"cabecalho": {}, "t": "x"}), &Configuration::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupLegacyInvalid);
    }
}
