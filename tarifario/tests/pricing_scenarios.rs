use chrono::{NaiveDate, NaiveDateTime};
use shared::models::{
    Configuration, MealSelection, OccupancyGroup, RoomCategory, SeasonKind, SeasonMode,
};
use tarifario::db::repository::category::default_categories;
use tarifario::pricing::{PromotionStatus, StayRequest, price_stay};
use tarifario::{ErrorCode, PricingEngine};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn standard() -> RoomCategory {
    default_categories().remove(0)
}

fn config() -> Configuration {
    Configuration::default()
}

#[test]
fn standard_high_season_weekend() {
    let stay = StayRequest::new(at(2025, 12, 20, 14, 0), at(2025, 12, 23, 11, 0));
    let result = price_stay(&standard(), &stay, &config());
    assert_eq!(result.nights, 3);
    assert_eq!(result.season, SeasonKind::High);
    assert_eq!(result.total, 1140.0);
    assert_eq!(result.extra_hours, 0);
}

#[test]
fn stay_crossing_into_high_season() {
    let stay = StayRequest::new(at(2025, 12, 13, 14, 0), at(2025, 12, 17, 11, 0));
    let with = price_stay(&standard(), &stay, &config());
    assert_eq!(with.season, SeasonKind::Mixed);
    assert_eq!((with.low_days, with.high_days), (2, 2));
    // 280 x 2 + 380 x 2
    assert_eq!(with.total, 1320.0);
    assert_eq!(with.nightly_average, 330.0);

    let without = price_stay(&standard(), &stay.with_breakfast(false), &config());
    // 250 x 2 + 350 x 2
    assert_eq!(without.total, 1200.0);

    let mut adjusted = standard();
    adjusted.low_with_breakfast = 250.0;
    let published = price_stay(&adjusted, &stay, &config());
    assert_eq!(published.total, 1260.0);
}

#[test]
fn forced_season_matches_auto_inside_one_season() {
    let engine = PricingEngine::new(config());
    let cases = [
        (at(2025, 12, 20, 14, 0), at(2025, 12, 23, 11, 0), SeasonMode::High),
        (at(2025, 6, 10, 14, 0), at(2025, 6, 15, 11, 0), SeasonMode::Low),
    ];
    for (check_in, check_out, forced) in cases {
        let stay = StayRequest::new(check_in, check_out).with_meals(MealSelection {
            lunch: true,
            ..MealSelection::default()
        });
        let auto = engine.price(&standard(), &stay).unwrap();
        let fixed = engine
            .price(&standard(), &stay.clone().with_season_mode(forced))
            .unwrap();
        assert_eq!(auto, fixed);
    }
}

#[test]
fn empty_or_inverted_stay_prices_to_zero() {
    let engine = PricingEngine::new(config());
    let same = StayRequest::new(at(2025, 12, 20, 14, 0), at(2025, 12, 20, 14, 0));
    let inverted = StayRequest::new(at(2025, 12, 23, 11, 0), at(2025, 12, 20, 14, 0));
    for stay in [same, inverted] {
        let result = engine.price(&standard(), &stay).unwrap();
        assert_eq!(result.nights, 0);
        assert_eq!(result.total, 0.0);
    }
}

#[test]
fn high_only_promotion_skips_low_season_stay() {
    let mut config = config();
    config.promotion.active = true;
    config.promotion.discount_percent = 15.0;
    config.promotion.min_nights = 3;
    config.promotion.only_high_season = true;
    config.promotion.show_message_in_low_season = false;

    let stay = StayRequest::new(at(2025, 5, 5, 14, 0), at(2025, 5, 10, 11, 0));
    let silent = price_stay(&standard(), &stay, &config);
    assert_eq!(silent.nights, 5);
    assert_eq!(silent.discount_amount, 0.0);
    assert_eq!(silent.total, 1400.0);
    assert_eq!(silent.promotion.status, PromotionStatus::Withheld);
    assert!(!silent.promotion.has_message());

    config.promotion.show_message_in_low_season = true;
    let advertised = price_stay(&standard(), &stay, &config);
    assert_eq!(advertised.total, 1400.0);
    assert_eq!(advertised.promotion.status, PromotionStatus::HighSeasonOnly);
    assert!(advertised.promotion.has_message());
}

#[test]
fn promotion_discounts_accommodation_only() {
    let mut config = config();
    config.promotion.active = true;
    config.promotion.discount_percent = 10.0;
    config.promotion.min_nights = 3;

    let meals = MealSelection {
        dinner: true,
        ..MealSelection::default()
    };
    // leaving at 14:00 is three hours past the standard departure
    let stay = StayRequest::new(at(2025, 12, 20, 14, 0), at(2025, 12, 23, 14, 0)).with_meals(meals);
    let plain = {
        let mut off = config.clone();
        off.promotion.active = false;
        price_stay(&standard(), &stay, &off)
    };
    let promo = price_stay(&standard(), &stay, &config);

    assert!(promo.promotion.is_applied());
    assert_eq!(promo.discount_amount, 114.0);
    assert_eq!(promo.accommodation_subtotal, plain.accommodation_subtotal - 114.0);
    assert_eq!(promo.meals_subtotal, plain.meals_subtotal);
    assert_eq!(promo.extra_hours_charge, plain.extra_hours_charge);
    assert_eq!(promo.extra_hours, 3);
}

#[test]
fn single_night_meal_boundaries() {
    let engine = PricingEngine::new(config());
    let lunch = MealSelection {
        lunch: true,
        ..MealSelection::default()
    };
    let cases = [
        // arrives after lunch, leaves before lunch
        (at(2025, 6, 10, 16, 0), at(2025, 6, 11, 10, 0), 0),
        // arrives before lunch ends
        (at(2025, 6, 10, 12, 0), at(2025, 6, 11, 10, 0), 1),
        // and also leaves after lunch starts
        (at(2025, 6, 10, 12, 0), at(2025, 6, 11, 12, 0), 2),
    ];
    for (check_in, check_out, expected) in cases {
        let stay = StayRequest::new(check_in, check_out).with_meals(lunch);
        let result = engine.price(&standard(), &stay).unwrap();
        assert_eq!(result.nights, 1);
        assert_eq!(result.meal_counts.lunch, expected, "{check_in} -> {check_out}");
    }
}

#[test]
fn unknown_category_is_a_reference_error() {
    let engine = PricingEngine::new(config());
    let stay = StayRequest::new(at(2025, 12, 20, 14, 0), at(2025, 12, 23, 11, 0));
    let err = engine.quote(&default_categories(), "suite", &stay).unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryNotFound);
}

#[test]
fn quantity_multiplies_every_charge() {
    let engine = PricingEngine::new(config());
    let category = RoomCategory {
        occupancy: OccupancyGroup::Double,
        ..standard()
    };
    let stay = StayRequest::new(at(2025, 12, 20, 12, 0), at(2025, 12, 23, 11, 0)).with_meals(MealSelection {
        lunch: true,
        ..MealSelection::default()
    });
    let one = engine.price(&category, &stay).unwrap();
    let three = engine.price(&category, &stay.clone().with_quantity(3)).unwrap();
    assert_eq!(three.accommodation_subtotal, one.accommodation_subtotal * 3.0);
    assert_eq!(three.meals_subtotal, one.meals_subtotal * 3.0);
    assert_eq!(one.extra_hours, 2);
    assert!((three.extra_hours_charge - one.extra_hours_charge * 3.0).abs() < 0.02);
}
