//! Stay Price Calculator
//!
//! Pure pricing of one room category over a stay. Uses rust_decimal for the
//! arithmetic, stores results as f64.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Configuration, Meal, MealCounts, MealSelection, PromotionSettings, RoomCategory, Season,
    SeasonKind, SeasonMode,
};

use super::meals::meal_counts;
use super::promotion::{PromotionOutcome, evaluate_promotion};
use super::season::{SeasonBreakdown, SeasonWindow};
use crate::utils::money::{percent_of, round_money, to_decimal, to_f64};

/// Hours from check-in to the standard departure on the last day
pub const STANDARD_STAY_HOURS: i64 = 21;

/// Check-in time assumed when only a date is given
pub const DEFAULT_CHECK_IN: NaiveTime = match NaiveTime::from_hms_opt(14, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// Check-out time assumed when only a date is given (21 hours after check-in)
pub const DEFAULT_CHECK_OUT: NaiveTime = match NaiveTime::from_hms_opt(11, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// What is being priced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRequest {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub quantity: u32,
    pub meals: MealSelection,
    pub season_mode: SeasonMode,
}

impl StayRequest {
    /// One room, breakfast included, season decided by the calendar
    pub fn new(check_in: NaiveDateTime, check_out: NaiveDateTime) -> Self {
        Self {
            check_in,
            check_out,
            quantity: 1,
            meals: MealSelection::default(),
            season_mode: SeasonMode::Auto,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_meals(mut self, meals: MealSelection) -> Self {
        self.meals = meals;
        self
    }

    pub fn with_season_mode(mut self, season_mode: SeasonMode) -> Self {
        self.season_mode = season_mode;
        self
    }

    /// Same stay with breakfast switched on or off
    pub fn with_breakfast(&self, breakfast: bool) -> Self {
        let mut copy = self.clone();
        copy.meals.breakfast = breakfast;
        copy
    }

    pub fn nights(&self) -> u32 {
        nights_between(self.check_in, self.check_out)
    }

    /// Quantity must be at least one; an inverted range is not an error
    pub fn validate(&self) -> AppResult<()> {
        if self.quantity == 0 {
            return Err(AppError::with_message(
                ErrorCode::InvalidStay,
                "Quantity must be at least 1",
            )
            .with_detail("field", "quantity"));
        }
        Ok(())
    }
}

/// Nights billed for a stay: started days, zero for empty or inverted ranges
pub fn nights_between(check_in: NaiveDateTime, check_out: NaiveDateTime) -> u32 {
    let secs = (check_out - check_in).num_seconds();
    if secs <= 0 {
        return 0;
    }
    let nights = (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    u32::try_from(nights).unwrap_or(u32::MAX)
}

/// Whole hours past the standard departure, never negative
pub fn extra_hours(check_in: NaiveDateTime, check_out: NaiveDateTime, nights: u32) -> u32 {
    if nights == 0 {
        return 0;
    }
    let standard_departure = check_in
        + Duration::days(i64::from(nights) - 1)
        + Duration::hours(STANDARD_STAY_HOURS);
    let over = (check_out - standard_departure).num_seconds();
    if over <= 0 {
        return 0;
    }
    let hours = (over + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR;
    u32::try_from(hours).unwrap_or(u32::MAX)
}

/// Priced stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub nights: u32,
    pub season: SeasonKind,
    pub high_days: u32,
    pub low_days: u32,
    /// Pre-discount nightly rate per room, averaged over the stay
    pub nightly_average: f64,
    pub accommodation_before_discount: f64,
    pub discount_amount: f64,
    pub accommodation_subtotal: f64,
    pub meals_subtotal: f64,
    pub extra_hours: u32,
    pub extra_hours_charge: f64,
    pub total_before_extras: f64,
    pub total: f64,
    pub meal_counts: MealCounts,
    pub promotion: PromotionOutcome,
}

/// Price a stay with the configured promotion
pub fn price_stay(
    category: &RoomCategory,
    request: &StayRequest,
    config: &Configuration,
) -> PricingResult {
    price_stay_with_promotion(category, request, config, &config.promotion)
}

/// Per-day seasons of the billed nights, honouring a forced season
fn stay_breakdown(request: &StayRequest, config: &Configuration, nights: u32) -> SeasonBreakdown {
    let first = request.check_in.date();
    match request.season_mode.forced() {
        None => SeasonWindow::from_config(config).classify_nights(first, nights),
        Some(season) => {
            let mut breakdown = SeasonWindow::default().classify_nights(first, nights);
            for day in &mut breakdown.days {
                day.1 = season;
            }
            let (high_days, low_days) = match season {
                Season::High => (nights, 0),
                Season::Low => (0, nights),
            };
            breakdown.high_days = high_days;
            breakdown.low_days = low_days;
            breakdown.kind = season.into();
            breakdown
        }
    }
}

/// Price a stay with an explicit promotion
pub fn price_stay_with_promotion(
    category: &RoomCategory,
    request: &StayRequest,
    config: &Configuration,
    promotion: &PromotionSettings,
) -> PricingResult {
    let nights = request.nights();
    if nights == 0 {
        return PricingResult {
            season: request
                .season_mode
                .forced()
                .map(SeasonKind::from)
                .unwrap_or_default(),
            ..Default::default()
        };
    }

    let breakdown = stay_breakdown(request, config, nights);
    let breakfast = request.meals.breakfast;

    // Step 1: day walk, per room
    let per_room: Decimal = breakdown
        .days
        .iter()
        .map(|(_, season)| to_decimal(category.rate(*season, breakfast)))
        .sum();

    let qty = Decimal::from(request.quantity);
    let nights_dec = Decimal::from(nights);
    let accommodation_before = per_room * qty;

    // Step 2: promotion on accommodation only
    let promotion = evaluate_promotion(promotion, nights, breakdown.has_high_day());
    let discount = round_money(percent_of(
        accommodation_before,
        to_decimal(promotion.effective_percent()),
    ));
    let accommodation = accommodation_before - discount;

    // Step 3: meals, charged per occupant
    let counts = meal_counts(
        &request.meals,
        &config.meals,
        request.check_in,
        request.check_out,
        nights,
    );
    let capacity = Decimal::from(category.capacity);
    let meals: Decimal = Meal::OPTIONAL
        .iter()
        .map(|meal| {
            Decimal::from(counts.get(*meal)) * to_decimal(config.meal_price(*meal)) * capacity
        })
        .sum::<Decimal>()
        * qty;

    // Step 4: extra hours at the pre-discount hourly rate
    let hours = extra_hours(request.check_in, request.check_out, nights);
    let hourly = per_room / nights_dec / Decimal::from(STANDARD_STAY_HOURS);
    let extras = hourly * Decimal::from(hours) * qty;

    let total_before_extras = accommodation + meals;
    let total = round_money(total_before_extras) + round_money(extras);

    tracing::debug!(
        category = %category.name,
        nights,
        season = ?breakdown.kind,
        accommodation = %accommodation,
        meals = %meals,
        extra_hours = hours,
        "Stay priced"
    );

    PricingResult {
        nights,
        season: breakdown.kind,
        high_days: breakdown.high_days,
        low_days: breakdown.low_days,
        nightly_average: to_f64(per_room / nights_dec),
        accommodation_before_discount: to_f64(accommodation_before),
        discount_amount: to_f64(discount),
        accommodation_subtotal: to_f64(accommodation),
        meals_subtotal: to_f64(meals),
        extra_hours: hours,
        extra_hours_charge: to_f64(extras),
        total_before_extras: to_f64(total_before_extras),
        total: to_f64(total),
        meal_counts: counts,
        promotion,
    }
}
