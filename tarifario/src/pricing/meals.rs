//! Meal occurrence counting
//!
//! A surcharged meal is served on the arrival day when the guest arrives
//! before it ends, on the departure day when the guest leaves after it starts,
//! and on every full day in between.

use chrono::NaiveDateTime;
use shared::models::{Meal, MealCounts, MealSchedule, MealSelection, MealWindow};

use crate::utils::time::parse_time;

/// Qualifying occurrences of one meal over a stay (per occupant)
///
/// Inactive windows and unparseable times count zero.
pub fn count_occurrences(
    window: &MealWindow,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    nights: u32,
) -> u32 {
    if !window.active || nights == 0 {
        return 0;
    }
    let (start, end) = match (parse_time(&window.start), parse_time(&window.end)) {
        (Ok(s), Ok(e)) => (s, e),
        _ => {
            tracing::warn!(
                start = %window.start,
                end = %window.end,
                "Malformed meal window, not charging it"
            );
            return 0;
        }
    };

    let arrival_hit = u32::from(check_in.time() <= end);
    let departure_hit = u32::from(check_out.time() >= start);
    arrival_hit + departure_hit + nights.saturating_sub(1)
}

/// Occurrences of every selected surcharged meal
pub fn meal_counts(
    selection: &MealSelection,
    schedule: &MealSchedule,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    nights: u32,
) -> MealCounts {
    let mut counts = MealCounts::default();
    for meal in Meal::OPTIONAL {
        if selection.includes(meal) {
            let n = count_occurrences(schedule.window(meal), check_in, check_out, nights);
            counts.set(meal, n);
        }
    }
    counts
}
