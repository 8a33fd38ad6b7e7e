//! Season Classifier
//!
//! High season is one inclusive calendar-date window taken from the
//! configuration. Everything outside it, or everything when the window is
//! unset, is low season.

use chrono::{Days, NaiveDate};
use shared::models::{Configuration, Season, SeasonKind};

use crate::utils::time::parse_optional_date;

/// Whether `date` falls inside the inclusive `[start, end]` window
///
/// An unset boundary means there is no high season at all.
pub fn is_high_season(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => date >= s && date <= e,
        _ => false,
    }
}

/// Configured high-season window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeasonWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Per-day classification of a stay
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeasonBreakdown {
    pub days: Vec<(NaiveDate, Season)>,
    pub high_days: u32,
    pub low_days: u32,
    pub kind: SeasonKind,
}

impl SeasonBreakdown {
    pub fn has_high_day(&self) -> bool {
        self.high_days > 0
    }
}

impl SeasonWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Read the window from the configuration strings
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(
            parse_optional_date(&config.high_season_start),
            parse_optional_date(&config.high_season_end),
        )
    }

    pub fn is_set(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn season_of(&self, date: NaiveDate) -> Season {
        if is_high_season(date, self.start, self.end) {
            Season::High
        } else {
            Season::Low
        }
    }

    /// Classify `nights` consecutive days starting at `first`
    pub fn classify_nights(&self, first: NaiveDate, nights: u32) -> SeasonBreakdown {
        let mut breakdown = SeasonBreakdown::default();
        for offset in 0..nights {
            let Some(day) = first.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let season = self.season_of(day);
            match season {
                Season::High => breakdown.high_days += 1,
                Season::Low => breakdown.low_days += 1,
            }
            breakdown.days.push((day, season));
        }
        breakdown.kind = SeasonKind::from_counts(breakdown.high_days, breakdown.low_days);
        breakdown
    }

    /// Classify every day in `[check_in, check_out)`
    pub fn classify_range(&self, check_in: NaiveDate, check_out: NaiveDate) -> SeasonBreakdown {
        let nights = (check_out - check_in).num_days().max(0);
        self.classify_nights(check_in, u32::try_from(nights).unwrap_or(u32::MAX))
    }
}
