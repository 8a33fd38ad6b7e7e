//! Promotion eligibility
//!
//! The discount applies to accommodation only. Eligibility looks at the whole
//! stay: any high-season day satisfies a high-season-only promotion.

use serde::{Deserialize, Serialize};
use shared::models::PromotionSettings;

/// How a configured promotion relates to one stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PromotionStatus {
    /// No active promotion
    #[default]
    Inactive,
    /// Discount applied to the accommodation subtotal
    Applied,
    /// Stay is shorter than the minimum; advertise the threshold
    BelowMinNights,
    /// High-season-only promotion, stay has no high day; advertise anyway
    HighSeasonOnly,
    /// High-season-only promotion, stay has no high day; stay silent
    Withheld,
}

/// Promotion decision plus what the renderers need to word it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromotionOutcome {
    pub status: PromotionStatus,
    pub discount_percent: f64,
    pub min_nights: u32,
    pub text: String,
}

impl PromotionOutcome {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_applied(&self) -> bool {
        self.status == PromotionStatus::Applied
    }

    /// Whether the guest-facing text carries a promotion block
    pub fn has_message(&self) -> bool {
        matches!(
            self.status,
            PromotionStatus::Applied | PromotionStatus::BelowMinNights | PromotionStatus::HighSeasonOnly
        )
    }

    /// Discount percentage actually applied (0 unless applied)
    pub fn effective_percent(&self) -> f64 {
        if self.is_applied() {
            self.discount_percent
        } else {
            0.0
        }
    }
}

/// Decide whether `settings` applies to a stay
///
/// The season condition is checked before the nights threshold, so a short
/// low-season stay gets the high-season message rather than the threshold one.
pub fn evaluate_promotion(
    settings: &PromotionSettings,
    nights: u32,
    has_high_day: bool,
) -> PromotionOutcome {
    if !settings.active {
        return PromotionOutcome::inactive();
    }

    let status = if settings.only_high_season && !has_high_day {
        if settings.show_message_in_low_season {
            PromotionStatus::HighSeasonOnly
        } else {
            PromotionStatus::Withheld
        }
    } else if nights >= settings.min_nights {
        PromotionStatus::Applied
    } else {
        PromotionStatus::BelowMinNights
    };

    tracing::debug!(
        nights,
        has_high_day,
        status = ?status,
        "Promotion evaluated"
    );

    PromotionOutcome {
        status,
        discount_percent: settings.discount_percent,
        min_nights: settings.min_nights,
        text: settings.text.clone(),
    }
}
