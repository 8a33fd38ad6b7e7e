//! Official Quote Models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::configuration::MealPrices;
use super::stay::{MealCounts, MealSelection, SeasonKind, SeasonMode};

/// Lifecycle of an official quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Cancelled,
}

impl QuoteStatus {
    /// Only drafts may have their items or stay edited
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Draft, Self::Cancelled)
                | (Self::Sent, Self::Approved)
                | (Self::Sent, Self::Cancelled)
                | (Self::Approved, Self::Cancelled)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Rascunho",
            Self::Sent => "Enviado",
            Self::Approved => "Aprovado",
            Self::Cancelled => "Cancelado",
        }
    }
}

/// Room line of an official quote
///
/// Category name and bed text are snapshots, so removing the category later
/// leaves the quote readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    pub bed_description: String,
    pub capacity: u32,
    pub quantity: u32,
    pub meals: MealSelection,
    pub nightly_average: f64,
    pub accommodation_subtotal: f64,
    pub discount_amount: f64,
    pub meals_subtotal: f64,
    pub extra_hours_charge: f64,
    pub total: f64,
    pub meal_counts: MealCounts,
}

/// Item to add to an official quote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemInput {
    pub category_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub meals: MealSelection,
}

fn default_quantity() -> u32 {
    1
}

/// Saved official quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuote {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub event: String,
    pub generated_at: NaiveDateTime,
    pub valid_until: NaiveDate,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    #[serde(default)]
    pub season_mode: SeasonMode,
    #[serde(default)]
    pub season: SeasonKind,
    pub nights: u32,
    #[serde(default)]
    pub extra_hours: u32,
    #[serde(default)]
    pub items: Vec<QuoteLineItem>,
    #[serde(default)]
    pub notes: String,
    /// Meal prices the items were priced with
    #[serde(default)]
    pub meal_prices: MealPrices,
    #[serde(default)]
    pub status: QuoteStatus,
    pub accommodation_total: f64,
    pub meals_total: f64,
    pub extras_total: f64,
    pub grand_total: f64,
    /// Integrity tag over id, total and generation time
    #[serde(default)]
    pub signature: String,
}

/// Create official quote payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCreate {
    pub title: Option<String>,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub event: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    #[serde(default)]
    pub season_mode: SeasonMode,
    #[serde(default)]
    pub items: Vec<QuoteItemInput>,
    #[serde(default)]
    pub notes: String,
}
