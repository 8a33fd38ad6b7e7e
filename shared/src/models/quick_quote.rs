//! Quick Quote Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::stay::{MealSelection, SeasonKind, SeasonMode};

/// Generated WhatsApp quote kept in the history (write-once)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickQuote {
    pub id: String,
    pub generated_at: NaiveDateTime,
    pub category_id: String,
    pub category_name: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub nights: u32,
    pub quantity: u32,
    pub nightly_rate: f64,
    pub season: SeasonKind,
    pub total: f64,
    pub text: String,
}

/// Quick quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickQuoteRequest {
    pub category_id: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub meals: MealSelection,
    #[serde(default)]
    pub season_mode: SeasonMode,
}

fn default_quantity() -> u32 {
    1
}
