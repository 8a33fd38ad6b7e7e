//! Promotion Model

use serde::{Deserialize, Serialize};

use super::configuration::PromotionSettings;

/// Named promotion kept alongside the configured one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub discount_percent: f64,
    #[serde(default)]
    pub min_nights: u32,
    #[serde(default)]
    pub applies_high_season: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_season_message: Option<String>,
}

impl Promotion {
    /// Active promotion settings equivalent to this record
    pub fn to_settings(&self) -> PromotionSettings {
        PromotionSettings {
            active: true,
            discount_percent: self.discount_percent,
            min_nights: self.min_nights,
            text: self.name.clone(),
            only_high_season: self.applies_high_season,
            show_message_in_low_season: self.low_season_message.is_some(),
        }
    }
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionCreate {
    pub name: String,
    pub discount_percent: f64,
    pub min_nights: Option<u32>,
    pub applies_high_season: Option<bool>,
    pub low_season_message: Option<String>,
}

/// Update promotion payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionUpdate {
    pub name: Option<String>,
    pub discount_percent: Option<f64>,
    pub min_nights: Option<u32>,
    pub applies_high_season: Option<bool>,
    pub low_season_message: Option<String>,
}
