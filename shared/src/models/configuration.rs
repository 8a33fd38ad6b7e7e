//! Global Configuration Model
//!
//! One singleton document holding every tunable the pricing engine and the
//! renderers read. Missing fields fall back to the factory settings, so older
//! stored documents keep loading.

use serde::{Deserialize, Serialize};

use super::stay::Meal;

/// Per-person prices of the surcharged meals
///
/// Saved quotes keep a copy, so later price changes leave them as issued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPrices {
    pub lunch: f64,
    pub afternoon_snack: f64,
    pub dinner: f64,
}

impl Default for MealPrices {
    fn default() -> Self {
        Configuration::default().meal_prices()
    }
}

impl MealPrices {
    pub fn get(&self, meal: Meal) -> f64 {
        match meal {
            Meal::Breakfast => 0.0,
            Meal::Lunch => self.lunch,
            Meal::AfternoonSnack => self.afternoon_snack,
            Meal::Dinner => self.dinner,
        }
    }
}

/// Serving window of a meal (`HH:MM` local times)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealWindow {
    pub start: String,
    pub end: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl MealWindow {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            active: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Serving windows of every meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealSchedule {
    pub breakfast: MealWindow,
    pub lunch: MealWindow,
    pub afternoon_snack: MealWindow,
    pub dinner: MealWindow,
}

impl Default for MealSchedule {
    fn default() -> Self {
        Self {
            breakfast: MealWindow::new("07:00", "10:00"),
            lunch: MealWindow::new("12:00", "14:00"),
            afternoon_snack: MealWindow::new("15:00", "17:00"),
            dinner: MealWindow::new("19:00", "21:00"),
        }
    }
}

impl MealSchedule {
    pub fn window(&self, meal: Meal) -> &MealWindow {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::AfternoonSnack => &self.afternoon_snack,
            Meal::Dinner => &self.dinner,
        }
    }

    pub fn window_mut(&mut self, meal: Meal) -> &mut MealWindow {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::AfternoonSnack => &mut self.afternoon_snack,
            Meal::Dinner => &mut self.dinner,
        }
    }
}

/// Conditional accommodation discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromotionSettings {
    pub active: bool,
    /// Percentage in 0..=100
    pub discount_percent: f64,
    pub min_nights: u32,
    /// Condition shown to the guest, e.g. "Pagamento integral via Pix"
    pub text: String,
    pub only_high_season: bool,
    /// Still advertise the promotion when it is withheld for low season
    pub show_message_in_low_season: bool,
}

impl Default for PromotionSettings {
    fn default() -> Self {
        Self {
            active: false,
            discount_percent: 15.0,
            min_nights: 3,
            text: "Pagamento integral via Pix ou Dinheiro".to_string(),
            only_high_season: true,
            show_message_in_low_season: false,
        }
    }
}

/// Editable text blocks of the official quote document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteTemplates {
    pub title: String,
    pub config_title: String,
    pub config_description: String,
    pub meals_note: String,
    pub schedule: String,
    pub payment: String,
    pub observations: String,
    pub footer: String,
    pub deposit_percent: f64,
}

impl Default for QuoteTemplates {
    fn default() -> Self {
        Self {
            title: "Orçamento de Hospedagem".to_string(),
            config_title: "Configuração das Acomodações".to_string(),
            config_description: "Acomodações conforme disponibilidade, distribuídas de acordo \
                                 com a composição do grupo."
                .to_string(),
            meals_note: "Refeições servidas no restaurante do hotel nos horários indicados."
                .to_string(),
            schedule: "Check-in: {checkinHora} do dia {checkinDataBr}.\n\
                       Check-out: {checkoutHora} do dia {checkoutDataBr}.\n\
                       {mensagemHorasExtras}"
                .to_string(),
            payment: "Sinal de {sinalPercentual}% do valor total ({totalGeral}) para confirmação \
                      da reserva: {valorSinal}. Saldo restante no check-in."
                .to_string(),
            observations: "Valores de refeições extras por pessoa: Almoço {valorAlmoco}, \
                           Janta {valorJanta}, Lanche {valorLanche}."
                .to_string(),
            footer: "Setor de Reservas - Hotel Plaza".to_string(),
            deposit_percent: 50.0,
        }
    }
}

/// Global configuration singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub festival_label: String,
    pub hotel_name: String,
    /// Per-person price of each surcharged meal
    pub lunch_price: f64,
    pub dinner_price: f64,
    pub snack_price: f64,
    /// EV charging price per kWh
    pub kwh_rate: f64,
    pub total_units: u32,
    /// Comma separated amenities every room has
    pub global_amenities: String,
    /// Inclusive `YYYY-MM-DD` bounds; empty means unset
    pub high_season_start: String,
    pub high_season_end: String,
    pub meals: MealSchedule,
    pub promotion: PromotionSettings,
    /// SHA-256 hex of the access PIN; empty leaves the gate open
    pub pin_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_salt: Option<String>,
    pub templates: QuoteTemplates,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            festival_label: "🎊 Evento Especial".to_string(),
            hotel_name: "Hotel Plaza - Cruzeta/RN".to_string(),
            lunch_price: 30.0,
            dinner_price: 35.0,
            snack_price: 20.0,
            kwh_rate: 1.8,
            total_units: 10,
            global_amenities: "Frigobar, TV, Ar-condicionado, Wi-Fi, Hidro".to_string(),
            high_season_start: "2025-12-15".to_string(),
            high_season_end: "2026-03-15".to_string(),
            meals: MealSchedule::default(),
            promotion: PromotionSettings::default(),
            pin_hash: String::new(),
            pin_salt: None,
            templates: QuoteTemplates::default(),
        }
    }
}

impl Configuration {
    /// Per-person price of a meal; breakfast is part of the nightly rate
    pub fn meal_price(&self, meal: Meal) -> f64 {
        match meal {
            Meal::Breakfast => 0.0,
            Meal::Lunch => self.lunch_price,
            Meal::AfternoonSnack => self.snack_price,
            Meal::Dinner => self.dinner_price,
        }
    }

    /// Current meal prices, as snapshotted by saved quotes
    pub fn meal_prices(&self) -> MealPrices {
        MealPrices {
            lunch: self.lunch_price,
            afternoon_snack: self.snack_price,
            dinner: self.dinner_price,
        }
    }

    /// Global amenities split into trimmed, non-empty entries
    pub fn global_amenity_list(&self) -> Vec<String> {
        self.global_amenities
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_pin(&self) -> bool {
        !self.pin_hash.is_empty()
    }
}
