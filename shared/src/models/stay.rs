//! Stay vocabulary shared by the pricing engine and stored quotes

use serde::{Deserialize, Serialize};

/// Rate season of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    High,
    Low,
}

/// Season classification of a whole stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeasonKind {
    High,
    #[default]
    Low,
    /// The stay touches both high and low season days
    Mixed,
}

impl SeasonKind {
    /// Derive the stay classification from per-season day counts
    pub fn from_counts(high_days: u32, low_days: u32) -> Self {
        match (high_days > 0, low_days > 0) {
            (true, true) => Self::Mixed,
            (true, false) => Self::High,
            _ => Self::Low,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }

    /// Label used in guest-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Low => "Baixa",
            Self::Mixed => "Mista",
        }
    }
}

impl From<Season> for SeasonKind {
    fn from(season: Season) -> Self {
        match season {
            Season::High => Self::High,
            Season::Low => Self::Low,
        }
    }
}

/// How the season of a stay is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeasonMode {
    /// Classify every night against the configured high-season window
    #[default]
    Auto,
    /// Price every night at high-season rates
    High,
    /// Price every night at low-season rates
    Low,
}

impl SeasonMode {
    /// The forced season, if any
    pub fn forced(&self) -> Option<Season> {
        match self {
            Self::Auto => None,
            Self::High => Some(Season::High),
            Self::Low => Some(Season::Low),
        }
    }
}

/// Meals served by the hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Meal {
    Breakfast,
    Lunch,
    AfternoonSnack,
    Dinner,
}

impl Meal {
    /// Meals that are charged on top of the nightly rate
    pub const OPTIONAL: [Meal; 3] = [Meal::Lunch, Meal::AfternoonSnack, Meal::Dinner];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Café da manhã",
            Self::Lunch => "Almoço",
            Self::AfternoonSnack => "Lanche da tarde",
            Self::Dinner => "Jantar",
        }
    }
}

/// Meals chosen for a stay
///
/// Breakfast switches between the with/without breakfast nightly rates; the
/// other meals are surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealSelection {
    pub breakfast: bool,
    pub lunch: bool,
    pub afternoon_snack: bool,
    pub dinner: bool,
}

impl Default for MealSelection {
    fn default() -> Self {
        Self {
            breakfast: true,
            lunch: false,
            afternoon_snack: false,
            dinner: false,
        }
    }
}

impl MealSelection {
    /// Breakfast only (the rate default)
    pub fn breakfast_only() -> Self {
        Self::default()
    }

    /// Room only, no meals at all
    pub fn room_only() -> Self {
        Self {
            breakfast: false,
            ..Self::default()
        }
    }

    pub fn includes(&self, meal: Meal) -> bool {
        match meal {
            Meal::Breakfast => self.breakfast,
            Meal::Lunch => self.lunch,
            Meal::AfternoonSnack => self.afternoon_snack,
            Meal::Dinner => self.dinner,
        }
    }
}

/// Qualifying occurrences of each surcharged meal over a stay (per occupant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MealCounts {
    pub lunch: u32,
    pub afternoon_snack: u32,
    pub dinner: u32,
}

impl MealCounts {
    pub fn get(&self, meal: Meal) -> u32 {
        match meal {
            Meal::Breakfast => 0,
            Meal::Lunch => self.lunch,
            Meal::AfternoonSnack => self.afternoon_snack,
            Meal::Dinner => self.dinner,
        }
    }

    pub fn set(&mut self, meal: Meal, count: u32) {
        match meal {
            Meal::Breakfast => {}
            Meal::Lunch => self.lunch = count,
            Meal::AfternoonSnack => self.afternoon_snack = count,
            Meal::Dinner => self.dinner = count,
        }
    }
}
