//! Pricing
//!
//! - `season`: high/low classification of calendar days
//! - `promotion`: conditional accommodation discount
//! - `meals`: surcharged meal occurrence counting
//! - `calculator`: pure stay pricing
//! - `engine`: configuration snapshot + category lookup

pub mod calculator;
pub mod engine;
pub mod meals;
pub mod promotion;
pub mod season;

pub use calculator::{PricingResult, StayRequest, price_stay, price_stay_with_promotion};
pub use engine::{BreakfastOptions, PricingEngine};
pub use promotion::{PromotionOutcome, PromotionStatus, evaluate_promotion};
pub use season::{SeasonBreakdown, SeasonWindow, is_high_season};
