//! Pricing Engine
//!
//! Binds a configuration snapshot to the pure calculator and resolves
//! categories by id.

use shared::error::{AppError, AppResult};
use shared::models::{Configuration, RoomCategory};

use super::calculator::{PricingResult, StayRequest, price_stay};
use super::season::SeasonWindow;

/// Both breakfast options of the same stay
#[derive(Debug, Clone, PartialEq)]
pub struct BreakfastOptions {
    pub with_breakfast: PricingResult,
    pub without_breakfast: PricingResult,
}

impl BreakfastOptions {
    /// The option matching the request's breakfast choice
    pub fn selected(&self, breakfast: bool) -> &PricingResult {
        if breakfast {
            &self.with_breakfast
        } else {
            &self.without_breakfast
        }
    }
}

/// Pricing engine over one immutable configuration snapshot
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: Configuration,
    window: SeasonWindow,
}

impl PricingEngine {
    pub fn new(config: Configuration) -> Self {
        let window = SeasonWindow::from_config(&config);
        Self { config, window }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn season_window(&self) -> &SeasonWindow {
        &self.window
    }

    /// Price a stay for a category already at hand
    pub fn price(&self, category: &RoomCategory, request: &StayRequest) -> AppResult<PricingResult> {
        request.validate()?;
        Ok(price_stay(category, request, &self.config))
    }

    /// Price a stay with and without breakfast
    pub fn price_options(
        &self,
        category: &RoomCategory,
        request: &StayRequest,
    ) -> AppResult<BreakfastOptions> {
        Ok(BreakfastOptions {
            with_breakfast: self.price(category, &request.with_breakfast(true))?,
            without_breakfast: self.price(category, &request.with_breakfast(false))?,
        })
    }

    /// Price a stay for a category looked up by id
    pub fn quote(
        &self,
        catalog: &[RoomCategory],
        category_id: &str,
        request: &StayRequest,
    ) -> AppResult<PricingResult> {
        let category = find_category(catalog, category_id)?;
        self.price(category, request)
    }
}

/// Look a category up by id, failing with a reference error
pub fn find_category<'a>(catalog: &'a [RoomCategory], id: &str) -> AppResult<&'a RoomCategory> {
    catalog
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::category_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::error::ErrorCode;
    use shared::models::{OccupancyGroup, SeasonKind};

    fn catalog() -> Vec<RoomCategory> {
        vec![RoomCategory {
            id: "std".to_string(),
            name: "Standard".to_string(),
            capacity: 2,
            double_beds: 1,
            single_beds: 0,
            high_with_breakfast: 380.0,
            high_no_breakfast: 350.0,
            low_with_breakfast: 280.0,
            low_no_breakfast: 250.0,
            is_active: true,
            description: None,
            occupancy: OccupancyGroup::Double,
            unit_numbers: vec!["01".into(), "02".into()],
            amenities: vec![],
        }]
    }

    fn request() -> StayRequest {
        let day = |d| NaiveDate::from_ymd_opt(2025, 12, d).unwrap();
        StayRequest::new(
            day(13).and_hms_opt(14, 0, 0).unwrap(),
            day(17).and_hms_opt(11, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_unknown_category_is_reference_error() {
        let engine = PricingEngine::new(Configuration::default());
        let err = engine.quote(&catalog(), "nope", &request()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let engine = PricingEngine::new(Configuration::default());
        let err = engine
            .quote(&catalog(), "std", &request().with_quantity(0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStay);
    }

    #[test]
    fn test_price_options_mixed_stay() {
        let engine = PricingEngine::new(Configuration::default());
        let options = engine.price_options(&catalog()[0], &request()).unwrap();
        assert_eq!(options.with_breakfast.season, SeasonKind::Mixed);
        assert_eq!(options.with_breakfast.total, 2.0 * 280.0 + 2.0 * 380.0);
        assert_eq!(options.without_breakfast.total, 2.0 * 250.0 + 2.0 * 350.0);
        assert_eq!(options.selected(false).total, 1200.0);
    }
}
