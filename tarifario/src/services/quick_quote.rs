//! Quick quote generation
//!
//! Prices one category with and without breakfast, renders the WhatsApp
//! message and records it in the history.

use chrono::{Local, NaiveDateTime};
use shared::error::AppResult;
use shared::models::{QuickQuote, QuickQuoteRequest};
use shared::util::new_id;

use crate::core::AppState;
use crate::db::repository::quick_quote as history_repo;
use crate::pricing::StayRequest;
use crate::pricing::engine::find_category;
use crate::rendering::{QuickQuoteInput, render_quick_quote};

fn stay_request(request: &QuickQuoteRequest) -> StayRequest {
    StayRequest::new(request.check_in, request.check_out)
        .with_quantity(request.quantity)
        .with_meals(request.meals)
        .with_season_mode(request.season_mode)
}

/// Price and render without touching the history
pub fn preview(state: &AppState, request: &QuickQuoteRequest, at: NaiveDateTime) -> AppResult<QuickQuote> {
    let engine = state.pricing_engine()?;
    let catalog = state.catalog()?;
    let category = find_category(&catalog, &request.category_id)?;
    let stay = stay_request(request);
    let options = engine.price_options(category, &stay)?;

    let text = render_quick_quote(&QuickQuoteInput {
        category,
        request: &stay,
        options: &options,
        config: engine.config(),
    });
    let selected = options.selected(stay.meals.breakfast);

    tracing::debug!(
        category = %category.id,
        nights = selected.nights,
        season = ?selected.season,
        total = selected.total,
        "Quick quote priced"
    );

    Ok(QuickQuote {
        id: new_id(),
        generated_at: at,
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        check_in: stay.check_in,
        check_out: stay.check_out,
        nights: selected.nights,
        quantity: stay.quantity,
        nightly_rate: selected.nightly_average,
        season: selected.season,
        total: selected.total,
        text,
    })
}

/// Generate a quick quote and prepend it to the history
pub fn generate(state: &AppState, request: &QuickQuoteRequest) -> AppResult<QuickQuote> {
    let quote = preview(state, request, Local::now().naive_local())?;
    history_repo::push(state.storage(), quote.clone(), state.config().quote_history_limit)?;
    tracing::info!(id = %quote.id, total = quote.total, "Quick quote generated");
    Ok(quote)
}

pub fn history(state: &AppState) -> AppResult<Vec<QuickQuote>> {
    Ok(history_repo::find_all(state.storage())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use chrono::NaiveDate;
    use shared::error::ErrorCode;
    use shared::models::{MealSelection, SeasonKind, SeasonMode};

    fn request(category_id: &str) -> QuickQuoteRequest {
        let at = |d, h| {
            NaiveDate::from_ymd_opt(2025, 12, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        QuickQuoteRequest {
            category_id: category_id.to_string(),
            check_in: at(20, 14),
            check_out: at(23, 11),
            quantity: 1,
            meals: MealSelection::default(),
            season_mode: SeasonMode::Auto,
        }
    }

    #[test]
    fn test_generate_records_history() {
        let state = AppState::in_memory(Config::with_work_dir("unused"));
        let quote = generate(&state, &request("standard")).unwrap();
        assert_eq!(quote.total, 1140.0);
        assert_eq!(quote.season, SeasonKind::High);
        assert_eq!(quote.nightly_rate, 380.0);
        assert!(quote.text.contains("R$ 1.140,00"));
        assert_eq!(history(&state).unwrap(), vec![quote]);
    }

    #[test]
    fn test_unknown_category() {
        let state = AppState::in_memory(Config::with_work_dir("unused"));
        let err = generate(&state, &request("nope")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
        assert!(history(&state).unwrap().is_empty());
    }
}
