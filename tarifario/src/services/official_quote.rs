//! Official quote lifecycle
//!
//! Quotes are created as drafts, edited while in draft, then move through
//! `sent -> approved` or get cancelled. Every edit reprices the whole quote
//! against the current configuration and stamps a fresh signature.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Days, Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::json;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    QuoteCreate, QuoteItemInput, QuoteLineItem, QuoteStatus, RoomCategory, SavedQuote, SeasonKind,
};
use shared::util::new_id;

use crate::core::AppState;
use crate::db::repository::quote as quote_repo;
use crate::pricing::calculator::{extra_hours, nights_between};
use crate::pricing::engine::find_category;
use crate::pricing::{PricingEngine, StayRequest};
use crate::rendering::{OfficialQuoteDocument, render_official_quote};
use crate::utils::money::{to_decimal, to_f64};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text};

const DEFAULT_TITLE: &str = "Orçamento de Hospedagem";

/// `base64({"id", "total", "data"})`
pub fn quote_signature(quote: &SavedQuote) -> String {
    let payload = json!({
        "id": quote.id,
        "total": quote.grand_total,
        "data": quote.generated_at,
    });
    STANDARD.encode(payload.to_string())
}

fn stay_of(quote: &SavedQuote) -> StayRequest {
    StayRequest::new(quote.check_in, quote.check_out).with_season_mode(quote.season_mode)
}

fn price_item(
    engine: &PricingEngine,
    category: &RoomCategory,
    stay: &StayRequest,
    input: &QuoteItemInput,
    item_id: String,
) -> AppResult<QuoteLineItem> {
    let request = stay
        .clone()
        .with_quantity(input.quantity)
        .with_meals(input.meals);
    let result = engine.price(category, &request)?;
    Ok(QuoteLineItem {
        id: item_id,
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        bed_description: category.bed_description(),
        capacity: category.capacity,
        quantity: input.quantity,
        meals: input.meals,
        nightly_average: result.nightly_average,
        accommodation_subtotal: result.accommodation_subtotal,
        discount_amount: result.discount_amount,
        meals_subtotal: result.meals_subtotal,
        extra_hours_charge: result.extra_hours_charge,
        total: result.total,
        meal_counts: result.meal_counts,
    })
}

/// Recompute stay figures, items and totals, then re-sign
fn reprice(quote: &mut SavedQuote, engine: &PricingEngine, catalog: &[RoomCategory]) -> AppResult<()> {
    let stay = stay_of(quote);
    quote.meal_prices = engine.config().meal_prices();
    quote.nights = nights_between(quote.check_in, quote.check_out);
    quote.extra_hours = extra_hours(quote.check_in, quote.check_out, quote.nights);
    quote.season = match quote.season_mode.forced() {
        Some(season) => SeasonKind::from(season),
        None => {
            engine
                .season_window()
                .classify_nights(quote.check_in.date(), quote.nights)
                .kind
        }
    };

    for item in &mut quote.items {
        // A removed category keeps the figures it was quoted with
        let Ok(category) = find_category(catalog, &item.category_id) else {
            tracing::warn!(item = %item.id, category = %item.category_id, "Category gone, keeping snapshot");
            continue;
        };
        let input = QuoteItemInput {
            category_id: item.category_id.clone(),
            quantity: item.quantity,
            meals: item.meals,
        };
        *item = price_item(engine, category, &stay, &input, item.id.clone())?;
    }

    let items = &quote.items;
    let sum = |f: fn(&QuoteLineItem) -> f64| -> f64 {
        to_f64(items.iter().map(|i| to_decimal(f(i))).sum::<Decimal>())
    };
    let totals = (
        sum(|i| i.accommodation_subtotal),
        sum(|i| i.meals_subtotal),
        sum(|i| i.extra_hours_charge),
        sum(|i| i.total),
    );
    (quote.accommodation_total, quote.meals_total, quote.extras_total, quote.grand_total) = totals;
    quote.signature = quote_signature(quote);
    Ok(())
}

fn check_stay(check_in: NaiveDateTime, check_out: NaiveDateTime) -> AppResult<()> {
    if check_out <= check_in {
        return Err(AppError::with_message(
            ErrorCode::InvalidStay,
            "Check-out must be after check-in",
        ));
    }
    Ok(())
}

fn load(state: &AppState, id: &str) -> AppResult<SavedQuote> {
    quote_repo::find_by_id(state.storage(), id)?.ok_or_else(|| quote_repo::not_found(id))
}

fn load_editable(state: &AppState, id: &str) -> AppResult<SavedQuote> {
    let quote = load(state, id)?;
    if !quote.status.is_editable() {
        return Err(AppError::with_message(
            ErrorCode::QuoteNotEditable,
            format!("Quote {} is {} and can no longer be edited", id, quote.status.label()),
        ));
    }
    Ok(quote)
}

/// Reprice with the current settings and store
fn commit(state: &AppState, quote: &mut SavedQuote) -> AppResult<()> {
    let engine = state.pricing_engine()?;
    let catalog = state.catalog()?;
    reprice(quote, &engine, &catalog)?;
    quote_repo::upsert(state.storage(), quote)?;
    Ok(())
}

/// Create a draft quote, generated now
pub fn create(state: &AppState, data: QuoteCreate) -> AppResult<SavedQuote> {
    create_at(state, data, Local::now().naive_local())
}

/// Create a draft quote with an explicit generation time
pub fn create_at(state: &AppState, data: QuoteCreate, generated_at: NaiveDateTime) -> AppResult<SavedQuote> {
    check_stay(data.check_in, data.check_out)?;
    validate_optional_text(&data.title, "title", MAX_NAME_LEN)?;
    if data.notes.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("Quote notes are too long"));
    }

    let engine = state.pricing_engine()?;
    let catalog = state.catalog()?;
    let validity = u64::try_from(state.config().quote_validity_days.max(0)).unwrap_or(0);

    let mut quote = SavedQuote {
        id: new_id(),
        title: data
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        client: data.client.trim().to_string(),
        event: data.event.trim().to_string(),
        generated_at,
        valid_until: generated_at
            .date()
            .checked_add_days(Days::new(validity))
            .unwrap_or(generated_at.date()),
        check_in: data.check_in,
        check_out: data.check_out,
        season_mode: data.season_mode,
        season: SeasonKind::default(),
        nights: 0,
        extra_hours: 0,
        items: Vec::new(),
        notes: data.notes,
        meal_prices: engine.config().meal_prices(),
        status: QuoteStatus::Draft,
        accommodation_total: 0.0,
        meals_total: 0.0,
        extras_total: 0.0,
        grand_total: 0.0,
        signature: String::new(),
    };

    let stay = stay_of(&quote);
    for input in &data.items {
        let category = find_category(&catalog, &input.category_id)?;
        quote
            .items
            .push(price_item(&engine, category, &stay, input, new_id())?);
    }
    reprice(&mut quote, &engine, &catalog)?;
    quote_repo::upsert(state.storage(), &quote)?;
    tracing::info!(id = %quote.id, items = quote.items.len(), total = quote.grand_total, "Official quote created");
    Ok(quote)
}

pub fn find(state: &AppState, id: &str) -> AppResult<SavedQuote> {
    load(state, id)
}

pub fn list(state: &AppState) -> AppResult<Vec<SavedQuote>> {
    Ok(quote_repo::find_all(state.storage())?)
}

pub fn delete(state: &AppState, id: &str) -> AppResult<()> {
    quote_repo::delete(state.storage(), id)?;
    tracing::info!(id, "Official quote deleted");
    Ok(())
}

pub fn add_item(state: &AppState, id: &str, input: QuoteItemInput) -> AppResult<SavedQuote> {
    let mut quote = load_editable(state, id)?;
    if input.quantity == 0 {
        return Err(AppError::with_message(ErrorCode::InvalidStay, "Quantity must be at least 1"));
    }
    let catalog = state.catalog()?;
    let category = find_category(&catalog, &input.category_id)?;
    let engine = state.pricing_engine()?;
    let item = price_item(&engine, category, &stay_of(&quote), &input, new_id())?;
    quote.items.push(item);
    commit(state, &mut quote)?;
    Ok(quote)
}

pub fn remove_item(state: &AppState, id: &str, item_id: &str) -> AppResult<SavedQuote> {
    let mut quote = load_editable(state, id)?;
    let before = quote.items.len();
    quote.items.retain(|i| i.id != item_id);
    if quote.items.len() == before {
        return Err(AppError::with_message(
            ErrorCode::QuoteItemNotFound,
            format!("Item {} not found in quote {}", item_id, id),
        ));
    }
    commit(state, &mut quote)?;
    Ok(quote)
}

/// Move the stay dates of a draft and reprice every item
pub fn update_stay(
    state: &AppState,
    id: &str,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> AppResult<SavedQuote> {
    check_stay(check_in, check_out)?;
    let mut quote = load_editable(state, id)?;
    quote.check_in = check_in;
    quote.check_out = check_out;
    commit(state, &mut quote)?;
    Ok(quote)
}

/// Reprice a draft against the current configuration and catalog
pub fn recalculate(state: &AppState, id: &str) -> AppResult<SavedQuote> {
    let mut quote = load_editable(state, id)?;
    commit(state, &mut quote)?;
    Ok(quote)
}

pub fn set_status(state: &AppState, id: &str, status: QuoteStatus) -> AppResult<SavedQuote> {
    let mut quote = load(state, id)?;
    if !quote.status.can_transition_to(status) {
        return Err(AppError::with_message(
            ErrorCode::QuoteInvalidTransition,
            format!(
                "Quote {} cannot go from {} to {}",
                id,
                quote.status.label(),
                status.label()
            ),
        ));
    }
    quote.status = status;
    quote_repo::upsert(state.storage(), &quote)?;
    tracing::info!(id, status = status.label(), "Official quote status changed");
    Ok(quote)
}

/// Whether the stored signature still matches the quote
pub fn verify_signature(quote: &SavedQuote) -> bool {
    quote.signature == quote_signature(quote)
}

pub fn render(state: &AppState, id: &str) -> AppResult<OfficialQuoteDocument> {
    let quote = load(state, id)?;
    Ok(render_official_quote(&quote, &state.settings()?))
}

/// Single-quote JSON export
pub fn export_json(state: &AppState, id: &str) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&load(state, id)?)?)
}

/// Import a single quote exported with [`export_json`]
pub fn import_json(state: &AppState, json: &str) -> AppResult<SavedQuote> {
    let quote: SavedQuote = serde_json::from_str(json)
        .map_err(|e| AppError::invalid_format(format!("Not a quote document: {}", e)))?;
    quote_repo::upsert(state.storage(), &quote)?;
    tracing::info!(id = %quote.id, "Official quote imported");
    Ok(quote)
}
