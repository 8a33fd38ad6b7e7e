//! Quick quote (WhatsApp message)

use shared::models::{Configuration, RoomCategory, SeasonKind};

use super::builder::{TextBuilder, italic};
use super::promo::{DiscountLine, render_promotion_block};
use crate::pricing::{BreakfastOptions, StayRequest};
use crate::utils::format::{format_brl, format_datetime_br, format_number, nights_label};

/// Everything the quick quote message shows
#[derive(Debug, Clone, Copy)]
pub struct QuickQuoteInput<'a> {
    pub category: &'a RoomCategory,
    pub request: &'a StayRequest,
    pub options: &'a BreakfastOptions,
    pub config: &'a Configuration,
}

fn season_badge(season: SeasonKind) -> &'static str {
    match season {
        SeasonKind::High => "🔴 Alta",
        SeasonKind::Low => "🟢 Baixa",
        SeasonKind::Mixed => "🟡 Mista",
    }
}

/// Nightly price, flagged as an average when the stay mixes seasons
fn nightly(value: f64, season: SeasonKind) -> String {
    if season.is_mixed() {
        format!("{} (média)", format_brl(value))
    } else {
        format_brl(value)
    }
}

/// Render the quick quote message
pub fn render_quick_quote(input: &QuickQuoteInput<'_>) -> String {
    let with = &input.options.with_breakfast;
    let without = &input.options.without_breakfast;
    let selected = input.options.selected(input.request.meals.breakfast);
    let season = with.season;

    let mut b = TextBuilder::new();
    b.line("🏨 *Orçamento Rápido - Tarifário 360*")
        .newline()
        .field("📅", "Check-in", &format_datetime_br(input.request.check_in))
        .field("📅", "Check-out", &format_datetime_br(input.request.check_out))
        .field("🌙", "Duração", &nights_label(with.nights))
        .field("🛏️", "Quarto", &input.category.name)
        .field("📦", "Quantidade", &input.request.quantity.to_string())
        .field("🌡️", "Temporada", season_badge(season));
    if season.is_mixed() {
        b.line(&format!(
            "   {} dia(s) em alta, {} dia(s) em baixa",
            with.high_days, with.low_days
        ));
    }

    b.newline()
        .line(&format!(
            "💰 *Diária:* {} ☕ Com Café ou {} ❌ Sem Café",
            nightly(with.nightly_average, season),
            nightly(without.nightly_average, season)
        ))
        .field("☕", "Total com café", &format_brl(with.accommodation_before_discount))
        .field("🍽️", "Total sem café", &format_brl(without.accommodation_before_discount));
    if selected.meals_subtotal > 0.0 {
        b.field("🍴", "Refeições extras", &format_brl(selected.meals_subtotal));
    }
    if selected.extra_hours > 0 {
        b.field(
            "⏰",
            "Horas extras",
            &format!(
                "{}h ({})",
                selected.extra_hours,
                format_brl(selected.extra_hours_charge)
            ),
        );
    }
    b.newline();

    let promo = render_promotion_block(
        &selected.promotion,
        &[DiscountLine {
            name: input.category.name.clone(),
            with_breakfast: with.accommodation_subtotal,
            without_breakfast: without.accommodation_subtotal,
        }],
    );
    b.text(&promo);

    b.field("💰", "Valor Total", &format_brl(selected.total))
        .field(
            "💵",
            "Entrada",
            &format!(
                "{}% no ato da reserva",
                format_number(input.config.templates.deposit_percent)
            ),
        )
        .newline()
        .line(&italic("Sujeito à disponibilidade no momento da reserva."))
        .text(&italic("Tarifário 360 - Sistema de Gestão Hoteleira"));

    b.build()
}
