//! Official quote document
//!
//! Structured line items grouped by section, plus the configurable template
//! blocks with their placeholders filled in.

use serde::{Deserialize, Serialize};
use shared::models::{Configuration, Meal, SavedQuote};

use super::builder::{SEPARATOR, TextBuilder};
use super::placeholders::Placeholders;
use crate::utils::format::{format_brl, format_date_br, format_number, format_time, nights_label};
use crate::utils::money::{percent_of, to_decimal, to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Accommodation,
    Meals,
    ExtraHours,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Accommodation => "Hospedagem",
            Self::Meals => "Refeições",
            Self::ExtraHours => "Horas Extras",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub kind: SectionKind,
    pub title: String,
    pub lines: Vec<DocumentLine>,
    pub subtotal: f64,
}

/// Rendered official quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialQuoteDocument {
    pub title: String,
    pub client: String,
    pub event: String,
    pub hotel_name: String,
    pub period: String,
    pub nights: u32,
    pub season: String,
    pub sections: Vec<DocumentSection>,
    pub discount_total: f64,
    pub grand_total: f64,
    pub deposit_percent: f64,
    pub deposit_amount: f64,
    pub config_title: String,
    pub config_description: String,
    pub meals_note: String,
    pub schedule: String,
    pub payment: String,
    pub observations: String,
    pub notes: String,
    pub footer: String,
    pub valid_until: String,
    pub signature: String,
}

fn extra_hours_message(hours: u32) -> String {
    match hours {
        0 => String::new(),
        1 => "Permanência de 1 hora além do horário padrão de saída, cobrada à parte.".to_string(),
        n => format!(
            "Permanência de {} horas além do horário padrão de saída, cobradas à parte.",
            n
        ),
    }
}

/// Token values for a quote's template blocks
pub fn quote_placeholders(quote: &SavedQuote, config: &Configuration) -> Placeholders {
    let deposit_percent = config.templates.deposit_percent;
    let deposit = percent_of(to_decimal(quote.grand_total), to_decimal(deposit_percent));

    let mut p = Placeholders::new();
    p.set("checkinHora", format_time(quote.check_in.time()))
        .set("checkinDataBr", format_date_br(quote.check_in.date()))
        .set("checkoutHora", format_time(quote.check_out.time()))
        .set("checkoutDataBr", format_date_br(quote.check_out.date()))
        .set("mensagemHorasExtras", extra_hours_message(quote.extra_hours))
        .set("sinalPercentual", format_number(deposit_percent))
        .set("valorSinal", format_brl(to_f64(deposit)))
        .set("totalGeral", format_brl(quote.grand_total))
        .set("valorAlmoco", format_brl(quote.meal_prices.lunch))
        .set("valorJanta", format_brl(quote.meal_prices.dinner))
        .set("valorLanche", format_brl(quote.meal_prices.afternoon_snack))
        .set("cliente", quote.client.clone())
        .set("evento", quote.event.clone())
        .set("noites", quote.nights.to_string());
    p
}

fn breakfast_label(breakfast: bool) -> &'static str {
    if breakfast { "com café" } else { "sem café" }
}

fn section(kind: SectionKind, lines: Vec<DocumentLine>) -> Option<DocumentSection> {
    if lines.is_empty() {
        return None;
    }
    let subtotal = to_f64(lines.iter().map(|l| to_decimal(l.amount)).sum());
    Some(DocumentSection {
        kind,
        title: kind.title().to_string(),
        lines,
        subtotal,
    })
}

/// Build the structured document for a saved quote
///
/// Figures come from the quote itself; `config` only supplies the hotel name
/// and the template blocks.
pub fn render_official_quote(quote: &SavedQuote, config: &Configuration) -> OfficialQuoteDocument {
    let templates = &config.templates;
    let placeholders = quote_placeholders(quote, config);

    let mut accommodation = Vec::new();
    let mut meals = Vec::new();
    let mut extras = Vec::new();

    for item in &quote.items {
        accommodation.push(DocumentLine {
            description: format!(
                "{} ({}) - {}",
                item.category_name,
                item.bed_description,
                breakfast_label(item.meals.breakfast)
            ),
            quantity: item.quantity,
            unit_price: item.nightly_average,
            amount: item.accommodation_subtotal,
        });

        for meal in Meal::OPTIONAL {
            let count = item.meal_counts.get(meal);
            if count == 0 {
                continue;
            }
            let servings = count * item.capacity * item.quantity;
            let price = quote.meal_prices.get(meal);
            meals.push(DocumentLine {
                description: format!(
                    "{} - {} ({} x {} pessoa(s))",
                    meal.label(),
                    item.category_name,
                    count,
                    item.capacity
                ),
                quantity: servings,
                unit_price: price,
                amount: to_f64(to_decimal(price) * rust_decimal::Decimal::from(servings)),
            });
        }

        if item.extra_hours_charge > 0.0 {
            extras.push(DocumentLine {
                description: format!("{} - {}h", item.category_name, quote.extra_hours),
                quantity: item.quantity,
                unit_price: to_f64(
                    to_decimal(item.extra_hours_charge) / rust_decimal::Decimal::from(item.quantity.max(1)),
                ),
                amount: item.extra_hours_charge,
            });
        }
    }

    let sections: Vec<DocumentSection> = [
        section(SectionKind::Accommodation, accommodation),
        section(SectionKind::Meals, meals),
        section(SectionKind::ExtraHours, extras),
    ]
    .into_iter()
    .flatten()
    .collect();

    let discount_total = to_f64(quote.items.iter().map(|i| to_decimal(i.discount_amount)).sum());
    let deposit_amount = to_f64(percent_of(
        to_decimal(quote.grand_total),
        to_decimal(templates.deposit_percent),
    ));

    OfficialQuoteDocument {
        title: placeholders.apply(&templates.title),
        client: quote.client.clone(),
        event: quote.event.clone(),
        hotel_name: config.hotel_name.clone(),
        period: format!(
            "{} a {}",
            format_date_br(quote.check_in.date()),
            format_date_br(quote.check_out.date())
        ),
        nights: quote.nights,
        season: quote.season.label().to_string(),
        sections,
        discount_total,
        grand_total: quote.grand_total,
        deposit_percent: templates.deposit_percent,
        deposit_amount,
        config_title: placeholders.apply(&templates.config_title),
        config_description: placeholders.apply(&templates.config_description),
        meals_note: placeholders.apply(&templates.meals_note),
        schedule: placeholders.apply(&templates.schedule),
        payment: placeholders.apply(&templates.payment),
        observations: placeholders.apply(&templates.observations),
        notes: placeholders.apply(&quote.notes),
        footer: placeholders.apply(&templates.footer),
        valid_until: format_date_br(quote.valid_until),
        signature: quote.signature.clone(),
    }
}

impl OfficialQuoteDocument {
    /// Plain-text rendition for the text sinks
    pub fn to_text(&self) -> String {
        let mut b = TextBuilder::new();
        b.line(&self.title.to_uppercase())
            .line(&self.hotel_name)
            .sep();
        b.line_if(!self.client.is_empty(), &format!("Cliente: {}", self.client))
            .line_if(!self.event.is_empty(), &format!("Evento: {}", self.event))
            .line(&format!(
                "Período: {} ({})",
                self.period,
                nights_label(self.nights)
            ))
            .line(&format!("Temporada: {}", self.season))
            .newline();

        if !self.config_title.is_empty() {
            b.line(&self.config_title);
        }
        b.line_if(!self.config_description.is_empty(), &self.config_description);

        for section in &self.sections {
            b.newline().line(&format!("[{}]", section.title));
            for line in &section.lines {
                b.line(&format!(
                    "{} x {} @ {} = {}",
                    line.quantity,
                    line.description,
                    format_brl(line.unit_price),
                    format_brl(line.amount)
                ));
            }
            b.line(&format!("Subtotal: {}", format_brl(section.subtotal)));
        }

        b.sep();
        if self.discount_total > 0.0 {
            b.line(&format!("Desconto aplicado: {}", format_brl(self.discount_total)));
        }
        b.line(&format!("TOTAL GERAL: {}", format_brl(self.grand_total)))
            .newline();

        for block in [
            &self.meals_note,
            &self.schedule,
            &self.payment,
            &self.observations,
            &self.notes,
        ] {
            let trimmed = block.trim_end();
            if !trimmed.is_empty() {
                b.line(trimmed).newline();
            }
        }

        b.line(&format!("Válido até {}", self.valid_until))
            .line_if(!self.signature.is_empty(), &format!("Assinatura: {}", self.signature))
            .text(&self.footer);
        b.build()
    }
}
