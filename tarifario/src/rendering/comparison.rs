//! Comparison table across room categories

use shared::error::{AppError, AppResult};
use shared::models::{Configuration, Meal, OccupancyGroup, RoomCategory};

use super::builder::{SEPARATOR, TextBuilder, bold, italic};
use super::promo::{DiscountLine, render_promotion_block};
use crate::pricing::{BreakfastOptions, PricingEngine, StayRequest};
use crate::utils::format::{format_brl, format_date_br};

/// Amenities every category lists; categories without amenities are ignored
pub fn common_amenities(categories: &[RoomCategory]) -> Vec<String> {
    let mut lists = categories
        .iter()
        .map(|c| &c.amenities)
        .filter(|list| !list.is_empty());
    let Some(first) = lists.next() else {
        return Vec::new();
    };
    let mut common: Vec<String> = first.clone();
    for list in lists {
        common.retain(|a| list.contains(a));
    }
    common
}

/// `⏰ *Horários das Refeições:*` block listing the active windows
pub fn render_meal_schedule(config: &Configuration) -> String {
    let mut lines = Vec::new();
    for meal in [Meal::Breakfast, Meal::Lunch, Meal::AfternoonSnack, Meal::Dinner] {
        let window = config.meals.window(meal);
        if !window.active {
            continue;
        }
        let optional = if meal == Meal::Breakfast {
            ""
        } else {
            " (opcional)"
        };
        lines.push(format!(
            "*- {}:* {} às {}{}",
            meal.label(),
            window.start,
            window.end,
            optional
        ));
    }
    if lines.is_empty() {
        return String::new();
    }
    format!("⏰ *Horários das Refeições:*\n{}\n\n", lines.join("\n"))
}

fn capacity_text(category: &RoomCategory) -> String {
    if category.inferred_group() == OccupancyGroup::Single && category.capacity == 1 {
        "Apenas 1 pessoa".to_string()
    } else {
        format!("Até {} pessoas", category.capacity)
    }
}

/// Render the comparison message for the selected categories
///
/// Each category is priced on its own with and without breakfast.
pub fn render_comparison(
    categories: &[RoomCategory],
    stay: &StayRequest,
    config: &Configuration,
) -> AppResult<String> {
    if categories.is_empty() {
        return Err(AppError::validation("Select at least one room category"));
    }
    let engine = PricingEngine::new(config.clone());
    let priced: Vec<(&RoomCategory, BreakfastOptions)> = categories
        .iter()
        .map(|c| engine.price_options(c, stay).map(|o| (c, o)))
        .collect::<AppResult<_>>()?;

    let nights = priced
        .first()
        .map(|(_, o)| o.with_breakfast.nights)
        .unwrap_or_default();

    let mut b = TextBuilder::new();
    b.line("*ORÇAMENTO DE HOSPEDAGEM*")
        .newline()
        .line(&format!("🏨 {}", bold(&config.hotel_name)))
        .newline()
        .field(
            "📅",
            "Período",
            &format!(
                "{} a {}",
                format_date_br(stay.check_in.date()),
                format_date_br(stay.check_out.date())
            ),
        )
        .field("🌙", "Duração", &format!("{} diária(s)", nights))
        .newline()
        .line("--- *OPÇÕES DE ACOMODAÇÃO* ---");

    for (category, options) in &priced {
        let with = &options.with_breakfast;
        let without = &options.without_breakfast;
        let mixed = with.season.is_mixed();
        let average = |v: f64| {
            if mixed {
                format!("{} (média)", format_brl(v))
            } else {
                format_brl(v)
            }
        };

        b.newline()
            .line(&format!("🟢 {}", bold(&category.name.to_uppercase())));
        if let Some(desc) = category.description.as_deref()
            && !desc.trim().is_empty()
        {
            b.line(&italic(desc));
        }
        b.line(&format!("🛏️ {}", category.bed_description()))
            .line(&format!("👤 Capacidade: {}", capacity_text(category)))
            .line(&format!(
                "💰 Diária: {} ☕ Com Café ou {} ❌ Sem Café",
                average(with.nightly_average),
                average(without.nightly_average)
            ))
            .field("☕", "Total com café", &format_brl(with.accommodation_before_discount))
            .field("🍽️", "Total sem café", &format_brl(without.accommodation_before_discount));
    }

    b.newline().line(SEPARATOR);
    let common = common_amenities(categories);
    if !common.is_empty() {
        b.line(&format!(
            "✅ *Todas as opções acima possuem:* {}.",
            common.join(", ")
        ))
        .newline();
    }

    b.text(&render_meal_schedule(config));

    // Every category shares nights and season, so one outcome speaks for all
    if let Some((_, first)) = priced.first() {
        let lines: Vec<DiscountLine> = priced
            .iter()
            .map(|(c, o)| DiscountLine {
                name: c.name.clone(),
                with_breakfast: o.with_breakfast.accommodation_subtotal,
                without_breakfast: o.without_breakfast.accommodation_subtotal,
            })
            .collect();
        b.text(&render_promotion_block(&first.with_breakfast.promotion, &lines));
    }

    b.newline()
        .line(&format!(
            "⚠️ {}",
            italic("Valores sujeitos a disponibilidade no ato da reserva.")
        ))
        .newline()
        .text("Deseja garantir sua reserva?");

    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn category(id: &str, name: &str, rates: [f64; 4], amenities: &[&str]) -> RoomCategory {
        RoomCategory {
            id: id.to_string(),
            name: name.to_string(),
            capacity: 2,
            double_beds: 1,
            single_beds: 0,
            high_with_breakfast: rates[0],
            high_no_breakfast: rates[1],
            low_with_breakfast: rates[2],
            low_no_breakfast: rates[3],
            is_active: true,
            description: None,
            occupancy: OccupancyGroup::Unset,
            unit_numbers: vec![],
            amenities: amenities.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn stay() -> StayRequest {
        let at = |d, h| {
            NaiveDate::from_ymd_opt(2025, 12, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        StayRequest::new(at(20, 14), at(23, 11))
    }

    #[test]
    fn test_common_amenities_intersection() {
        let cats = vec![
            category("a", "A", [1.0; 4], &["Wi-Fi", "TV", "Frigobar"]),
            category("b", "B", [1.0; 4], &[]),
            category("c", "C", [1.0; 4], &["TV", "Wi-Fi"]),
        ];
        assert_eq!(common_amenities(&cats), vec!["Wi-Fi", "TV"]);
        assert!(common_amenities(&cats[1..2]).is_empty());
    }

    #[test]
    fn test_meal_schedule_skips_inactive() {
        let mut config = Configuration::default();
        config.meals.afternoon_snack.active = false;
        let text = render_meal_schedule(&config);
        assert!(text.starts_with("⏰ *Horários das Refeições:*\n*- Café da manhã:* 07:00 às 10:00\n"));
        assert!(text.contains("*- Almoço:* 12:00 às 14:00 (opcional)"));
        assert!(!text.contains("Lanche"));
        assert!(text.ends_with("(opcional)\n\n"));

        for meal in [Meal::Breakfast, Meal::Lunch, Meal::AfternoonSnack, Meal::Dinner] {
            config.meals.window_mut(meal).active = false;
        }
        assert!(render_meal_schedule(&config).is_empty());
    }

    #[test]
    fn test_comparison_prices_each_category() {
        let cats = vec![
            category("std", "Standard", [380.0, 350.0, 280.0, 250.0], &["Wi-Fi", "TV"]),
            category("lx", "Luxo", [580.0, 550.0, 430.0, 400.0], &["Wi-Fi", "TV", "Frigobar"]),
        ];
        let text = render_comparison(&cats, &stay(), &Configuration::default()).unwrap();
        assert!(text.starts_with("*ORÇAMENTO DE HOSPEDAGEM*\n\n🏨 *Hotel Plaza - Cruzeta/RN*\n\n"));
        assert!(text.contains("📅 *Período:* 20/12/2025 a 23/12/2025\n"));
        assert!(text.contains("🌙 *Duração:* 3 diária(s)\n\n--- *OPÇÕES DE ACOMODAÇÃO* ---\n"));
        assert!(text.contains("\n🟢 *STANDARD*\n🛏️ 1 Cama Casal\n👤 Capacidade: Até 2 pessoas\n"));
        assert!(text.contains("☕ *Total com café:* R$ 1.740,00\n"));
        assert!(text.contains("🍽️ *Total sem café:* R$ 1.650,00\n"));
        assert!(text.contains("✅ *Todas as opções acima possuem:* Wi-Fi, TV.\n"));
        assert!(text.ends_with(
            "\n⚠️ _Valores sujeitos a disponibilidade no ato da reserva._\n\nDeseja garantir sua reserva?"
        ));
    }

    #[test]
    fn test_comparison_applied_promotion_lists_every_category() {
        let cats = vec![
            category("std", "Standard", [380.0, 350.0, 280.0, 250.0], &[]),
            category("lx", "Luxo", [580.0, 550.0, 430.0, 400.0], &[]),
        ];
        let mut config = Configuration::default();
        config.promotion.active = true;
        let text = render_comparison(&cats, &stay(), &config).unwrap();
        assert!(text.contains("🔹 *Standard*\n   ✅ C/ Café: *R$ 969,00*\n"));
        assert!(text.contains("🔹 *Luxo*\n   ✅ C/ Café: *R$ 1.479,00*\n"));
    }

    #[test]
    fn test_single_occupancy_capacity_text() {
        let mut single = category("s", "Single", [1.0; 4], &[]);
        single.capacity = 1;
        let text = render_comparison(&[single], &stay(), &Configuration::default()).unwrap();
        assert!(text.contains("👤 Capacidade: Apenas 1 pessoa\n"));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        assert!(render_comparison(&[], &stay(), &Configuration::default()).is_err());
    }
}
