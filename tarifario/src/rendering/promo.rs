//! Promotion message block
//!
//! Shared by the quick quote and the comparison table. Exactly three wordings
//! exist: applied (with discounted values), below the nights threshold, and
//! high-season only.

use crate::pricing::{PromotionOutcome, PromotionStatus};
use crate::utils::format::{format_brl, format_number};

/// Discounted totals of one category, listed when the promotion applies
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountLine {
    pub name: String,
    pub with_breakfast: f64,
    pub without_breakfast: f64,
}

/// Render the promotion block, or an empty string when there is nothing to say
///
/// Non-empty blocks end with a blank line.
pub fn render_promotion_block(outcome: &PromotionOutcome, lines: &[DiscountLine]) -> String {
    let pct = format_number(outcome.discount_percent);
    match outcome.status {
        PromotionStatus::Applied => {
            let mut text = format!(
                "🔥 *PROMOÇÃO ESPECIAL ATIVA:*\nGanhe *{}% de desconto* para {}!\n👇 *Valores com desconto aplicado:*\n",
                pct, outcome.text
            );
            for line in lines {
                text.push_str(&format!("🔹 *{}*\n", line.name));
                text.push_str(&format!(
                    "   ✅ C/ Café: *{}*\n",
                    format_brl(line.with_breakfast)
                ));
                text.push_str(&format!(
                    "   ❌ S/ Café: *{}*\n",
                    format_brl(line.without_breakfast)
                ));
            }
            text.push('\n');
            text
        }
        PromotionStatus::BelowMinNights => format!(
            "🔥 *PROMOÇÃO ESPECIAL:* Reserve *{} diárias* ou mais e ganhe *{}% de desconto* para {}!\n\n",
            outcome.min_nights, pct, outcome.text
        ),
        PromotionStatus::HighSeasonOnly => format!(
            "🔥 *PROMOÇÃO ESPECIAL:* Ganhe *{}% de desconto* para {} (Consulte condições para alta temporada)!\n\n",
            pct, outcome.text
        ),
        PromotionStatus::Inactive | PromotionStatus::Withheld => String::new(),
    }
}
