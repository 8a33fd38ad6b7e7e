//! EV charging receipt message

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

use crate::utils::format::{format_brl, format_date_br, format_number, format_time};
use crate::utils::money::{round_money, to_decimal, to_f64};

/// Charge total for `kwh` at `rate` per kWh
pub fn charging_total(kwh: f64, rate: f64) -> AppResult<f64> {
    if !kwh.is_finite() || kwh <= 0.0 {
        return Err(AppError::validation("kWh must be greater than zero")
            .with_detail("field", "kwh"));
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(AppError::validation("kWh rate must not be negative")
            .with_detail("field", "kwhRate"));
    }
    let total: Decimal = round_money(to_decimal(kwh) * to_decimal(rate));
    Ok(to_f64(total))
}

pub fn render_charging_message(kwh: f64, rate: f64, at: NaiveDateTime) -> AppResult<String> {
    let total = charging_total(kwh, rate)?;
    Ok(format!(
        "🔋 *Recarga Veículo Elétrico*\n\n📅 {} às {}\n⚡ {} kWh\n💲 {}/kWh\n💰 *TOTAL: {}*",
        format_date_br(at.date()),
        format_time(at.time()),
        format_number(kwh),
        format_brl(rate),
        format_brl(total)
    ))
}
