//! pt-BR presentation helpers

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::prelude::*;

use super::money::{round_money, to_decimal};

/// Format an amount as Brazilian Real, e.g. `R$ 1.140,00`
pub fn format_brl(value: f64) -> String {
    let amount = round_money(to_decimal(value));
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let cents = (amount.abs() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u64()
        .unwrap_or_default();
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// `1234567` -> `1.234.567`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format a plain number with pt-BR decimal comma, trimming trailing zeros
///
/// `1.8` -> `1,8`, `15.0` -> `15`
pub fn format_number(value: f64) -> String {
    to_decimal(value)
        .round_dp(4)
        .normalize()
        .to_string()
        .replace('.', ",")
}

/// `dd/mm/yyyy`
pub fn format_date_br(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

/// `dd/mm`
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

/// `HH:MM`
pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// `dd/mm/yyyy às HH:MM`
pub fn format_datetime_br(value: NaiveDateTime) -> String {
    format!(
        "{} às {}",
        format_date_br(value.date()),
        format_time(value.time())
    )
}

/// Three-letter Portuguese weekday, Sunday first
pub fn weekday_short(date: NaiveDate) -> &'static str {
    const NAMES: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];
    NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// `diária` / `diárias`
pub fn nights_label(nights: u32) -> String {
    if nights == 1 {
        "1 diária".to_string()
    } else {
        format!("{} diárias", nights)
    }
}
