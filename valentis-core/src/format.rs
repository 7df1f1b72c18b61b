//! Display formatting for currency, percentages, dates, and table cells.
//!
//! Output mirrors en-US conventions: `$1,234.50`, `80.0%`, `Mar 5, 2024`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// US dollars with thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// A 0..1 ratio as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// A value the backend already expresses in percent units (`72.5` -> `72.5%`).
pub fn format_points(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// Shortest decimal form, dropping a trailing `.0` the way JSON numbers print.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Axis label in thousands: `45000` -> `$45k`.
pub fn format_thousands(value: f64) -> String {
    format!("${:.0}k", value / 1000.0)
}

/// `Mar 5, 2024` for ISO dates and timestamps; `Invalid Date` otherwise.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw.trim()) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".into(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `late_payments_12m` -> `LATE PAYMENTS 12M`.
pub fn column_heading(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Plain-text rendering of a loosely typed cell; null renders empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Numeric view of a loosely typed cell, for currency columns.
pub fn cell_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{g:03}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_formats_like_en_us() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-1.5), "-$1.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(format_percent(0.8), "80.0%");
        assert_eq!(format_percent(0.1234), "12.3%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn points_and_numbers_drop_trailing_zero() {
        assert_eq!(format_points(95.0), "95%");
        assert_eq!(format_points(72.5), "72.5%");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_thousands(45_300.0), "$45k");
    }

    #[test]
    fn dates_render_short_month() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("2024-11-20T08:15:00"), "Nov 20, 2024");
        assert_eq!(format_date("2024-11-20 08:15:00"), "Nov 20, 2024");
        assert_eq!(format_date("2024-01-31T23:00:00Z"), "Jan 31, 2024");
        assert_eq!(format_date("yesterday"), "Invalid Date");
    }

    #[test]
    fn cells_render_like_plain_strings() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&json!(null))), "");
        assert_eq!(cell_text(Some(&json!("PAY-1"))), "PAY-1");
        assert_eq!(cell_text(Some(&json!(3))), "3");
        assert_eq!(cell_text(Some(&json!(3.0))), "3");
        assert_eq!(cell_text(Some(&json!(12.75))), "12.75");
        assert_eq!(cell_number(Some(&json!("40.5"))), 40.5);
        assert_eq!(column_heading("late_payments_12m"), "LATE PAYMENTS 12M");
    }
}
