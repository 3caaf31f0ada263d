//! Price series model, currency-string parsing and display formatting

use serde::{Deserialize, Serialize};

/// Calendar labels used by the month-based chart variant. The chart origin
/// is always "Jan" and no series may run past "Dec".
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One observed price sample. `date` is either an ISO `YYYY-MM-DD` day or a
/// month abbreviation label. Prices are non-negative display integers;
/// recomputations always build a new list instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: u64,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, price: u64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// One chart sample. Historical points carry `actual`, forecast points carry
/// `predicted`; the two never overlap on the same label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub actual: Option<u64>,
    pub predicted: Option<u64>,
}

impl ChartPoint {
    pub fn actual(label: impl Into<String>, price: u64) -> Self {
        Self {
            label: label.into(),
            actual: Some(price),
            predicted: None,
        }
    }

    pub fn predicted(label: impl Into<String>, price: u64) -> Self {
        Self {
            label: label.into(),
            actual: None,
            predicted: Some(price),
        }
    }
}

/// Extracts a numeric value from a free-form currency string like "₹89,999"
/// or "$1,299.00".
///
/// Every character that is not an ASCII digit or a decimal point is stripped
/// before parsing. Returns `None` for input with no digits; callers must
/// treat that as "unknown", never as zero. Strings that strip down to more
/// than one decimal point (e.g. "12.34.56") are rejected rather than parsed
/// as a prefix.
pub fn parse_price(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if cleaned.matches('.').count() > 1 {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds a raw numeric price to the non-negative integer used for display.
pub fn to_display_price(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

/// Currency symbol for an ISO currency code. Unknown codes fall back to the
/// code itself with a trailing space.
pub fn currency_symbol(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{other} "),
    }
}

/// Formats an integer price as a currency string with thousands separators,
/// e.g. `format_price(89999, "₹")` -> "₹89,999".
pub fn format_price(value: u64, symbol: &str) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{symbol}{grouped}")
}
