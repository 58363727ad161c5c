//! Decimal prices.
//!
//! Prices are carried as [`rust_decimal::Decimal`] so cart totals add up
//! exactly. Upstream payloads are loose about how they spell a price, so
//! [`parse_price`] accepts JSON numbers and the usual string forms.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// A monetary amount in the store currency.
pub type Price = Decimal;

/// Parse a price from a JSON value.
///
/// Accepts numbers (`19.99`), numeric strings (`"19.99"`), and display
/// strings with a currency symbol or thousands separators (`"$1,299.00"`).
/// Negative amounts are rejected.
#[must_use]
pub fn parse_price(value: &Value) -> Option<Price> {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches(['$', '€', '£'])
                .chars()
                .filter(|c| *c != ',')
                .collect();
            parse_decimal(&cleaned)
        }
        _ => None,
    }?;

    (!parsed.is_sign_negative()).then_some(parsed)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Format a price for display (e.g., `$35.00`).
#[must_use]
pub fn format_price(amount: Price) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_price(&json!(10)), Some(Decimal::from(10)));
        assert_eq!(parse_price(&json!(19.99)), Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_parse_strings() {
        assert_eq!(parse_price(&json!("5.50")), Some(Decimal::new(550, 2)));
        assert_eq!(parse_price(&json!("$1,299.00")), Some(Decimal::new(129900, 2)));
        assert_eq!(parse_price(&json!(" 7 ")), Some(Decimal::from(7)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_price(&json!("free")), None);
        assert_eq!(parse_price(&json!(null)), None);
        assert_eq!(parse_price(&json!([1])), None);
        assert_eq!(parse_price(&json!(-3)), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::from(35)), "$35.00");
        assert_eq!(format_price(Decimal::new(125, 3)), "$0.13");
    }
}
