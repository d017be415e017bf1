//! Display formatting for amounts and quantities.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with two decimals and comma thousand separators
/// (e.g. `1,234.56`).
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}.{}", formatted, decimal_part)
}

/// Amount prefixed with a currency code (e.g. `KES 1,234.56`).
pub fn format_money(currency: &str, amount: Decimal) -> String {
    format!("{} {}", currency, format_amount(amount))
}

/// Quantity without trailing zeros (`2.50` shows as `2.5`).
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(231884)), "231,884.00");
        assert_eq!(format_amount(Decimal::from_str("1234.56").unwrap()), "1,234.56");
        assert_eq!(format_amount(Decimal::from_str("999.999").unwrap()), "1,000.00");
        assert_eq!(format_amount(Decimal::from_str("0.5").unwrap()), "0.50");
        assert_eq!(format_amount(Decimal::from(-1500)), "-1,500.00");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("KES", Decimal::from(29900)), "KES 29,900.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(Decimal::from_str("2.50").unwrap()), "2.5");
        assert_eq!(format_quantity(Decimal::from_str("1.00").unwrap()), "1");
    }
}
