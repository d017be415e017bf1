//! Lenient number parsing for pasted and typed values.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

lazy_static! {
    /// Leading decimal literal: optional sign, then digits with an optional
    /// fraction, or a bare fraction, then an optional exponent.
    static ref LEADING_DECIMAL: Regex = Regex::new(
        r"^([+-]?)(?:(\d+)(?:\.(\d*))?|\.(\d+))(?:[eE]([+-]?\d+))?"
    ).unwrap();
}

/// Largest exponent magnitude worth handing to [`Decimal::from_scientific`].
const MAX_EXPONENT: i64 = 56;

/// Parse the longest decimal literal at the start of `s`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so
/// `"12.5kg"` gives `12.5`, `"1.2.3"` gives `1.2` and `"1e3"` gives `1000`.
/// Returns `None` when no digits lead the string or the value does not fit a
/// [`Decimal`].
pub fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let caps = LEADING_DECIMAL.captures(s.trim_start())?;

    let sign = &caps[1];
    let (integer, fraction) = match (caps.get(2), caps.get(4)) {
        (Some(int), _) => (int.as_str(), caps.get(3).map_or("", |m| m.as_str())),
        (None, Some(frac)) => ("0", frac.as_str()),
        (None, None) => return None,
    };

    let sign = if sign == "-" { "-" } else { "" };
    let literal = if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    };

    let mantissa = Decimal::from_str(&literal).ok()?;
    let Some(exponent) = caps.get(5) else {
        return Some(mantissa);
    };

    if mantissa.is_zero() {
        return Some(Decimal::ZERO);
    }
    let exponent: i64 = exponent.as_str().parse().ok()?;
    // Past this no nonzero value fits a Decimal either way
    if exponent.abs() > MAX_EXPONENT {
        return None;
    }
    Decimal::from_scientific(&format!("{literal}e{exponent}")).ok()
}

/// Strip everything except digits, `.` and `-`, then parse what is left.
///
/// This is how batch fields like `"KES 1,500.00"` become `1500.00`.
pub fn parse_cleaned_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    parse_leading_decimal(&cleaned)
}
