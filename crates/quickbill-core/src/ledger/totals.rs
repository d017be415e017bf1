//! Document totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subtotal, tax and grand total of a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Totals {
    /// Sum line totals and apply `tax_rate` (a fraction, 0.16 for 16%).
    ///
    /// Amounts past the `Decimal` range saturate at [`Decimal::MAX`].
    pub fn compute(line_totals: impl IntoIterator<Item = Decimal>, tax_rate: Decimal) -> Self {
        let subtotal = line_totals
            .into_iter()
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let tax = subtotal.saturating_mul(tax_rate);

        Self {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}
