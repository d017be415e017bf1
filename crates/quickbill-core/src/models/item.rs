//! Line item models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Description given to items added by hand or by a reset.
pub const NEW_ITEM_DESCRIPTION: &str = "New Item";

/// Description given to imported or restored items that lack one.
pub const DEFAULT_DESCRIPTION: &str = "Item";

/// A single row of the document's item table.
///
/// `id` is the 1-based position in the ledger and changes whenever rows
/// are inserted or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Position-derived row number.
    #[serde(default)]
    pub id: u32,

    /// Product/service description.
    #[serde(default = "default_description")]
    pub description: String,

    /// Quantity, always greater than zero.
    #[serde(default = "default_quantity", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,

    /// Unit price, never negative.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

impl LineItem {
    pub fn new(id: u32, description: impl Into<String>, quantity: Decimal, price: Decimal) -> Self {
        Self {
            id,
            description: description.into(),
            quantity,
            price,
        }
    }

    /// Quantity times unit price, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }
}

/// A parsed but not yet committed line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl ItemDraft {
    pub fn new(description: impl Into<String>, quantity: Decimal, price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            price,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }

    /// Commit the draft under the given id.
    pub fn into_item(self, id: u32) -> LineItem {
        let description = if self.description.is_empty() {
            default_description()
        } else {
            self.description
        };

        LineItem::new(
            id,
            description,
            coerce_quantity(Some(self.quantity)),
            coerce_price(Some(self.price)),
        )
    }
}

/// Editable column of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Description,
    Quantity,
    Price,
}

impl FromStr for ItemField {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "description" | "desc" => Ok(ItemField::Description),
            "quantity" | "qty" => Ok(ItemField::Quantity),
            "price" => Ok(ItemField::Price),
            _ => Err(LedgerError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemField::Description => "description",
            ItemField::Quantity => "quantity",
            ItemField::Price => "price",
        };
        f.write_str(name)
    }
}

/// Missing, zero or negative quantities become 1.
pub fn coerce_quantity(value: Option<Decimal>) -> Decimal {
    match value {
        Some(q) if q > Decimal::ZERO => q,
        _ => Decimal::ONE,
    }
}

/// Missing or negative prices become 0.
pub fn coerce_price(value: Option<Decimal>) -> Decimal {
    match value {
        Some(p) if p >= Decimal::ZERO => p,
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_total() {
        let item = LineItem::new(1, "Domain Registration", Decimal::from(2), Decimal::from(1500));
        assert_eq!(item.line_total(), Decimal::from(3000));
    }

    #[test]
    fn test_draft_into_item_defaults_description() {
        let item = ItemDraft::new("", Decimal::ONE, Decimal::from(10)).into_item(4);
        assert_eq!(item.id, 4);
        assert_eq!(item.description, "Item");
    }

    #[test]
    fn test_item_field_parsing() {
        assert_eq!("price".parse::<ItemField>(), Ok(ItemField::Price));
        assert_eq!(" Quantity ".parse::<ItemField>(), Ok(ItemField::Quantity));
        assert_eq!("desc".parse::<ItemField>(), Ok(ItemField::Description));
        assert!("total".parse::<ItemField>().is_err());
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_quantity(None), Decimal::ONE);
        assert_eq!(coerce_quantity(Some(Decimal::ZERO)), Decimal::ONE);
        assert_eq!(coerce_quantity(Some(Decimal::from(-2))), Decimal::ONE);
        assert_eq!(coerce_quantity(Some(Decimal::from(3))), Decimal::from(3));
        assert_eq!(coerce_price(None), Decimal::ZERO);
        assert_eq!(coerce_price(Some(Decimal::from(-1))), Decimal::ZERO);
        assert_eq!(coerce_price(Some(Decimal::ZERO)), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let item: LineItem = serde_json::from_str(r#"{"price": 500}"#).unwrap();
        assert_eq!(item.id, 0);
        assert_eq!(item.description, "Item");
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.price, Decimal::from(500));
    }

    #[test]
    fn test_serializes_numbers() {
        let item = LineItem::new(1, "Web Hosting", Decimal::ONE, Decimal::from(29900));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], serde_json::json!(29900.0));
        assert_eq!(json["quantity"], serde_json::json!(1.0));
    }
}
