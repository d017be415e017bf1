//! Line-by-line batch parser.

use rust_decimal::Decimal;
use tracing::debug;

use super::delimiter::split_fields;
use super::{LineError, LineErrorKind, ParseOutcome};
use crate::models::item::ItemDraft;
use crate::numeric::parse_cleaned_decimal;

/// Parser turning free-form pasted rows into item drafts.
///
/// Accepted rows are `description, price` or
/// `description, quantity, price[, ...]`, separated by tabs, commas,
/// semicolons or runs of spaces. Bad rows are collected as [`LineError`]s
/// and never stop the rest of the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchParser;

impl BatchParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole batch.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        for (index, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            match self.parse_line(index + 1, line) {
                Ok(draft) => outcome.drafts.push(draft),
                Err(err) => {
                    debug!("Rejected batch line: {}", err);
                    outcome.errors.push(err);
                }
            }
        }

        debug!(
            "Parsed batch: {} drafts, {} errors",
            outcome.drafts.len(),
            outcome.errors.len()
        );

        outcome
    }

    /// Parse one non-empty, trimmed line.
    fn parse_line(&self, line_number: usize, line: &str) -> Result<ItemDraft, LineError> {
        let (_, fields) = split_fields(line);

        if fields.iter().filter(|f| !f.is_empty()).count() < 2 {
            return Err(LineError::new(line_number, LineErrorKind::InvalidFormat, line));
        }

        let description = fields[0];
        let (quantity, price) = if fields.len() == 2 {
            (Decimal::ONE, parse_cleaned_decimal(fields[1]))
        } else {
            let quantity = parse_cleaned_decimal(fields[1]).unwrap_or(Decimal::ONE);
            (quantity, parse_cleaned_decimal(fields[2]))
        };

        let price = match price {
            Some(p) if p >= Decimal::ZERO => p,
            _ => {
                let last = fields.last().copied().unwrap_or_default();
                return Err(LineError::new(line_number, LineErrorKind::InvalidPrice, last));
            }
        };

        if quantity <= Decimal::ZERO {
            return Err(LineError::new(line_number, LineErrorKind::InvalidQuantity, fields[1]));
        }

        Ok(ItemDraft::new(description, quantity, price))
    }
}

/// Parse a batch with the default parser.
pub fn parse_batch(text: &str) -> ParseOutcome {
    BatchParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_mixed_batch() {
        let text = "Website Design\t1\t120000\nWeb Hosting\t29900\nbad,line";

        let outcome = parse_batch(text);

        assert_eq!(
            outcome.drafts,
            vec![
                ItemDraft::new("Website Design", dec(1), dec(120000)),
                ItemDraft::new("Web Hosting", dec(1), dec(29900)),
            ]
        );
        // "bad,line" splits into two fields; "line" is not a price.
        assert_eq!(
            outcome.errors,
            vec![LineError::new(3, LineErrorKind::InvalidPrice, "line")]
        );
    }

    #[test]
    fn test_two_fields_default_quantity() {
        let outcome = parse_batch("Logo Design, 15000");
        assert_eq!(outcome.drafts, vec![ItemDraft::new("Logo Design", dec(1), dec(15000))]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_three_fields() {
        let outcome = parse_batch("Domain Registration;2;1500");
        assert_eq!(
            outcome.drafts,
            vec![ItemDraft::new("Domain Registration", dec(2), dec(1500))]
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let outcome = parse_batch("Banner\t3\t2000\tprinted\t2024");
        assert_eq!(outcome.drafts, vec![ItemDraft::new("Banner", dec(3), dec(2000))]);
    }

    #[test]
    fn test_multi_space_and_currency_cleanup() {
        let outcome = parse_batch("SEO Optimization    1    KES 50000.50");
        assert_eq!(
            outcome.drafts,
            vec![ItemDraft::new("SEO Optimization", dec(1), Decimal::new(5000050, 2))]
        );
    }

    #[test]
    fn test_blank_lines_skipped_but_counted() {
        let outcome = parse_batch("\n   \nA\t10\r\n\nlonely\n");

        assert_eq!(outcome.drafts, vec![ItemDraft::new("A", dec(1), dec(10))]);
        assert_eq!(
            outcome.errors,
            vec![LineError::new(5, LineErrorKind::InvalidFormat, "lonely")]
        );
    }

    #[test]
    fn test_empty_fields_do_not_count() {
        let outcome = parse_batch("Widget,\n,500");

        assert!(outcome.drafts.is_empty());
        assert_eq!(outcome.errors[0], LineError::new(1, LineErrorKind::InvalidFormat, "Widget,"));
        assert_eq!(outcome.errors[1], LineError::new(2, LineErrorKind::InvalidFormat, ",500"));
    }

    #[test]
    fn test_empty_quantity_field_defaults() {
        let outcome = parse_batch("Widget,,500");
        assert_eq!(outcome.drafts, vec![ItemDraft::new("Widget", dec(1), dec(500))]);
    }

    #[test]
    fn test_negative_price_rejected() {
        let outcome = parse_batch("Refund\t1\t-200");
        assert_eq!(
            outcome.errors,
            vec![LineError::new(1, LineErrorKind::InvalidPrice, "-200")]
        );
    }

    #[test]
    fn test_price_checked_before_quantity() {
        let outcome = parse_batch("Thing\t-1\tabc");
        assert_eq!(outcome.errors[0].kind, LineErrorKind::InvalidPrice);
    }

    #[test]
    fn test_invalid_quantity() {
        let outcome = parse_batch("Thing\t-2\t100\nOther\t0\t100");
        assert_eq!(
            outcome.errors,
            vec![
                LineError::new(1, LineErrorKind::InvalidQuantity, "-2"),
                LineError::new(2, LineErrorKind::InvalidQuantity, "0"),
            ]
        );
    }

    #[test]
    fn test_unparseable_quantity_defaults_to_one() {
        let outcome = parse_batch("Thing\tmany\t100");
        assert_eq!(outcome.drafts, vec![ItemDraft::new("Thing", dec(1), dec(100))]);
    }

    #[test]
    fn test_zero_price_allowed() {
        let outcome = parse_batch("Free consultation\t0");
        assert_eq!(outcome.drafts[0].price, Decimal::ZERO);
    }

    #[test]
    fn test_amounts_past_decimal_range_preview_saturates() {
        let nines = "9".repeat(28);
        let outcome = parse_batch(&format!("Big\t{nines}\t{nines}"));

        assert_eq!(outcome.drafts.len(), 1);
        let totals = outcome.preview_totals(Decimal::new(16, 2));
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn test_price_wider_than_decimal_is_invalid() {
        let price = format!("1{}", "0".repeat(29));
        let outcome = parse_batch(&format!("Yacht\t{price}"));

        assert!(outcome.drafts.is_empty());
        assert_eq!(
            outcome.errors,
            vec![LineError::new(1, LineErrorKind::InvalidPrice, price)]
        );
    }

    #[test]
    fn test_exponent_marker_is_stripped_from_fields() {
        let outcome = parse_batch("Thing\t1e3");
        assert_eq!(outcome.drafts[0].price, dec(13));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "A\t1\t2\nbad\nB,3\nC;0;5";
        assert_eq!(parse_batch(text), parse_batch(text));
    }
}
