//! Plain-text rendering of item tables and documents.

use rust_decimal::Decimal;

use quickbill_core::format::{format_amount, format_money, format_quantity};
use quickbill_core::models::config::BillingConfig;
use quickbill_core::{Document, Totals};

/// One row of an item table.
pub struct Row<'a> {
    pub number: usize,
    pub description: &'a str,
    pub quantity: Decimal,
    pub price: Decimal,
}

impl Row<'_> {
    fn amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }
}

/// Items as an aligned table followed by the totals block.
pub fn items_table(rows: &[Row<'_>], totals: &Totals, billing: &BillingConfig) -> String {
    let desc_width = rows
        .iter()
        .map(|r| r.description.chars().count())
        .chain(std::iter::once("Description".len()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<desc_width$}  {:>8}  {:>14}  {:>14}\n",
        "#", "Description", "Qty", "Price", "Total"
    ));
    for row in rows {
        output.push_str(&format!(
            "{:>3}  {:<desc_width$}  {:>8}  {:>14}  {:>14}\n",
            row.number,
            row.description,
            format_quantity(row.quantity),
            format_amount(row.price),
            format_amount(row.amount()),
        ));
    }

    output.push('\n');
    output.push_str(&totals_block(totals, billing));
    output
}

/// Subtotal, VAT and total lines.
pub fn totals_block(totals: &Totals, billing: &BillingConfig) -> String {
    let currency = &billing.currency;
    let vat_label = format!("{}:", billing.vat_label());

    let mut output = String::new();
    output.push_str(&format!("{:>16}  {:>18}\n", "Subtotal:", format_money(currency, totals.subtotal)));
    output.push_str(&format!("{:>16}  {:>18}\n", vat_label, format_money(currency, totals.tax)));
    output.push_str(&format!("{:>16}  {:>18}\n", "Total:", format_money(currency, totals.total)));
    output
}

/// The whole document as it would be printed.
pub fn document_text(document: &Document, billing: &BillingConfig) -> String {
    let mut output = String::new();

    let number = if document.info.number.is_empty() {
        "-"
    } else {
        document.info.number.as_str()
    };
    let date = document
        .info
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());

    output.push_str(document.title());
    output.push('\n');
    output.push_str(&format!("No: {}    Date: {}\n", number, date));
    output.push('\n');

    let company = &document.company;
    if !company.name.is_empty() {
        output.push_str(&format!("From: {}\n", company.name));
        for line in [&company.address, &company.email, &company.phone] {
            if !line.is_empty() {
                output.push_str(&format!("      {}\n", line));
            }
        }
    }

    let client = &document.client;
    if !client.name.is_empty() {
        output.push_str(&format!("Bill To: {}\n", client.name));
        for line in [&client.address, &client.email] {
            if !line.is_empty() {
                output.push_str(&format!("         {}\n", line));
            }
        }
    }
    if !company.name.is_empty() || !client.name.is_empty() {
        output.push('\n');
    }

    let rows: Vec<Row<'_>> = document
        .items
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| Row {
            number: index + 1,
            description: &item.description,
            quantity: item.quantity,
            price: item.price,
        })
        .collect();
    output.push_str(&items_table(&rows, &document.totals(billing), billing));

    if !document.terms.is_empty() {
        output.push_str(&format!("\nTerms & Notes:\n{}\n", document.terms));
    }
    output.push_str(&format!("\nAll amounts are in {}\n", billing.currency));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quickbill_core::QuickBillConfig;
    use std::str::FromStr;

    #[test]
    fn test_document_text() {
        let config = QuickBillConfig::default();
        let mut doc = Document::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &config);
        doc.client.name = "Acme Ltd".to_string();

        let text = document_text(&doc, &config.billing);

        assert!(text.starts_with("QUOTATION\nNo: QB-2024-001    Date: 2024-03-15\n"));
        assert!(text.contains("Bill To: Acme Ltd\n"));
        assert!(text.contains("Website Design"));
        assert!(text.contains("VAT (16%):"));
        assert!(text.contains("KES 231,884.00"));
        assert!(text.ends_with("All amounts are in KES\n"));
    }

    #[test]
    fn test_items_table_with_amounts_past_decimal_range() {
        let nines = Decimal::from_str(&"9".repeat(28)).unwrap();
        let rows = [Row {
            number: 1,
            description: "Big",
            quantity: nines,
            price: nines,
        }];
        let totals = Totals::compute([rows[0].amount()], Decimal::new(16, 2));

        let table = items_table(&rows, &totals, &BillingConfig::default());

        assert_eq!(rows[0].amount(), Decimal::MAX);
        assert!(table.contains(&format_amount(Decimal::MAX)));
    }
}
