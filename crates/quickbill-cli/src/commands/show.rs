//! Show command - print the saved document.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;

use quickbill_core::format::format_quantity;
use quickbill_core::{BillingConfig, Document, Totals};

use super::{GlobalOpts, Session};
use crate::render::document_text;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Printable text
    Text,
    /// Document and totals as JSON
    Json,
    /// Line items as CSV
    Csv,
}

#[derive(Serialize)]
struct DocumentView<'a> {
    title: &'static str,
    document: &'a Document,
    totals: Totals,
}

pub async fn run(args: ShowArgs, global: &GlobalOpts) -> anyhow::Result<()> {
    let session = Session::open(global)?;
    let billing = &session.config.billing;

    let rendered = match args.format {
        OutputFormat::Text => document_text(&session.document, billing),
        OutputFormat::Json => to_json(&session.document, billing)?,
        OutputFormat::Csv => to_csv(&session.document, billing)?,
    };

    if let Some(path) = args.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, rendered).await?;
        println!("{} Written to {}", style("✓").green(), path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

fn to_json(document: &Document, billing: &BillingConfig) -> anyhow::Result<String> {
    let view = DocumentView {
        title: document.title(),
        document,
        totals: document.totals(billing),
    };
    let mut json = serde_json::to_string_pretty(&view)?;
    json.push('\n');
    Ok(json)
}

fn to_csv(document: &Document, billing: &BillingConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(["#", "description", "quantity", "price", "amount"])?;
    for (index, item) in document.items.items().iter().enumerate() {
        wtr.write_record(&[
            (index + 1).to_string(),
            item.description.clone(),
            format_quantity(item.quantity),
            item.price.round_dp(2).to_string(),
            item.line_total().round_dp(2).to_string(),
        ])?;
    }

    let totals = document.totals(billing);
    for (label, amount) in [
        ("Subtotal".to_string(), totals.subtotal),
        (billing.vat_label(), totals.tax),
        ("Total".to_string(), totals.total),
    ] {
        wtr.write_record(&[
            String::new(),
            label,
            String::new(),
            String::new(),
            amount.round_dp(2).to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quickbill_core::QuickBillConfig;

    fn document() -> Document {
        Document::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &QuickBillConfig::default(),
        )
    }

    #[test]
    fn test_csv_output() {
        let csv = to_csv(&document(), &BillingConfig::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "#,description,quantity,price,amount");
        assert_eq!(lines[1], "1,Website Design,1,120000,120000");
        assert_eq!(lines[5], ",VAT (16%),,,31984.00");
        assert_eq!(lines[6], ",Total,,,231884.00");
    }

    #[test]
    fn test_json_output() {
        let json = to_json(&document(), &BillingConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "QUOTATION");
        assert_eq!(value["document"]["items"][2]["description"], "SEO Optimization");
        assert_eq!(value["totals"]["total"], 231884.0);
    }
}
