//! Import command - batch-add line items from text.

use std::path::Path;

use clap::{Args, ValueEnum};
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use quickbill_core::{BatchParser, MergeMode, ParseOutcome, QuickBillConfig};

use super::{extension_of, GlobalOpts, Session};
use crate::render::{items_table, Row};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Text or CSV file with one item per line, or "-" for stdin
    input: String,

    /// How imported items combine with the existing ones
    #[arg(short, long, value_enum, default_value = "append")]
    mode: ImportMode,

    /// Preview the parsed items without saving
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ImportMode {
    /// Keep existing items
    Append,
    /// Replace all existing items
    Replace,
}

impl From<ImportMode> for MergeMode {
    fn from(mode: ImportMode) -> Self {
        match mode {
            ImportMode::Append => MergeMode::Append,
            ImportMode::Replace => MergeMode::Replace,
        }
    }
}

pub async fn run(args: ImportArgs, global: &GlobalOpts) -> anyhow::Result<()> {
    let text = read_input(&args.input).await?;
    if text.trim().is_empty() {
        anyhow::bail!("No items to import: input is empty");
    }

    let mut session = Session::open(global)?;

    let outcome = BatchParser::new().parse(&text);
    debug!(
        "Parsed {} draft(s), {} error(s)",
        outcome.drafts.len(),
        outcome.errors.len()
    );

    print_preview(&outcome, &session.config);

    if args.dry_run {
        println!("{} Dry run, nothing saved.", style("ℹ").blue());
        return Ok(());
    }

    let mode = MergeMode::from(args.mode);
    let drafts = outcome.into_drafts()?;
    let count = session.document.items.merge_batch(drafts, mode)?;
    session.save()?;

    info!("Saved to {}", session.data_file().display());
    println!(
        "{} Successfully added {} items ({})",
        style("✓").green(),
        count,
        mode
    );

    Ok(())
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }

    let path = Path::new(input);
    if matches!(extension_of(path).as_str(), "xlsx" | "xls") {
        anyhow::bail!(
            "Excel files are not supported. Please convert {} to CSV first.",
            path.display()
        );
    }
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(tokio::fs::read_to_string(path).await?)
}

fn print_preview(outcome: &ParseOutcome, config: &QuickBillConfig) {
    if outcome.is_empty() {
        println!("{} No valid items found.", style("✗").red());
    } else {
        println!(
            "{} {} item(s) ready to import",
            style("Preview:").bold(),
            outcome.drafts.len()
        );
        let rows: Vec<Row<'_>> = outcome
            .drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| Row {
                number: index + 1,
                description: &draft.description,
                quantity: draft.quantity,
                price: draft.price,
            })
            .collect();
        let totals = outcome.preview_totals(config.billing.tax_rate());
        println!("{}", items_table(&rows, &totals, &config.billing));
    }

    if let Some(summary) = outcome.error_summary() {
        eprintln!("{} {}", style("⚠").yellow(), summary);
        for error in &outcome.errors {
            eprintln!("  {}", error);
        }
    }
}
