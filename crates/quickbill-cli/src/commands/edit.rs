//! Edit command - change the details around the line items.

use chrono::NaiveDate;
use clap::Args;
use console::style;

use quickbill_core::DocumentType;

use super::{GlobalOpts, Session};

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Document type: quotation, invoice or receipt
    #[arg(short = 't', long = "type", value_parser = parse_document_type)]
    document_type: Option<DocumentType>,

    /// Document number
    #[arg(short, long)]
    number: Option<String>,

    /// Document date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    company_name: Option<String>,

    #[arg(long)]
    company_email: Option<String>,

    #[arg(long)]
    company_phone: Option<String>,

    #[arg(long)]
    company_address: Option<String>,

    #[arg(long)]
    client_name: Option<String>,

    #[arg(long)]
    client_email: Option<String>,

    #[arg(long)]
    client_address: Option<String>,

    /// Terms and notes printed below the totals
    #[arg(long)]
    terms: Option<String>,
}

fn parse_document_type(s: &str) -> Result<DocumentType, String> {
    DocumentType::from_str(s).ok_or_else(|| format!("Unknown document type: {}", s))
}

fn assign(target: &mut String, value: Option<String>, changed: &mut usize) {
    if let Some(value) = value {
        *target = value;
        *changed += 1;
    }
}

pub fn run(args: EditArgs, global: &GlobalOpts) -> anyhow::Result<()> {
    let mut session = Session::open(global)?;
    let doc = &mut session.document;
    let mut changed = 0;

    if let Some(document_type) = args.document_type {
        doc.document_type = document_type;
        changed += 1;
    }
    if let Some(date) = args.date {
        doc.info.date = Some(date);
        changed += 1;
    }
    assign(&mut doc.info.number, args.number, &mut changed);
    assign(&mut doc.company.name, args.company_name, &mut changed);
    assign(&mut doc.company.email, args.company_email, &mut changed);
    assign(&mut doc.company.phone, args.company_phone, &mut changed);
    assign(&mut doc.company.address, args.company_address, &mut changed);
    assign(&mut doc.client.name, args.client_name, &mut changed);
    assign(&mut doc.client.email, args.client_email, &mut changed);
    assign(&mut doc.client.address, args.client_address, &mut changed);
    assign(&mut doc.terms, args.terms, &mut changed);

    if changed == 0 {
        println!("{} Nothing to change.", style("ℹ").blue());
        return Ok(());
    }

    let title = doc.title();
    session.save()?;
    println!(
        "{} Updated {} field(s) on {}",
        style("✓").green(),
        changed,
        title
    );

    Ok(())
}
