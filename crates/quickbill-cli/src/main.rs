//! CLI application for building quotations, invoices and receipts.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, edit, import, items, show, template, GlobalOpts};

/// QuickBill - Build quotations, invoices and receipts from the command line
#[derive(Parser)]
#[command(name = "quickbill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the saved document
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import line items from pasted or uploaded text
    Import(import::ImportArgs),

    /// Show the saved document
    Show(show::ShowArgs),

    /// Add, edit or remove line items
    Items(items::ItemsArgs),

    /// Edit document details (type, number, company, client, terms)
    Edit(edit::EditArgs),

    /// Clear all document data
    Reset,

    /// Write the batch import template
    Template(template::TemplateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let global = GlobalOpts {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    match cli.command {
        Commands::Import(args) => import::run(args, &global).await,
        Commands::Show(args) => show::run(args, &global).await,
        Commands::Items(args) => items::run(args, &global),
        Commands::Edit(args) => edit::run(args, &global),
        Commands::Reset => items::reset(&global),
        Commands::Template(args) => template::run(args).await,
        Commands::Config(args) => config::run(args, &global),
    }
}
