//! Template command - write the sample batch file.

use std::path::PathBuf;

use clap::Args;
use console::style;

use quickbill_core::batch::{BATCH_TEMPLATE, TEMPLATE_FILE_NAME};

/// Arguments for the template command.
#[derive(Args)]
pub struct TemplateArgs {
    /// Output file, or a directory to place quickbill-items-template.tsv in
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: TemplateArgs) -> anyhow::Result<()> {
    let Some(output) = args.output else {
        println!("{}", BATCH_TEMPLATE);
        return Ok(());
    };

    let path = if output.is_dir() {
        output.join(TEMPLATE_FILE_NAME)
    } else {
        output
    };

    tokio::fs::write(&path, format!("{}\n", BATCH_TEMPLATE)).await?;
    println!(
        "{} Template written to {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}
