//! Items command - edit the line items one at a time.

use clap::{Args, Subcommand};
use console::style;

use quickbill_core::numeric::parse_leading_decimal;
use quickbill_core::ItemField;

use super::{today, GlobalOpts, Session};

/// Arguments for the items command.
#[derive(Args)]
pub struct ItemsArgs {
    #[command(subcommand)]
    command: ItemsCommand,
}

#[derive(Subcommand)]
enum ItemsCommand {
    /// Add an item
    Add {
        /// Item description
        #[arg(default_value = "New Item")]
        description: String,

        /// Quantity (default: 1)
        #[arg(short, long)]
        quantity: Option<String>,

        /// Unit price (default: 0)
        #[arg(short, long)]
        price: Option<String>,
    },

    /// Change one field of an item
    Update {
        /// Row number as shown by `quickbill show`
        row: usize,

        /// Field to change: description, quantity or price
        #[arg(value_parser = parse_field)]
        field: ItemField,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Remove an item
    Remove {
        /// Row number as shown by `quickbill show`
        row: usize,
    },

    /// Reset the items to a single blank one
    Clear,
}

fn parse_field(s: &str) -> Result<ItemField, String> {
    s.parse().map_err(|e: quickbill_core::LedgerError| e.to_string())
}

/// Rows are 1-based on the command line.
fn row_index(row: usize) -> anyhow::Result<usize> {
    row.checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Row numbers start at 1"))
}

pub fn run(args: ItemsArgs, global: &GlobalOpts) -> anyhow::Result<()> {
    let mut session = Session::open(global)?;
    let items = &mut session.document.items;

    let message = match args.command {
        ItemsCommand::Add {
            description,
            quantity,
            price,
        } => {
            let item = items.add(
                Some(&description),
                quantity.as_deref().and_then(parse_leading_decimal),
                price.as_deref().and_then(parse_leading_decimal),
            );
            format!("Added item {}: {}", item.id, item.description)
        }
        ItemsCommand::Update { row, field, value } => {
            let item = items.update_field(row_index(row)?, field, &value)?;
            format!("Updated {} of item {}: {}", field, row, item.description)
        }
        ItemsCommand::Remove { row } => {
            let removed = items.remove_at(row_index(row)?)?;
            format!("Removed {}", removed.description)
        }
        ItemsCommand::Clear => {
            items.clear();
            "Cleared all items".to_string()
        }
    };

    session.save()?;
    println!("{} {}", style("✓").green(), message);

    Ok(())
}

/// Clear every document field and the stored copy.
pub fn reset(global: &GlobalOpts) -> anyhow::Result<()> {
    let mut session = Session::open(global)?;

    session.store.clear()?;
    session.document.reset(today(), &session.config);
    session.save()?;

    println!("{} All data cleared", style("✓").green());

    Ok(())
}
