//! Config command - manage configuration.

use std::fs;
use std::path::Path;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use quickbill_core::QuickBillConfig;

use super::{config_path, GlobalOpts};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "billing.vat_rate")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "billing.vat_enabled")
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs, global: &GlobalOpts) -> anyhow::Result<()> {
    let path = config_path(global);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<QuickBillConfig> {
    if path.exists() {
        Ok(QuickBillConfig::from_file(path)?)
    } else {
        Ok(QuickBillConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    QuickBillConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

/// Follow a dotted key such as `billing.vat_rate` through the config JSON.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

/// Apply `key = value` to a config, validating the result.
fn apply(config: &QuickBillConfig, key: &str, value: &str) -> anyhow::Result<(QuickBillConfig, Value)> {
    // Bare words are taken as strings
    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(config)?;
    let (parent_key, field) = match key.rsplit_once('.') {
        Some((parent, field)) => (Some(parent), field),
        None => (None, key),
    };

    let parent = match parent_key {
        Some(parent) => lookup_mut(&mut json, parent),
        None => Some(&mut json),
    }
    .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;

    let Some(object) = parent.as_object_mut() else {
        anyhow::bail!("Cannot set value at non-object path: {}", key);
    };
    object.insert(field.to_string(), parsed.clone());

    let updated: QuickBillConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    Ok((updated, parsed))
}

fn lookup_mut<'a>(json: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.').try_fold(json, |current, part| current.get_mut(part))
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let (updated, parsed) = apply(&config, key, value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    updated.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'quickbill config init' to create a configuration file.");
    }

    Ok(())
}
