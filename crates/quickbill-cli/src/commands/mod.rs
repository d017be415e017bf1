//! Subcommands and the document session they share.

pub mod config;
pub mod edit;
pub mod import;
pub mod items;
pub mod show;
pub mod template;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, warn};

use quickbill_core::models::config::QuickBillConfig;
use quickbill_core::{Document, DocumentStore, FileStore};

/// Options shared by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quickbill")
        .join("config.json")
}

/// Config file in use: `--config`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit `--config` must exist; the default file
/// is optional.
pub fn load_config(global: &GlobalOpts) -> anyhow::Result<QuickBillConfig> {
    if let Some(path) = &global.config {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(QuickBillConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(QuickBillConfig::from_file(&path)?)
    } else {
        Ok(QuickBillConfig::default())
    }
}

fn data_dir(global: &GlobalOpts, config: &QuickBillConfig) -> PathBuf {
    global
        .data_dir
        .clone()
        .or_else(|| config.storage.data_dir.clone())
        .or_else(|| dirs::data_dir().map(|d| d.join("quickbill")))
        .unwrap_or_else(|| PathBuf::from(".quickbill"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The saved document together with its config and store.
pub struct Session {
    pub config: QuickBillConfig,
    pub store: DocumentStore<FileStore>,
    pub document: Document,
}

impl Session {
    /// Load config and the saved document, starting a fresh document when
    /// nothing is saved or the saved copy cannot be read.
    pub fn open(global: &GlobalOpts) -> anyhow::Result<Self> {
        let config = load_config(global)?;
        let dir = data_dir(global, &config);
        let store = DocumentStore::with_key(FileStore::new(&dir), &config.storage.document_key);

        let document = match store.load() {
            Ok(Some(document)) => document,
            Ok(None) => Document::new(today(), &config),
            Err(e) => {
                warn!("Error loading saved data, starting a new document: {}", e);
                Document::new(today(), &config)
            }
        };

        Ok(Self {
            config,
            store,
            document,
        })
    }

    pub fn save(&mut self) -> anyhow::Result<()> {
        self.store.save(&mut self.document, Utc::now())?;
        Ok(())
    }

    pub fn data_file(&self) -> PathBuf {
        self.store.backend().path_for(self.store.key())
    }
}

/// Lowercased extension of `path`, empty when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
