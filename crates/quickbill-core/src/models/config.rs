//! Configuration structures for QuickBill.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::DocumentType;
use crate::error::{QuickBillError, Result};
use crate::storage::DOCUMENT_KEY;

/// Main configuration for QuickBill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickBillConfig {
    /// Tax and currency configuration.
    pub billing: BillingConfig,

    /// Document storage configuration.
    pub storage: StorageConfig,

    /// New document defaults.
    pub document: DocumentConfig,
}

/// Tax and currency configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Apply VAT to document totals.
    pub vat_enabled: bool,

    /// VAT rate as a fraction (0.16 for 16%).
    pub vat_rate: Decimal,

    /// Currency code shown next to amounts.
    pub currency: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            vat_enabled: true,
            vat_rate: Decimal::new(16, 2),
            currency: "KES".to_string(),
        }
    }
}

impl BillingConfig {
    /// The rate to pass to totals: the VAT rate, or zero when VAT is off.
    pub fn tax_rate(&self) -> Decimal {
        if self.vat_enabled {
            self.vat_rate
        } else {
            Decimal::ZERO
        }
    }

    /// Label for the tax line, e.g. `VAT (16%)`.
    pub fn vat_label(&self) -> String {
        let percent = self.tax_rate().saturating_mul(Decimal::ONE_HUNDRED).normalize();
        format!("VAT ({}%)", percent)
    }
}

/// Document storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding stored documents (platform data dir when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Storage slot the working document is kept under.
    pub document_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            document_key: DOCUMENT_KEY.to_string(),
        }
    }
}

/// Defaults applied to new documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Document type selected for new documents.
    pub default_type: DocumentType,

    /// Prefix of generated document numbers.
    pub number_prefix: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_type: DocumentType::Quotation,
            number_prefix: "QB".to_string(),
        }
    }
}

impl QuickBillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            QuickBillError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
