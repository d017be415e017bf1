//! Batch import of line items from pasted or uploaded text.

mod delimiter;
mod parser;

pub use delimiter::{split_fields, Delimiter};
pub use parser::{parse_batch, BatchParser};

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BatchError;
use crate::ledger::Totals;
use crate::models::item::ItemDraft;

/// Sample batch offered for download.
pub const BATCH_TEMPLATE: &str = "Description\tQuantity\tPrice (KES)\n\
Website Design\t1\t120000\n\
Web Hosting\t1\t29900\n\
SEO Optimization\t1\t50000\n\
Domain Registration\t2\t1500";

/// File name suggested for the downloaded template.
pub const TEMPLATE_FILE_NAME: &str = "quickbill-items-template.tsv";

/// Why a batch line was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineErrorKind {
    /// Fewer than two usable fields.
    #[error("Invalid format")]
    InvalidFormat,
    /// Price missing, unparseable or negative.
    #[error("Invalid price")]
    InvalidPrice,
    /// Quantity zero or negative.
    #[error("Invalid quantity")]
    InvalidQuantity,
}

/// A rejected batch line.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Line {line_number}: {kind} - \"{snippet}\"")]
pub struct LineError {
    /// 1-based line number in the submitted text.
    pub line_number: usize,
    pub kind: LineErrorKind,
    /// The offending text.
    pub snippet: String,
}

impl LineError {
    pub fn new(line_number: usize, kind: LineErrorKind, snippet: impl Into<String>) -> Self {
        Self {
            line_number,
            kind,
            snippet: snippet.into(),
        }
    }

    /// Short message without the line reference.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Everything a batch parse produced: the accepted drafts and the rejected
/// lines, both in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub drafts: Vec<ItemDraft>,
    pub errors: Vec<LineError>,
}

impl ParseOutcome {
    /// No draft was accepted.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Totals of the drafts alone, for previewing an import.
    pub fn preview_totals(&self, tax_rate: Decimal) -> Totals {
        Totals::compute(self.drafts.iter().map(ItemDraft::line_total), tax_rate)
    }

    /// One-line error count, `None` when every line parsed.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(format!("Found {} error(s) in batch", self.errors.len()))
        }
    }

    /// Take the drafts, failing when there are none to merge.
    pub fn into_drafts(self) -> Result<Vec<ItemDraft>, BatchError> {
        if self.drafts.is_empty() {
            return Err(BatchError::EmptyBatch {
                errors: self.errors.len(),
            });
        }
        Ok(self.drafts)
    }
}

/// How imported drafts combine with the existing items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Keep existing items and add the drafts after them.
    #[default]
    Append,
    /// Discard existing items.
    Replace,
}

impl FromStr for MergeMode {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" => Ok(MergeMode::Append),
            "replace" => Ok(MergeMode::Replace),
            _ => Err(BatchError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Append => f.write_str("append"),
            MergeMode::Replace => f.write_str("replace"),
        }
    }
}
