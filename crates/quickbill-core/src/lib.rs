//! Core library for QuickBill document building.
//!
//! This crate provides:
//! - Batch line-item parsing from pasted or uploaded text
//! - The item ledger backing a quotation, invoice or receipt
//! - Subtotal/VAT/total calculation
//! - Document persistence as JSON in a key-value store

pub mod error;
pub mod format;
pub mod models;
pub mod numeric;
pub mod batch;
pub mod ledger;
pub mod storage;

pub use error::{BatchError, LedgerError, QuickBillError, Result, StorageError};
pub use models::config::{BillingConfig, QuickBillConfig};
pub use models::document::{Client, Company, Document, DocumentInfo, DocumentType};
pub use models::item::{ItemDraft, ItemField, LineItem};
pub use batch::{BatchParser, LineError, LineErrorKind, MergeMode, ParseOutcome};
pub use ledger::{ItemLedger, Totals};
pub use storage::{DocumentStore, KeyValueStore, MemoryStore};
#[cfg(feature = "native")]
pub use storage::FileStore;
