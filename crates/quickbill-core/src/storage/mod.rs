//! Document persistence in a key-value store.

#[cfg(feature = "native")]
mod file;

#[cfg(feature = "native")]
pub use file::FileStore;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::document::Document;

/// Slot the working document is kept under.
pub const DOCUMENT_KEY: &str = "quickbill_document";

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value storage, e.g. browser `localStorage` or a directory.
pub trait KeyValueStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key`. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A [`Document`] kept as JSON under one key of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct DocumentStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> DocumentStore<S> {
    /// Use the default document slot.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DOCUMENT_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Stamp `document` as saved at `now` and write it.
    pub fn save(&mut self, document: &mut Document, now: DateTime<Utc>) -> Result<()> {
        document.mark_saved(now);
        let json = serde_json::to_string(document).map_err(|e| StorageError::Backend(e.to_string()))?;
        self.backend.set(&self.key, &json)?;

        info!("Saved document {} ({} items)", document.info.number, document.items.len());
        Ok(())
    }

    /// Read the stored document, `None` when the slot is empty.
    pub fn load(&self) -> Result<Option<Document>> {
        let Some(json) = self.backend.get(&self.key)? else {
            debug!("No stored document under {:?}", self.key);
            return Ok(None);
        };

        let document: Document = serde_json::from_str(&json).map_err(|source| {
            StorageError::Corrupt {
                key: self.key.clone(),
                source,
            }
        })?;

        debug!("Loaded document {} ({} items)", document.info.number, document.items.len());
        Ok(Some(document))
    }

    /// Delete the stored document.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{parse_batch, MergeMode};
    use crate::models::config::QuickBillConfig;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn document() -> Document {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        Document::new(today, &QuickBillConfig::default())
    }

    fn now() -> DateTime<Utc> {
        "2024-06-01T09:30:00Z".parse().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let mut store = DocumentStore::new(MemoryStore::new());
        let mut doc = document();
        doc.client.name = "Jane Wanjiku".to_string();
        let drafts = parse_batch("Domain Registration\t2\t1500").drafts;
        doc.items.merge_batch(drafts, MergeMode::Append).unwrap();

        store.save(&mut doc, now()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.last_saved, Some(now()));
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_empty_slot() {
        let store = DocumentStore::new(MemoryStore::new());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_slot() {
        let mut backend = MemoryStore::new();
        backend.set(DOCUMENT_KEY, "{ broken").unwrap();
        let store = DocumentStore::new(backend);

        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == DOCUMENT_KEY));
    }

    #[test]
    fn test_unknown_type_loads_as_quotation() {
        let mut backend = MemoryStore::new();
        backend
            .set(DOCUMENT_KEY, r#"{ "type": "memo", "client": { "name": "Acme" } }"#)
            .unwrap();

        let doc = DocumentStore::new(backend).load().unwrap().unwrap();

        assert_eq!(doc.title(), "QUOTATION");
        assert_eq!(doc.client.name, "Acme");
    }

    #[test]
    fn test_clear() {
        let mut store = DocumentStore::with_key(MemoryStore::new(), "draft");
        store.save(&mut document(), now()).unwrap();
        assert!(store.backend().get("draft").unwrap().is_some());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_restores_browser_saved_json() {
        let json = r#"{
            "type": "receipt",
            "company": { "name": "QuickBill Ltd", "email": "", "phone": "", "address": "", "logo": "" },
            "client": { "name": "Acme", "email": "", "address": "" },
            "document": { "number": "QB-2024-014", "date": "2024-05-02" },
            "items": [
                { "id": 1, "description": "Website Design", "quantity": 1, "price": 120000 },
                { "id": 2, "description": "Web Hosting", "quantity": 1, "price": 29900 }
            ],
            "terms": "",
            "currency": "KES",
            "lastSaved": "2024-05-02T08:15:00.000Z"
        }"#;
        let mut backend = MemoryStore::new();
        backend.set(DOCUMENT_KEY, json).unwrap();

        let doc = DocumentStore::new(backend).load().unwrap().unwrap();

        assert_eq!(doc.title(), "RECEIPT");
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.info.date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(doc.items.totals(Decimal::ZERO).subtotal, Decimal::from(149900));
    }
}
