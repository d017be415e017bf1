//! WASM bindings for QuickBill.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Documents are kept in `localStorage` when the page has one, in memory
//! otherwise.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use quickbill_core::batch::BATCH_TEMPLATE;
use quickbill_core::storage::Result as StorageResult;
use quickbill_core::{
    BatchParser, Document, DocumentStore, DocumentType, ItemDraft, ItemField, KeyValueStore,
    LineError, MemoryStore, MergeMode, ParseOutcome, QuickBillConfig, StorageError, Totals,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Contents of the downloadable batch template.
#[wasm_bindgen]
pub fn batch_template() -> String {
    BATCH_TEMPLATE.to_string()
}

/// Format an amount with two decimals and thousand separators (1,234.56).
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> String {
    quickbill_core::format::format_amount(Decimal::from_f64(amount).unwrap_or_default())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Browser `localStorage`, or memory where there is none (Node.js, workers).
enum BrowserStore {
    Local(web_sys::Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    fn detect() -> Self {
        match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => BrowserStore::Local(storage),
            None => {
                web_sys::console::warn_1(&"localStorage unavailable, keeping data in memory".into());
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

fn backend_err(e: JsValue) -> StorageError {
    StorageError::Backend(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            BrowserStore::Local(storage) => storage.get_item(key).map_err(backend_err),
            BrowserStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            BrowserStore::Local(storage) => storage.set_item(key, value).map_err(backend_err),
            BrowserStore::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        match self {
            BrowserStore::Local(storage) => storage.remove_item(key).map_err(backend_err),
            BrowserStore::Memory(store) => store.remove(key),
        }
    }
}

#[derive(Serialize)]
struct LineErrorView<'a> {
    line_number: usize,
    message: String,
    snippet: &'a str,
    display: String,
}

impl<'a> From<&'a LineError> for LineErrorView<'a> {
    fn from(err: &'a LineError) -> Self {
        Self {
            line_number: err.line_number,
            message: err.message(),
            snippet: &err.snippet,
            display: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct PreviewView<'a> {
    drafts: &'a [ItemDraft],
    errors: Vec<LineErrorView<'a>>,
    error_summary: Option<String>,
    totals: Totals,
}

#[derive(Serialize)]
struct ImportView<'a> {
    added: usize,
    errors: Vec<LineErrorView<'a>>,
    error_summary: Option<String>,
}

/// Document builder for browser use.
#[wasm_bindgen]
pub struct QuickBill {
    document: Document,
    config: QuickBillConfig,
    store: DocumentStore<BrowserStore>,
    parser: BatchParser,
}

#[wasm_bindgen]
impl QuickBill {
    /// Create a builder holding a fresh document with sample items.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = QuickBillConfig::default();
        Self {
            document: Document::new(today(), &config),
            store: DocumentStore::with_key(BrowserStore::detect(), &config.storage.document_key),
            config,
            parser: BatchParser::new(),
        }
    }

    /// Parse batch text for preview without touching the items.
    #[wasm_bindgen]
    pub fn parse_batch(&self, text: &str) -> Result<JsValue, JsValue> {
        let outcome = self.parser.parse(text);
        to_js(&self.preview(&outcome))
    }

    /// Parse batch text and merge it ("append" or "replace"), then save.
    ///
    /// Throws when no line parsed; the items are left unchanged.
    #[wasm_bindgen]
    pub fn import_batch(&mut self, text: &str, mode: &str) -> Result<JsValue, JsValue> {
        let mode: MergeMode = mode.parse().map_err(js_err)?;
        let outcome = self.parser.parse(text);
        let errors: Vec<LineErrorView<'_>> = outcome.errors.iter().map(LineErrorView::from).collect();

        if outcome.is_empty() {
            return Err(js_err(quickbill_core::BatchError::EmptyBatch {
                errors: errors.len(),
            }));
        }

        let added = self
            .document
            .items
            .merge_batch(outcome.drafts.clone(), mode)
            .map_err(js_err)?;
        self.save()?;

        to_js(&ImportView {
            added,
            errors,
            error_summary: outcome.error_summary(),
        })
    }

    /// Append an item. Missing or invalid values take the defaults.
    #[wasm_bindgen]
    pub fn add_item(
        &mut self,
        description: Option<String>,
        quantity: Option<f64>,
        price: Option<f64>,
    ) -> Result<JsValue, JsValue> {
        let item = self.document.items.add(
            description.as_deref(),
            quantity.and_then(Decimal::from_f64),
            price.and_then(Decimal::from_f64),
        );
        to_js(item)
    }

    /// Set one field ("description", "quantity" or "price") of the item at
    /// `index` from raw form input.
    #[wasm_bindgen]
    pub fn update_item(&mut self, index: usize, field: &str, value: &str) -> Result<JsValue, JsValue> {
        let field: ItemField = field.parse().map_err(js_err)?;
        let item = self
            .document
            .items
            .update_field(index, field, value)
            .map_err(js_err)?;
        to_js(item)
    }

    #[wasm_bindgen]
    pub fn remove_item(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let removed = self.document.items.remove_at(index).map_err(js_err)?;
        to_js(&removed)
    }

    /// Reset the items to a single blank one.
    #[wasm_bindgen]
    pub fn clear_items(&mut self) {
        self.document.items.clear();
    }

    /// Clear all document data, including the stored copy.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.store.clear().map_err(js_err)?;
        self.document.reset(today(), &self.config);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn items(&self) -> Result<JsValue, JsValue> {
        to_js(&self.document.items)
    }

    /// Subtotal, VAT and total at the current VAT setting.
    #[wasm_bindgen]
    pub fn totals(&self) -> Result<JsValue, JsValue> {
        to_js(&self.document.totals(&self.config.billing))
    }

    /// The whole document in its stored shape.
    #[wasm_bindgen]
    pub fn document(&self) -> Result<JsValue, JsValue> {
        to_js(&self.document)
    }

    /// Heading for the current document type.
    #[wasm_bindgen]
    pub fn title(&self) -> String {
        self.document.title().to_string()
    }

    /// Write the document to storage.
    #[wasm_bindgen]
    pub fn save(&mut self) -> Result<(), JsValue> {
        self.store.save(&mut self.document, now()).map_err(js_err)
    }

    /// Restore the stored document. Returns false when nothing is stored.
    #[wasm_bindgen]
    pub fn load(&mut self) -> Result<bool, JsValue> {
        match self.store.load().map_err(js_err)? {
            Some(document) => {
                self.document = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Switch between "quotation", "invoice" and "receipt".
    #[wasm_bindgen]
    pub fn set_document_type(&mut self, document_type: &str) -> Result<(), JsValue> {
        self.document.document_type = DocumentType::from_str(document_type)
            .ok_or_else(|| js_err(format!("unknown document type: {}", document_type)))?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_vat_enabled(&mut self, enabled: bool) {
        self.config.billing.vat_enabled = enabled;
    }

    #[wasm_bindgen]
    pub fn vat_label(&self) -> String {
        self.config.billing.vat_label()
    }

    #[wasm_bindgen]
    pub fn set_company(&mut self, name: &str, email: &str, phone: &str, address: &str) {
        let company = &mut self.document.company;
        company.name = name.to_string();
        company.email = email.to_string();
        company.phone = phone.to_string();
        company.address = address.to_string();
    }

    /// Set the logo from a data URL, empty to remove it.
    #[wasm_bindgen]
    pub fn set_logo(&mut self, data_url: &str) {
        self.document.company.logo = data_url.to_string();
    }

    #[wasm_bindgen]
    pub fn set_client(&mut self, name: &str, email: &str, address: &str) {
        let client = &mut self.document.client;
        client.name = name.to_string();
        client.email = email.to_string();
        client.address = address.to_string();
    }

    /// Set the document number and date (YYYY-MM-DD, empty to unset).
    #[wasm_bindgen]
    pub fn set_document_info(&mut self, number: &str, date: &str) {
        self.document.info.number = number.to_string();
        self.document.info.date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok();
    }

    #[wasm_bindgen]
    pub fn set_terms(&mut self, terms: &str) {
        self.document.terms = terms.to_string();
    }

    /// The document as pretty-printed JSON, for export.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(&self.document).map_err(js_err)
    }
}

impl QuickBill {
    fn preview<'a>(&self, outcome: &'a ParseOutcome) -> PreviewView<'a> {
        PreviewView {
            drafts: &outcome.drafts,
            errors: outcome.errors.iter().map(LineErrorView::from).collect(),
            error_summary: outcome.error_summary(),
            totals: outcome.preview_totals(self.config.billing.tax_rate()),
        }
    }
}

impl Default for QuickBill {
    fn default() -> Self {
        Self::new()
    }
}
