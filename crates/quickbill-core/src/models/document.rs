//! Billing document model: the item ledger plus the form around it.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::config::{BillingConfig, QuickBillConfig};
use crate::ledger::{ItemLedger, Totals};

/// Kind of document being prepared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Price quotation.
    #[default]
    Quotation,
    /// Invoice requesting payment.
    Invoice,
    /// Receipt confirming payment.
    Receipt,
}

impl DocumentType {
    /// Heading printed on the document.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Quotation => "QUOTATION",
            DocumentType::Invoice => "INVOICE",
            DocumentType::Receipt => "RECEIPT",
        }
    }

    /// Parse a document type from its name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "quotation" | "quote" => Some(DocumentType::Quotation),
            "invoice" => Some(DocumentType::Invoice),
            "receipt" => Some(DocumentType::Receipt),
            _ => None,
        }
    }
}

/// Issuing company details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Logo as a data URL, empty when none was uploaded.
    pub logo: String,
}

/// Client (bill-to) details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Document number and date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    pub number: String,

    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

/// Empty or malformed dates restore as unset instead of failing the load.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

/// Unknown or missing type names restore as the default type.
fn lenient_type<'de, D>(deserializer: D) -> Result<DocumentType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(DocumentType::from_str)
        .unwrap_or_default())
}

/// A complete quotation, invoice or receipt draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type", deserialize_with = "lenient_type")]
    pub document_type: DocumentType,

    pub company: Company,

    pub client: Client,

    #[serde(rename = "document")]
    pub info: DocumentInfo,

    /// Line items on the document.
    pub items: ItemLedger,

    /// Free-form terms and notes.
    pub terms: String,

    /// Currency code (default: KES).
    pub currency: String,

    /// When the document was last written to storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            document_type: DocumentType::default(),
            company: Company::default(),
            client: Client::default(),
            info: DocumentInfo::default(),
            items: ItemLedger::default(),
            terms: String::new(),
            currency: "KES".to_string(),
            last_saved: None,
        }
    }
}

impl Document {
    /// Create a fresh document dated `today`, seeded with sample items.
    pub fn new(today: NaiveDate, config: &QuickBillConfig) -> Self {
        Self {
            document_type: config.document.default_type,
            info: DocumentInfo {
                number: default_document_number(&config.document.number_prefix, today.year()),
                date: Some(today),
            },
            currency: config.billing.currency.clone(),
            ..Default::default()
        }
    }

    /// Clear every field and leave a single blank item.
    pub fn reset(&mut self, today: NaiveDate, config: &QuickBillConfig) {
        *self = Self::new(today, config);
        self.items.clear();
    }

    /// Heading for the current document type.
    pub fn title(&self) -> &'static str {
        self.document_type.title()
    }

    /// Totals at the configured VAT rate.
    pub fn totals(&self, billing: &BillingConfig) -> Totals {
        self.items.totals(billing.tax_rate())
    }

    /// Record a save.
    pub fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.last_saved = Some(now);
    }
}

/// First document number of the year, e.g. `QB-2024-001`.
pub fn default_document_number(prefix: &str, year: i32) -> String {
    format!("{}-{}-001", prefix, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_document_type_titles() {
        assert_eq!(DocumentType::Quotation.title(), "QUOTATION");
        assert_eq!(DocumentType::from_str("Invoice"), Some(DocumentType::Invoice));
        assert_eq!(DocumentType::from_str("receipt").map(|t| t.title()), Some("RECEIPT"));
        assert_eq!(DocumentType::from_str("memo"), None);
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new(today(), &QuickBillConfig::default());
        assert_eq!(doc.info.number, "QB-2024-001");
        assert_eq!(doc.info.date, Some(today()));
        assert_eq!(doc.currency, "KES");
        assert_eq!(doc.items.len(), 3);
    }

    #[test]
    fn test_reset_leaves_single_blank_item() {
        let mut doc = Document::new(today(), &QuickBillConfig::default());
        doc.company.name = "Acme Ltd".to_string();
        doc.terms = "Payment within 14 days".to_string();

        doc.reset(today(), &QuickBillConfig::default());

        assert_eq!(doc.company, Company::default());
        assert_eq!(doc.terms, "");
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items.items()[0].description, "New Item");
    }

    #[test]
    fn test_restore_with_missing_fields() {
        let json = r#"{
            "type": "invoice",
            "company": { "name": "Acme Ltd" },
            "document": { "number": "INV-7", "date": "" },
            "items": [ { "id": 5, "description": "Consulting", "quantity": 2, "price": 4000 } ]
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();

        assert_eq!(doc.document_type, DocumentType::Invoice);
        assert_eq!(doc.company.name, "Acme Ltd");
        assert_eq!(doc.company.email, "");
        assert_eq!(doc.info.number, "INV-7");
        assert_eq!(doc.info.date, None);
        assert_eq!(doc.currency, "KES");
        assert_eq!(doc.items.items()[0].id, 1);
        assert_eq!(doc.items.items()[0].quantity, Decimal::from(2));
    }

    #[test]
    fn test_restore_with_unknown_type() {
        let json = r#"{
            "type": "memo",
            "company": { "name": "Acme Ltd" },
            "terms": "Net 30"
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();

        assert_eq!(doc.document_type, DocumentType::Quotation);
        assert_eq!(doc.company.name, "Acme Ltd");
        assert_eq!(doc.terms, "Net 30");
    }

    #[test]
    fn test_serialized_shape() {
        let mut doc = Document::new(today(), &QuickBillConfig::default());
        doc.mark_saved("2024-03-15T10:00:00Z".parse().unwrap());

        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["type"], "quotation");
        assert_eq!(json["document"]["date"], "2024-03-15");
        assert_eq!(json["items"][0]["description"], "Website Design");
        assert!(json.get("lastSaved").is_some());
    }

    #[test]
    fn test_totals_follow_vat_switch() {
        let doc = Document::new(today(), &QuickBillConfig::default());
        let mut billing = BillingConfig::default();

        assert_eq!(doc.totals(&billing).tax, Decimal::from(31984));

        billing.vat_enabled = false;
        assert_eq!(doc.totals(&billing).tax, Decimal::ZERO);
    }
}
