//! The ordered item list backing the active document.

mod totals;

pub use totals::Totals;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::batch::MergeMode;
use crate::error::{BatchError, LedgerError};
use crate::models::item::{
    coerce_price, coerce_quantity, ItemDraft, ItemField, LineItem, NEW_ITEM_DESCRIPTION,
};
use crate::numeric::parse_leading_decimal;

/// Ordered line items of a document.
///
/// Item ids always equal their 1-based positions, every quantity is above
/// zero and every price is non-negative. Index-based operations that fail
/// leave the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct ItemLedger {
    items: Vec<LineItem>,
}

impl Default for ItemLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemLedger {
    /// Create a ledger seeded with the sample items shown on a new document.
    pub fn new() -> Self {
        Self {
            items: vec![
                LineItem::new(1, "Website Design", Decimal::ONE, Decimal::from(120000)),
                LineItem::new(2, "Web Hosting (Annual)", Decimal::ONE, Decimal::from(29900)),
                LineItem::new(3, "SEO Optimization", Decimal::ONE, Decimal::from(50000)),
            ],
        }
    }

    /// Create a ledger holding a single blank item.
    pub fn cleared() -> Self {
        let mut ledger = Self { items: Vec::new() };
        ledger.clear();
        ledger
    }

    /// Rebuild a ledger from stored items, renumbering ids and coercing
    /// out-of-bounds values. An empty list restores the sample items.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        if items.is_empty() {
            return Self::new();
        }

        let mut fixed = 0usize;
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let id = (index + 1) as u32;
                let quantity = coerce_quantity(Some(item.quantity));
                let price = coerce_price(Some(item.price));
                if item.id != id || quantity != item.quantity || price != item.price {
                    fixed += 1;
                }
                LineItem::new(id, item.description, quantity, price)
            })
            .collect();

        if fixed > 0 {
            warn!("Normalized {} restored item(s)", fixed);
        }

        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item. Missing values default to "New Item", 1 and 0.
    pub fn add(
        &mut self,
        description: Option<&str>,
        quantity: Option<Decimal>,
        price: Option<Decimal>,
    ) -> &LineItem {
        let id = self.next_id();
        let item = LineItem::new(
            id,
            description.unwrap_or(NEW_ITEM_DESCRIPTION),
            coerce_quantity(quantity),
            coerce_price(price),
        );
        debug!("Adding item {}: {}", id, item.description);

        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Overwrite one field of the item at `index` from raw user input.
    ///
    /// Quantities that do not parse or are not positive become 1; prices
    /// that do not parse or are negative become 0.
    pub fn update_field(
        &mut self,
        index: usize,
        field: ItemField,
        raw_value: &str,
    ) -> Result<&LineItem, LedgerError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;

        match field {
            ItemField::Description => item.description = raw_value.to_string(),
            ItemField::Quantity => {
                let parsed = parse_leading_decimal(raw_value);
                item.quantity = coerce_quantity(parsed);
                if parsed != Some(item.quantity) {
                    debug!("Quantity {:?} coerced to {}", raw_value, item.quantity);
                }
            }
            ItemField::Price => {
                let parsed = parse_leading_decimal(raw_value);
                item.price = coerce_price(parsed);
                if parsed != Some(item.price) {
                    debug!("Price {:?} coerced to {}", raw_value, item.price);
                }
            }
        }

        Ok(&*item)
    }

    /// Remove the item at `index` and renumber the rest.
    pub fn remove_at(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        if index >= self.items.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        self.renumber();
        debug!("Removed item {}: {}", removed.id, removed.description);

        Ok(removed)
    }

    /// Merge parsed drafts, returning how many items were added.
    ///
    /// An empty batch is refused and the ledger left as it was.
    pub fn merge_batch(
        &mut self,
        drafts: Vec<ItemDraft>,
        mode: MergeMode,
    ) -> Result<usize, BatchError> {
        if drafts.is_empty() {
            return Err(BatchError::EmptyBatch { errors: 0 });
        }

        let count = drafts.len();
        match mode {
            MergeMode::Replace => {
                self.items = drafts
                    .into_iter()
                    .enumerate()
                    .map(|(index, draft)| draft.into_item((index + 1) as u32))
                    .collect();
            }
            MergeMode::Append => {
                let next_id = self.next_id();
                self.items.extend(
                    drafts
                        .into_iter()
                        .enumerate()
                        .map(|(offset, draft)| draft.into_item(next_id + offset as u32)),
                );
            }
        }

        info!("Merged {} item(s) ({}), ledger now has {}", count, mode, self.items.len());
        Ok(count)
    }

    /// Reset to the single default item.
    pub fn clear(&mut self) {
        self.items = vec![LineItem::new(1, NEW_ITEM_DESCRIPTION, Decimal::ONE, Decimal::ZERO)];
    }

    /// Subtotal, tax at `tax_rate` and total of all items.
    pub fn totals(&self, tax_rate: Decimal) -> Totals {
        Totals::compute(self.items.iter().map(LineItem::line_total), tax_rate)
    }

    /// Id the next appended item receives.
    pub fn next_id(&self) -> u32 {
        self.items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.id = (index + 1) as u32;
        }
    }
}

impl From<Vec<LineItem>> for ItemLedger {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<ItemLedger> for Vec<LineItem> {
    fn from(ledger: ItemLedger) -> Self {
        ledger.items
    }
}
