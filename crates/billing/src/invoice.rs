use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_catalog::ProductId;
use stockbook_core::rowid_newtype;

/// Invoice identifier (storage-assigned rowid).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(i64);

rowid_newtype!(InvoiceId);

/// Invoice line identifier (storage-assigned rowid).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceLineId(i64);

rowid_newtype!(InvoiceLineId);

/// Human-readable invoice number.
///
/// Derived from the storage-assigned id, which only exists once the header
/// row has been inserted; the number is back-filled in a second step of the
/// same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// `INV-` plus the id zero-padded to five digits. Wider ids keep all
    /// their digits rather than truncating.
    pub fn derive(id: InvoiceId) -> Self {
        Self(format!("INV-{:05}", id.get()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for InvoiceNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monetary totals of an invoice.
///
/// Tax and discount are carried for forward compatibility and are always
/// zero in this version; the grand total is still computed as
/// `total + tax - discount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub total: f64,
    pub tax: f64,
    pub discount: f64,
    pub grand_total: f64,
}

impl InvoiceTotals {
    pub fn from_subtotal(subtotal: f64) -> Self {
        let tax = 0.0;
        let discount = 0.0;
        Self {
            total: subtotal,
            tax,
            discount,
            grand_total: subtotal + tax - discount,
        }
    }
}

/// Invoice header.
///
/// Immutable after creation, except for the number/totals back-fill that
/// happens once inside the sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// `None` only during the placeholder phase, before the back-fill.
    pub number: Option<InvoiceNumber>,
    /// Trimmed; empty when the sale was recorded without a customer.
    pub customer_name: String,
    pub total: f64,
    pub tax: f64,
    pub discount: f64,
    pub grand_total: f64,
    pub created_at: DateTime<Utc>,
}

/// One product-quantity-price entry belonging to an invoice.
///
/// `unit_price` is a snapshot of the product price at sale time; later
/// catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: InvoiceLineId,
    pub invoice_id: InvoiceId,
    pub product_id: ProductId,
    /// Display name of the referenced product, absent when it was deleted
    /// after the sale.
    pub product_name: Option<String>,
    pub qty: f64,
    pub unit_price: f64,
    pub line_total: f64,
}
