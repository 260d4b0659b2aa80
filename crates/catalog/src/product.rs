use serde::{Deserialize, Serialize};

use stockbook_core::{rowid_newtype, DomainError, DomainResult};

/// Product identifier (storage-assigned rowid).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

rowid_newtype!(ProductId);

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Snapshotted onto invoice lines at sale time.
    pub price: f64,
    /// Quantity on hand. Fractional stock is allowed (goods sold by weight).
    pub stock: f64,
}

/// Clamp a numeric field to `default` unless it is a finite, non-negative
/// number.
///
/// Price and stock input is treated forgivingly: out-of-range or non-numeric
/// values fall back instead of failing the whole request.
pub fn non_negative_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

/// Validated input for creating or overwriting a product.
///
/// Construction is the only validation gate: a draft always carries a
/// trimmed, non-empty name and finite, non-negative price and stock.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: f64,
    stock: f64,
}

impl ProductDraft {
    pub fn new(name: &str, price: f64, stock: f64) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        Ok(Self {
            name: name.to_string(),
            price: non_negative_or(price, 0.0),
            stock: non_negative_or(stock, 0.0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> f64 {
        self.stock
    }
}
