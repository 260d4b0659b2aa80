use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockbook_catalog::ProductId;

/// Why a sale was rejected.
///
/// These are recoverable, user-facing rejections: the caller reports the
/// message and no state has changed. Operational failures are a separate
/// concern of the store layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BillingError {
    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("not enough stock for '{name}'. In stock: {available}, requested: {requested}")]
    InsufficientStock {
        name: String,
        available: f64,
        requested: f64,
    },
}

/// A validated sale quantity: finite and strictly positive.
///
/// Fractional quantities are allowed (goods sold by weight or length).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    pub fn new(value: f64) -> Result<Self, BillingError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(BillingError::InvalidQuantity(value))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}
