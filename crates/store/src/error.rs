//! Store error model.

use thiserror::Error;

use stockbook_billing::BillingError;

/// Operational storage failure.
///
/// Not retried internally; callers surface it as a failure. Multi-statement
/// writes run inside transactions, so no partial state is left behind.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Outcome of a sale that did not complete.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Recoverable, user-facing rejection; nothing was persisted.
    #[error(transparent)]
    Rejected(#[from] BillingError),

    /// Operational failure; the transaction rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(StoreError::Storage(err))
    }
}
