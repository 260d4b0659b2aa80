//! Persistence layer: SQLite-backed stores and the checkout transaction.
//!
//! Components receive an explicit [`Database`] handle at construction time;
//! there is no global connection state.

pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod invoices;

pub use catalog::SqliteCatalogStore;
pub use checkout::BillingService;
pub use dashboard::{DashboardSummary, LowStockEntry, SqliteDashboard, TopSeller};
pub use db::Database;
pub use error::{CheckoutError, StoreError};
pub use invoices::SqliteInvoiceStore;

#[cfg(test)]
mod integration_tests;
