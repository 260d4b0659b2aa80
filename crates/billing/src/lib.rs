//! Billing domain module.
//!
//! Invoices, invoice lines and the rules of a single-product sale,
//! implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod invoice;
pub mod sale;

pub use invoice::{Invoice, InvoiceId, InvoiceLine, InvoiceLineId, InvoiceNumber, InvoiceTotals};
pub use sale::{BillingError, Quantity};
