//! The sale transaction: validate, invoice, decrement stock, finalize.

use chrono::Utc;

use stockbook_billing::{BillingError, Invoice, InvoiceNumber, InvoiceTotals, Quantity};
use stockbook_catalog::ProductId;

use crate::catalog::SqliteCatalogStore;
use crate::db::Database;
use crate::error::CheckoutError;
use crate::invoices::SqliteInvoiceStore;

/// Orchestrates a single-product sale against the catalog and invoice
/// tables.
///
/// Every step after quantity validation runs inside one transaction: a
/// rejected or failed sale leaves no invoice, no line and no stock change
/// behind.
#[derive(Clone)]
pub struct BillingService {
    db: Database,
}

impl BillingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Sell `qty` units of one product to `customer_name` (blank allowed).
    ///
    /// Returns the completed invoice, including its freshly derived display
    /// number.
    pub async fn sell(
        &self,
        customer_name: &str,
        product_id: ProductId,
        qty: f64,
    ) -> Result<Invoice, CheckoutError> {
        let qty = Quantity::new(qty).map_err(CheckoutError::Rejected)?;

        let mut tx = self.db.pool().begin().await?;

        let product = SqliteCatalogStore::fetch(&mut tx, product_id)
            .await?
            .ok_or(BillingError::ProductNotFound(product_id))?;

        if product.stock < qty.get() {
            return Err(BillingError::InsufficientStock {
                name: product.name,
                available: product.stock,
                requested: qty.get(),
            }
            .into());
        }

        // Snapshot the price now; later catalog edits must not rewrite this
        // sale.
        let unit_price = product.price;
        let created_at = Utc::now();

        let invoice_id =
            SqliteInvoiceStore::insert_header(&mut tx, customer_name, created_at).await?;
        SqliteInvoiceStore::insert_line(&mut tx, invoice_id, product_id, qty.get(), unit_price)
            .await?;

        // The UPDATE's `stock >= qty` guard is the authoritative check; the
        // read above only feeds the rejection message.
        let decremented =
            SqliteCatalogStore::decrement_stock_on(&mut tx, product_id, qty.get()).await?;
        if !decremented {
            return Err(BillingError::InsufficientStock {
                name: product.name,
                available: product.stock,
                requested: qty.get(),
            }
            .into());
        }

        let subtotal = qty.get() * unit_price;
        let number = InvoiceNumber::derive(invoice_id);
        let totals = InvoiceTotals::from_subtotal(subtotal);
        SqliteInvoiceStore::apply_totals(&mut tx, invoice_id, &number, totals).await?;

        tx.commit().await?;

        tracing::info!(
            invoice = %number,
            product_id = %product_id,
            qty = qty.get(),
            grand_total = totals.grand_total,
            "sale completed"
        );

        Ok(Invoice {
            id: invoice_id,
            number: Some(number),
            customer_name: customer_name.trim().to_string(),
            total: totals.total,
            tax: totals.tax,
            discount: totals.discount,
            grand_total: totals.grand_total,
            created_at,
        })
    }
}
