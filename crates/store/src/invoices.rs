//! Invoice persistence: headers, lines, reads and deletion.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use stockbook_billing::{
    Invoice, InvoiceId, InvoiceLine, InvoiceLineId, InvoiceNumber, InvoiceTotals,
};
use stockbook_catalog::ProductId;

use crate::db::Database;
use crate::error::StoreError;

/// SQLite-backed store for [`Invoice`] headers and their lines.
#[derive(Clone)]
pub struct SqliteInvoiceStore {
    db: Database,
}

const HEADER_COLUMNS: &str =
    "id, number, customer_name, total, tax, discount, grand_total, created_at";

fn invoice_from_row(row: &SqliteRow) -> Result<Invoice, sqlx::Error> {
    Ok(Invoice {
        id: InvoiceId::new(row.try_get("id")?),
        number: row
            .try_get::<Option<String>, _>("number")?
            .map(InvoiceNumber::from),
        customer_name: row.try_get("customer_name")?,
        total: row.try_get("total")?,
        tax: row.try_get("tax")?,
        discount: row.try_get("discount")?,
        grand_total: row.try_get("grand_total")?,
        created_at: row.try_get("created_at")?,
    })
}

fn line_from_row(row: &SqliteRow) -> Result<InvoiceLine, sqlx::Error> {
    Ok(InvoiceLine {
        id: InvoiceLineId::new(row.try_get("id")?),
        invoice_id: InvoiceId::new(row.try_get("invoice_id")?),
        product_id: ProductId::new(row.try_get("product_id")?),
        product_name: row.try_get("product_name")?,
        qty: row.try_get("qty")?,
        unit_price: row.try_get("unit_price")?,
        line_total: row.try_get("line_total")?,
    })
}

impl SqliteInvoiceStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a header with the number unset and zeroed totals, returning the
    /// generated id.
    ///
    /// The display number is derived from that id, so it can only be
    /// back-filled afterwards via [`SqliteInvoiceStore::finalize`].
    pub async fn create_header(&self, customer_name: &str) -> Result<InvoiceId, StoreError> {
        let mut conn = self.db.pool().acquire().await?;
        Ok(Self::insert_header(&mut conn, customer_name, Utc::now()).await?)
    }

    pub(crate) async fn insert_header(
        conn: &mut SqliteConnection,
        customer_name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<InvoiceId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO invoices (number, customer_name, created_at) VALUES (NULL, ?, ?)",
        )
        .bind(customer_name.trim())
        .bind(created_at)
        .execute(conn)
        .await?;
        Ok(InvoiceId::new(result.last_insert_rowid()))
    }

    /// Insert one line, computing `line_total = qty * unit_price`.
    pub async fn add_line(
        &self,
        invoice_id: InvoiceId,
        product_id: ProductId,
        qty: f64,
        unit_price: f64,
    ) -> Result<InvoiceLineId, StoreError> {
        let mut conn = self.db.pool().acquire().await?;
        Ok(Self::insert_line(&mut conn, invoice_id, product_id, qty, unit_price).await?)
    }

    pub(crate) async fn insert_line(
        conn: &mut SqliteConnection,
        invoice_id: InvoiceId,
        product_id: ProductId,
        qty: f64,
        unit_price: f64,
    ) -> Result<InvoiceLineId, sqlx::Error> {
        let line_total = qty * unit_price;
        let result = sqlx::query(
            "INSERT INTO invoice_items (invoice_id, product_id, qty, unit_price, line_total) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(invoice_id.get())
        .bind(product_id.get())
        .bind(qty)
        .bind(unit_price)
        .bind(line_total)
        .execute(conn)
        .await?;
        Ok(InvoiceLineId::new(result.last_insert_rowid()))
    }

    /// Back-fill the display number and totals on an existing header.
    pub async fn finalize(
        &self,
        id: InvoiceId,
        number: &InvoiceNumber,
        totals: InvoiceTotals,
    ) -> Result<(), StoreError> {
        let mut conn = self.db.pool().acquire().await?;
        Ok(Self::apply_totals(&mut conn, id, number, totals).await?)
    }

    pub(crate) async fn apply_totals(
        conn: &mut SqliteConnection,
        id: InvoiceId,
        number: &InvoiceNumber,
        totals: InvoiceTotals,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE invoices SET number = ?, total = ?, tax = ?, discount = ?, grand_total = ? \
             WHERE id = ?",
        )
        .bind(number.as_str())
        .bind(totals.total)
        .bind(totals.tax)
        .bind(totals.discount)
        .bind(totals.grand_total)
        .bind(id.get())
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let sql = format!("SELECT {HEADER_COLUMNS} FROM invoices WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.as_ref().map(invoice_from_row).transpose()?)
    }

    /// Lines of an invoice in insertion order, with the product display name
    /// (absent when the product was deleted after the sale).
    pub async fn lines(&self, invoice_id: InvoiceId) -> Result<Vec<InvoiceLine>, StoreError> {
        let rows = sqlx::query(
            "SELECT ii.id, ii.invoice_id, ii.product_id, p.name AS product_name, \
                    ii.qty, ii.unit_price, ii.line_total \
             FROM invoice_items ii LEFT JOIN products p ON p.id = ii.product_id \
             WHERE ii.invoice_id = ? ORDER BY ii.id",
        )
        .bind(invoice_id.get())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| line_from_row(row).map_err(StoreError::from))
            .collect()
    }

    /// Most recent invoices first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Invoice>, StoreError> {
        let sql = format!("SELECT {HEADER_COLUMNS} FROM invoices ORDER BY id DESC LIMIT ?");
        let rows = sqlx::query(&sql)
            .bind(limit)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter()
            .map(|row| invoice_from_row(row).map_err(StoreError::from))
            .collect()
    }

    /// Delete an invoice and its lines as one unit.
    pub async fn delete(&self, id: InvoiceId) -> Result<(), StoreError> {
        let mut tx = self.db.pool().begin().await?;
        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::debug!(invoice_id = %id, "invoice deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteInvoiceStore {
        let db = Database::connect_in_memory().await.expect("in-memory db");
        db.migrate().await.expect("migrate");
        SqliteInvoiceStore::new(db)
    }

    #[tokio::test]
    async fn header_starts_without_number_and_with_zeroed_totals() {
        let store = store().await;
        let id = store.create_header("  Alice  ").await.unwrap();

        let invoice = store.get(id).await.unwrap().unwrap();
        assert_eq!(invoice.number, None);
        assert_eq!(invoice.customer_name, "Alice");
        assert_eq!(invoice.total, 0.0);
        assert_eq!(invoice.grand_total, 0.0);
    }

    #[tokio::test]
    async fn finalize_back_fills_number_and_totals() {
        let store = store().await;
        let id = store.create_header("Alice").await.unwrap();

        let number = InvoiceNumber::derive(id);
        store
            .finalize(id, &number, InvoiceTotals::from_subtotal(19.98))
            .await
            .unwrap();

        let invoice = store.get(id).await.unwrap().unwrap();
        assert_eq!(invoice.number, Some(number));
        assert_eq!(invoice.total, 19.98);
        assert_eq!(invoice.tax, 0.0);
        assert_eq!(invoice.discount, 0.0);
        assert_eq!(invoice.grand_total, 19.98);
    }

    #[tokio::test]
    async fn add_line_computes_the_line_total() {
        let store = store().await;
        let id = store.create_header("Alice").await.unwrap();

        store
            .add_line(id, ProductId::new(1), 2.0, 9.99)
            .await
            .unwrap();

        let lines = store.lines(id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 2.0);
        assert_eq!(lines[0].unit_price, 9.99);
        assert_eq!(lines[0].line_total, 19.98);
        // No matching product row: the name is absent, the line still reads.
        assert_eq!(lines[0].product_name, None);
    }

    #[tokio::test]
    async fn list_recent_returns_newest_first_and_honors_the_limit() {
        let store = store().await;
        let first = store.create_header("a").await.unwrap();
        let second = store.create_header("b").await.unwrap();
        let third = store.create_header("c").await.unwrap();

        let recent = store.list_recent(2).await.unwrap();
        assert_eq!(
            recent.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![third, second]
        );
        assert!(store.list_recent(10).await.unwrap().len() == 3);
        let _ = first;
    }

    #[tokio::test]
    async fn delete_removes_header_and_lines_together() {
        let store = store().await;
        let id = store.create_header("Alice").await.unwrap();
        store
            .add_line(id, ProductId::new(1), 2.0, 9.99)
            .await
            .unwrap();

        store.delete(id).await.unwrap();

        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.lines(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_invoice_is_a_no_op() {
        let store = store().await;
        store.delete(InvoiceId::new(42)).await.unwrap();
    }
}
