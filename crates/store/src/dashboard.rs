//! Read-only aggregate queries for the dashboard.
//!
//! These are plain reads with no invariant to preserve; they run against
//! whatever the write paths last committed.

use serde::Serialize;
use sqlx::Row;

use stockbook_catalog::ProductId;

use crate::db::Database;
use crate::error::StoreError;

/// Headline counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub product_count: i64,
    pub invoice_count: i64,
    /// Lifetime revenue: the sum of all invoice grand totals.
    pub revenue: f64,
    pub revenue_last_7_days: f64,
}

/// A product running low on stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockEntry {
    pub id: ProductId,
    pub name: String,
    pub stock: f64,
}

/// A product ranked by lifetime quantity sold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSeller {
    pub product_id: ProductId,
    pub name: String,
    pub qty_sold: f64,
}

/// SQLite-backed dashboard reads.
#[derive(Clone)]
pub struct SqliteDashboard {
    db: Database,
}

impl SqliteDashboard {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, StoreError> {
        let pool = self.db.pool();

        let product_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;
        let invoice_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(pool)
            .await?;
        let revenue: f64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(grand_total), 0.0) FROM invoices")
                .fetch_one(pool)
                .await?;
        let revenue_last_7_days: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(grand_total), 0.0) FROM invoices \
             WHERE datetime(created_at) >= datetime('now', '-7 days')",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardSummary {
            product_count,
            invoice_count,
            revenue,
            revenue_last_7_days,
        })
    }

    /// Products at or below `threshold`, lowest stock first.
    pub async fn low_stock(
        &self,
        threshold: f64,
        limit: i64,
    ) -> Result<Vec<LowStockEntry>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, stock FROM products WHERE stock <= ? \
             ORDER BY stock ASC, name ASC LIMIT ?",
        )
        .bind(threshold)
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(LowStockEntry {
                    id: ProductId::new(row.try_get("id").map_err(StoreError::from)?),
                    name: row.try_get("name").map_err(StoreError::from)?,
                    stock: row.try_get("stock").map_err(StoreError::from)?,
                })
            })
            .collect()
    }

    /// Products ranked by total quantity sold across all invoices.
    ///
    /// Sales of since-deleted products drop out of the ranking (there is no
    /// name left to show for them).
    pub async fn top_sellers(&self, limit: i64) -> Result<Vec<TopSeller>, StoreError> {
        let rows = sqlx::query(
            "SELECT ii.product_id, p.name, SUM(ii.qty) AS qty_sold \
             FROM invoice_items ii JOIN products p ON p.id = ii.product_id \
             GROUP BY ii.product_id \
             ORDER BY qty_sold DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(TopSeller {
                    product_id: ProductId::new(row.try_get("product_id").map_err(StoreError::from)?),
                    name: row.try_get("name").map_err(StoreError::from)?,
                    qty_sold: row.try_get("qty_sold").map_err(StoreError::from)?,
                })
            })
            .collect()
    }
}
