//! Product catalog persistence.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use stockbook_catalog::{Product, ProductDraft, ProductId, ProductSort};

use crate::db::Database;
use crate::error::StoreError;

/// SQLite-backed store for [`Product`] records.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    db: Database,
}

fn product_from_row(row: &SqliteRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
    })
}

/// Fixed mapping from sort selector to ORDER BY clause. Every value is a
/// static string, never user input.
fn order_by(sort: ProductSort) -> &'static str {
    match sort {
        ProductSort::IdAsc => "id ASC",
        ProductSort::IdDesc => "id DESC",
        ProductSort::NameAsc => "LOWER(name) ASC",
        ProductSort::NameDesc => "LOWER(name) DESC",
        ProductSort::PriceAsc => "price ASC",
        ProductSort::PriceDesc => "price DESC",
        ProductSort::StockAsc => "stock ASC",
        ProductSort::StockDesc => "stock DESC",
    }
}

impl SqliteCatalogStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List products, optionally filtered by a case-insensitive name
    /// substring.
    pub async fn list(
        &self,
        filter: Option<&str>,
        sort: ProductSort,
    ) -> Result<Vec<Product>, StoreError> {
        let rows = match filter.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let sql = format!(
                    "SELECT id, name, price, stock FROM products WHERE name LIKE ? ORDER BY {}",
                    order_by(sort)
                );
                sqlx::query(&sql)
                    .bind(format!("%{q}%"))
                    .fetch_all(self.db.pool())
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT id, name, price, stock FROM products ORDER BY {}",
                    order_by(sort)
                );
                sqlx::query(&sql).fetch_all(self.db.pool()).await?
            }
        };

        rows.iter()
            .map(|row| product_from_row(row).map_err(StoreError::from))
            .collect()
    }

    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let mut conn = self.db.pool().acquire().await?;
        Ok(Self::fetch(&mut conn, id).await?)
    }

    /// Fetch on an explicit connection so the checkout transaction can reuse
    /// it.
    pub(crate) async fn fetch(
        conn: &mut SqliteConnection,
        id: ProductId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let row = sqlx::query("SELECT id, name, price, stock FROM products WHERE id = ?")
            .bind(id.get())
            .fetch_optional(conn)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    /// Insert a validated draft and return the stored product.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let result = sqlx::query("INSERT INTO products (name, price, stock) VALUES (?, ?, ?)")
            .bind(draft.name())
            .bind(draft.price())
            .bind(draft.stock())
            .execute(self.db.pool())
            .await?;
        let id = ProductId::new(result.last_insert_rowid());
        tracing::debug!(product_id = %id, "product created");
        Ok(Product {
            id,
            name: draft.name().to_string(),
            price: draft.price(),
            stock: draft.stock(),
        })
    }

    /// Overwrite name, price and stock. Unknown ids are a silent no-op.
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), StoreError> {
        sqlx::query("UPDATE products SET name = ?, price = ?, stock = ? WHERE id = ?")
            .bind(draft.name())
            .bind(draft.price())
            .bind(draft.stock())
            .bind(id.get())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// Remove a product. Unknown ids are a no-op. Historical invoice lines
    /// referencing the product are left in place.
    pub async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.get())
            .execute(self.db.pool())
            .await?;
        tracing::debug!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Atomically decrement stock iff at least `qty` is on hand, reporting
    /// whether the decrement applied.
    ///
    /// The guard lives in the UPDATE itself, so two concurrent sales can
    /// never drive stock negative.
    pub async fn decrement_stock(&self, id: ProductId, qty: f64) -> Result<bool, StoreError> {
        let mut conn = self.db.pool().acquire().await?;
        Ok(Self::decrement_stock_on(&mut conn, id, qty).await?)
    }

    pub(crate) async fn decrement_stock_on(
        conn: &mut SqliteConnection,
        id: ProductId,
        qty: f64,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1")
                .bind(qty)
                .bind(id.get())
                .execute(conn)
                .await?;
        Ok(result.rows_affected() == 1)
    }
}
