//! Database handle, schema bootstrap and demo seeding.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StoreError;

/// Logical tables. `CREATE TABLE IF NOT EXISTS` keeps startup idempotent.
///
/// Foreign keys are declared but not enforced: deleting a product that
/// historical invoice lines reference is allowed, and the lines stay behind
/// as orphans.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    price       REAL NOT NULL DEFAULT 0,
    stock       REAL NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS invoices (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    number        TEXT UNIQUE,
    customer_name TEXT NOT NULL DEFAULT '',
    total         REAL NOT NULL DEFAULT 0,
    tax           REAL NOT NULL DEFAULT 0,
    discount      REAL NOT NULL DEFAULT 0,
    grand_total   REAL NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS invoice_items (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    invoice_id INTEGER NOT NULL REFERENCES invoices(id),
    product_id INTEGER NOT NULL REFERENCES products(id),
    qty        REAL NOT NULL,
    unit_price REAL NOT NULL,
    line_total REAL NOT NULL
);
";

/// Process-wide handle to the SQLite database.
///
/// Cheap to clone; every store and service receives one explicitly instead
/// of reaching for module-level state.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (and create, if missing) the database at `url`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// A single pooled connection keeps every query on the same in-memory
    /// instance; additional connections would each see their own empty
    /// database.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        tracing::debug!("schema ensured");
        Ok(())
    }

    /// Insert one demo product into an empty catalog so a fresh install is
    /// not blank.
    pub async fn seed_demo(&self) -> Result<(), StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            sqlx::query("INSERT INTO products (name, price, stock) VALUES (?, ?, ?)")
                .bind("Sample Product")
                .bind(100.0_f64)
                .bind(10.0_f64)
                .execute(&self.pool)
                .await?;
            tracing::info!("seeded demo product");
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
