//! Store wiring shared by all handlers.

use stockbook_store::{
    BillingService, Database, SqliteCatalogStore, SqliteDashboard, SqliteInvoiceStore,
};

/// Handles injected into every handler via `Extension`.
///
/// All stores clone the same pool-backed [`Database`] handle; nothing here
/// is global state.
pub struct AppServices {
    pub catalog: SqliteCatalogStore,
    pub invoices: SqliteInvoiceStore,
    pub billing: BillingService,
    pub dashboard: SqliteDashboard,
}

impl AppServices {
    pub fn new(db: Database) -> Self {
        Self {
            catalog: SqliteCatalogStore::new(db.clone()),
            invoices: SqliteInvoiceStore::new(db.clone()),
            billing: BillingService::new(db.clone()),
            dashboard: SqliteDashboard::new(db),
        }
    }
}
