//! Cross-component tests: the full sale flow against one database.

use stockbook_billing::BillingError;
use stockbook_catalog::{Product, ProductDraft, ProductSort};

use crate::catalog::SqliteCatalogStore;
use crate::checkout::BillingService;
use crate::dashboard::SqliteDashboard;
use crate::db::Database;
use crate::error::CheckoutError;
use crate::invoices::SqliteInvoiceStore;

struct Fixture {
    catalog: SqliteCatalogStore,
    invoices: SqliteInvoiceStore,
    billing: BillingService,
    dashboard: SqliteDashboard,
}

async fn fixture() -> Fixture {
    let db = Database::connect_in_memory().await.expect("in-memory db");
    db.migrate().await.expect("migrate");
    Fixture {
        catalog: SqliteCatalogStore::new(db.clone()),
        invoices: SqliteInvoiceStore::new(db.clone()),
        billing: BillingService::new(db.clone()),
        dashboard: SqliteDashboard::new(db),
    }
}

async fn seed_widget(fx: &Fixture) -> Product {
    fx.catalog
        .create(&ProductDraft::new("Widget", 9.99, 3.0).unwrap())
        .await
        .unwrap()
}

fn expect_insufficient_stock(err: CheckoutError) -> (String, f64, f64) {
    match err {
        CheckoutError::Rejected(BillingError::InsufficientStock {
            name,
            available,
            requested,
        }) => (name, available, requested),
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
}

#[tokio::test]
async fn a_valid_sale_invoices_and_decrements_stock() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    let invoice = fx.billing.sell("Alice", widget.id, 2.0).await.unwrap();

    assert_eq!(invoice.number.as_ref().unwrap().as_str(), "INV-00001");
    assert_eq!(invoice.customer_name, "Alice");
    assert_eq!(invoice.total, 19.98);
    assert_eq!(invoice.tax, 0.0);
    assert_eq!(invoice.discount, 0.0);
    assert_eq!(invoice.grand_total, 19.98);

    // The stored header matches what the sale returned.
    let stored = fx.invoices.get(invoice.id).await.unwrap().unwrap();
    assert_eq!(stored.number, invoice.number);
    assert_eq!(stored.grand_total, 19.98);
    let drift = (stored.created_at - invoice.created_at).num_seconds().abs();
    assert!(drift <= 1, "persisted timestamp drifted by {drift}s");

    // Exactly one line, priced from the sale-time snapshot.
    let lines = fx.invoices.lines(invoice.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, widget.id);
    assert_eq!(lines[0].qty, 2.0);
    assert_eq!(lines[0].unit_price, 9.99);
    assert_eq!(lines[0].line_total, 19.98);
    assert_eq!(lines[0].product_name.as_deref(), Some("Widget"));

    // Stock dropped by exactly the sold quantity.
    let widget = fx.catalog.get(widget.id).await.unwrap().unwrap();
    assert_eq!(widget.stock, 1.0);
}

#[tokio::test]
async fn an_oversized_sale_is_rejected_without_a_trace() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    fx.billing.sell("Alice", widget.id, 2.0).await.unwrap();

    let err = fx.billing.sell("Bob", widget.id, 5.0).await.unwrap_err();
    let (name, available, requested) = expect_insufficient_stock(err);
    assert_eq!(name, "Widget");
    assert_eq!(available, 1.0);
    assert_eq!(requested, 5.0);

    // Full no-op: stock untouched, still a single invoice, no stray lines.
    assert_eq!(fx.catalog.get(widget.id).await.unwrap().unwrap().stock, 1.0);
    assert_eq!(fx.invoices.list_recent(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn invoice_numbers_follow_the_generated_ids() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    let first = fx.billing.sell("", widget.id, 1.0).await.unwrap();
    let second = fx.billing.sell("", widget.id, 1.0).await.unwrap();

    assert_eq!(first.number.as_ref().unwrap().as_str(), "INV-00001");
    assert_eq!(second.number.as_ref().unwrap().as_str(), "INV-00002");
    assert_ne!(first.number, second.number);
}

#[tokio::test]
async fn selling_an_unknown_product_is_rejected() {
    let fx = fixture().await;

    let err = fx
        .billing
        .sell("Alice", stockbook_catalog::ProductId::new(404), 1.0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Rejected(BillingError::ProductNotFound(_))
    ));
    assert!(fx.invoices.list_recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn a_non_positive_quantity_is_rejected_before_touching_the_store() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    for qty in [0.0, -2.0, f64::NAN] {
        let err = fx.billing.sell("Alice", widget.id, qty).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Rejected(BillingError::InvalidQuantity(_))
        ));
    }
    assert!(fx.invoices.list_recent(10).await.unwrap().is_empty());
    assert_eq!(fx.catalog.get(widget.id).await.unwrap().unwrap().stock, 3.0);
}

#[tokio::test]
async fn draining_stock_to_zero_is_allowed_and_the_next_sale_fails() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    fx.billing.sell("Alice", widget.id, 3.0).await.unwrap();
    assert_eq!(fx.catalog.get(widget.id).await.unwrap().unwrap().stock, 0.0);

    let err = fx.billing.sell("Bob", widget.id, 1.0).await.unwrap_err();
    let (_, available, _) = expect_insufficient_stock(err);
    assert_eq!(available, 0.0);
}

#[tokio::test]
async fn later_price_changes_do_not_rewrite_past_invoices() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    let invoice = fx.billing.sell("Alice", widget.id, 1.0).await.unwrap();

    fx.catalog
        .update(widget.id, &ProductDraft::new("Widget", 42.0, 3.0).unwrap())
        .await
        .unwrap();

    let lines = fx.invoices.lines(invoice.id).await.unwrap();
    assert_eq!(lines[0].unit_price, 9.99);
    assert_eq!(fx.invoices.get(invoice.id).await.unwrap().unwrap().grand_total, 9.99);
}

#[tokio::test]
async fn deleting_a_sold_product_orphans_its_lines_but_keeps_them_readable() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    let invoice = fx.billing.sell("Alice", widget.id, 1.0).await.unwrap();
    fx.catalog.delete(widget.id).await.unwrap();

    let lines = fx.invoices.lines(invoice.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_name, None);
    assert_eq!(lines[0].line_total, 9.99);
}

#[tokio::test]
async fn deleting_an_invoice_removes_its_lines() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    let invoice = fx.billing.sell("Alice", widget.id, 1.0).await.unwrap();
    fx.invoices.delete(invoice.id).await.unwrap();

    assert!(fx.invoices.get(invoice.id).await.unwrap().is_none());
    assert!(fx.invoices.lines(invoice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn customer_names_are_trimmed_and_may_be_empty() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;

    let invoice = fx.billing.sell("  Alice  ", widget.id, 1.0).await.unwrap();
    assert_eq!(invoice.customer_name, "Alice");
    let stored = fx.invoices.get(invoice.id).await.unwrap().unwrap();
    assert_eq!(stored.customer_name, "Alice");

    let anonymous = fx.billing.sell("   ", widget.id, 1.0).await.unwrap();
    assert_eq!(anonymous.customer_name, "");
}

#[tokio::test]
async fn dashboard_reflects_committed_sales_only() {
    let fx = fixture().await;
    let widget = seed_widget(&fx).await;
    fx.catalog
        .create(&ProductDraft::new("Gadget", 5.0, 50.0).unwrap())
        .await
        .unwrap();

    fx.billing.sell("Alice", widget.id, 2.0).await.unwrap();
    // Rejected sale must not show up anywhere.
    let _ = fx.billing.sell("Bob", widget.id, 100.0).await.unwrap_err();

    let summary = fx.dashboard.summary().await.unwrap();
    assert_eq!(summary.product_count, 2);
    assert_eq!(summary.invoice_count, 1);
    assert_eq!(summary.revenue, 19.98);
    assert_eq!(summary.revenue_last_7_days, 19.98);

    let low = fx.dashboard.low_stock(5.0, 10).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Widget");
    assert_eq!(low[0].stock, 1.0);

    let top = fx.dashboard.top_sellers(5).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Widget");
    assert_eq!(top[0].qty_sold, 2.0);
}

#[tokio::test]
async fn seeded_catalog_is_searchable_like_any_other_product() {
    let db = Database::connect_in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db.seed_demo().await.unwrap();

    let catalog = SqliteCatalogStore::new(db);
    let hits = catalog.list(Some("prod"), ProductSort::default()).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Sample Product");
    assert_eq!(hits[0].price, 100.0);
    assert_eq!(hits[0].stock, 10.0);
}
