//! Request DTOs.

use serde::Deserialize;

/// Body for `POST /products` and `PUT /products/{id}`.
///
/// Missing price/stock fall back to 0, matching the clamping rules of
/// `ProductDraft`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: f64,
}

/// Query string for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Body for `POST /billing/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub customer_name: String,
    pub product_id: i64,
    pub qty: f64,
}

/// Query string for `GET /invoices`.
#[derive(Debug, Default, Deserialize)]
pub struct RecentInvoicesQuery {
    pub limit: Option<i64>,
}
