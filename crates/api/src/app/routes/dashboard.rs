use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::app::errors;
use crate::app::services::AppServices;

const LOW_STOCK_THRESHOLD: f64 = 5.0;
const LOW_STOCK_LIMIT: i64 = 10;
const RECENT_INVOICES_LIMIT: i64 = 5;
const TOP_SELLERS_LIMIT: i64 = 5;

pub fn router() -> Router {
    Router::new().route("/", get(dashboard))
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let summary = match services.dashboard.summary().await {
        Ok(summary) => summary,
        Err(e) => return errors::store_error_to_response(e),
    };
    let low_stock = match services
        .dashboard
        .low_stock(LOW_STOCK_THRESHOLD, LOW_STOCK_LIMIT)
        .await
    {
        Ok(entries) => entries,
        Err(e) => return errors::store_error_to_response(e),
    };
    let top_sellers = match services.dashboard.top_sellers(TOP_SELLERS_LIMIT).await {
        Ok(entries) => entries,
        Err(e) => return errors::store_error_to_response(e),
    };
    let recent_invoices = match services.invoices.list_recent(RECENT_INVOICES_LIMIT).await {
        Ok(invoices) => invoices,
        Err(e) => return errors::store_error_to_response(e),
    };

    Json(json!({
        "summary": summary,
        "low_stock": low_stock,
        "top_sellers": top_sellers,
        "recent_invoices": recent_invoices,
    }))
    .into_response()
}
