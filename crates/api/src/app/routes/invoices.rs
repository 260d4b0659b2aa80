use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use stockbook_billing::InvoiceId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

const DEFAULT_RECENT_LIMIT: i64 = 15;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_recent))
        .route("/:id", get(get_invoice).delete(delete_invoice))
}

pub async fn list_recent(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::RecentInvoicesQuery>,
) -> axum::response::Response {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT).max(0);

    match services.invoices.list_recent(limit).await {
        Ok(invoices) => Json(invoices).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let id = InvoiceId::new(id);

    let invoice = match services.invoices.get(id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return errors::not_found("invoice not found"),
        Err(e) => return errors::store_error_to_response(e),
    };
    let lines = match services.invoices.lines(id).await {
        Ok(lines) => lines,
        Err(e) => return errors::store_error_to_response(e),
    };

    Json(json!({
        "invoice": invoice,
        "lines": lines,
    }))
    .into_response()
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.invoices.delete(InvoiceId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
