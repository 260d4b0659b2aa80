//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockbook_billing::BillingError;
use stockbook_core::DomainError;
use stockbook_store::{CheckoutError, StoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn not_found(message: &'static str) -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", message)
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store operation failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        err.to_string(),
    )
}

pub fn checkout_error_to_response(err: CheckoutError) -> axum::response::Response {
    match err {
        CheckoutError::Rejected(rejection) => {
            let message = rejection.to_string();
            match rejection {
                BillingError::InvalidQuantity(_) => {
                    json_error(StatusCode::BAD_REQUEST, "invalid_quantity", message)
                }
                BillingError::ProductNotFound(_) => {
                    json_error(StatusCode::NOT_FOUND, "product_not_found", message)
                }
                BillingError::InsufficientStock { .. } => {
                    json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock", message)
                }
            }
        }
        CheckoutError::Store(err) => store_error_to_response(err),
    }
}
