//! HTTP API application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: store wiring around one shared database handle
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use stockbook_store::Database;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(db: Database) -> Router {
    let services = Arc::new(services::AppServices::new(db));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .nest("/billing", routes::billing::router())
        .nest("/invoices", routes::invoices::router())
        .nest("/dashboard", routes::dashboard::router())
        .layer(Extension(services))
}
