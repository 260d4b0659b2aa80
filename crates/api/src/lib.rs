//! `stockbook-api` — HTTP JSON surface over the stockbook stores.
//!
//! The core never renders HTML: handlers decode typed arguments, call the
//! stores, and hand plain data structures to the JSON layer.

pub mod app;
pub mod telemetry;
