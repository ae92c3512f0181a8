//! entrybook server library logic.

pub mod config;
pub mod pages;
pub mod render;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use entrybook_entries::EntryStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Entry operations; each call opens its own scoped connection.
    pub store: EntryStore,
}

impl AppState {
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }
}

/// Maximum request body size (64 KiB). The forms only carry three short fields.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_handler))
        .route("/entries", post(pages::add_entry_handler))
        .route("/entries/update", post(pages::update_entry_handler))
        .route("/entries/delete", post(pages::delete_entry_handler))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
