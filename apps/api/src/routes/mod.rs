pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::bom::handlers as bom_handlers;
use crate::state::AppState;
use crate::suppliers::handlers as supplier_handlers;

/// Body limit above the pipeline's 10 MiB upload cap, so oversized uploads
/// reach the pipeline and get its distinct error message instead of a
/// generic 413.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/bom/generate", post(bom_handlers::handle_generate))
        .route(
            "/api/v1/suppliers",
            get(supplier_handlers::handle_list_suppliers),
        )
        .route(
            "/api/v1/suppliers/:id",
            get(supplier_handlers::handle_get_supplier),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}
