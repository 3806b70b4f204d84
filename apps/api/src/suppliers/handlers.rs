//! Axum route handlers for the supplier directory.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::suppliers::Supplier;

#[derive(Debug, Deserialize)]
pub struct ListSuppliersQuery {
    /// Optional component or specialty keyword to filter on.
    pub component: Option<String>,
}

/// GET /api/v1/suppliers[?component=...]
pub async fn handle_list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<ListSuppliersQuery>,
) -> Json<Vec<Supplier>> {
    let suppliers = match query.component.as_deref().map(str::trim) {
        Some(component) if !component.is_empty() => state
            .suppliers
            .find_by_component(component)
            .into_iter()
            .cloned()
            .collect(),
        _ => state.suppliers.all().to_vec(),
    };
    Json(suppliers)
}

/// GET /api/v1/suppliers/:id
pub async fn handle_get_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, AppError> {
    state
        .suppliers
        .by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Supplier '{id}' not found")))
}
