use crate::handlers::common::{map_service_error, success_response};
use crate::models::ledger::LedgerEntry;
use crate::{
    errors::{ApiError, ServiceError},
    AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Product whose ledger to return. Required.
    #[serde(alias = "product_id")]
    pub product_id: Option<i32>,
}

pub fn inventory_routes() -> Router<AppState> {
    Router::new().route("/", get(list_inventory))
}

/// Purchases and sales of one product, ordered by date
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Ledger entries in date order", body = [LedgerEntry]),
        (status = 400, description = "productId missing or malformed", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    query: Result<Query<InventoryQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let product_id = query
        .product_id
        .ok_or_else(|| ServiceError::BadRequest("productId query parameter is required".into()))
        .map_err(map_service_error)?;

    let entries = state
        .services
        .inventory
        .ledger(product_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(entries))
}
