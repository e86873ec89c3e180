use crate::handlers::common::{created_response, json_body, map_service_error, validate_input};
use crate::handlers::transactions::{CreateTransactionRequest, TransactionResponse};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};

pub fn purchases_routes() -> Router<AppState> {
    Router::new().route("/", post(create_purchase))
}

/// Record an inbound stock movement
#[utoipa::path(
    post,
    path = "/api/v1/purchases",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = TransactionResponse),
        (status = 400, description = "Invalid payload or unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Purchases"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    validate_input(&payload)?;

    let purchase = state
        .services
        .transactions
        .record_purchase(payload.into())
        .await
        .map_err(map_service_error)?;

    Ok(created_response(TransactionResponse::from(purchase)))
}
