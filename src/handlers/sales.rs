use crate::handlers::common::{created_response, json_body, map_service_error, validate_input};
use crate::handlers::transactions::{CreateTransactionRequest, TransactionResponse};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};

pub fn sales_routes() -> Router<AppState> {
    Router::new().route("/", post(create_sale))
}

/// Record an outbound stock movement
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Sale recorded", body = TransactionResponse),
        (status = 400, description = "Invalid payload or unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    validate_input(&payload)?;

    let sale = state
        .services
        .transactions
        .record_sale(payload.into())
        .await
        .map_err(map_service_error)?;

    Ok(created_response(TransactionResponse::from(sale)))
}
