use crate::entities::{product::PRICE_SCALE, ProductModel};
use crate::handlers::common::{
    created_response, double_option, empty_response, json_body, map_service_error,
    normalize_optional_string, normalize_string, success_response, validate_input,
};
use crate::{
    errors::ApiError,
    services::products::{ProductChanges, ProductInput},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

const MAX_PRICE: i64 = 10_000_000_000;

/// Prices are non-negative, carry at most two decimal places and fit a
/// 12-digit column.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let reject = |code: &'static str, message: &'static str| -> Result<(), ValidationError> {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        Err(err)
    };

    if *price < Decimal::ZERO {
        return reject("price_negative", "Price cannot be negative");
    }
    if price.normalize().scale() > PRICE_SCALE {
        return reject("price_scale", "Price must have at most 2 decimal places");
    }
    if *price >= Decimal::from(MAX_PRICE) {
        return reject("price_range", "Price must be less than 10000000000");
    }
    Ok(())
}

/// Body for create and full replace
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Widget")]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom = "validate_price")]
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
}

impl ProductRequest {
    fn normalized(self) -> Self {
        Self {
            name: normalize_string(self.name),
            description: normalize_optional_string(self.description),
            price: self.price,
        }
    }
}

impl From<ProductRequest> for ProductInput {
    fn from(request: ProductRequest) -> Self {
        ProductInput {
            name: request.name,
            description: request.description,
            price: request.price,
        }
    }
}

/// Body for partial update; absent fields are left unchanged and an explicit
/// `null` description clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<Decimal>,
}

impl ProductPatchRequest {
    fn normalized(self) -> Self {
        Self {
            name: self.name.map(normalize_string),
            description: self.description.map(normalize_optional_string),
            price: self.price,
        }
    }

    /// The product as it would look after the patch, for validation
    fn applied_to(&self, existing: &ProductModel) -> ProductRequest {
        ProductRequest {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| existing.description.clone()),
            price: self.price.unwrap_or(existing.price),
        }
    }
}

impl From<ProductPatchRequest> for ProductChanges {
    fn from(patch: ProductPatchRequest) -> Self {
        ProductChanges {
            name: patch.name,
            description: patch.description,
            price: patch.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductModel> for ProductResponse {
    fn from(model: ProductModel) -> Self {
        Self {
            price: model.unit_price(),
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "All products in id order", body = [ProductResponse])
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .list_products()
        .await
        .map_err(map_service_error)?;

    let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(success_response(body))
}

/// Get one product
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get_product(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?.normalized();
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .create_product(payload.into())
        .await
        .map_err(map_service_error)?;

    Ok(created_response(ProductResponse::from(product)))
}

/// Replace every writable field of a product
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?.normalized();
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .replace_product(id, payload.into())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Update only the supplied fields of a product
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPatchRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<ProductPatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = json_body(payload)?.normalized();

    let products = &state.services.products;
    let existing = products.get_product(id).await.map_err(map_service_error)?;
    validate_input(&patch.applied_to(&existing))?;

    let product = products
        .patch_product(id, patch.into())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Delete a product that has no recorded transactions
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Product has purchases or sales", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product(id)
        .await
        .map_err(map_service_error)?;

    Ok(empty_response())
}
