use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "1.0.0",
        description = r#"
# Stockroom Inventory API

Products, the purchases and sales recorded against them, and a per-product
stock ledger merging both in date order.

## Error Handling

Failing requests return a JSON body with the status category, a message and,
for validation failures, the rejected fields:

```json
{
  "error": "Bad Request",
  "message": "Validation error: price: Price cannot be negative",
  "fields": { "price": ["Price cannot be negative"] },
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Prices are decimals serialized as strings. Ledger entries carry `type` 1 for
purchases and 2 for sales.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Purchases", description = "Inbound stock transactions"),
        (name = "Sales", description = "Outbound stock transactions"),
        (name = "Inventory", description = "Per-product stock ledger")
    ),
    paths(
        // Products
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::patch_product,
        crate::handlers::products::delete_product,

        // Transactions
        crate::handlers::purchases::create_purchase,
        crate::handlers::sales::create_sale,

        // Inventory
        crate::handlers::inventory::list_inventory,
    ),
    components(
        schemas(
            crate::handlers::products::ProductRequest,
            crate::handlers::products::ProductPatchRequest,
            crate::handlers::products::ProductResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::transactions::TransactionResponse,
            crate::models::ledger::LedgerEntry,

            // Error types
            crate::errors::ErrorResponse,
            crate::errors::FieldErrors
        )
    )
)]
pub struct ApiDocV1;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Serves the generated document as JSON
pub fn openapi_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(OPENAPI_JSON_PATH, get(|| async { Json(ApiDocV1::openapi()) }))
}
