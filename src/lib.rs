//! Stockroom API Library
//!
//! Products, the purchases and sales recorded against them, and a per-product
//! stock ledger, served over HTTP with axum on top of sea-orm.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{routing::get, Router};
use http::HeaderValue;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Resource routes, mounted under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::products::products_routes())
        .nest("/purchases", handlers::purchases::purchases_routes())
        .nest("/sales", handlers::sales::sales_routes())
        .nest("/inventory", handlers::inventory::inventory_routes())
}

/// CORS from configuration: explicit origins when given, otherwise
/// permissive if the configuration allows it, otherwise same-origin only.
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}

async fn route_not_found() -> errors::ApiError {
    errors::ApiError::NotFound("No such route".to_string())
}

/// Full application router: health, OpenAPI document, the v1 API and the
/// shared middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cfg = state.config.clone();

    Router::<AppState>::new()
        .route("/", get(|| async { "stockroom-api up" }))
        .nest("/health", health::health_routes(state.db.clone()))
        .merge(openapi::openapi_routes::<AppState>())
        .nest("/api/v1", api_v1_routes())
        .fallback(route_not_found)
        // HTTP tracing layer for consistent request/response telemetry
        .layer(tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(cfg.request_timeout()))
        .layer(cors_layer(&cfg))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
