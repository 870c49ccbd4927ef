//! # obb Web
//!
//! HTTP API over [`obb_core`]'s historical price service.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | API name, version and endpoint index |
//! | `GET /docs` | Endpoints with their query parameters |
//! | `GET /health` | `{"status": "healthy"}` |
//! | `GET /equity/price/historical` | Daily bars for `symbol` between `start_date` and `end_date` |
//!
//! Errors use a `{"detail": ...}` body: 422 for rejected query parameters,
//! 404 when the provider has no data, 500 for everything else.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use obb_core::PriceService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod params;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PriceService>,
}

impl AppState {
    pub fn new(service: PriceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &PriceService {
        &self.service
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(handlers::DOCS_PATH, get(handlers::docs))
        .route("/health", get(handlers::health))
        .route(handlers::HISTORICAL_PRICE_PATH, get(handlers::historical_price))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
