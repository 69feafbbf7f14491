//! HTTP surface for the grocery store backend.
//!
//! # Responsibility
//! - Expose product CRUD and filtered lists as JSON endpoints.
//! - Own the translation from domain outcomes to status codes.
//!
//! # Routes
//! - `POST   /api/product`       create, 201 / 409 on duplicate name
//! - `GET    /api/product`       list, optional `category=` or `inStock=true`
//! - `GET    /api/product/{id}`  fetch, 404 when absent
//! - `PUT    /api/product/{id}`  merge + update, 404 when absent
//! - `DELETE /api/product/{id}`  delete, always 200
//! - `GET    /health`            liveness

use axum::routing::get;
use axum::Router;

pub mod api;
pub mod error;
pub mod middleware;
pub mod model;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/product",
            get(api::list_products).post(api::create_product),
        )
        .route(
            "/api/product/{id}",
            get(api::get_product)
                .put(api::update_product)
                .delete(api::delete_product),
        )
        .route("/health", get(api::health))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
