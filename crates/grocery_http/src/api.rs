//! Product endpoints.
//!
//! # Responsibility
//! - Translate HTTP requests into `ProductService` calls.
//! - Map presence/absence and service errors to status codes.
//!
//! # Invariants
//! - Every request opens its own connection on a blocking worker; nothing
//!   SQLite-related crosses an `.await`.
//! - Extractors are taken as `Result<_, Rejection>` so malformed input goes
//!   through `ApiError` like every other failure.
//! - Update never writes when the id is absent.
//! - Delete answers 200 whether or not a row existed.

use crate::error::ApiError;
use crate::model::{ListFilter, ProductChanges};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use grocery_core::db::open_db;
use grocery_core::{
    core_version, Product, ProductId, ProductService, ServiceError, ServiceResult,
    SqliteProductRepository,
};
use serde_json::{json, Value};

pub const DELETE_CONFIRMATION: &str = "Product deleted";

type SqliteProductService<'conn> = ProductService<SqliteProductRepository<'conn>>;

/// Runs one unit of service work against a fresh, schema-checked connection.
async fn with_service<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: for<'conn> FnOnce(&SqliteProductService<'conn>) -> ServiceResult<T> + Send + 'static,
{
    let db_path = state.db_path();
    tokio::task::spawn_blocking(move || {
        let conn = open_db(db_path.as_path())?;
        let repo = SqliteProductRepository::try_new(&conn).map_err(ServiceError::from)?;
        let service = ProductService::new(repo);
        work(&service).map_err(ApiError::from)
    })
    .await
    .map_err(|err| ApiError::Internal(format!("blocking worker failed: {err}")))?
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(product) = payload?;
    let created = with_service(&state, move |service| service.create(&product)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListFilter>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(filter) = query?;
    let products = match (filter.category, filter.in_stock) {
        (Some(_), true) => {
            return Err(ApiError::BadRequest(
                "category and inStock filters cannot be combined".to_string(),
            ));
        }
        (Some(category), false) => {
            with_service(&state, move |service| service.list_by_category(&category)).await?
        }
        (None, true) => with_service(&state, |service| service.list_in_stock()).await?,
        (None, false) => with_service(&state, |service| service.list()).await?,
    };
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = path?;
    with_service(&state, move |service| service.get_by_id(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<ProductChanges>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    let updated = with_service(&state, move |service| {
        let Some(mut existing) = service.get_by_id(id)? else {
            return Ok(None);
        };
        changes.apply_to(&mut existing);
        service.update(&existing).map(Some)
    })
    .await?;

    updated.map(Json).ok_or(ApiError::NotFound)
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
) -> Result<&'static str, ApiError> {
    let Path(id) = path?;
    with_service(&state, move |service| service.delete_by_id(id)).await?;
    Ok(DELETE_CONFIRMATION)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": core_version() }))
}
