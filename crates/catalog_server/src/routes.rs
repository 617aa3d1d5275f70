//! Product HTTP handlers.
//!
//! Handlers validate payloads, run one catalog operation and map the result.
//! They never see unauthenticated requests under the protected prefix.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::{Product, ProductId};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Missing means the empty string, which matches every product.
    #[serde(default)]
    pub name: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": catalog_core::core_version(),
    }))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .with_catalog(|catalog| catalog.get_all_products())
        .await?;
    Ok(Json(products))
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let name = params.name;
    let products = state
        .with_catalog(move |catalog| catalog.search_products(&name))
        .await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .with_catalog(move |catalog| catalog.get_product_by_id(id))
        .await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    product.validate()?;
    let created = state
        .with_catalog(move |catalog| catalog.create_product(product))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(product): Json<Product>,
) -> Result<Json<Product>, ApiError> {
    product.validate()?;
    let updated = state
        .with_catalog(move |catalog| catalog.update_product(id, product))
        .await?;
    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, ApiError> {
    state
        .with_catalog(move |catalog| catalog.delete_product(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
