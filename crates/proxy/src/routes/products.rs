//! Product route handlers.
//!
//! Unlike orders, catalog payloads are normalized into [`Product`] records
//! before they reach the client, and cached by the upstream client.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Serialize;
use shopfront_core::Product;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::upstream::UpstreamError;

const FETCH_FAILED: &str = "Failed to fetch products";
const FETCH_ONE_FAILED: &str = "Failed to fetch product";
const NOT_FOUND: &str = "Product not found";

/// Product listing body.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// List products.
#[instrument(skip_all, fields(query = ?query))]
pub async fn index(
    State(state): State<AppState>,
    request_id: RequestId,
    RawQuery(query): RawQuery,
) -> Result<Json<ProductList>> {
    let products = state
        .upstream()
        .products(query, Some(request_id.as_str()))
        .await
        .map_err(|e| AppError::relay(e, FETCH_FAILED))?;

    Ok(Json(ProductList {
        products: products.to_vec(),
    }))
}

/// Show one product. Upstream 404s and unusable payloads both come back
/// as 404 `Product not found`.
#[instrument(skip_all, fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .upstream()
        .product(&id, Some(request_id.as_str()))
        .await
        .map_err(|e| match e {
            UpstreamError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
                AppError::NotFound(NOT_FOUND.to_string())
            }
            other => AppError::relay(other, FETCH_ONE_FAILED),
        })?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}
