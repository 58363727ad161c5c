//! Order route handlers.
//!
//! Orders are forwarded to upstream untouched. Nothing here is cached;
//! every call re-queries upstream.

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalBearer, RequestId, RequireBearer};
use crate::state::AppState;
use crate::upstream::{UpstreamRequest, UpstreamResponse};

const CREATE_FAILED: &str = "Failed to create order";
const FETCH_FAILED: &str = "Failed to fetch orders";
const FETCH_ONE_FAILED: &str = "Failed to fetch order";

/// Submit an order.
///
/// The credential is optional here; upstream decides whether guests may
/// order. The body is forwarded byte for byte.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    request_id: RequestId,
    OptionalBearer(credential): OptionalBearer,
    body: Bytes,
) -> Result<UpstreamResponse> {
    let response = state
        .upstream()
        .send(
            UpstreamRequest::post("/orders")
                .credential(credential.as_ref())
                .request_id(Some(request_id.as_str()))
                .json_body(body),
        )
        .await
        .map_err(|e| AppError::relay(e, CREATE_FAILED))?;

    tracing::info!(status = %response.status, "Order submitted");
    Ok(response)
}

/// List orders, passing the query string through (pagination etc.).
#[instrument(skip_all, fields(query = ?query))]
pub async fn index(
    State(state): State<AppState>,
    request_id: RequestId,
    RequireBearer(credential): RequireBearer,
    RawQuery(query): RawQuery,
) -> Result<UpstreamResponse> {
    state
        .upstream()
        .send(
            UpstreamRequest::get("/orders")
                .query(query)
                .credential(Some(&credential))
                .request_id(Some(request_id.as_str())),
        )
        .await
        .map_err(|e| AppError::relay(e, FETCH_FAILED))
}

/// List the caller's own orders.
#[instrument(skip_all, fields(query = ?query))]
pub async fn mine(
    State(state): State<AppState>,
    request_id: RequestId,
    RequireBearer(credential): RequireBearer,
    RawQuery(query): RawQuery,
) -> Result<UpstreamResponse> {
    state
        .upstream()
        .send(
            UpstreamRequest::get("/orders/my-orders")
                .query(query)
                .credential(Some(&credential))
                .request_id(Some(request_id.as_str())),
        )
        .await
        .map_err(|e| AppError::relay(e, FETCH_FAILED))
}

/// Fetch one order by id.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    request_id: RequestId,
    RequireBearer(credential): RequireBearer,
    Path(id): Path<String>,
) -> Result<UpstreamResponse> {
    let path = format!("/orders/{}", urlencoding::encode(&id));

    state
        .upstream()
        .send(
            UpstreamRequest::get(path)
                .credential(Some(&credential))
                .request_id(Some(request_id.as_str())),
        )
        .await
        .map_err(|e| AppError::relay(e, FETCH_ONE_FAILED))
}
