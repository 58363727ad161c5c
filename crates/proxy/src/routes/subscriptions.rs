//! Subscription route handlers.

use axum::extract::{RawQuery, State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{RequestId, RequireBearer};
use crate::state::AppState;
use crate::upstream::{UpstreamRequest, UpstreamResponse};

const FETCH_FAILED: &str = "Failed to fetch subscriptions";

/// List the caller's subscriptions.
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
            UpstreamRequest::get("/subscriptions")
                .query(query)
                .credential(Some(&credential))
                .request_id(Some(request_id.as_str())),
        )
        .await
        .map_err(|e| AppError::relay(e, FETCH_FAILED))
}
