//! Sign-in route handler.
//!
//! Credentials are checked and tokens issued upstream; the proxy only
//! relays the exchange.

use axum::{body::Bytes, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::upstream::{UpstreamRequest, UpstreamResponse};

const SIGNIN_FAILED: &str = "Sign in failed";

/// Exchange credentials for a token.
#[instrument(skip_all)]
pub async fn signin(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Bytes,
) -> Result<UpstreamResponse> {
    let result = state
        .upstream()
        .send(
            UpstreamRequest::post("/auth/signin")
                .request_id(Some(request_id.as_str()))
                .json_body(body),
        )
        .await;

    match result {
        Ok(response) => {
            tracing::info!("Sign in succeeded");
            Ok(response)
        }
        Err(e) => {
            tracing::info!(error = %e, "Sign in failed");
            Err(AppError::relay(e, SIGNIN_FAILED))
        }
    }
}
