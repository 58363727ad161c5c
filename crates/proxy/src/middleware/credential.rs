//! Bearer credential extractors.
//!
//! The proxy never issues or validates tokens; it only checks that a
//! credential is present where one is required and forwards the caller's
//! `Authorization` header to upstream verbatim.

use std::fmt;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::AppError;

/// Message returned when a required credential is missing.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authorization token required";

/// The caller's `Authorization` header value.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a raw `Authorization` header value.
    #[must_use]
    pub fn new(header_value: impl Into<String>) -> Self {
        Self(SecretString::from(header_value.into()))
    }

    /// The header value exactly as the caller sent it.
    #[must_use]
    pub fn header_value(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the value has the form `Bearer <token>` with a non-empty token.
    #[must_use]
    pub fn is_bearer(&self) -> bool {
        self.header_value()
            .split_once(' ')
            .is_some_and(|(scheme, token)| {
                scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty()
            })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

fn authorization_header(parts: &Parts) -> Option<Credential> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Credential::new)
}

/// Extractor that requires a bearer credential.
///
/// Rejects with 401 `{"message": "Authorization token required"}` before
/// any upstream call is made.
///
/// # Example
///
/// ```rust,ignore
/// async fn my_orders(
///     State(state): State<AppState>,
///     RequireBearer(credential): RequireBearer,
/// ) -> Result<UpstreamResponse> {
///     // forward with `.credential(Some(&credential))`
/// }
/// ```
pub struct RequireBearer(pub Credential);

impl<S> FromRequestParts<S> for RequireBearer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorization_header(parts)
            .filter(Credential::is_bearer)
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized(AUTH_REQUIRED_MESSAGE.to_string()))
    }
}

/// Extractor that forwards the `Authorization` header if there is one.
///
/// Unlike `RequireBearer`, this never rejects and does not look at the
/// header's shape; upstream decides what to do with it.
pub struct OptionalBearer(pub Option<Credential>);

impl<S> FromRequestParts<S> for OptionalBearer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(authorization_header(parts)))
    }
}
