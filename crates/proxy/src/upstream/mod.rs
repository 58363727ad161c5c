//! Client for the upstream backend REST API.
//!
//! # Architecture
//!
//! - The upstream backend is the system of record; this client only relays
//! - Every call opens its own request on a shared pooled `reqwest::Client`
//! - No retries and no explicit timeout
//! - Catalog reads are cached via `moka` (5 minute TTL); order and account
//!   reads never are
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_proxy::upstream::{UpstreamClient, UpstreamRequest};
//!
//! let client = UpstreamClient::new(&config);
//!
//! let response = client
//!     .send(UpstreamRequest::get("/orders").query(Some("page=2".into())).credential(Some(&token)))
//!     .await?;
//! ```

mod cache;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use moka::future::Cache;
use serde_json::Value;
use shopfront_core::Product;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ProxyConfig;
use crate::middleware::{Credential, REQUEST_ID_HEADER};

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the upstream backend.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body that should have been JSON was not.
    #[error("Malformed upstream response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status}: {}", .message.as_deref().unwrap_or("(no message)"))]
    Status {
        status: StatusCode,
        /// Message pulled from the upstream error body, if it had one.
        message: Option<String>,
    },
}

// =============================================================================
// UpstreamRequest
// =============================================================================

/// One request to forward upstream.
#[derive(Debug)]
pub struct UpstreamRequest<'a> {
    method: Method,
    path: String,
    query: Option<String>,
    credential: Option<&'a Credential>,
    request_id: Option<&'a str>,
    body: Option<Bytes>,
}

impl<'a> UpstreamRequest<'a> {
    /// Build a request for `path` (relative to the base URL, leading `/`).
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            credential: None,
            request_id: None,
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append a raw query string, passed through untouched.
    #[must_use]
    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    /// Forward the caller's `Authorization` header.
    #[must_use]
    pub const fn credential(mut self, credential: Option<&'a Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Propagate the request ID for log correlation.
    #[must_use]
    pub const fn request_id(mut self, request_id: Option<&'a str>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Send a JSON body as-is.
    #[must_use]
    pub fn json_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

// =============================================================================
// UpstreamResponse
// =============================================================================

/// A successful upstream response, relayed verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// Raw body bytes; empty or valid JSON.
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Parse the body as JSON (`null` when empty).
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, UpstreamError> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        if self.body.is_empty() {
            return self.status.into_response();
        }

        (
            self.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            self.body,
        )
            .into_response()
    }
}

// =============================================================================
// UpstreamClient
// =============================================================================

/// Client for the upstream backend.
#[derive(Clone)]
pub struct UpstreamClient {
    inner: Arc<UpstreamClientInner>,
}

struct UpstreamClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl UpstreamClient {
    /// Create a new upstream client.
    #[must_use]
    pub fn new(config: &ProxyConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(UpstreamClientInner {
                client: reqwest::Client::new(),
                base_url: config.upstream_base_url.clone(),
                cache,
            }),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url_for(&self, path: &str, query: Option<&str>) -> String {
        let mut url = format!("{}{path}", self.inner.base_url);
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    /// Forward a request and return the upstream response.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] if no response was received
    /// - [`UpstreamError::Malformed`] if a success body is not JSON
    /// - [`UpstreamError::Status`] if upstream answered with a non-2xx status
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: UpstreamRequest<'_>) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url_for(&request.path, request.query.as_deref());

        let mut builder = self
            .inner
            .client
            .request(request.method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(credential) = request.credential {
            builder = builder.header(header::AUTHORIZATION, credential.header_value());
        }
        if let Some(request_id) = request.request_id {
            builder = builder.header(REQUEST_ID_HEADER, request_id);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&body);
            debug!(status = %status, message = ?message, "Upstream returned error status");
            return Err(UpstreamError::Status { status, message });
        }

        if !body.is_empty() {
            // Relay verbatim, but only once we know it is JSON
            if let Err(e) = serde_json::from_slice::<serde::de::IgnoredAny>(&body) {
                tracing::error!(
                    error = %e,
                    body = %String::from_utf8_lossy(&body).chars().take(500).collect::<String>(),
                    "Upstream returned a non-JSON success body"
                );
                return Err(UpstreamError::Malformed(e));
            }
        }

        Ok(UpstreamResponse { status, body })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// List products, normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails.
    #[instrument(skip(self))]
    pub async fn products(
        &self,
        query: Option<String>,
        request_id: Option<&str>,
    ) -> Result<Arc<Vec<Product>>, UpstreamError> {
        let cache_key = CacheKey::Products {
            query: query.clone().filter(|q| !q.is_empty()),
        };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let response = self
            .send(
                UpstreamRequest::get("/products")
                    .query(query)
                    .request_id(request_id),
            )
            .await?;
        let products = Arc::new(Product::list_from_upstream(&response.json()?));

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Get one product, normalized. `Ok(None)` if upstream's payload holds
    /// no usable product.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream request fails.
    #[instrument(skip(self))]
    pub async fn product(
        &self,
        id: &str,
        request_id: Option<&str>,
    ) -> Result<Option<Product>, UpstreamError> {
        let cache_key = CacheKey::Product(id.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let path = format!("/products/{}", urlencoding::encode(id));
        let response = self
            .send(UpstreamRequest::get(path).request_id(request_id))
            .await?;

        let Some(product) = Product::one_from_upstream(&response.json()?) else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(Some(product))
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// Looks at `message`, then `error` (string or `{message}`), then
/// `errors[0].message`. Returns `None` for non-JSON bodies.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    let candidates = [
        value.get("message"),
        value.get("error"),
        value.get("error").and_then(|e| e.get("message")),
        value
            .get("errors")
            .and_then(|e| e.get(0_usize))
            .and_then(|e| e.get("message")),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
