//! Integration test harness for the Shopfront proxy.
//!
//! Each test starts two servers on ephemeral ports:
//!
//! - a [`FakeUpstream`] that records every request it receives and answers
//!   with whatever the test's responder returns
//! - a [`TestProxy`] serving the real proxy router, pointed at the fake
//!
//! Tests then talk to the proxy over real HTTP with `reqwest`.
//!
//! ```rust,ignore
//! let upstream = FakeUpstream::start(|_| reply(StatusCode::CREATED, json!({"orderId": "abc"}))).await;
//! let proxy = TestProxy::start(&upstream).await;
//!
//! let resp = proxy.client.post(proxy.url("/api/orders")).json(&json!({})).send().await?;
//! assert_eq!(resp.status(), StatusCode::CREATED);
//! assert_eq!(upstream.hits(), 1);
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use shopfront_proxy::config::ProxyConfig;
use shopfront_proxy::middleware::REQUEST_ID_HEADER;
use shopfront_proxy::state::AppState;

/// Path prefix the fake upstream serves under, like a real `/api` backend.
const UPSTREAM_PREFIX: &str = "/api";

/// One request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Raw path with the `/api` prefix removed (still percent-encoded).
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    /// Parse the recorded body as JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Status and raw body the fake upstream sends back.
pub type Reply = (StatusCode, String);

type Responder = dyn Fn(&Recorded) -> Reply + Send + Sync;

#[derive(Clone)]
struct UpstreamState {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// JSON reply helper.
#[must_use]
pub fn reply(status: StatusCode, body: Value) -> Reply {
    (status, body.to_string())
}

/// Raw reply helper, for bodies that are not JSON.
#[must_use]
pub fn raw_reply(status: StatusCode, body: &str) -> Reply {
    (status, body.to_string())
}

/// An upstream stand-in bound to `127.0.0.1:0`.
pub struct FakeUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeUpstream {
    /// Start serving; `responder` decides the reply to each request.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(responder: impl Fn(&Recorded) -> Reply + Send + Sync + 'static) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            responder: Arc::new(responder),
            requests: Arc::clone(&requests),
        };

        let app = Router::new().fallback(record).with_state(state);
        let addr = serve(app).await;

        Self { addr, requests }
    }

    /// Base URL to configure the proxy with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}{UPSTREAM_PREFIX}", self.addr)
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The most recent request.
    ///
    /// # Panics
    ///
    /// Panics if upstream has not been called.
    #[must_use]
    pub fn last(&self) -> Recorded {
        let requests = self.requests();
        match requests.last() {
            Some(request) => request.clone(),
            None => panic!("upstream was never called"),
        }
    }
}

async fn record(
    State(state): State<UpstreamState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let path = uri.path();
    let recorded = Recorded {
        method,
        path: path.strip_prefix(UPSTREAM_PREFIX).unwrap_or(path).to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION.as_str()),
        request_id: header_value(REQUEST_ID_HEADER),
        body,
    };

    let (status, body) = (state.responder)(&recorded);
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(recorded);

    if body.is_empty() {
        return status.into_response();
    }
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// The real proxy router served on an ephemeral port.
pub struct TestProxy {
    addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestProxy {
    /// Start a proxy in front of `upstream`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected or no port can be bound.
    pub async fn start(upstream: &FakeUpstream) -> Self {
        Self::start_with_base_url(&upstream.base_url()).await
    }

    /// Start a proxy in front of an arbitrary base URL.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected or no port can be bound.
    pub async fn start_with_base_url(base_url: &str) -> Self {
        let config = match ProxyConfig::for_upstream(base_url) {
            Ok(config) => config,
            Err(e) => panic!("invalid upstream base URL {base_url}: {e}"),
        };
        let addr = serve(shopfront_proxy::app(AppState::new(config))).await;

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for a proxy path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// A base URL nothing listens on.
#[must_use]
pub fn unreachable_base_url() -> String {
    "http://127.0.0.1:1/api".to_string()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(e) => panic!("failed to bind test listener: {e}"),
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(e) => panic!("failed to read test listener address: {e}"),
    };

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            panic!("test server failed: {e}");
        }
    });

    addr
}
