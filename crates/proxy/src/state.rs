//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the upstream client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    upstream: UpstreamClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ProxyConfig) -> Self {
        let upstream = UpstreamClient::new(&config);

        Self {
            inner: Arc::new(AppStateInner { config, upstream }),
        }
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get a reference to the upstream API client.
    #[must_use]
    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }
}
