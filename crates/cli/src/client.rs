//! HTTP client for the Shopfront proxy.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use shopfront_core::{Product, ProductId};

use crate::commands::CliError;

/// Client for the `/api` routes of a running proxy.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ProxyClient {
    /// Create a client for the proxy at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, token: Option<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        let mut url = format!("{}/api{path}", self.base_url);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query.trim_start_matches('?'));
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// GET a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy is unreachable or answers with an
    /// error status.
    pub async fn get(&self, path: &str, query: Option<&str>) -> Result<Value, CliError> {
        tracing::debug!(path, query, "GET");
        let response = self
            .authorize(self.client.get(self.url(path, query)))
            .send()
            .await?;
        read_json(response).await.map(|(_, value)| value)
    }

    /// POST a JSON body, returning the status and response document.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy is unreachable or answers with an
    /// error status.
    pub async fn post(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(StatusCode, Value), CliError> {
        tracing::debug!(path, "POST");
        let response = self
            .authorize(self.client.post(self.url(path, None)))
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    /// Fetch one normalized product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product is unknown.
    pub async fn product(&self, id: &ProductId) -> Result<Product, CliError> {
        let path = format!("/products/{}", urlencoding::encode(&id.to_path_segment()));
        let value = self.get(&path, None).await?;
        Ok(serde_json::from_value(value)?)
    }
}

async fn read_json(response: reqwest::Response) -> Result<(StatusCode, Value), CliError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    if status.is_success() {
        return Ok((status, value));
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed")
        .to_string();
    Err(CliError::Api {
        status: status.as_u16(),
        message,
    })
}
