use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{Error, Result};

use super::request::ApiRequest;
use super::response::ApiResponse;

/// HTTP client bound to one base URL and one per-request timeout.
///
/// `send` never retries: every call maps to exactly one request on the wire.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| Error::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for a request path, keeping any path prefix on the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        let method = request.method;

        let mut builder = self.client.request(method.into(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(%method, %url, "sending request");
        let started = Instant::now();
        let response = builder.send().await.map_err(|source| {
            if source.is_timeout() {
                Error::Timeout {
                    method: method.to_string(),
                    url: url.clone(),
                    timeout: self.timeout,
                }
            } else {
                Error::Request {
                    method: method.to_string(),
                    url: url.clone(),
                    source,
                }
            }
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| {
            if source.is_timeout() {
                Error::Timeout {
                    method: method.to_string(),
                    url: url.clone(),
                    timeout: self.timeout,
                }
            } else {
                Error::ReadBody {
                    url: url.clone(),
                    source,
                }
            }
        })?;
        let duration_ms = started.elapsed().as_millis() as u64;

        debug!(%method, %url, status = status.as_u16(), duration_ms, "response received");

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            size_bytes: bytes.len(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            duration_ms,
        })
    }
}
