//! Request forwarder for the upstream collection-based CMS API.
//!
//! Translates simplified `{endpoint, method, body}` requests into calls
//! against the remote API, mapping logical collection keys to opaque
//! collection identifiers.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use crate::config::ProxyConfig;
use crate::{MediadeckError, Result};

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// User agent string for upstream calls.
const USER_AGENT: &str = concat!("mediadeck/", env!("CARGO_PKG_VERSION"));

/// Result of a forwarded call: the upstream status and JSON body to pass
/// through verbatim.
#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    /// HTTP status code to report.
    pub status: u16,
    /// JSON body to report.
    pub body: Value,
}

/// Forwarder holding the upstream HTTP client and collection mapping.
pub struct Forwarder {
    client: Client,
    config: ProxyConfig,
}

impl Forwarder {
    /// Create a new forwarder.
    ///
    /// The client enforces a hard total timeout on every upstream call.
    pub fn new(config: ProxyConfig) -> Result<Self> {
        url::Url::parse(&config.api_base_url)
            .map_err(|e| MediadeckError::Config(format!("invalid api_base_url: {e}")))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MediadeckError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Resolve an endpoint key into a target URL.
    ///
    /// A bare collection key maps to the collection-level items endpoint;
    /// `<collection_key>/<item_id>` maps to the item-level endpoint.
    /// Returns the URL and whether the target is a bare collection.
    pub fn build_url(&self, endpoint_key: &str) -> Result<(String, bool)> {
        let (collection_key, item_id) = match endpoint_key.split_once('/') {
            Some((collection_key, item_id)) => (collection_key, Some(item_id)),
            None => (endpoint_key, None),
        };

        let collection_id = self
            .config
            .collections
            .get(collection_key)
            .ok_or_else(|| MediadeckError::UnknownCollection(collection_key.to_string()))?;

        let base = self.config.api_base_url.trim_end_matches('/');
        let url = match item_id {
            Some(item_id) => format!("{base}/collections/{collection_id}/items/{item_id}"),
            None => format!("{base}/collections/{collection_id}/items"),
        };

        Ok((url, item_id.is_none()))
    }

    /// Parse the request method, restricted to the supported verbs.
    fn parse_method(method: &str) -> Result<Method> {
        match method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PATCH" => Ok(Method::PATCH),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            other => Err(MediadeckError::Validation(format!(
                "unsupported method: {other}"
            ))),
        }
    }

    /// Forward a request to the upstream API.
    ///
    /// On success the upstream status and JSON body pass through
    /// verbatim. An empty or 204 success response is synthesized into an
    /// empty-collection envelope for a GET on a bare collection, and a
    /// generic success envelope otherwise. Timeouts are reported
    /// distinctly from other upstream failures.
    pub async fn forward(
        &self,
        endpoint_key: &str,
        method: &str,
        body: Option<&Value>,
    ) -> Result<ForwardOutcome> {
        let method = Self::parse_method(method)?;
        let (url, bare_collection) = self.build_url(endpoint_key)?;

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.config.api_token);

        if matches!(method, Method::POST | Method::PATCH) {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            return Err(MediadeckError::Upstream(format!(
                "{status} - Details: {text}"
            )));
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            let body = if method == Method::GET && bare_collection {
                json!({"items": [], "count": 0, "limit": 100, "offset": 0, "total": 0})
            } else {
                json!({"success": true, "message": "Operation successful"})
            };
            return Ok(ForwardOutcome {
                status: StatusCode::OK.as_u16(),
                body,
            });
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            MediadeckError::Upstream(format!("invalid JSON from upstream: {e}"))
        })?;

        Ok(ForwardOutcome {
            status: status.as_u16(),
            body,
        })
    }
}

/// Map a reqwest transport error, keeping timeouts distinct.
fn classify_transport_error(e: reqwest::Error) -> MediadeckError {
    if e.is_timeout() {
        MediadeckError::UpstreamTimeout(e.to_string())
    } else {
        MediadeckError::Upstream(format!("request failed: {e}"))
    }
}
