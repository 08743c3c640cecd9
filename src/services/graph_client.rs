// src/services/graph_client.rs
// DOCUMENTATION: Facebook Graph API client
// PURPOSE: The `graph(path, params)` helper every fetcher goes through

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU32;

use crate::config::Config;
use crate::errors::GraphError;
use crate::services::params::GraphParams;

/// Graph error codes that mean "slow down"
const THROTTLING_CODES: [i64; 4] = [4, 17, 32, 613];

/// Response of a Graph list call
/// DOCUMENTATION: `data` holds the raw resources, `paging` the cursors
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphResponse {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub paging: Option<GraphPaging>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphPaging {
    pub cursors: Option<GraphCursors>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphCursors {
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Error envelope returned by the Graph
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

/// The Graph as the fetchers see it
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Issue one GET against `path` with `params`
    async fn graph(&self, path: &str, params: &GraphParams) -> Result<GraphResponse, GraphError>;
}

/// Graph API client
/// DOCUMENTATION: Adds the access token, throttles, and maps Graph errors
pub struct GraphClient {
    /// HTTP client for making requests
    client: Client,
    /// Graph access token
    access_token: String,
    /// Graph root URL, e.g. https://graph.facebook.com
    base_url: String,
    /// Client-side request throttle
    limiter: DefaultDirectRateLimiter,
}

impl GraphClient {
    pub fn new(access_token: String, base_url: String, requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            client: Client::new(),
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.facebook_access_token.clone(),
            config.graph_api_url.clone(),
            config.graph_requests_per_second,
        )
    }

    /// Absolute URL for a Graph path (`12345/albums/` → `{base}/12345/albums`)
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_matches('/'))
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn graph(&self, path: &str, params: &GraphParams) -> Result<GraphResponse, GraphError> {
        let url = self.url_for(path);

        let mut query = params.clone();
        query.insert("access_token".to_string(), self.access_token.clone());

        self.limiter.until_ready().await;

        log::debug!("Graph GET {} params={:?}", path, params);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                // the URL carries the access token
                let e = e.without_url();
                log::error!("Graph request {} failed: {}", path, e);
                GraphError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            log::error!("Failed to read Graph response for {}: {}", path, e);
            GraphError::ExternalApiError(format!("Read error: {}", e))
        })?;

        if !status.is_success() {
            let err = map_graph_error(status, &body);
            log::error!("Graph API error on {}: {}", path, err);
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse Graph response for {}: {}", path, e);
            GraphError::ExternalApiError(format!("Parse error: {}", e))
        })
    }
}

/// Map a failed Graph response to a GraphError
/// DOCUMENTATION: throttling codes become RateLimitExceeded, everything else
/// carries the Graph's own message
pub fn map_graph_error(status: StatusCode, body: &str) -> GraphError {
    match serde_json::from_str::<GraphErrorEnvelope>(body) {
        Ok(envelope) => {
            let err = envelope.error;
            if err.code.map_or(false, |c| THROTTLING_CODES.contains(&c)) {
                return GraphError::RateLimitExceeded;
            }
            GraphError::ExternalApiError(format!(
                "{} {} (code {}): {}",
                status,
                err.kind.unwrap_or_else(|| "GraphError".to_string()),
                err.code.unwrap_or_default(),
                err.message
            ))
        }
        Err(_) if status == StatusCode::TOO_MANY_REQUESTS => GraphError::RateLimitExceeded,
        Err(_) => GraphError::ExternalApiError(format!("API error {}: {}", status, body)),
    }
}
