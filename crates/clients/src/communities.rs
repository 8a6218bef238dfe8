use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use geo::CommunityPoint;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::BoxFuture;

/// Error type for community data fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-2xx response; `detail` comes from the error body when present.
    Http { status: u16, detail: String },
    /// 200 response whose payload carried an `error` field.
    Payload { message: String },
    /// The request never produced a response.
    Transport { message: String },
}

impl FetchError {
    /// Message suitable for the blocking data-error overlay.
    pub fn message(&self) -> String {
        match self {
            FetchError::Http { status, detail } => {
                if detail.is_empty() {
                    format!("Failed to fetch map points (Status: {status})")
                } else {
                    detail.clone()
                }
            }
            FetchError::Payload { message } => message.clone(),
            FetchError::Transport { message } => message.clone(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FetchError {}

/// Lists community risk points for one county/state selection.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait CommunitySource: Send + Sync {
    fn county_communities(
        &self,
        county: &str,
        state_abbr: &str,
    ) -> BoxFuture<'_, Result<Vec<CommunityPoint>, FetchError>>;
}

#[derive(Debug, Deserialize)]
struct CommunitiesResponse {
    #[serde(default)]
    communities: Vec<CommunityPoint>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: String,
}

/// Community source backed by the risk backend's HTTP API.
pub struct HttpCommunitySource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCommunitySource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint_url(&self, county: &str, state_abbr: &str) -> Result<reqwest::Url, FetchError> {
        let base = format!(
            "{}/api/v1/predictor/county-map-communities",
            self.base_url.trim_end_matches('/')
        );
        reqwest::Url::parse_with_params(
            &base,
            [("county_name", county), ("state_abbr", state_abbr)],
        )
        .map_err(|e| FetchError::Transport {
            message: format!("Invalid API base URL: {e}"),
        })
    }

    // A 200 body may still report failure through its error field; that
    // counts the same as a non-2xx response.
    fn from_success_body(body: CommunitiesResponse) -> Result<Vec<CommunityPoint>, FetchError> {
        if let Some(message) = body.error.filter(|m| !m.is_empty()) {
            return Err(FetchError::Payload { message });
        }
        Ok(body.communities)
    }
}

impl CommunitySource for HttpCommunitySource {
    fn county_communities(
        &self,
        county: &str,
        state_abbr: &str,
    ) -> BoxFuture<'_, Result<Vec<CommunityPoint>, FetchError>> {
        let url = self.endpoint_url(county, state_abbr);
        let county = county.to_string();
        let state_abbr = state_abbr.to_string();
        Box::pin(async move {
            let url = url?;
            let resp =
                self.client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| FetchError::Transport {
                        message: format!("Fetch failed: {e}"),
                    })?;

            let status = resp.status();
            if !status.is_success() {
                let detail = resp
                    .json::<ErrorBody>()
                    .await
                    .map(|b| b.detail)
                    .unwrap_or_default();
                return Err(FetchError::Http {
                    status: status.as_u16(),
                    detail,
                });
            }

            let body: CommunitiesResponse =
                resp.json().await.map_err(|e| FetchError::Transport {
                    message: format!("Malformed communities payload: {e}"),
                })?;

            let points = Self::from_success_body(body)?;
            tracing::debug!(
                "received {} map points for {county}, {state_abbr}",
                points.len()
            );
            Ok(points)
        })
    }
}

type StaticKey = (String, String);

/// In-memory community source for tests or offline use.
///
/// Responses are registered per (county, state) key; unknown keys resolve
/// to an HTTP 404. Every call is counted so tests can assert that toggles
/// never re-fetch.
#[derive(Debug, Default)]
pub struct StaticCommunitySource {
    responses: RwLock<BTreeMap<StaticKey, Result<Vec<CommunityPoint>, FetchError>>>,
    calls: AtomicU64,
}

impl StaticCommunitySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(
        &self,
        county: impl Into<String>,
        state_abbr: impl Into<String>,
        response: Result<Vec<CommunityPoint>, FetchError>,
    ) {
        self.responses
            .write()
            .await
            .insert((county.into(), state_abbr.into()), response);
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CommunitySource for StaticCommunitySource {
    fn county_communities(
        &self,
        county: &str,
        state_abbr: &str,
    ) -> BoxFuture<'_, Result<Vec<CommunityPoint>, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (county.to_string(), state_abbr.to_string());
        Box::pin(async move {
            self.responses
                .read()
                .await
                .get(&key)
                .cloned()
                .unwrap_or_else(|| {
                    Err(FetchError::Http {
                        status: 404,
                        detail: String::new(),
                    })
                })
        })
    }
}
