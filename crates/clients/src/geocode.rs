use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use geo::LatLng;
use serde::Deserialize;

use crate::BoxFuture;

/// Lookup failed: the service could not resolve the query to a coordinate.
///
/// Transport problems collapse into the same condition; the caller only
/// distinguishes resolved from unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeError {
    pub query: String,
}

impl GeocodeError {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not resolve location {:?}", self.query)
    }
}

impl std::error::Error for GeocodeError {}

/// Maps a free-text place description to a coordinate pair.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> BoxFuture<'_, Result<LatLng, GeocodeError>>;
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Geocoder over a Nominatim-style HTTP endpoint.
///
/// The URL template must contain an `{address}` placeholder, e.g.
/// `https://nominatim.openstreetmap.org/search?format=json&q={address}`.
/// The response is expected to be a JSON array of hits with string
/// `lat`/`lon` fields; the first hit wins.
pub struct HttpGeocoder {
    url_template: String,
    client: reqwest::Client,
}

impl HttpGeocoder {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            client: reqwest::Client::new(),
        }
    }

    fn lookup_url(&self, address: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(address.as_bytes()).collect();
        self.url_template.replace("{address}", &encoded)
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, address: &str) -> BoxFuture<'_, Result<LatLng, GeocodeError>> {
        let url = self.lookup_url(address);
        let query = address.to_string();
        Box::pin(async move {
            let unresolved = || GeocodeError::new(query.clone());

            let resp = self.client.get(&url).send().await.map_err(|e| {
                tracing::debug!("geocode transport failure for {query:?}: {e}");
                unresolved()
            })?;

            if !resp.status().is_success() {
                tracing::debug!("geocode HTTP {} for {query:?}", resp.status());
                return Err(unresolved());
            }

            let hits: Vec<GeocodeHit> = resp.json().await.map_err(|_| unresolved())?;
            let Some(hit) = hits.first() else {
                return Err(unresolved());
            };

            let lat: f64 = hit.lat.parse().map_err(|_| unresolved())?;
            let lng: f64 = hit.lon.parse().map_err(|_| unresolved())?;
            let position = LatLng::new(lat, lng);
            if !position.is_finite() {
                return Err(unresolved());
            }
            Ok(position)
        })
    }
}

/// In-memory geocoder for tests or offline use.
///
/// Resolves only addresses registered up front and counts every lookup.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    entries: BTreeMap<String, LatLng>,
    calls: AtomicU64,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, address: impl Into<String>, position: LatLng) -> Self {
        self.entries.insert(address.into(), position);
        self
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> BoxFuture<'_, Result<LatLng, GeocodeError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .entries
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::new(address));
        Box::pin(async move { result })
    }
}
