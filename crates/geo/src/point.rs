use serde::{Deserialize, Serialize};

/// Geographic coordinate pair in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers (NaN and infinities rejected).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Risk classification of a community point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// The backend emits both string and numeric ids, so accept either.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Text(String),
    Number(i64),
}

/// One community risk point as returned by the county-communities endpoint.
///
/// Immutable once received; a new successful fetch supersedes the whole set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunityPoint {
    pub id: PointId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub severity: Severity,
}

impl CommunityPoint {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Points with missing or non-numeric coordinates are skipped by the
    /// renderer, not treated as errors.
    pub fn has_valid_position(&self) -> bool {
        self.position().is_finite()
    }
}
