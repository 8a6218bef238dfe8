use std::env;

/// The mapping provider cannot initialize. Fatal for the component
/// instance: it renders a full-surface error state and no overlay
/// functionality is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LoadError {}

/// Environment-supplied configuration for the map component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the risk backend.
    pub api_base_url: String,
    /// Geocoding endpoint template with an `{address}` placeholder.
    pub geocoder_url: String,
    /// Mapping-provider credential. Required: absence must surface as a
    /// visible load error, never a silent failure.
    pub provider_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoadError> {
        let api_base_url =
            lookup("FIREMAP_API_BASE_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let geocoder_url = lookup("FIREMAP_GEOCODER_URL").unwrap_or_else(|| {
            "https://nominatim.openstreetmap.org/search?format=json&limit=1&q={address}".to_string()
        });

        let provider_key = lookup("FIREMAP_PROVIDER_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LoadError::new("FIREMAP_PROVIDER_KEY is not set; cannot load the mapping provider")
            })?;

        Ok(Self {
            api_base_url,
            geocoder_url,
            provider_key,
        })
    }
}
