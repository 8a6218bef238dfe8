use crate::point::LatLng;

/// Continental-US centroid, the fallback center when nothing is selected
/// or county-level centering fails.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.0902,
    lng: -95.7129,
};

/// Zoom applied after a successful free-text location search.
pub const ZOOM_SEARCH: u8 = 9;
/// Zoom applied after successful county-level centering.
pub const ZOOM_COUNTY: u8 = 8;
/// Zoom applied when a geocode fails and the view falls back.
pub const ZOOM_FALLBACK: u8 = 6;
/// Zoom applied when no location is selected at all.
pub const ZOOM_RESET: u8 = 4;

/// Where the mapping surface should look.
///
/// Written only by the coordinator; the surface is a passive renderer of
/// this state. User-driven panning is not persisted back.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportState {
    pub center: LatLng,
    pub zoom: u8,
}

impl ViewportState {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }

    pub fn reset() -> Self {
        Self::new(DEFAULT_CENTER, ZOOM_RESET)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, ZOOM_FALLBACK)
    }
}
