use geo::{Handle, LatLng, ViewportState};

use crate::symbology::SurfaceStyle;

/// Handle to one marker placed on the surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub Handle);

/// Handle to the heat layer, if one exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeatLayerHandle(pub Handle);

/// Everything the surface needs to place one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub color: &'static str,
    pub title: String,
}

/// One weighted sample feeding the heat layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeightedSample {
    pub position: LatLng,
    pub weight: f64,
}

/// Heat layer parameters handed to the surface in one call.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatLayerSpec {
    pub samples: Vec<WeightedSample>,
    pub radius: f64,
    pub opacity: f64,
    pub max_intensity: f64,
    pub gradient: &'static [&'static str],
}

/// The mutable mapping surface owned by one component instance.
///
/// Implementations wrap the external mapping provider. All overlay objects
/// are exposed only as opaque handles; callers can create and release them
/// but never reach into the provider's native objects. No other component
/// may mutate the surface.
pub trait MapSurface {
    fn place_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn create_heat_layer(&mut self, spec: &HeatLayerSpec) -> HeatLayerHandle;

    fn remove_heat_layer(&mut self, handle: HeatLayerHandle);

    /// Re-skin the surface. Independent of overlay content.
    fn apply_style(&mut self, style: SurfaceStyle);

    /// Move the camera. The surface is a passive renderer of viewport
    /// state; it never writes it back.
    fn set_viewport(&mut self, viewport: ViewportState);
}
