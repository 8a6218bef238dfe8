use std::collections::BTreeMap;

use geo::{Handle, ViewportState};

use crate::surface::{HeatLayerHandle, HeatLayerSpec, MapSurface, MarkerHandle, MarkerSpec};
use crate::symbology::SurfaceStyle;

/// In-memory mapping surface for tests or headless rendering.
///
/// Records every placed object in a deterministic map keyed by handle
/// index. Releasing an unknown or already-released handle is ignored,
/// matching provider behavior for detached objects.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_index: u32,
    markers: BTreeMap<u32, MarkerSpec>,
    heat_layers: BTreeMap<u32, HeatLayerSpec>,
    style: SurfaceStyle,
    viewport: Option<ViewportState>,
    style_applications: u32,
    viewport_applications: u32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn live_heat_layer_count(&self) -> usize {
        self.heat_layers.len()
    }

    /// Live markers in ascending handle-index order.
    pub fn live_markers(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.markers.values()
    }

    pub fn live_heat_layers(&self) -> impl Iterator<Item = &HeatLayerSpec> {
        self.heat_layers.values()
    }

    pub fn style(&self) -> SurfaceStyle {
        self.style
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport
    }

    pub fn style_applications(&self) -> u32 {
        self.style_applications
    }

    pub fn viewport_applications(&self) -> u32 {
        self.viewport_applications
    }

    // Note: generation 0 handles; the recording surface never reuses an index.
    fn next_handle(&mut self) -> Handle {
        let index = self.next_index;
        self.next_index += 1;
        Handle::new(index, 0)
    }
}

impl MapSurface for RecordingSurface {
    fn place_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        let handle = self.next_handle();
        self.markers.insert(handle.index(), spec.clone());
        MarkerHandle(handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle.0.index());
    }

    fn create_heat_layer(&mut self, spec: &HeatLayerSpec) -> HeatLayerHandle {
        let handle = self.next_handle();
        self.heat_layers.insert(handle.index(), spec.clone());
        HeatLayerHandle(handle)
    }

    fn remove_heat_layer(&mut self, handle: HeatLayerHandle) {
        self.heat_layers.remove(&handle.0.index());
    }

    fn apply_style(&mut self, style: SurfaceStyle) {
        self.style = style;
        self.style_applications += 1;
    }

    fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport = Some(viewport);
        self.viewport_applications += 1;
    }
}
