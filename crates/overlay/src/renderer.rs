use geo::CommunityPoint;

use crate::surface::{HeatLayerHandle, HeatLayerSpec, MapSurface, MarkerHandle, MarkerSpec, WeightedSample};
use crate::symbology::{
    HEAT_GRADIENT, HEAT_MAX_INTENSITY, HEAT_OPACITY, HEAT_RADIUS, SurfaceStyle, severity_color,
    severity_weight,
};

/// Pin markers vs. weighted heat layer. Presentation only, never affects
/// fetched data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Pins,
    Heatmap,
}

/// Owns the drawable state of one mapping surface.
///
/// At most one overlay set is active at a time: every `draw` releases the
/// previous set first, and `clear` releases everything. Handles never leak
/// past this type.
#[derive(Debug)]
pub struct OverlayRenderer<S: MapSurface> {
    surface: S,
    markers: Vec<MarkerHandle>,
    heat: Option<HeatLayerHandle>,
}

impl<S: MapSurface> OverlayRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            markers: Vec::new(),
            heat: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn has_heat_layer(&self) -> bool {
        self.heat.is_some()
    }

    /// Draw `points` under the given mode and style.
    ///
    /// Points with non-finite coordinates are silently skipped. In heatmap
    /// mode, zero-weight samples are excluded; if nothing remains, no heat
    /// layer is created (not an error).
    pub fn draw(&mut self, points: &[CommunityPoint], mode: ViewMode, style: SurfaceStyle) {
        self.clear();
        self.surface.apply_style(style);

        match mode {
            ViewMode::Pins => {
                for point in points {
                    if !point.has_valid_position() {
                        continue;
                    }
                    let spec = MarkerSpec {
                        position: point.position(),
                        color: severity_color(point.severity),
                        title: format!("{} - Severity: {}", point.name, point.severity.label()),
                    };
                    self.markers.push(self.surface.place_marker(&spec));
                }
            }
            ViewMode::Heatmap => {
                let samples: Vec<WeightedSample> = points
                    .iter()
                    .filter(|p| p.has_valid_position())
                    .map(|p| WeightedSample {
                        position: p.position(),
                        weight: severity_weight(p.severity),
                    })
                    .filter(|s| s.weight > 0.0)
                    .collect();

                if !samples.is_empty() {
                    let spec = HeatLayerSpec {
                        samples,
                        radius: HEAT_RADIUS,
                        opacity: HEAT_OPACITY,
                        max_intensity: HEAT_MAX_INTENSITY,
                        gradient: &HEAT_GRADIENT,
                    };
                    self.heat = Some(self.surface.create_heat_layer(&spec));
                }
            }
        }
    }

    /// Release every marker handle and the heat layer if present.
    ///
    /// Idempotent: clearing an empty renderer is a no-op.
    pub fn clear(&mut self) {
        for handle in self.markers.drain(..) {
            self.surface.remove_marker(handle);
        }
        if let Some(handle) = self.heat.take() {
            self.surface.remove_heat_layer(handle);
        }
    }

    /// Tear down: release all overlays, then hand the surface back so the
    /// caller can release the underlying provider handle.
    pub fn dispose(mut self) -> S {
        self.clear();
        self.surface
    }
}
