use clients::{FetchError, GeocodeError};
use geo::{
    CommunityPoint, DEFAULT_CENTER, LatLng, ViewportState, ZOOM_COUNTY, ZOOM_FALLBACK, ZOOM_SEARCH,
};
use overlay::{LegendEntry, MapSurface, OverlayRenderer, SurfaceStyle, ViewMode, legend_entries};

/// External inputs the coordinator reacts to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inputs {
    pub selected_county: Option<String>,
    pub selected_state_abbr: Option<String>,
    pub center_on_location: Option<String>,
}

impl Inputs {
    fn search_query(&self) -> Option<&str> {
        non_empty(self.center_on_location.as_deref())
    }

    fn county_selection(&self) -> Option<(&str, &str)> {
        let county = non_empty(self.selected_county.as_deref())?;
        let state = non_empty(self.selected_state_abbr.as_deref())?;
        Some((county, state))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// One community-data request window.
///
/// Exactly one of these exists per issued request; a newer request (or an
/// emptied selection) invalidates the prior one's ability to write.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Success(Vec<CommunityPoint>),
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn points(&self) -> &[CommunityPoint] {
        match self {
            FetchState::Success(points) => points,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Why a geocode was issued. Decides the zoom applied on success and
/// whether a failure is surfaced or silently falls back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeocodePurpose {
    /// Explicit user-initiated search; failure is surfaced.
    Search,
    /// Implicit best-effort county centering; failure is silent.
    CountyFallback,
}

/// Async work requested by the state machine.
///
/// The caller performs the lookup and feeds the outcome back through
/// [`Coordinator::on_geocode_result`] / [`Coordinator::on_fetch_result`]
/// with the sequence number unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Geocode {
        seq: u64,
        purpose: GeocodePurpose,
        address: String,
    },
    FetchCommunities {
        seq: u64,
        county: String,
        state_abbr: String,
    },
}

/// Single source of truth for what should be on the map and why.
///
/// Reacting to an input change recomputes which pipelines are dirty
/// (viewport resolution, data resolution, overlay render) and re-runs only
/// those. Completions carry the sequence number of the request that issued
/// them; only the most recently issued request in each pipeline may write.
pub struct Coordinator<S: MapSurface> {
    renderer: OverlayRenderer<S>,
    inputs: Inputs,
    inputs_seen: bool,
    viewport: ViewportState,
    view_mode: ViewMode,
    style: SurfaceStyle,
    fetch: FetchState,
    geocode_error: Option<String>,
    geocode_seq: u64,
    geocode_purpose: Option<GeocodePurpose>,
    fetch_seq: u64,
    surface_ready: bool,
}

impl<S: MapSurface> Coordinator<S> {
    pub fn new(surface: S) -> Self {
        Self {
            renderer: OverlayRenderer::new(surface),
            inputs: Inputs::default(),
            inputs_seen: false,
            viewport: ViewportState::default(),
            view_mode: ViewMode::default(),
            style: SurfaceStyle::default(),
            fetch: FetchState::Idle,
            geocode_error: None,
            geocode_seq: 0,
            geocode_purpose: None,
            fetch_seq: 0,
            surface_ready: false,
        }
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn style(&self) -> SurfaceStyle {
        self.style
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn points(&self) -> &[CommunityPoint] {
        self.fetch.points()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch.is_loading()
    }

    /// Dismissible inline message for a failed explicit location search.
    pub fn geocode_error(&self) -> Option<&str> {
        self.geocode_error.as_deref()
    }

    /// Blocking message for the map area when the data fetch failed.
    pub fn data_error_message(&self) -> Option<String> {
        self.fetch
            .error()
            .map(|message| format!("Map Data Error: {message}"))
    }

    pub fn legend(&self) -> [LegendEntry; 2] {
        legend_entries()
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn renderer(&self) -> &OverlayRenderer<S> {
        &self.renderer
    }

    /// The mapping surface finished initializing. Applies the current
    /// viewport and style, then renders whatever state accumulated while
    /// the surface was loading.
    pub fn on_surface_ready(&mut self) {
        self.surface_ready = true;
        self.renderer.surface_mut().set_viewport(self.viewport);
        self.renderer.surface_mut().apply_style(self.style);
        self.render();
    }

    /// React to an input change. Only the pipelines whose inputs actually
    /// changed re-run; returns the async work they requested.
    pub fn set_inputs(&mut self, inputs: Inputs) -> Vec<Effect> {
        let viewport_dirty = !self.inputs_seen || inputs != self.inputs;
        let data_dirty = !self.inputs_seen
            || inputs.selected_county != self.inputs.selected_county
            || inputs.selected_state_abbr != self.inputs.selected_state_abbr;

        self.inputs = inputs;
        self.inputs_seen = true;

        let mut effects = Vec::new();
        if viewport_dirty {
            self.resolve_viewport(&mut effects);
        }
        if data_dirty {
            self.resolve_data(&mut effects);
        }
        effects
    }

    /// Toggling the view mode only re-runs the render step.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        self.render();
    }

    /// Toggling the style only re-skins the surface and re-runs the render
    /// step; fetched data and viewport are untouched.
    pub fn set_style(&mut self, style: SurfaceStyle) {
        if self.style == style {
            return;
        }
        self.style = style;
        if self.surface_ready {
            self.renderer.surface_mut().apply_style(style);
        }
        self.render();
    }

    /// Flip between the colored and monotone skins.
    pub fn toggle_style(&mut self) {
        self.set_style(self.style.toggled());
    }

    /// Geocode completion. Dropped unless `seq` matches the most recently
    /// issued geocode. The purpose is the one recorded when that geocode
    /// was issued, so a completion can never be applied under the wrong
    /// zoom or surfacing rule.
    pub fn on_geocode_result(&mut self, seq: u64, result: Result<LatLng, GeocodeError>) {
        if seq != self.geocode_seq {
            tracing::debug!("dropping stale geocode completion (seq {seq})");
            return;
        }
        let Some(purpose) = self.geocode_purpose.take() else {
            return;
        };

        match (purpose, result) {
            (GeocodePurpose::Search, Ok(center)) => {
                self.geocode_error = None;
                self.apply_viewport(ViewportState::new(center, ZOOM_SEARCH));
            }
            (GeocodePurpose::Search, Err(err)) => {
                // Keep the previous center; only the zoom falls back.
                self.geocode_error = Some(format!(
                    "Could not geocode {:?} for map centering.",
                    err.query
                ));
                self.apply_viewport(ViewportState::new(self.viewport.center, ZOOM_FALLBACK));
            }
            (GeocodePurpose::CountyFallback, Ok(center)) => {
                self.apply_viewport(ViewportState::new(center, ZOOM_COUNTY));
            }
            (GeocodePurpose::CountyFallback, Err(_)) => {
                // Best-effort centering; fall back silently.
                self.apply_viewport(ViewportState::new(DEFAULT_CENTER, ZOOM_FALLBACK));
            }
        }
    }

    /// Community-data completion. Dropped unless `seq` matches the most
    /// recently issued fetch, so a superseded request can never overwrite
    /// newer points (including its error surfacing).
    pub fn on_fetch_result(&mut self, seq: u64, result: Result<Vec<CommunityPoint>, FetchError>) {
        if seq != self.fetch_seq {
            tracing::debug!("dropping stale fetch completion (seq {seq})");
            return;
        }

        match result {
            Ok(points) => {
                tracing::debug!("fetch {seq} completed with {} points", points.len());
                self.fetch = FetchState::Success(points);
            }
            Err(err) => {
                tracing::warn!("fetch {seq} failed: {err}");
                self.fetch = FetchState::Error(err.message());
            }
        }
        self.render();
    }

    /// Tear down: releases every overlay exactly once, then hands the
    /// surface back so its provider handle can be released. Consuming
    /// `self` makes late completions structurally impossible.
    pub fn dispose(self) -> S {
        self.renderer.dispose()
    }

    fn resolve_viewport(&mut self, effects: &mut Vec<Effect>) {
        // A new resolution invalidates any geocode still in flight.
        self.geocode_seq += 1;
        self.geocode_error = None;

        if let Some(query) = self.inputs.search_query() {
            // An explicit search wins over county centering.
            self.geocode_purpose = Some(GeocodePurpose::Search);
            effects.push(Effect::Geocode {
                seq: self.geocode_seq,
                purpose: GeocodePurpose::Search,
                address: query.to_string(),
            });
        } else if let Some((county, state)) = self.inputs.county_selection() {
            self.geocode_purpose = Some(GeocodePurpose::CountyFallback);
            effects.push(Effect::Geocode {
                seq: self.geocode_seq,
                purpose: GeocodePurpose::CountyFallback,
                address: format!("{county} County, {state}"),
            });
        } else {
            self.geocode_purpose = None;
            self.apply_viewport(ViewportState::reset());
        }
    }

    fn resolve_data(&mut self, effects: &mut Vec<Effect>) {
        // Bumping the sequence logically cancels any fetch in flight.
        self.fetch_seq += 1;

        match self.inputs.county_selection() {
            Some((county, state)) => {
                tracing::debug!("fetching communities for {county}, {state}");
                self.fetch = FetchState::Loading;
                effects.push(Effect::FetchCommunities {
                    seq: self.fetch_seq,
                    county: county.to_string(),
                    state_abbr: state.to_string(),
                });
            }
            None => {
                // Clear points and any fetch error without waiting for an
                // in-flight request to settle.
                self.fetch = FetchState::Idle;
            }
        }
        self.render();
    }

    fn apply_viewport(&mut self, viewport: ViewportState) {
        self.viewport = viewport;
        if self.surface_ready {
            self.renderer.surface_mut().set_viewport(viewport);
        }
    }

    /// Overlay render step. Idempotent; always reflects current state at
    /// invocation time.
    fn render(&mut self) {
        let ready = self.surface_ready && !self.fetch.is_loading();
        if !ready || self.fetch.points().is_empty() {
            self.renderer.clear();
            return;
        }

        // draw() releases the previous overlay set itself.
        let points = self.fetch.points();
        self.renderer.draw(points, self.view_mode, self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinator, Effect, FetchState, GeocodePurpose, Inputs};
    use clients::{FetchError, GeocodeError};
    use geo::{
        CommunityPoint, DEFAULT_CENTER, LatLng, PointId, Severity, ZOOM_COUNTY, ZOOM_FALLBACK,
        ZOOM_RESET, ZOOM_SEARCH,
    };
    use overlay::{RecordingSurface, SurfaceStyle, ViewMode};

    fn coordinator() -> Coordinator<RecordingSurface> {
        let mut c = Coordinator::new(RecordingSurface::new());
        c.on_surface_ready();
        c
    }

    fn inputs(county: Option<&str>, state: Option<&str>, center: Option<&str>) -> Inputs {
        Inputs {
            selected_county: county.map(str::to_string),
            selected_state_abbr: state.map(str::to_string),
            center_on_location: center.map(str::to_string),
        }
    }

    fn point(id: &str, name: &str, lat: f64, lng: f64, severity: Severity) -> CommunityPoint {
        CommunityPoint {
            id: PointId::Text(id.to_string()),
            name: name.to_string(),
            lat,
            lng,
            severity,
        }
    }

    fn fetch_effect(effects: &[Effect]) -> (u64, String, String) {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchCommunities {
                    seq,
                    county,
                    state_abbr,
                } => Some((*seq, county.clone(), state_abbr.clone())),
                _ => None,
            })
            .expect("expected a fetch effect")
    }

    fn geocode_effect(effects: &[Effect]) -> (u64, GeocodePurpose, String) {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Geocode {
                    seq,
                    purpose,
                    address,
                } => Some((*seq, *purpose, address.clone())),
                _ => None,
            })
            .expect("expected a geocode effect")
    }

    #[test]
    fn empty_inputs_reset_viewport_without_any_requests() {
        let mut c = coordinator();
        let effects = c.set_inputs(Inputs::default());
        assert!(effects.is_empty());
        assert_eq!(c.viewport().center, DEFAULT_CENTER);
        assert_eq!(c.viewport().zoom, ZOOM_RESET);
        assert!(c.geocode_error().is_none());
        assert_eq!(c.fetch_state(), &FetchState::Idle);
    }

    #[test]
    fn explicit_search_wins_over_county_centering() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), Some("Austin, TX")));

        let (seq, purpose, address) = geocode_effect(&effects);
        assert_eq!(purpose, GeocodePurpose::Search);
        assert_eq!(address, "Austin, TX");

        // Exactly one geocode: the county fallback was never issued.
        let geocodes = effects
            .iter()
            .filter(|e| matches!(e, Effect::Geocode { .. }))
            .count();
        assert_eq!(geocodes, 1);

        let austin = LatLng::new(30.2672, -97.7431);
        c.on_geocode_result(seq, Ok(austin));
        assert_eq!(c.viewport().center, austin);
        assert_eq!(c.viewport().zoom, ZOOM_SEARCH);
    }

    #[test]
    fn county_selection_geocodes_county_address_at_county_zoom() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));

        let (seq, purpose, address) = geocode_effect(&effects);
        assert_eq!(purpose, GeocodePurpose::CountyFallback);
        assert_eq!(address, "Travis County, TX");

        let center = LatLng::new(30.33, -97.78);
        c.on_geocode_result(seq, Ok(center));
        assert_eq!(c.viewport().center, center);
        assert_eq!(c.viewport().zoom, ZOOM_COUNTY);
    }

    #[test]
    fn failed_search_surfaces_error_and_keeps_previous_center() {
        let mut c = coordinator();
        let before = c.viewport().center;
        let effects = c.set_inputs(inputs(None, None, Some("Nowhere, ZZ")));
        let (seq, _, _) = geocode_effect(&effects);

        c.on_geocode_result(seq, Err(GeocodeError::new("Nowhere, ZZ")));
        assert_eq!(
            c.geocode_error(),
            Some("Could not geocode \"Nowhere, ZZ\" for map centering.")
        );
        assert_eq!(c.viewport().center, before);
        assert_eq!(c.viewport().zoom, ZOOM_FALLBACK);
    }

    #[test]
    fn failed_county_centering_falls_back_silently() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Ghost"), Some("ZZ"), None));
        let (seq, _, _) = geocode_effect(&effects);

        c.on_geocode_result(seq, Err(GeocodeError::new("Ghost County, ZZ")));
        assert!(c.geocode_error().is_none());
        assert_eq!(c.viewport().center, DEFAULT_CENTER);
        assert_eq!(c.viewport().zoom, ZOOM_FALLBACK);
    }

    #[test]
    fn stale_geocode_completion_is_dropped() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(None, None, Some("Austin, TX")));
        let (old_seq, _, _) = geocode_effect(&first);

        let second = c.set_inputs(inputs(None, None, Some("Boston, MA")));
        let (new_seq, _, _) = geocode_effect(&second);

        let boston = LatLng::new(42.3601, -71.0589);
        c.on_geocode_result(new_seq, Ok(boston));
        c.on_geocode_result(old_seq, Ok(LatLng::new(30.2672, -97.7431)));

        assert_eq!(c.viewport().center, boston);
    }

    #[test]
    fn completion_is_applied_under_the_purpose_recorded_at_issuance() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(None, None, Some("Austin, TX")));
        let (_, purpose, _) = geocode_effect(&first);
        assert_eq!(purpose, GeocodePurpose::Search);

        // The selection changes to county-only before the search resolves.
        let second = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, purpose, _) = geocode_effect(&second);
        assert_eq!(purpose, GeocodePurpose::CountyFallback);

        let center = LatLng::new(30.33, -97.78);
        c.on_geocode_result(seq, Ok(center));
        assert_eq!(c.viewport().zoom, ZOOM_COUNTY);
        assert_eq!(c.viewport().center, center);

        // A second delivery of the same completion has nothing to apply.
        c.on_geocode_result(seq, Ok(LatLng::new(0.0, 0.0)));
        assert_eq!(c.viewport().center, center);
    }

    #[test]
    fn stale_fetch_result_cannot_overwrite_newer_points() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(Some("CountyA"), Some("S1"), None));
        let (seq_a, _, _) = fetch_effect(&first);

        let second = c.set_inputs(inputs(Some("CountyB"), Some("S2"), None));
        let (seq_b, _, _) = fetch_effect(&second);

        let points_b = vec![point("b", "TownB", 31.0, -96.0, Severity::High)];
        c.on_fetch_result(seq_b, Ok(points_b.clone()));

        // CountyA's response arrives after CountyB's; it must be discarded.
        let points_a = vec![point("a", "TownA", 30.0, -95.0, Severity::Medium)];
        c.on_fetch_result(seq_a, Ok(points_a));

        assert_eq!(c.points(), points_b.as_slice());
        assert_eq!(c.surface().live_marker_count(), 1);
    }

    #[test]
    fn stale_fetch_error_is_suppressed_too() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(Some("CountyA"), Some("S1"), None));
        let (seq_a, _, _) = fetch_effect(&first);

        let second = c.set_inputs(inputs(Some("CountyB"), Some("S2"), None));
        let (seq_b, _, _) = fetch_effect(&second);

        c.on_fetch_result(seq_b, Ok(vec![]));
        c.on_fetch_result(
            seq_a,
            Err(FetchError::Http {
                status: 500,
                detail: "boom".to_string(),
            }),
        );

        assert!(c.data_error_message().is_none());
        assert_eq!(c.fetch_state(), &FetchState::Success(vec![]));
    }

    #[test]
    fn emptied_selection_clears_immediately_and_invalidates_in_flight_fetch() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&first);

        let effects = c.set_inputs(inputs(None, None, None));
        assert!(effects.is_empty());
        assert_eq!(c.fetch_state(), &FetchState::Idle);

        // The in-flight result lands after clearing and must be dropped.
        c.on_fetch_result(seq, Ok(vec![point("1", "Town", 30.0, -95.0, Severity::High)]));
        assert_eq!(c.fetch_state(), &FetchState::Idle);
        assert_eq!(c.surface().live_marker_count(), 0);
    }

    #[test]
    fn overlays_are_cleared_while_a_fetch_is_in_flight() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&first);
        c.on_fetch_result(seq, Ok(vec![point("1", "Town", 30.0, -95.0, Severity::High)]));
        assert_eq!(c.surface().live_marker_count(), 1);

        let second = c.set_inputs(inputs(Some("Harris"), Some("TX"), None));
        assert!(c.is_fetching());
        assert_eq!(c.surface().live_marker_count(), 0);

        let (seq2, _, _) = fetch_effect(&second);
        c.on_fetch_result(seq2, Ok(vec![point("2", "Town2", 29.7, -95.4, Severity::Medium)]));
        assert_eq!(c.surface().live_marker_count(), 1);
    }

    #[test]
    fn successful_empty_payload_is_not_an_error() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&effects);

        c.on_fetch_result(seq, Ok(vec![]));
        assert!(c.data_error_message().is_none());
        assert_eq!(c.surface().live_marker_count(), 0);
        assert_eq!(c.surface().live_heat_layer_count(), 0);
    }

    #[test]
    fn fetch_error_surfaces_blocking_message_and_clears_points() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&first);
        c.on_fetch_result(seq, Ok(vec![point("1", "Town", 30.0, -95.0, Severity::High)]));

        let second = c.set_inputs(inputs(Some("ErrorCounty"), Some("ER"), None));
        let (seq2, _, _) = fetch_effect(&second);
        c.on_fetch_result(
            seq2,
            Err(FetchError::Http {
                status: 500,
                detail: "Server error fetching map points".to_string(),
            }),
        );

        assert_eq!(
            c.data_error_message().as_deref(),
            Some("Map Data Error: Server error fetching map points")
        );
        assert!(c.points().is_empty());
        assert_eq!(c.surface().live_marker_count(), 0);
    }

    #[test]
    fn payload_error_in_successful_response_blocks_the_map() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Ghost"), Some("ZZ"), None));
        let (seq, _, _) = fetch_effect(&effects);

        c.on_fetch_result(
            seq,
            Err(FetchError::Payload {
                message: "County not found".to_string(),
            }),
        );

        assert_eq!(
            c.data_error_message().as_deref(),
            Some("Map Data Error: County not found")
        );
        assert!(c.points().is_empty());
        assert_eq!(c.surface().live_marker_count(), 0);
    }

    #[test]
    fn test_county_scenario_places_two_markers_and_legend_rows() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("TestCounty"), Some("TS"), None));
        let (seq, county, state) = fetch_effect(&effects);
        assert_eq!(county, "TestCounty");
        assert_eq!(state, "TS");

        c.on_fetch_result(
            seq,
            Ok(vec![
                point("1", "TownA, TS", 30.0, -95.0, Severity::High),
                point("2", "TownB, TS", 30.1, -95.1, Severity::Medium),
            ]),
        );

        assert_eq!(c.view_mode(), ViewMode::Pins);
        assert_eq!(c.surface().live_marker_count(), 2);

        let legend = c.legend();
        assert_eq!(legend[0].label, "High Severity");
        assert_eq!(legend[1].label, "Medium Severity");
        assert!(legend.iter().all(|e| e.label != "Low Severity"));
    }

    #[test]
    fn view_toggle_redraws_without_refetching() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&effects);
        c.on_fetch_result(
            seq,
            Ok(vec![
                point("1", "A", 30.0, -95.0, Severity::High),
                point("2", "B", 30.1, -95.1, Severity::Low),
            ]),
        );
        assert_eq!(c.surface().live_marker_count(), 2);

        // Toggling emits no effects at all, so no re-fetch can happen.
        c.set_view_mode(ViewMode::Heatmap);
        assert_eq!(c.surface().live_marker_count(), 0);
        assert_eq!(c.surface().live_heat_layer_count(), 1);
        assert!(c.renderer().has_heat_layer());

        c.set_view_mode(ViewMode::Pins);
        assert_eq!(c.surface().live_marker_count(), 2);
        assert_eq!(c.surface().live_heat_layer_count(), 0);
    }

    #[test]
    fn style_toggle_redraws_identical_content() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&effects);
        c.on_fetch_result(seq, Ok(vec![point("1", "A", 30.0, -95.0, Severity::High)]));

        let before: Vec<_> = c.surface().live_markers().cloned().collect();
        c.toggle_style();

        let after: Vec<_> = c.surface().live_markers().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(c.style(), SurfaceStyle::Monotone);
        assert_eq!(c.surface().style(), SurfaceStyle::Monotone);
        assert!(!c.is_fetching());

        c.toggle_style();
        assert_eq!(c.style(), SurfaceStyle::Colored);
    }

    #[test]
    fn nothing_is_drawn_until_the_surface_is_ready() {
        let mut c = Coordinator::new(RecordingSurface::new());
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&effects);
        c.on_fetch_result(seq, Ok(vec![point("1", "A", 30.0, -95.0, Severity::High)]));
        assert_eq!(c.surface().live_marker_count(), 0);

        c.on_surface_ready();
        assert_eq!(c.surface().live_marker_count(), 1);
        assert_eq!(c.surface().viewport(), Some(c.viewport()));
    }

    #[test]
    fn dispose_releases_every_overlay() {
        let mut c = coordinator();
        let effects = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        let (seq, _, _) = fetch_effect(&effects);
        c.on_fetch_result(seq, Ok(vec![point("1", "A", 30.0, -95.0, Severity::High)]));

        let surface = c.dispose();
        assert_eq!(surface.live_marker_count(), 0);
        assert_eq!(surface.live_heat_layer_count(), 0);
    }

    #[test]
    fn unchanged_inputs_do_not_reissue_requests() {
        let mut c = coordinator();
        let first = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        assert!(!first.is_empty());

        let second = c.set_inputs(inputs(Some("Travis"), Some("TX"), None));
        assert!(second.is_empty());
    }
}
