use std::sync::Arc;

use clients::{CommunitySource, FetchError, GeocodeError, Geocoder, HttpCommunitySource, HttpGeocoder};
use geo::{CommunityPoint, LatLng};
use overlay::{MapSurface, SurfaceStyle, ViewMode};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::coordinator::{Coordinator, Effect, Inputs};

/// Outcome of one spawned effect, tagged with the sequence number of the
/// request that issued it.
#[derive(Debug)]
enum Completion {
    Geocode {
        seq: u64,
        result: Result<LatLng, GeocodeError>,
    },
    Fetch {
        seq: u64,
        result: Result<Vec<CommunityPoint>, FetchError>,
    },
}

/// Wires the async clients to the synchronous coordinator.
///
/// Effects are executed on spawned tasks; completions come back over an
/// unbounded channel and are applied in arrival order. The coordinator's
/// sequence guards decide what may write, so completion interleaving is
/// harmless. Dropping the session drops the receiver: completions from any
/// still-pending task go nowhere.
pub struct Session<S: MapSurface> {
    coordinator: Coordinator<S>,
    geocoder: Arc<dyn Geocoder>,
    communities: Arc<dyn CommunitySource>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<S: MapSurface> Session<S> {
    pub fn new(
        surface: S,
        geocoder: Arc<dyn Geocoder>,
        communities: Arc<dyn CommunitySource>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            coordinator: Coordinator::new(surface),
            geocoder,
            communities,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Session with HTTP transports built from configuration.
    pub fn from_config(surface: S, config: &Config) -> Self {
        Self::new(
            surface,
            Arc::new(HttpGeocoder::new(config.geocoder_url.clone())),
            Arc::new(HttpCommunitySource::new(config.api_base_url.clone())),
        )
    }

    pub fn coordinator(&self) -> &Coordinator<S> {
        &self.coordinator
    }

    pub fn set_inputs(&mut self, inputs: Inputs) {
        let effects = self.coordinator.set_inputs(inputs);
        self.run_effects(effects);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.coordinator.set_view_mode(mode);
    }

    pub fn set_style(&mut self, style: SurfaceStyle) {
        self.coordinator.set_style(style);
    }

    pub fn on_surface_ready(&mut self) {
        self.coordinator.on_surface_ready();
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            self.apply(completion);
        }
    }

    /// Apply completions that already arrived without waiting.
    pub fn pump(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Tear down: overlays are released exactly once before the surface
    /// handle is handed back; pending tasks lose their channel.
    pub fn dispose(self) -> S {
        self.coordinator.dispose()
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.in_flight += 1;
            match effect {
                Effect::Geocode { seq, address, .. } => {
                    let geocoder = Arc::clone(&self.geocoder);
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = geocoder.geocode(&address).await;
                        let _ = tx.send(Completion::Geocode { seq, result });
                    });
                }
                Effect::FetchCommunities {
                    seq,
                    county,
                    state_abbr,
                } => {
                    let communities = Arc::clone(&self.communities);
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = communities.county_communities(&county, &state_abbr).await;
                        let _ = tx.send(Completion::Fetch { seq, result });
                    });
                }
            }
        }
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Geocode { seq, result } => self.coordinator.on_geocode_result(seq, result),
            Completion::Fetch { seq, result } => self.coordinator.on_fetch_result(seq, result),
        }
    }
}
