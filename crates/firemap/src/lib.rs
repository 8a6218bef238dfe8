//! Map overlay coordination for the wildfire-risk dashboard.
//!
//! The coordinator is the single source of truth for what should be on the
//! map and why. It reacts to three external inputs (selected county, state
//! abbreviation, free-text center-on location), runs the viewport-resolution
//! and data-resolution pipelines against the geocoding and community-data
//! clients, and drives the overlay renderer so the drawn overlays always
//! reflect the most recently completed fetch.
//!
//! The state machine itself is synchronous and deterministic: it emits
//! [`coordinator::Effect`]s and consumes completions guarded by sequence
//! numbers, so stale network results can never overwrite newer state.
//! [`session::Session`] wires the async clients to the state machine.

pub mod config;
pub mod coordinator;
pub mod session;

pub use config::*;
pub use coordinator::*;
pub use session::*;
