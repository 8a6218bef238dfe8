//! Thin request/response adapters for the map overlay core.
//!
//! Two data sources feed the coordinator:
//! - a geocoding lookup (free-text place description to coordinates),
//! - the county-communities endpoint of the risk backend.
//!
//! Adapters are stateless and perform no retries; retry policy belongs to
//! the caller. Each call resolves with a typed result or a distinguishable
//! error condition. New transports can be added by implementing the
//! `Geocoder` / `CommunitySource` traits.

use std::future::Future;
use std::pin::Pin;

pub mod communities;
pub mod geocode;
pub mod risk;

pub use communities::*;
pub use geocode::*;
pub use risk::*;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
