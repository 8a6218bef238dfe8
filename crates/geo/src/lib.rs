pub mod handles;
pub mod point;
pub mod viewport;

// Geo crate: small, well-tested primitives only.
pub use handles::*;
pub use point::*;
pub use viewport::*;
