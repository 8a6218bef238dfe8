pub mod recording;
pub mod renderer;
pub mod surface;
pub mod symbology;

pub use recording::*;
pub use renderer::*;
pub use surface::*;
pub use symbology::*;
