pub mod detection;
pub mod point;
pub mod raster;

pub use detection::{DetectionResult, Outcome};
pub use point::{Point, PointI};
pub use raster::RasterBuffer;
