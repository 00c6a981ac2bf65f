pub mod circular;
pub mod extract;
pub mod spherical;

pub use circular::mean_bearing_deg;
pub use extract::{RegionShape, extract_shape};
pub use spherical::{bearing_deg, distance_km};
