pub mod feature;
pub mod pose;

pub use feature::{FeatureKind, LineFeature, RegionGeometrySet};
pub use pose::{Catalog, ViewportPose};
