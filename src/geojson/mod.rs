pub mod parser;

pub use parser::{GeoJsonError, parse_region};
