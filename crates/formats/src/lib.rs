pub mod geojson;
pub mod region;
pub mod topology;

pub use geojson::*;
pub use region::*;
pub use topology::*;
