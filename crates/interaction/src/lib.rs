pub mod controller;
pub mod entries;
pub mod highlight;
pub mod scene;
pub mod selection;
pub mod tooltip;

pub use controller::*;
pub use entries::*;
pub use highlight::*;
pub use scene::*;
pub use selection::*;
pub use tooltip::*;
