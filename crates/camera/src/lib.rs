pub mod controller;
pub mod transform;

pub use controller::*;
pub use transform::*;
