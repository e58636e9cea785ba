pub mod bounds;
pub mod vec;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use vec::*;
