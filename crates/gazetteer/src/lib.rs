pub mod alias;
pub mod index;
pub mod normalize;

pub use alias::*;
pub use index::*;
pub use normalize::*;
