//! Pure domain types with minimal dependencies
//!
//! Nothing here knows about the controller, widgets or the async runtime.

pub mod analysis;
pub mod boundary;
pub mod geometry;
pub mod place;

pub use analysis::*;
pub use boundary::BoundaryRegion;
pub use geometry::*;
pub use place::Place;
