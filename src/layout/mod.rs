//! Layout module: Geometry primitives and rectangle regions.
//!
//! Everything here is pure: rectangles, points, and the rectangle-minus-
//! rectangle decomposition the clipping engine is built on.

mod rect;
pub mod region;

pub use rect::{Point, Rect};
pub use region::ClipRegion;
