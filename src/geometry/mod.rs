//! Planar geometry with tolerant comparisons
//!
//! Value types ([`Point2D`], [`Vector2D`], [`Rect2D`], [`Circle2D`],
//! [`Triangle2D`], [`Polygon2D`], [`Line2D`]) plus the algorithms the map
//! pipeline is built from:
//!
//! - [`intersect_lines`]: intersection of segments, rays and infinite lines
//! - [`intersect_convex_polygons`]: O'Rourke convex polygon clipping
//! - [`cut_convex_polygon`]: splitting a convex polygon along a line
//!
//! Degenerate inputs never panic or error here. They produce empty or
//! reduced results instead.

pub mod circle;
pub mod clip;
pub mod cut;
pub mod fp;
pub mod intersection;
pub mod line;
pub mod lookup;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod triangle;

pub use circle::{Circle2D, Ring2D};
pub use clip::intersect_convex_polygons;
pub use cut::{cut_convex_polygon, side_of_line, LineSide};
pub use intersection::{intersect_lines, IntersectionKind, LineIntersection};
pub use line::{Line2D, LineKind};
pub use lookup::PointLookup;
pub use point::{CoordSystem, Point2D, Vector2D};
pub use polygon::{is_convex_path, Polygon2D};
pub use rect::Rect2D;
pub use triangle::Triangle2D;
