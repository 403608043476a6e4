//! Voronoi-based tile map generation
//!
//! A standalone library for generating 2D tile maps: Poisson-disc sampled
//! seeds, a Bowyer-Watson Delaunay triangulation and its Voronoi dual clipped
//! to the map border, plus pluggable elevation generators.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_voronoi_map::*;
//!
//! // Describe the map
//! let spec = MapSpecBuilder::new()
//!     .seed(42)
//!     .bounds(Rect2D::new(0.0, 0.0, 500.0, 500.0)).unwrap()
//!     .min_sample_distance(8.0).unwrap()
//!     .continents(0.4, 5).unwrap()
//!     .build().unwrap();
//!
//! // Generate tiles, nodes and elevations
//! let map = Map::generate(spec).unwrap();
//! println!("Generated {} tiles and {} nodes", map.tile_count(), map.node_count());
//!
//! for tile in map.tiles() {
//!     let _outline = tile.shape.vertices();
//!     let _height = tile.elevation();
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables nearest-tile lookups using a KD-tree
//! - `serde`: Enables serialization support for map specs

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod generation;
pub mod map;
pub mod terrain;
pub mod task;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{GeometryError, MapError, Result};
pub use config::{GeometrySpec, MapSpec, MapSpecBuilder, NoiseSpec, TopographyKind};
pub use geometry::{
    cut_convex_polygon, intersect_convex_polygons, intersect_lines, Circle2D, Line2D, LineKind,
    LineIntersection, Point2D, PointLookup, Polygon2D, Rect2D, Ring2D, Triangle2D, Vector2D,
};
pub use generation::{
    generate_geometry, is_delaunay_condition_satisfied, tessellate, triangulate,
    DelaunayTriangle, MapGeometryGenerator, PoissonDiscSampler, Tessellation, Triangulation,
    VoronoiTile,
};
pub use map::{ElevationExtremes, Map, MapNode, MapTile, Representation, UNASSIGNED_ELEVATION};
pub use terrain::{
    BlobContinentGenerator, Continent, ContinentBasedTopography, ContinentGenerator,
    ContinentSpec, FlatTopography, PerlinNoise, PerlinTopography, TopographyGenerator,
};
pub use task::MapGenerationTask;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;
