//! Map geometry generation
//!
//! Sampling, triangulation, tessellation and the layout step that turns
//! their output into the tile/node graph of a map.

pub mod delaunay;
pub mod layout;
pub mod poisson;
pub mod voronoi;

pub use delaunay::{is_delaunay_condition_satisfied, triangulate, DelaunayTriangle, Triangulation};
pub use layout::{build_representation, MapGeometryGenerator};
pub use poisson::{PoissonDiscSampler, DEFAULT_CANDIDATES};
pub use voronoi::{tessellate, tessellate_with_offset, Tessellation, VoronoiTile};

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::GeometrySpec;
use crate::error::Result;
use crate::map::Representation;

/// Generate the tile layout for a spec from a seed (without elevation)
///
/// Every node and tile elevation is left unassigned; a topography generator
/// fills them in afterwards.
pub fn generate_geometry(spec: &GeometrySpec, seed: u64) -> Result<Representation> {
    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let rep = MapGeometryGenerator::new(*spec).generate(&mut rng).map_err(|err| {
        warn!("Map geometry generation aborted: {}", err);
        err
    })?;

    info!(
        "Map geometry generated: {} tiles, {} nodes in {:.2?}",
        rep.tile_count(),
        rep.node_count(),
        start.elapsed()
    );
    Ok(rep)
}
