//! Map geometry generator
//!
//! Turns a tessellation into the tile/node graph of a map:
//!
//! 1. Sample tile seeds with Poisson-disc sampling
//! 2. Tessellate the seeds inside the map bounds
//! 3. Create a tile per Voronoi tile and a shared node per outline vertex
//! 4. Connect tiles along triangulation edges
//! 5. Connect nodes along tile outlines

use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::config::GeometrySpec;
use crate::error::{GeometryError, MapError};
use crate::generation::delaunay::Triangulation;
use crate::generation::poisson::PoissonDiscSampler;
use crate::generation::voronoi::{tessellate, Tessellation, VoronoiTile};
use crate::geometry::fp::cyclic_next;
use crate::geometry::Point2D;
use crate::map::{MapTile, Representation};

/// Builds the tile layout of a map
#[derive(Debug, Clone, Copy)]
pub struct MapGeometryGenerator {
    spec: GeometrySpec,
}

impl MapGeometryGenerator {
    pub fn new(spec: GeometrySpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &GeometrySpec {
        &self.spec
    }

    /// Generate the layout from randomly sampled tile seeds
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidConfig` for an unusable sample distance and
    /// `MapError::Geometry` if the triangulation was aborted.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Representation, MapError> {
        let sampler = PoissonDiscSampler::new(
            self.spec.bounds,
            self.spec.min_sample_distance,
            self.spec.sample_candidates,
        )?;
        let seeds = sampler.generate(rng);
        Ok(self.generate_from_samples(&seeds)?)
    }

    /// Generate the layout from given tile seeds
    pub fn generate_from_samples(
        &self,
        samples: &[Point2D],
    ) -> Result<Representation, GeometryError> {
        let tessellation = tessellate(samples, self.spec.bounds)?;
        Ok(build_representation(&tessellation))
    }
}

/// Convert a tessellation into tiles and shared nodes
pub fn build_representation(tessellation: &Tessellation) -> Representation {
    let start = Instant::now();
    let mut rep = Representation::new();

    for tile in tessellation.tiles() {
        add_map_tile(&mut rep, tile);
    }
    connect_tiles(&mut rep, tessellation.triangulation());
    connect_nodes(&mut rep, tessellation.tiles());

    debug!(
        "Map layout: {} tiles, {} nodes in {:.2?}",
        rep.tile_count(),
        rep.node_count(),
        start.elapsed()
    );
    rep
}

fn add_map_tile(rep: &mut Representation, tile: &VoronoiTile) {
    let nodes = tile
        .outline
        .vertices()
        .iter()
        .map(|&pt| rep.node_at_or_insert(pt))
        .collect();
    rep.add_tile(MapTile::new(tile.seed, tile.outline.clone(), nodes));
}

// Triangle vertices are tile seeds, so triangle edges join neighboring tiles.
fn connect_tiles(rep: &mut Representation, triangulation: &Triangulation) {
    for triangle in triangulation.triangles() {
        for i in 0..3 {
            let a = rep.tile_index_at(triangle.vertex(i));
            let b = rep.tile_index_at(triangle.vertex(cyclic_next(i, 3)));
            if let (Some(a), Some(b)) = (a, b) {
                rep.connect_tiles(a, b);
            }
        }
    }
}

// Consecutive outline vertices are neighboring nodes.
fn connect_nodes(rep: &mut Representation, tiles: &[VoronoiTile]) {
    for tile in tiles {
        let vertices = tile.outline.vertices();
        let n = vertices.len();
        for i in 0..n {
            let a = rep.node_index_at(vertices[i]);
            let b = rep.node_index_at(vertices[cyclic_next(i, n)]);
            if let (Some(a), Some(b)) = (a, b) {
                rep.connect_nodes(a, b);
            }
        }
    }
}
