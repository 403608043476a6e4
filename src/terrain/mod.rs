//! Elevation assignment
//!
//! A topography generator walks a finished [`Representation`] and writes an
//! elevation in [-1, 1] onto every node and tile.

mod continent;
mod perlin;

pub use continent::{
    rand_gaussian, BlobContinentGenerator, Continent, ContinentBasedTopography,
    ContinentGenerator, ContinentSpec,
};
pub use perlin::{PerlinNoise, PerlinTopography};

use crate::map::Representation;

/// Strategy that assigns elevations to a generated map
pub trait TopographyGenerator {
    /// Write elevations onto the nodes and tiles of `rep`
    fn generate(&mut self, rep: &mut Representation);
}

impl<G: TopographyGenerator + ?Sized> TopographyGenerator for Box<G> {
    fn generate(&mut self, rep: &mut Representation) {
        (**self).generate(rep)
    }
}

/// Elevation that every node and tile is set to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTopography(pub f64);

impl TopographyGenerator for FlatTopography {
    fn generate(&mut self, rep: &mut Representation) {
        let elevation = self.0.clamp(-1.0, 1.0);
        for node in rep.nodes_mut() {
            node.set_elevation(elevation);
        }
        for tile in rep.tiles_mut() {
            tile.set_elevation(elevation);
        }
    }
}
