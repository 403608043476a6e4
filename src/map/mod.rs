//! The generated map: tiles, nodes and their adjacency
//!
//! A [`Map`] owns a [`Representation`] built once by the geometry generator
//! and then annotated with elevations by a topography generator. After
//! generation it is read-only.

mod node;
mod representation;
mod tile;

pub use node::{MapNode, UNASSIGNED_ELEVATION};
pub use representation::Representation;
pub use tile::{ElevationExtremes, MapTile};

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use tracing::info;

use crate::config::{MapSpec, TopographyKind};
use crate::error::{MapError, Result};
use crate::generation::generate_geometry;
use crate::geometry::{Point2D, Polygon2D, Rect2D};
use crate::terrain::{
    BlobContinentGenerator, ContinentBasedTopography, ContinentSpec, PerlinTopography,
    TopographyGenerator,
};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A generated tile map
///
/// # Examples
///
/// ```
/// use rust_voronoi_map::*;
///
/// let spec = MapSpecBuilder::new()
///     .seed(42)
///     .bounds(Rect2D::new(0.0, 0.0, 60.0, 40.0))
///     .unwrap()
///     .min_sample_distance(5.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let map = Map::generate(spec).unwrap();
/// assert!(map.tile_count() > 0);
///
/// for tile in map.tiles() {
///     assert!((-1.0..=1.0).contains(&tile.elevation()));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Map {
    spec: MapSpec,
    rep: Representation,
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl Map {
    /// Generate a map with the topography selected in its `MapSpec`
    ///
    /// The geometry is driven by `spec.seed`, the elevation by
    /// `spec.terrain_seed`.
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidConfig` if `spec` fails
    /// [`MapSpec::validate`] and `MapError::Geometry` if the triangulation
    /// had to be aborted.
    pub fn generate(spec: MapSpec) -> Result<Self> {
        spec.validate()?;
        match spec.topography {
            TopographyKind::FractalNoise => {
                let mut topography =
                    PerlinTopography::new(spec.bounds, spec.noise_spec(), spec.terrain_seed);
                Self::generate_with_topography(spec, &mut topography)
            }
            TopographyKind::Continents {
                land_ratio,
                continent_count,
            } => {
                let continents = ContinentSpec {
                    land_ratio,
                    continent_count,
                };
                let grower = BlobContinentGenerator::new(spec.terrain_seed.wrapping_add(1));
                let mut topography =
                    ContinentBasedTopography::new(continents, spec.terrain_seed, grower);
                Self::generate_with_topography(spec, &mut topography)
            }
        }
    }

    /// Generate a map with a custom topography generator
    ///
    /// # Errors
    ///
    /// Same as [`Map::generate`].
    pub fn generate_with_topography<G>(spec: MapSpec, topography: &mut G) -> Result<Self>
    where
        G: TopographyGenerator + ?Sized,
    {
        spec.validate()?;
        let start = Instant::now();
        let mut rep = generate_geometry(&spec.geometry_spec(), spec.seed)?;

        let topo_start = Instant::now();
        topography.generate(&mut rep);
        info!(
            "Topography assigned to {} nodes in {:.2?}",
            rep.node_count(),
            topo_start.elapsed()
        );

        let map = Self::from_representation(spec, rep);
        info!(
            "Map generated: {} tiles, {} nodes in {:.2?}",
            map.tile_count(),
            map.node_count(),
            start.elapsed()
        );
        Ok(map)
    }

    /// Wrap an already generated representation
    pub fn from_representation(spec: MapSpec, rep: Representation) -> Self {
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let seeds: Vec<Point2D> = rep.tiles().iter().map(|t| t.seed).collect();
            (!seeds.is_empty()).then(|| SpatialIndex::new(&seeds))
        };

        Self {
            spec,
            rep,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    #[inline]
    pub fn spec(&self) -> &MapSpec {
        &self.spec
    }

    #[inline]
    pub fn bounds(&self) -> Rect2D {
        self.spec.bounds
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.spec.width()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.spec.height()
    }

    pub fn representation(&self) -> &Representation {
        &self.rep
    }

    pub fn into_representation(self) -> Representation {
        self.rep
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.rep.tile_count()
    }

    #[inline]
    pub fn tile(&self, idx: usize) -> Option<&MapTile> {
        self.rep.tile(idx)
    }

    pub fn tiles(&self) -> &[MapTile] {
        self.rep.tiles()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.rep.node_count()
    }

    #[inline]
    pub fn node(&self, idx: usize) -> Option<&MapNode> {
        self.rep.node(idx)
    }

    pub fn nodes(&self) -> &[MapNode] {
        self.rep.nodes()
    }

    /// Outlines of all tiles, in tile order
    pub fn tile_shapes(&self) -> Vec<&Polygon2D> {
        self.rep.tiles().iter().map(|t| &t.shape).collect()
    }

    /// Tile whose seed is at `seed`
    pub fn find_tile_at(&self, seed: Point2D) -> Option<&MapTile> {
        self.rep.find_tile_at(seed)
    }

    /// Node located at `pos`
    pub fn find_node_at(&self, pos: Point2D) -> Option<&MapNode> {
        self.rep.find_node_at(pos)
    }

    /// Extreme node elevations of a tile
    ///
    /// # Errors
    ///
    /// Returns `TileNotFound` for an invalid index
    pub fn elevation_extremes(&self, tile: usize) -> Result<Option<ElevationExtremes>> {
        let tile = self.rep.tile(tile).ok_or(MapError::TileNotFound(tile))?;
        Ok(tile.elevation_extremes(&self.rep))
    }

    /// Neighbor indices of a node
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for an invalid index
    pub fn node_neighbors(&self, node: usize) -> Result<&[usize]> {
        self.rep
            .node(node)
            .map(MapNode::neighbors)
            .ok_or(MapError::NodeNotFound(node))
    }

    /// Tiles reachable within `hops` steps from `center` (BFS)
    ///
    /// The result is sorted and includes `center`; zero hops returns just
    /// the center tile.
    ///
    /// # Errors
    ///
    /// Returns `TileNotFound` if `center` is not a valid tile index
    pub fn find_tiles_within_hops(&self, center: usize, hops: usize) -> Result<Vec<usize>> {
        if center >= self.rep.tile_count() {
            return Err(MapError::TileNotFound(center));
        }

        let mut visited = HashSet::from([center]);
        let mut queue = VecDeque::from([(center, 0)]);
        while let Some((idx, depth)) = queue.pop_front() {
            if depth == hops {
                continue;
            }
            for &neighbor in self.rep.tiles()[idx].neighbors() {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        let mut tiles: Vec<usize> = visited.into_iter().collect();
        tiles.sort_unstable();
        Ok(tiles)
    }

    /// Index of the tile whose seed is nearest to `pos`
    ///
    /// Since tiles are Voronoi cells this is the tile containing `pos` for
    /// any position inside the map bounds. `None` only for an empty map.
    #[cfg(feature = "spatial-index")]
    pub fn find_tile_near(&self, pos: Point2D) -> Option<usize> {
        self.spatial_index.as_ref().map(|index| index.find_nearest(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSpecBuilder;

    fn small_spec(seed: u64) -> MapSpec {
        MapSpecBuilder::new()
            .seed(seed)
            .bounds(Rect2D::new(0.0, 0.0, 50.0, 50.0))
            .unwrap()
            .min_sample_distance(5.0)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_map_generation() {
        let map = Map::generate(small_spec(42)).unwrap();
        assert!(map.tile_count() > 20);
        assert!(map.node_count() > map.tile_count());
        assert_eq!(map.width(), 50.0);
        assert_eq!(map.height(), 50.0);
        assert_eq!(map.tile_shapes().len(), map.tile_count());
    }

    #[test]
    fn test_unvalidated_spec_is_rejected() {
        let zero_spacing = MapSpec {
            min_sample_distance: 0.0,
            ..small_spec(1)
        };
        assert!(matches!(
            Map::generate(zero_spacing),
            Err(MapError::InvalidConfig(_))
        ));

        let tiny_spacing = MapSpec {
            min_sample_distance: 1e-9,
            ..small_spec(1)
        };
        let mut flat = crate::terrain::FlatTopography(0.0);
        assert!(matches!(
            Map::generate_with_topography(tiny_spacing, &mut flat),
            Err(MapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = Map::generate(small_spec(9)).unwrap();
        let b = Map::generate(small_spec(9)).unwrap();
        assert_eq!(a.tiles(), b.tiles());
        assert_eq!(a.nodes(), b.nodes());
    }

    #[test]
    fn test_lookups() {
        let map = Map::generate(small_spec(5)).unwrap();
        let tile = map.tile(0).unwrap();
        assert_eq!(map.find_tile_at(tile.seed).map(|t| t.seed), Some(tile.seed));

        let node = map.node(tile.nodes()[0]).unwrap();
        assert_eq!(map.find_node_at(node.pos).map(|n| n.pos), Some(node.pos));

        assert!(map.tile(map.tile_count()).is_none());
        assert!(matches!(
            map.node_neighbors(map.node_count()),
            Err(MapError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_find_tiles_within_hops() {
        let map = Map::generate(small_spec(42)).unwrap();

        let r0 = map.find_tiles_within_hops(0, 0).unwrap();
        assert_eq!(r0, vec![0]);

        let r1 = map.find_tiles_within_hops(0, 1).unwrap();
        assert_eq!(r1.len(), 1 + map.tile(0).unwrap().neighbor_count());

        let r2 = map.find_tiles_within_hops(0, 2).unwrap();
        assert!(r2.len() > r1.len());

        assert!(matches!(
            map.find_tiles_within_hops(usize::MAX, 1),
            Err(MapError::TileNotFound(_))
        ));
    }

    #[test]
    fn test_elevation_extremes_by_index() {
        let map = Map::generate(small_spec(3)).unwrap();
        let ext = map.elevation_extremes(0).unwrap().unwrap();
        assert!(ext.min <= ext.max);
        assert!(map.elevation_extremes(map.tile_count()).is_err());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_tile_near() {
        let map = Map::generate(small_spec(42)).unwrap();
        for (idx, tile) in map.tiles().iter().enumerate() {
            assert_eq!(map.find_tile_near(tile.seed), Some(idx));
        }
    }
}
