//! Continent region growth
//!
//! A land budget (`land_ratio` x node count) is split across a number of
//! continents. Each continent then claims nodes one at a time by growing
//! outward from a random seed node. Claimed nodes become land (elevation 1),
//! everything left over becomes ocean (elevation -1).

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::config::MAX_CONTINENTS;
use crate::map::{MapNode, Representation};

use super::TopographyGenerator;

/// Random picks made when looking for a continent's first node
const SEED_NODE_ATTEMPTS: usize = 100;

const LAND_ELEVATION: f64 = 1.0;
const OCEAN_ELEVATION: f64 = -1.0;

/// Approximately normal value in `[min, max]`
///
/// A standard normal draw (Box-Muller) is cut off at three standard
/// deviations and mapped linearly onto the range, so the mean lands in the
/// middle of it.
pub fn rand_gaussian<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    // (0, 1] keeps ln away from zero.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    let unit = (z + 3.0).clamp(0.0, 6.0) / 6.0;
    min + unit * (max - min)
}

// ===== CONTINENT =====

/// Nodes claimed by one continent, plus the number it was allowed to claim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Continent {
    allocated_size: usize,
    nodes: Vec<usize>,
}

impl Continent {
    pub fn new(allocated_size: usize) -> Self {
        Self {
            allocated_size,
            nodes: Vec::with_capacity(allocated_size),
        }
    }

    pub fn allocated_size(&self) -> usize {
        self.allocated_size
    }

    /// Number of nodes claimed so far
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn is_complete(&self) -> bool {
        self.nodes.len() >= self.allocated_size
    }

    pub fn add_node(&mut self, node: usize) {
        self.nodes.push(node);
    }
}

/// How much land a continent map gets and how it is split up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinentSpec {
    /// Share of nodes that become land, in [0, 1]
    pub land_ratio: f64,
    pub continent_count: usize,
}

impl ContinentSpec {
    pub fn new(land_ratio: f64, continent_count: usize) -> Self {
        Self {
            land_ratio,
            continent_count,
        }
    }

    /// Gaussian land ratio around one half and 1 to 20 continents
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            land_ratio: rand_gaussian(rng, 0.0, 1.0),
            continent_count: 1 + rng.gen_range(0..MAX_CONTINENTS),
        }
    }
}

// ===== GROWTH STRATEGY =====

/// Strategy that shapes a single continent
pub trait ContinentGenerator {
    /// Called once per map before any continent is generated
    fn set_map(&mut self, rep: &Representation);

    /// Claim up to `continent.allocated_size()` nodes for the continent
    ///
    /// Claimed nodes get land elevation and are recorded in the continent.
    /// Nodes already claimed by other continents must be left alone.
    fn generate(&mut self, rep: &mut Representation, continent: &mut Continent);
}

/// Grows continents outward from a random seed node, which gives blob
/// shaped land masses on large maps
#[derive(Debug, Clone)]
pub struct BlobContinentGenerator {
    rng: ChaCha8Rng,
    node_count: usize,
}

impl BlobContinentGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            node_count: 0,
        }
    }

    fn find_seed_node(&mut self, rep: &Representation) -> Option<usize> {
        if self.node_count == 0 {
            return None;
        }
        (0..SEED_NODE_ATTEMPTS)
            .map(|_| self.rng.gen_range(0..self.node_count))
            .find(|&idx| rep.node(idx).is_some_and(is_unclaimed))
    }

    /// Unclaimed neighbor of a random pool node
    ///
    /// Pool nodes without unclaimed neighbors are dropped from the pool.
    fn find_unclaimed_neighbor(
        &mut self,
        rep: &Representation,
        pool: &mut Vec<usize>,
    ) -> Option<usize> {
        while !pool.is_empty() {
            let pick = self.rng.gen_range(0..pool.len());
            let neighbor = rep.node(pool[pick]).and_then(|node| {
                node.neighbors()
                    .iter()
                    .copied()
                    .find(|&n| rep.node(n).is_some_and(is_unclaimed))
            });
            match neighbor {
                Some(idx) => return Some(idx),
                None => {
                    pool.swap_remove(pick);
                }
            }
        }
        None
    }
}

impl ContinentGenerator for BlobContinentGenerator {
    fn set_map(&mut self, rep: &Representation) {
        self.node_count = rep.node_count();
    }

    fn generate(&mut self, rep: &mut Representation, continent: &mut Continent) {
        if continent.allocated_size() == 0 {
            return;
        }
        let Some(seed) = self.find_seed_node(rep) else {
            trace!("No free seed node for continent of {}", continent.allocated_size());
            return;
        };
        claim_node(rep, continent, seed);

        let mut pool = vec![seed];
        while !continent.is_complete() {
            let Some(next) = self.find_unclaimed_neighbor(rep, &mut pool) else {
                break;
            };
            claim_node(rep, continent, next);
            pool.push(next);
        }
    }
}

fn is_unclaimed(node: &MapNode) -> bool {
    node.elevation() < 0.0
}

fn claim_node(rep: &mut Representation, continent: &mut Continent, idx: usize) {
    if let Some(node) = rep.node_mut(idx) {
        node.set_elevation(LAND_ELEVATION);
        continent.add_node(idx);
    }
}

// ===== TOPOGRAPHY =====

/// Land and ocean topography built from grown continents
#[derive(Debug, Clone)]
pub struct ContinentBasedTopography<G> {
    spec: ContinentSpec,
    rng: ChaCha8Rng,
    generator: G,
}

impl<G: ContinentGenerator> ContinentBasedTopography<G> {
    pub fn new(spec: ContinentSpec, seed: u64, generator: G) -> Self {
        Self {
            spec,
            rng: ChaCha8Rng::seed_from_u64(seed),
            generator,
        }
    }

    pub fn spec(&self) -> &ContinentSpec {
        &self.spec
    }

    /// Split the land budget for `node_count` nodes into continents
    ///
    /// All but the last continent get a random share of what is left; the
    /// last one takes the remainder. The allocated sizes always sum to the
    /// land budget.
    pub fn allocate_continents(&mut self, node_count: usize) -> Vec<Continent> {
        let count = self.spec.continent_count.max(1);
        let land_ratio = self.spec.land_ratio.clamp(0.0, 1.0);
        let total = (node_count as f64 * land_ratio) as usize;

        let mut remaining = total;
        let mut continents = Vec::with_capacity(count);
        for i in 0..count - 1 {
            let continents_left = count - i;
            let size = if remaining > continents_left {
                self.rng.gen_range(0..remaining - continents_left)
            } else {
                0
            };
            remaining -= size;
            continents.push(Continent::new(size));
        }
        continents.push(Continent::new(remaining));
        continents
    }
}

impl<G: ContinentGenerator> TopographyGenerator for ContinentBasedTopography<G> {
    fn generate(&mut self, rep: &mut Representation) {
        let start = Instant::now();
        self.generator.set_map(rep);

        let mut continents = self.allocate_continents(rep.node_count());
        for continent in &mut continents {
            self.generator.generate(rep, continent);
        }

        let land: usize = continents.iter().map(Continent::size).sum();
        finish_elevations(rep);

        debug!(
            "Continents: {} grown, {} of {} nodes land in {:.2?}",
            continents.len(),
            land,
            rep.node_count(),
            start.elapsed()
        );
    }
}

/// Unclaimed nodes become ocean, tiles take the mean of their nodes
fn finish_elevations(rep: &mut Representation) {
    for node in rep.nodes_mut() {
        if is_unclaimed(node) {
            node.set_elevation(OCEAN_ELEVATION);
        }
    }

    let means: Vec<f64> = rep
        .tiles()
        .iter()
        .map(|tile| {
            let elevations: Vec<f64> = tile
                .nodes()
                .iter()
                .filter_map(|&idx| rep.node(idx))
                .map(MapNode::elevation)
                .collect();
            if elevations.is_empty() {
                OCEAN_ELEVATION
            } else {
                elevations.iter().sum::<f64>() / elevations.len() as f64
            }
        })
        .collect();

    for (tile, mean) in rep.tiles_mut().iter_mut().zip(means) {
        tile.set_elevation(mean);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point2D, Polygon2D};
    use crate::map::MapTile;

    /// `cols` x `rows` lattice of nodes with 4-neighborhoods, one tile per cell
    fn grid(cols: usize, rows: usize) -> Representation {
        let mut rep = Representation::new();
        for y in 0..rows {
            for x in 0..cols {
                rep.node_at_or_insert(Point2D::new(x as f64, y as f64));
            }
        }
        for y in 0..rows {
            for x in 0..cols {
                let idx = y * cols + x;
                if x + 1 < cols {
                    rep.connect_nodes(idx, idx + 1);
                }
                if y + 1 < rows {
                    rep.connect_nodes(idx, idx + cols);
                }
            }
        }
        for y in 0..rows - 1 {
            for x in 0..cols - 1 {
                let idx = y * cols + x;
                let nodes = vec![idx, idx + 1, idx + cols + 1, idx + cols];
                let seed = Point2D::new(x as f64 + 0.5, y as f64 + 0.5);
                rep.add_tile(MapTile::new(seed, Polygon2D::new(), nodes));
            }
        }
        rep
    }

    fn land_count(rep: &Representation) -> usize {
        rep.nodes()
            .iter()
            .filter(|n| n.elevation() == LAND_ELEVATION)
            .count()
    }

    #[test]
    fn test_rand_gaussian_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let values: Vec<f64> = (0..2000).map(|_| rand_gaussian(&mut rng, 2.0, 4.0)).collect();
        assert!(values.iter().all(|v| (2.0..=4.0).contains(v)));
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean - 3.0).abs() < 0.1, "mean {}", mean);
    }

    #[test]
    fn test_random_spec() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            let spec = ContinentSpec::random(&mut rng);
            assert!((0.0..=1.0).contains(&spec.land_ratio));
            assert!((1..=MAX_CONTINENTS).contains(&spec.continent_count));
        }
    }

    #[test]
    fn test_allocation_sums_to_budget() {
        let mut topo = ContinentBasedTopography::new(
            ContinentSpec::new(0.4, 7),
            3,
            BlobContinentGenerator::new(4),
        );
        let continents = topo.allocate_continents(1000);
        assert_eq!(continents.len(), 7);
        let total: usize = continents.iter().map(Continent::allocated_size).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn test_allocation_small_budget() {
        let mut topo = ContinentBasedTopography::new(
            ContinentSpec::new(0.01, 5),
            3,
            BlobContinentGenerator::new(4),
        );
        let continents = topo.allocate_continents(300);
        let sizes: Vec<usize> = continents.iter().map(Continent::allocated_size).collect();
        assert_eq!(sizes, vec![0, 0, 0, 0, 3]);
    }

    #[test]
    fn test_blob_growth_is_connected() {
        let mut rep = grid(10, 10);
        let mut gen = BlobContinentGenerator::new(9);
        gen.set_map(&rep);
        let mut continent = Continent::new(30);
        gen.generate(&mut rep, &mut continent);

        assert_eq!(continent.size(), 30);
        assert_eq!(land_count(&rep), 30);
        // Every claimed node after the first touches an earlier one.
        for (i, &idx) in continent.nodes().iter().enumerate().skip(1) {
            let earlier = &continent.nodes()[..i];
            let node = rep.node(idx).unwrap();
            assert!(node.neighbors().iter().any(|n| earlier.contains(n)));
        }
    }

    #[test]
    fn test_growth_stops_without_frontier() {
        let mut rep = grid(3, 3);
        let mut gen = BlobContinentGenerator::new(1);
        gen.set_map(&rep);
        let mut continent = Continent::new(50);
        gen.generate(&mut rep, &mut continent);
        assert_eq!(continent.size(), 9);
    }

    #[test]
    fn test_topography_land_and_ocean() {
        let mut rep = grid(12, 12);
        let mut topo = ContinentBasedTopography::new(
            ContinentSpec::new(0.5, 3),
            7,
            BlobContinentGenerator::new(8),
        );
        topo.generate(&mut rep);

        assert!(land_count(&rep) <= 72);
        assert!(rep
            .nodes()
            .iter()
            .all(|n| n.elevation() == LAND_ELEVATION || n.elevation() == OCEAN_ELEVATION));
        for tile in rep.tiles() {
            assert!((-1.0..=1.0).contains(&tile.elevation()));
        }
    }

    #[test]
    fn test_zero_land_ratio_is_all_ocean() {
        let mut rep = grid(5, 5);
        let mut topo = ContinentBasedTopography::new(
            ContinentSpec::new(0.0, 4),
            1,
            BlobContinentGenerator::new(2),
        );
        topo.generate(&mut rep);
        assert_eq!(land_count(&rep), 0);
        assert!(rep.tiles().iter().all(|t| t.elevation() == OCEAN_ELEVATION));
    }

    #[test]
    fn test_empty_map() {
        let mut rep = Representation::new();
        let mut topo = ContinentBasedTopography::new(
            ContinentSpec::new(1.0, 2),
            1,
            BlobContinentGenerator::new(2),
        );
        topo.generate(&mut rep);
        assert_eq!(rep.node_count(), 0);
    }
}
