//! Poisson-disc sampling
//!
//! Bridson, "Fast Poisson Disk Sampling in Arbitrary Dimensions" (2007).
//! Produces points that are never closer than a minimum distance to each
//! other while covering the domain with near-uniform density.
//!
//! # Algorithm
//!
//! 1. Store an initial sample and mark it active
//! 2. Take the first active sample as seed
//! 3. Draw up to `k` candidates from the annulus `[d, 2d]` around the seed
//! 4. Store the first candidate without a neighbor closer than `d`,
//!    otherwise deactivate the seed
//! 5. Repeat until no sample is active
//!
//! Seeds are always taken from the front of the active list rather than at
//! random, so a given random source always yields the same point set.

use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::error::{MapError, Result};
use crate::geometry::{Point2D, Rect2D, Ring2D};

/// Number of candidates tried around a seed before it is retired
pub const DEFAULT_CANDIDATES: usize = 30;

const SQRT_TWO: f64 = std::f64::consts::SQRT_2;

/// Upper bound on rejection draws for one candidate inside the annulus.
/// Only reached when the annulus barely overlaps the domain.
const MAX_RING_DRAWS: usize = 1_000;

/// Largest background grid the sampler allocates
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Check that `min_dist` is usable as sample spacing over `domain`
///
/// # Errors
///
/// Returns `InvalidConfig` if the distance is not a positive finite number
/// or so small that the background grid would exceed [`MAX_GRID_CELLS`].
pub fn check_spacing(domain: &Rect2D, min_dist: f64) -> Result<()> {
    if !(min_dist.is_finite() && min_dist > 0.0) {
        return Err(MapError::InvalidConfig(format!(
            "Minimum sample distance must be positive (got {})",
            min_dist
        )));
    }
    let cell_size = min_dist / SQRT_TWO;
    let rows = (domain.height() / cell_size).ceil().max(1.0);
    let cols = (domain.width() / cell_size).ceil().max(1.0);
    if !(rows * cols <= MAX_GRID_CELLS as f64) {
        return Err(MapError::InvalidConfig(format!(
            "Minimum sample distance {} is too small for a {}x{} domain",
            min_dist,
            domain.width(),
            domain.height()
        )));
    }
    Ok(())
}

// ============================================================================
// BACKGROUND GRID
// ============================================================================

/// Grid over the domain holding at most one sample index per cell
///
/// With a cell size of `d / sqrt(2)` a cell's diagonal is exactly `d`, so no
/// two samples can share a cell and every sample closer than `d` to a point
/// lies within two cells of it.
struct BackgroundGrid {
    domain: Rect2D,
    min_dist: f64,
    cell_size: f64,
    rows: usize,
    cols: usize,
    cells: Vec<Option<usize>>,
}

impl BackgroundGrid {
    fn new(domain: Rect2D, min_dist: f64) -> Self {
        let cell_size = min_dist / SQRT_TWO;
        let rows = ((domain.height() / cell_size).ceil() as usize).max(1);
        let cols = ((domain.width() / cell_size).ceil() as usize).max(1);
        Self {
            domain,
            min_dist,
            cell_size,
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    fn row_of(&self, y: f64) -> i64 {
        ((y - self.domain.top()) / self.cell_size).floor() as i64
    }

    fn col_of(&self, x: f64) -> i64 {
        ((x - self.domain.left()) / self.cell_size).floor() as i64
    }

    fn insert(&mut self, sample: Point2D, idx: usize) {
        // Samples on the right or bottom border fall one past the last cell.
        let r = self.row_of(sample.y).clamp(0, self.rows as i64 - 1) as usize;
        let c = self.col_of(sample.x).clamp(0, self.cols as i64 - 1) as usize;
        self.cells[r * self.cols + c] = Some(idx);
    }

    fn is_occupied(&self, r: i64, c: i64) -> bool {
        if r < 0 || c < 0 || r >= self.rows as i64 || c >= self.cols as i64 {
            return false;
        }
        self.cells[r as usize * self.cols + c as usize].is_some()
    }

    /// Any stored sample in the cells that could be within `min_dist`
    fn has_sample_near(&self, test: Point2D) -> bool {
        let test_row = self.row_of(test.y);
        let test_col = self.col_of(test.x);
        let top_row = self.row_of(test.y - self.min_dist);
        let bottom_row = self.row_of(test.y + self.min_dist);
        let left_col = self.col_of(test.x - self.min_dist);
        let right_col = self.col_of(test.x + self.min_dist);

        // Two rows above only needs the three cells over the test column.
        if top_row < test_row - 1
            && (test_col - 1..=test_col + 1).any(|c| self.is_occupied(top_row, c))
        {
            return true;
        }

        for r in test_row - 1..=test_row + 1 {
            if (left_col..=right_col).any(|c| self.is_occupied(r, c)) {
                return true;
            }
        }

        bottom_row > test_row + 1
            && (test_col - 1..=test_col + 1).any(|c| self.is_occupied(bottom_row, c))
    }
}

// ============================================================================
// ANNULUS
// ============================================================================

/// Candidate area around a seed, restricted to the domain
struct Annulus {
    ring: Ring2D,
    bounds: Rect2D,
}

impl Annulus {
    fn new(center: Point2D, inner: f64, outer: f64, domain: &Rect2D) -> Self {
        let ring = Ring2D::new(center, inner, outer);
        let bounds = ring.bounds().intersect(domain);
        Self { ring, bounds }
    }

    /// Rejection sampling inside the ring's bounding box
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point2D> {
        (0..MAX_RING_DRAWS)
            .map(|_| random_point_in(&self.bounds, rng))
            .find(|pt| self.ring.contains_point(*pt))
    }
}

fn random_point_in<R: Rng + ?Sized>(rect: &Rect2D, rng: &mut R) -> Point2D {
    Point2D::new(
        rect.left() + rng.gen::<f64>() * rect.width(),
        rect.top() + rng.gen::<f64>() * rect.height(),
    )
}

// ============================================================================
// SAMPLER
// ============================================================================

/// Bridson sampler over a rectangular domain
#[derive(Debug, Clone, Copy)]
pub struct PoissonDiscSampler {
    domain: Rect2D,
    min_dist: f64,
    num_candidates: usize,
}

impl PoissonDiscSampler {
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min_dist` fails [`check_spacing`].
    pub fn new(domain: Rect2D, min_dist: f64, num_candidates: usize) -> Result<Self> {
        check_spacing(&domain, min_dist)?;
        Ok(Self {
            domain,
            min_dist,
            num_candidates,
        })
    }

    pub fn domain(&self) -> Rect2D {
        self.domain
    }

    pub fn min_distance(&self) -> f64 {
        self.min_dist
    }

    /// Generate samples starting from a uniformly random point
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point2D> {
        let initial = random_point_in(&self.domain, rng);
        self.generate_from(initial, rng)
    }

    /// Generate samples starting from a given point
    pub fn generate_from<R: Rng + ?Sized>(&self, initial: Point2D, rng: &mut R) -> Vec<Point2D> {
        let start = Instant::now();
        let mut state = SamplerState {
            grid: BackgroundGrid::new(self.domain, self.min_dist),
            samples: Vec::new(),
            active: Vec::new(),
        };
        state.store(initial);

        while let Some(&seed_idx) = state.active.first() {
            match self.find_new_sample(state.samples[seed_idx], &state.grid, rng) {
                Some(pt) => state.store(pt),
                None => state.deactivate(seed_idx),
            }
        }

        debug!(
            "Poisson-disc sampling: {} samples (min distance {:.3}) in {:.2?}",
            state.samples.len(),
            self.min_dist,
            start.elapsed()
        );
        state.samples
    }

    fn find_new_sample<R: Rng + ?Sized>(
        &self,
        seed: Point2D,
        grid: &BackgroundGrid,
        rng: &mut R,
    ) -> Option<Point2D> {
        let annulus = Annulus::new(seed, self.min_dist, 2.0 * self.min_dist, &self.domain);
        for _ in 0..self.num_candidates {
            let candidate = annulus.random_point(rng)?;
            if !grid.has_sample_near(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

struct SamplerState {
    grid: BackgroundGrid,
    samples: Vec<Point2D>,
    active: Vec<usize>,
}

impl SamplerState {
    fn store(&mut self, pt: Point2D) {
        let idx = self.samples.len();
        self.samples.push(pt);
        self.active.push(idx);
        self.grid.insert(pt, idx);
    }

    fn deactivate(&mut self, idx: usize) {
        self.active.retain(|&i| i != idx);
    }
}
