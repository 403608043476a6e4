//! 2D gradient noise and the fractal noise topography
//!
//! Classic Perlin noise over a lattice of random unit gradients, one per
//! integer grid point. Octaves are accumulated at halving frequencies.
//!
//! # References
//!
//! - [Perlin noise math FAQ](https://mzucker.github.io/html/perlin-noise-math-faq.html)
//! - [Understanding Perlin noise](https://flafla2.github.io/2014/08/09/perlinnoise.html)

use std::time::Instant;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::NoiseSpec;
use crate::geometry::fp::clamp_to_range;
use crate::geometry::{Point2D, Rect2D};
use crate::map::Representation;

use super::TopographyGenerator;

// ============================================================================
// NOISE HELPER FUNCTIONS
// ============================================================================

/// Quintic fade curve: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Random normalized gradient; never zero
fn random_gradient<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let mut grad = DVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
    while grad.length_squared() == 0.0 {
        grad = DVec2::new(rng.gen::<f64>(), rng.gen::<f64>());
    }
    grad.normalize()
}

// ============================================================================
// PERLIN NOISE
// ============================================================================

/// Gradient noise over the area `[0, width] x [0, height]`
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    width: usize,
    height: usize,
    /// Row-major, `(height + 1) x (width + 1)`
    gradients: Vec<DVec2>,
}

impl PerlinNoise {
    /// Noise lattice with one random gradient per grid point
    ///
    /// Zero extents are raised to one.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let gradients = (0..(width + 1) * (height + 1))
            .map(|_| random_gradient(rng))
            .collect();
        Self {
            width,
            height,
            gradients,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn gradient(&self, col: usize, row: usize) -> DVec2 {
        self.gradients[row * (self.width + 1) + col]
    }

    /// Noise at a point, roughly in [-1, 1]
    ///
    /// Coordinates wrap around the lattice, so any finite point is valid.
    pub fn noise(&self, at: Point2D) -> f64 {
        let x = at.x.rem_euclid(self.width as f64);
        let y = at.y.rem_euclid(self.height as f64);
        // rem_euclid can round up to the modulus itself.
        let left = (x.floor() as usize).min(self.width - 1);
        let top = (y.floor() as usize).min(self.height - 1);
        let pos = DVec2::new(x, y);

        let influence = |col: usize, row: usize| {
            let corner = DVec2::new(col as f64, row as f64);
            self.gradient(col, row).dot(pos - corner)
        };

        let weight_x = fade(x - left as f64);
        let avg_top = lerp(influence(left, top), influence(left + 1, top), weight_x);
        let avg_bottom = lerp(
            influence(left, top + 1),
            influence(left + 1, top + 1),
            weight_x,
        );
        lerp(avg_top, avg_bottom, fade(y - top as f64))
    }

    /// Sum of `octaves` noise passes, normalized by the total amplitude
    ///
    /// Each pass halves the frequency and multiplies the amplitude by
    /// `persistence`.
    pub fn octave_noise(&self, at: Point2D, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise(at.scale(frequency)) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency /= 2.0;
        }

        if max_value == 0.0 {
            0.0
        } else {
            total / max_value
        }
    }
}

// ============================================================================
// FRACTAL NOISE TOPOGRAPHY
// ============================================================================

/// Elevation from multi-octave Perlin noise
///
/// Every node and every tile seed samples the noise independently. The
/// lattice covers the map bounds with unit cells.
#[derive(Debug, Clone)]
pub struct PerlinTopography {
    bounds: Rect2D,
    spec: NoiseSpec,
    rng: ChaCha8Rng,
}

impl PerlinTopography {
    pub fn new(bounds: Rect2D, spec: NoiseSpec, seed: u64) -> Self {
        Self {
            bounds,
            spec,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Lattice origin and size covering the bounds
    fn lattice(&self) -> (Point2D, usize, usize) {
        let origin = Point2D::new(self.bounds.left().floor(), self.bounds.top().floor());
        let width = (self.bounds.right() - origin.x) as usize + 1;
        let height = (self.bounds.bottom() - origin.y) as usize + 1;
        (origin, width, height)
    }

    fn sample(&self, noise: &PerlinNoise, origin: Point2D, pos: Point2D) -> f64 {
        let local = Point2D::new(pos.x - origin.x, pos.y - origin.y);
        let value = noise.octave_noise(local, self.spec.octaves, self.spec.persistence);
        scale_elevation(value)
    }
}

impl TopographyGenerator for PerlinTopography {
    fn generate(&mut self, rep: &mut Representation) {
        let start = Instant::now();
        let (origin, width, height) = self.lattice();
        let noise = PerlinNoise::new(width, height, &mut self.rng);

        for node in rep.nodes_mut() {
            node.set_elevation(self.sample(&noise, origin, node.pos));
        }
        for tile in rep.tiles_mut() {
            tile.set_elevation(self.sample(&noise, origin, tile.seed));
        }

        debug!(
            "Fractal noise: {}x{} lattice, {} octaves in {:.2?}",
            width,
            height,
            self.spec.octaves,
            start.elapsed()
        );
    }
}

/// Multi-octave noise is flat; stretch it and clamp to [-1, 1]
fn scale_elevation(value: f64) -> f64 {
    clamp_to_range(stretch(value), -1.0, 1.0)
}

// Values near zero are amplified the most.
fn stretch(t: f64) -> f64 {
    let abs = t.abs();
    if abs < 0.3 {
        4.0 * t
    } else if abs < 0.5 {
        3.0 * t
    } else {
        t
    }
}
