//! Map generation configuration and builder
//!
//! A [`MapSpec`] fully determines a generated map: the same spec always
//! produces the identical tile layout and elevations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::generation::poisson::{check_spacing, DEFAULT_CANDIDATES};
use crate::geometry::Rect2D;

/// Largest accepted number of sample candidates per seed
pub const MAX_SAMPLE_CANDIDATES: usize = 1_000;

/// Largest accepted number of noise octaves
pub const MAX_OCTAVES: u32 = 16;

/// Largest accepted number of continents
pub const MAX_CONTINENTS: usize = 20;

/// Largest gradient lattice the fractal noise allocates over the bounds
pub const MAX_NOISE_LATTICE_POINTS: f64 = (1u64 << 24) as f64;

/// Parameters of the fractal noise elevation
///
/// Each octave halves the sampling frequency, so later octaves describe
/// larger features. `persistence` scales the amplitude from one octave to the
/// next: values above 1 let the large features dominate and give smooth
/// terrain, values below 1 give choppy terrain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSpec {
    pub octaves: u32,
    pub persistence: f64,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self {
            octaves: 9,
            persistence: 2.0,
        }
    }
}

/// Elevation strategy applied after the geometry is built
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TopographyKind {
    /// Multi-octave gradient noise at every node and tile seed
    #[default]
    FractalNoise,
    /// Land masses grown outward from random seed nodes
    Continents {
        /// Share of all nodes that become land, in [0, 1]
        land_ratio: f64,
        /// Number of separately grown land masses
        continent_count: usize,
    },
}

/// The part of a [`MapSpec`] the geometry generator consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySpec {
    pub bounds: Rect2D,
    /// Smaller distance gives smaller and more tiles
    pub min_sample_distance: f64,
    /// More candidates give more evenly spaced tiles but slower generation
    pub sample_candidates: usize,
}

/// Configuration for deterministic map generation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_map::*;
///
/// let spec = MapSpecBuilder::new()
///     .seed(7)
///     .bounds(Rect2D::new(0.0, 0.0, 200.0, 100.0))
///     .unwrap()
///     .min_sample_distance(4.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.terrain_seed, 7);
/// assert_eq!(spec.geometry_spec().min_sample_distance, 4.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSpec {
    /// Seed for sample placement
    pub seed: u64,
    /// Seed for elevation; allows the same layout with different terrain
    pub terrain_seed: u64,
    pub bounds: Rect2D,
    pub min_sample_distance: f64,
    pub sample_candidates: usize,
    pub noise: NoiseSpec,
    pub topography: TopographyKind,
}

impl MapSpec {
    /// Check every parameter the builder checks
    ///
    /// `MapSpec` has public fields and may be deserialized, so generation
    /// validates it again instead of trusting the builder.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first parameter out of range.
    pub fn validate(&self) -> Result<()> {
        check_bounds(&self.bounds)?;
        check_spacing(&self.bounds, self.min_sample_distance)?;
        check_sample_candidates(self.sample_candidates)?;
        check_octaves(self.noise.octaves)?;
        check_persistence(self.noise.persistence)?;

        let extent = self.bounds.width().max(self.bounds.height());
        if self.min_sample_distance > extent {
            return Err(MapError::InvalidConfig(format!(
                "Minimum sample distance {} exceeds the map extent {}",
                self.min_sample_distance, extent
            )));
        }

        match self.topography {
            TopographyKind::FractalNoise => {
                let lattice = (self.bounds.width() + 2.0) * (self.bounds.height() + 2.0);
                if lattice > MAX_NOISE_LATTICE_POINTS {
                    return Err(MapError::InvalidConfig(format!(
                        "Map bounds {}x{} are too large for fractal noise",
                        self.bounds.width(),
                        self.bounds.height()
                    )));
                }
                Ok(())
            }
            TopographyKind::Continents {
                land_ratio,
                continent_count,
            } => check_continents(land_ratio, continent_count),
        }
    }

    pub fn geometry_spec(&self) -> GeometrySpec {
        GeometrySpec {
            bounds: self.bounds,
            min_sample_distance: self.min_sample_distance,
            sample_candidates: self.sample_candidates,
        }
    }

    #[inline]
    pub fn noise_spec(&self) -> NoiseSpec {
        self.noise
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}

impl Default for MapSpec {
    fn default() -> Self {
        Self {
            seed: 0,
            terrain_seed: 0,
            bounds: default_bounds(),
            min_sample_distance: MapSpecBuilder::DEFAULT_MIN_SAMPLE_DISTANCE,
            sample_candidates: DEFAULT_CANDIDATES,
            noise: NoiseSpec::default(),
            topography: TopographyKind::default(),
        }
    }
}

fn default_bounds() -> Rect2D {
    Rect2D::new(0.0, 0.0, 100.0, 100.0)
}

// ============================================================================
// PARAMETER CHECKS
// ============================================================================

fn check_bounds(bounds: &Rect2D) -> Result<()> {
    let finite = [bounds.left(), bounds.top(), bounds.right(), bounds.bottom()]
        .iter()
        .all(|v| v.is_finite());
    if !finite || bounds.is_degenerate() {
        return Err(MapError::InvalidConfig(format!(
            "Map bounds must have a positive finite area (got {}x{})",
            bounds.width(),
            bounds.height()
        )));
    }
    Ok(())
}

fn check_sample_candidates(candidates: usize) -> Result<()> {
    if !(1..=MAX_SAMPLE_CANDIDATES).contains(&candidates) {
        return Err(MapError::InvalidConfig(format!(
            "Sample candidates must be in 1..={} (got {})",
            MAX_SAMPLE_CANDIDATES, candidates
        )));
    }
    Ok(())
}

fn check_octaves(octaves: u32) -> Result<()> {
    if !(1..=MAX_OCTAVES).contains(&octaves) {
        return Err(MapError::InvalidConfig(format!(
            "Noise octaves must be in 1..={} (got {})",
            MAX_OCTAVES, octaves
        )));
    }
    Ok(())
}

fn check_persistence(persistence: f64) -> Result<()> {
    if !(persistence.is_finite() && persistence > 0.0) {
        return Err(MapError::InvalidConfig(format!(
            "Noise persistence must be positive (got {})",
            persistence
        )));
    }
    Ok(())
}

fn check_continents(land_ratio: f64, continent_count: usize) -> Result<()> {
    if !(0.0..=1.0).contains(&land_ratio) {
        return Err(MapError::InvalidConfig(format!(
            "Land ratio must be in [0, 1] (got {})",
            land_ratio
        )));
    }
    if !(1..=MAX_CONTINENTS).contains(&continent_count) {
        return Err(MapError::InvalidConfig(format!(
            "Continent count must be in 1..={} (got {})",
            MAX_CONTINENTS, continent_count
        )));
    }
    Ok(())
}

/// Builder for creating a [`MapSpec`] with validation
///
/// Defaults:
/// - seed: random
/// - terrain_seed: same as seed
/// - bounds: 100 x 100 starting at the origin
/// - min_sample_distance: 5
/// - sample_candidates: 30
/// - noise: 9 octaves, persistence 2
/// - topography: fractal noise
#[derive(Debug, Clone)]
pub struct MapSpecBuilder {
    seed: Option<u64>,
    terrain_seed: Option<u64>,
    bounds: Rect2D,
    min_sample_distance: f64,
    sample_candidates: usize,
    noise: NoiseSpec,
    topography: TopographyKind,
}

impl MapSpecBuilder {
    const DEFAULT_MIN_SAMPLE_DISTANCE: f64 = 5.0;

    pub fn new() -> Self {
        Self {
            seed: None,
            terrain_seed: None,
            bounds: default_bounds(),
            min_sample_distance: Self::DEFAULT_MIN_SAMPLE_DISTANCE,
            sample_candidates: DEFAULT_CANDIDATES,
            noise: NoiseSpec::default(),
            topography: TopographyKind::default(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a separate terrain seed
    ///
    /// If not set, the terrain seed matches the map seed.
    pub fn terrain_seed(mut self, seed: u64) -> Self {
        self.terrain_seed = Some(seed);
        self
    }

    /// Set the map area
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rectangle has no area
    pub fn bounds(mut self, bounds: Rect2D) -> Result<Self> {
        check_bounds(&bounds)?;
        self.bounds = bounds;
        Ok(self)
    }

    /// Set the minimum distance between tile seeds
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the distance is not a positive finite number
    pub fn min_sample_distance(mut self, distance: f64) -> Result<Self> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "Minimum sample distance must be positive (got {})",
                distance
            )));
        }
        self.min_sample_distance = distance;
        Ok(self)
    }

    /// Set the number of candidates tried around each sample
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless 1 <= candidates <= 1000
    pub fn sample_candidates(mut self, candidates: usize) -> Result<Self> {
        check_sample_candidates(candidates)?;
        self.sample_candidates = candidates;
        Ok(self)
    }

    /// Set the number of noise octaves
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless 1 <= octaves <= 16
    pub fn octaves(mut self, octaves: u32) -> Result<Self> {
        check_octaves(octaves)?;
        self.noise.octaves = octaves;
        Ok(self)
    }

    /// Set the amplitude factor between noise octaves
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if persistence is not a positive finite number
    pub fn persistence(mut self, persistence: f64) -> Result<Self> {
        check_persistence(persistence)?;
        self.noise.persistence = persistence;
        Ok(self)
    }

    /// Grow continents instead of sampling fractal noise
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the land ratio is outside [0, 1] or the
    /// continent count is outside 1..=20
    pub fn continents(mut self, land_ratio: f64, continent_count: usize) -> Result<Self> {
        check_continents(land_ratio, continent_count)?;
        self.topography = TopographyKind::Continents {
            land_ratio,
            continent_count,
        };
        Ok(self)
    }

    /// Build the `MapSpec`
    ///
    /// If no seed was provided, a random one is drawn from the thread rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the sample distance doesn't fit the bounds
    /// or the combined parameters fail [`MapSpec::validate`]
    pub fn build(self) -> Result<MapSpec> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let terrain_seed = self.terrain_seed.unwrap_or(seed);
        let spec = MapSpec {
            seed,
            terrain_seed,
            bounds: self.bounds,
            min_sample_distance: self.min_sample_distance,
            sample_candidates: self.sample_candidates,
            noise: self.noise,
            topography: self.topography,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl Default for MapSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}
