//! Spatial indexing for fast position-to-tile lookups
//!
//! This module is only available with the `spatial-index` feature.

use std::fmt;

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::geometry::Point2D;

/// KD-tree over tile seeds
///
/// Nearest-seed queries answer "which tile contains this position" in
/// O(log n), because every tile is the Voronoi cell of its seed.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    len: usize,
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.len).finish()
    }
}

impl SpatialIndex {
    /// Build the index from tile seeds; item `i` is the seed at index `i`
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_map::*;
    ///
    /// let seeds = vec![
    ///     Point2D::new(0.0, 0.0),
    ///     Point2D::new(10.0, 0.0),
    ///     Point2D::new(0.0, 10.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&seeds);
    /// assert_eq!(index.find_nearest(Point2D::new(8.0, 1.0)), 1);
    /// ```
    pub fn new(seeds: &[Point2D]) -> Self {
        let points: Vec<[f64; 2]> = seeds.iter().map(|s| [s.x, s.y]).collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            len: points.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the seed nearest to `pos`
    pub fn find_nearest(&self, pos: Point2D) -> usize {
        let result = self.tree.nearest_one::<SquaredEuclidean>(&[pos.x, pos.y]);
        result.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let seeds = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
            Point2D::new(10.0, 10.0),
        ];

        let index = SpatialIndex::new(&seeds);

        assert_eq!(index.find_nearest(Point2D::new(1.0, 2.0)), 0);
        assert_eq!(index.find_nearest(Point2D::new(9.0, -3.0)), 1);
        assert_eq!(index.find_nearest(Point2D::new(2.0, 8.0)), 2);
        assert_eq!(index.find_nearest(Point2D::new(12.0, 12.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let seeds = vec![Point2D::new(5.0, 5.0), Point2D::new(-5.0, 5.0)];
        let index = SpatialIndex::new(&seeds);
        assert_eq!(index.find_nearest(seeds[0]), 0);
        assert_eq!(index.find_nearest(seeds[1]), 1);
    }
}
