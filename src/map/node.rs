//! Map nodes: the shared corners of tiles

use crate::geometry::Point2D;

/// Elevation of a node or tile that no topography pass has touched yet
pub const UNASSIGNED_ELEVATION: f64 = -2.0;

/// Map properties at one tile corner
///
/// A corner shared by several tiles is a single node. Neighbors are indices
/// into the node list of the owning [`Representation`](super::Representation)
/// and are always symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub pos: Point2D,
    elevation: f64,
    neighbors: Vec<usize>,
}

impl MapNode {
    pub fn new(pos: Point2D) -> Self {
        Self {
            pos,
            elevation: UNASSIGNED_ELEVATION,
            neighbors: Vec::new(),
        }
    }

    /// Elevation in [-1, 1], or [`UNASSIGNED_ELEVATION`]
    #[inline]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    #[inline]
    pub fn set_elevation(&mut self, elevation: f64) {
        self.elevation = elevation;
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.elevation >= -1.0
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn add_neighbor(&mut self, idx: usize) {
        if !self.neighbors.contains(&idx) {
            self.neighbors.push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unassigned() {
        let node = MapNode::new(Point2D::new(1.0, 2.0));
        assert!(!node.is_assigned());
        assert_eq!(node.elevation(), UNASSIGNED_ELEVATION);
        assert_eq!(node.neighbor_count(), 0);
    }

    #[test]
    fn test_neighbors_are_unique() {
        let mut node = MapNode::new(Point2D::new(0.0, 0.0));
        node.add_neighbor(3);
        node.add_neighbor(5);
        node.add_neighbor(3);
        assert_eq!(node.neighbors(), &[3, 5]);
    }

    #[test]
    fn test_assignment() {
        let mut node = MapNode::new(Point2D::new(0.0, 0.0));
        node.set_elevation(-1.0);
        assert!(node.is_assigned());
    }
}
