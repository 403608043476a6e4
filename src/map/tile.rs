//! Map tiles

use crate::geometry::{Point2D, Polygon2D, Rect2D};

use super::node::UNASSIGNED_ELEVATION;
use super::Representation;

/// One cell of the map
///
/// `nodes` holds one node index per outline vertex, in outline order.
/// Neighbors are indices into the tile list of the owning
/// [`Representation`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapTile {
    pub seed: Point2D,
    pub shape: Polygon2D,
    bounds: Rect2D,
    nodes: Vec<usize>,
    neighbors: Vec<usize>,
    elevation: f64,
}

/// Lowest and highest node elevation around a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationExtremes {
    /// Clamped to [-1, 1]
    pub min: f64,
    pub min_pos: Point2D,
    /// Clamped to [-1, 1]
    pub max: f64,
    pub max_pos: Point2D,
    /// Bounding box of the node positions
    pub bounds: Rect2D,
}

impl MapTile {
    pub fn new(seed: Point2D, shape: Polygon2D, nodes: Vec<usize>) -> Self {
        Self {
            seed,
            bounds: shape.bounds(),
            shape,
            nodes,
            neighbors: Vec::new(),
            elevation: UNASSIGNED_ELEVATION,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect2D {
        self.bounds
    }

    /// Node indices in outline order
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
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

    #[inline]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    #[inline]
    pub fn set_elevation(&mut self, elevation: f64) {
        self.elevation = elevation;
    }

    /// Extreme node elevations of this tile
    ///
    /// Returns `None` for a tile without nodes. Node indices that don't
    /// exist in `rep` are skipped.
    pub fn elevation_extremes(&self, rep: &Representation) -> Option<ElevationExtremes> {
        let nodes: Vec<_> = self.nodes.iter().filter_map(|&idx| rep.node(idx)).collect();
        let first = nodes.first()?;

        let mut extremes = ElevationExtremes {
            min: first.elevation(),
            min_pos: first.pos,
            max: first.elevation(),
            max_pos: first.pos,
            bounds: Rect2D::bounding_box(nodes.iter().map(|n| &n.pos)),
        };
        for node in &nodes[1..] {
            if node.elevation() > extremes.max {
                extremes.max = node.elevation();
                extremes.max_pos = node.pos;
            }
            if node.elevation() < extremes.min {
                extremes.min = node.elevation();
                extremes.min_pos = node.pos;
            }
        }
        extremes.min = extremes.min.max(-1.0);
        extremes.max = extremes.max.min(1.0);
        Some(extremes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapNode;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn triangle_rep(elevations: [f64; 3]) -> (Representation, MapTile) {
        let corners = [p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)];
        let mut rep = Representation::new();
        let nodes: Vec<usize> = corners
            .iter()
            .zip(elevations)
            .map(|(&pos, elev)| {
                let mut node = MapNode::new(pos);
                node.set_elevation(elev);
                rep.add_node(node)
            })
            .collect();
        let tile = MapTile::new(p(1.0, 1.0), Polygon2D::from_vertices(corners.to_vec()), nodes);
        (rep, tile)
    }

    #[test]
    fn test_new_tile() {
        let (_, tile) = triangle_rep([0.0; 3]);
        assert_eq!(tile.node_count(), 3);
        assert_eq!(tile.elevation(), UNASSIGNED_ELEVATION);
        assert_eq!(tile.bounds(), Rect2D::new(0.0, 0.0, 4.0, 3.0));
    }

    #[test]
    fn test_elevation_extremes() {
        let (rep, tile) = triangle_rep([0.25, -0.5, 0.75]);
        let ext = tile.elevation_extremes(&rep).unwrap();
        assert_eq!(ext.min, -0.5);
        assert_eq!(ext.min_pos, p(4.0, 0.0));
        assert_eq!(ext.max, 0.75);
        assert_eq!(ext.max_pos, p(0.0, 3.0));
        assert_eq!(ext.bounds, Rect2D::new(0.0, 0.0, 4.0, 3.0));
    }

    #[test]
    fn test_elevation_extremes_are_clamped() {
        let (rep, tile) = triangle_rep([UNASSIGNED_ELEVATION, 0.0, 0.0]);
        let ext = tile.elevation_extremes(&rep).unwrap();
        assert_eq!(ext.min, -1.0);
        assert_eq!(ext.min_pos, p(0.0, 0.0));
    }

    #[test]
    fn test_elevation_extremes_without_nodes() {
        let tile = MapTile::new(p(0.0, 0.0), Polygon2D::new(), Vec::new());
        assert!(tile.elevation_extremes(&Representation::new()).is_none());
    }
}
