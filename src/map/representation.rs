//! Tile and node storage shared by the generators

use crate::geometry::{Point2D, PointLookup};

use super::node::MapNode;
use super::tile::MapTile;

/// Master lists of tiles and nodes with position lookups for both
///
/// Tiles are looked up by seed, nodes by position. Adjacency is stored as
/// indices into the two lists.
#[derive(Debug, Clone, Default)]
pub struct Representation {
    tiles: Vec<MapTile>,
    tile_lookup: PointLookup<usize>,
    nodes: Vec<MapNode>,
    node_lookup: PointLookup<usize>,
}

impl Representation {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== TILES =====

    /// Add a tile and return its index
    pub fn add_tile(&mut self, tile: MapTile) -> usize {
        let idx = self.tiles.len();
        self.tile_lookup.insert(tile.seed, idx);
        self.tiles.push(tile);
        idx
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn tile(&self, idx: usize) -> Option<&MapTile> {
        self.tiles.get(idx)
    }

    #[inline]
    pub fn tile_mut(&mut self, idx: usize) -> Option<&mut MapTile> {
        self.tiles.get_mut(idx)
    }

    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [MapTile] {
        &mut self.tiles
    }

    /// Index of the tile whose seed is at `pos`
    pub fn tile_index_at(&self, pos: Point2D) -> Option<usize> {
        self.tile_lookup.get(pos).copied()
    }

    /// Tile whose seed is at `pos`
    pub fn find_tile_at(&self, pos: Point2D) -> Option<&MapTile> {
        self.tile_index_at(pos).and_then(|idx| self.tiles.get(idx))
    }

    /// Mark two tiles as neighbors of each other
    pub fn connect_tiles(&mut self, a: usize, b: usize) {
        if a == b || a >= self.tiles.len() || b >= self.tiles.len() {
            return;
        }
        self.tiles[a].add_neighbor(b);
        self.tiles[b].add_neighbor(a);
    }

    // ===== NODES =====

    /// Add a node and return its index
    pub fn add_node(&mut self, node: MapNode) -> usize {
        let idx = self.nodes.len();
        self.node_lookup.insert(node.pos, idx);
        self.nodes.push(node);
        idx
    }

    /// Index of the node at `pos`, creating the node if there is none
    pub fn node_at_or_insert(&mut self, pos: Point2D) -> usize {
        match self.node_index_at(pos) {
            Some(idx) => idx,
            None => self.add_node(MapNode::new(pos)),
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn node(&self, idx: usize) -> Option<&MapNode> {
        self.nodes.get(idx)
    }

    #[inline]
    pub fn node_mut(&mut self, idx: usize) -> Option<&mut MapNode> {
        self.nodes.get_mut(idx)
    }

    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [MapNode] {
        &mut self.nodes
    }

    pub fn node_index_at(&self, pos: Point2D) -> Option<usize> {
        self.node_lookup.get(pos).copied()
    }

    /// Node located at `pos`
    pub fn find_node_at(&self, pos: Point2D) -> Option<&MapNode> {
        self.node_index_at(pos).and_then(|idx| self.nodes.get(idx))
    }

    /// Mark two nodes as neighbors of each other
    pub fn connect_nodes(&mut self, a: usize, b: usize) {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() {
            return;
        }
        self.nodes[a].add_neighbor(b);
        self.nodes[b].add_neighbor(a);
    }
}
