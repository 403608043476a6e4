//! Position-keyed storage under tolerant equality
//!
//! Tolerant point equality is not transitive, so points can't be hashed
//! directly. [`PointLookup`] quantizes coordinates to a grid whose cell is at
//! least twice the comparison threshold. Two equal points then always fall
//! into the same or neighboring cells, and a lookup probes the 3x3 block of
//! cells around the query before confirming candidates with `==`.

use std::collections::HashMap;

use super::fp::global_threshold;
use super::point::Point2D;

/// Default edge length of a lookup cell
pub const DEFAULT_LOOKUP_PRECISION: f64 = 1e-6;

type CellKey = (i64, i64);

/// Map from positions to values; iteration follows insertion order
#[derive(Debug, Clone)]
pub struct PointLookup<V> {
    precision: f64,
    cells: HashMap<CellKey, Vec<usize>>,
    entries: Vec<(Point2D, V)>,
}

impl<V> PointLookup<V> {
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_LOOKUP_PRECISION)
    }

    /// Lookup with a custom cell size
    ///
    /// The size is raised to twice the current comparison threshold if it
    /// is smaller.
    pub fn with_precision(precision: f64) -> Self {
        Self {
            precision: precision.max(2.0 * global_threshold()),
            cells: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(&self, pt: Point2D) -> CellKey {
        (
            (pt.x / self.precision).floor() as i64,
            (pt.y / self.precision).floor() as i64,
        )
    }

    fn find_index(&self, pt: Point2D) -> Option<usize> {
        let (kx, ky) = self.key(pt);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.cells.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                if let Some(&idx) = bucket.iter().find(|&&idx| self.entries[idx].0 == pt) {
                    return Some(idx);
                }
            }
        }
        None
    }

    pub fn contains(&self, pt: Point2D) -> bool {
        self.find_index(pt).is_some()
    }

    pub fn get(&self, pt: Point2D) -> Option<&V> {
        self.find_index(pt).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, pt: Point2D) -> Option<&mut V> {
        self.find_index(pt).map(move |idx| &mut self.entries[idx].1)
    }

    /// Stored position equal to `pt`, as it was first inserted
    pub fn get_key(&self, pt: Point2D) -> Option<Point2D> {
        self.find_index(pt).map(|idx| self.entries[idx].0)
    }

    /// Insert a value, returning the previous value at an equal position
    pub fn insert(&mut self, pt: Point2D, value: V) -> Option<V> {
        if let Some(idx) = self.find_index(pt) {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }
        self.push(pt, value);
        None
    }

    /// Value at an equal position, inserting one made by `make` if absent
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, pt: Point2D, make: F) -> &mut V {
        let idx = match self.find_index(pt) {
            Some(idx) => idx,
            None => self.push(pt, make()),
        };
        &mut self.entries[idx].1
    }

    fn push(&mut self, pt: Point2D, value: V) -> usize {
        let idx = self.entries.len();
        self.entries.push((pt, value));
        let key = self.key(pt);
        self.cells.entry(key).or_default().push(idx);
        idx
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point2D, &V)> {
        self.entries.iter().map(|(pt, v)| (pt, v))
    }

    pub fn into_entries(self) -> Vec<(Point2D, V)> {
        self.entries
    }
}

impl<V> Default for PointLookup<V> {
    fn default() -> Self {
        Self::new()
    }
}
