//! Closed polygons

use super::fp::{cyclic_next, fp_equal, fp_greater, sign, Sign};
use super::line::Line2D;
use super::point::{Point2D, Vector2D};
use super::rect::Rect2D;

/// Closed polygon; edge `i` runs from vertex `i` to vertex `i + 1 mod n`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon2D {
    vertices: Vec<Point2D>,
}

impl Polygon2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    pub fn from_point(pt: Point2D) -> Self {
        Self { vertices: vec![pt] }
    }

    /// The four corners of a rectangle in the order used for map borders
    pub fn from_rect(rect: &Rect2D) -> Self {
        Self::from_vertices(vec![
            rect.left_top(),
            rect.left_bottom(),
            rect.right_bottom(),
            rect.right_top(),
        ])
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertex(&self, idx: usize) -> Point2D {
        self.vertices[idx]
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point2D> {
        self.vertices
    }

    pub fn set_vertex(&mut self, idx: usize, pt: Point2D) {
        self.vertices[idx] = pt;
    }

    pub fn add_vertex(&mut self, pt: Point2D) {
        self.vertices.push(pt);
    }

    /// Append a vertex unless an equal one is already present
    pub fn add_unique_vertex(&mut self, pt: Point2D) -> bool {
        if self.has_vertex(pt) {
            return false;
        }
        self.vertices.push(pt);
        true
    }

    pub fn insert_vertex(&mut self, idx: usize, pt: Point2D) {
        self.vertices.insert(idx, pt);
    }

    pub fn remove_last_vertex(&mut self) -> Option<Point2D> {
        self.vertices.pop()
    }

    pub fn has_vertex(&self, pt: Point2D) -> bool {
        self.vertices.iter().any(|v| *v == pt)
    }

    /// A single vertex has no edges, otherwise there is one edge per vertex
    pub fn edge_count(&self) -> usize {
        if self.vertices.len() == 1 {
            0
        } else {
            self.vertices.len()
        }
    }

    pub fn edge(&self, idx: usize) -> Line2D {
        let next = cyclic_next(idx, self.vertices.len());
        Line2D::segment(self.vertices[idx], self.vertices[next])
    }

    pub fn bounds(&self) -> Rect2D {
        Rect2D::bounding_box(&self.vertices)
    }

    pub fn reversed(&self) -> Polygon2D {
        Polygon2D::from_vertices(self.vertices.iter().rev().copied().collect())
    }

    pub fn is_convex(&self) -> bool {
        is_convex_path(&self.vertices)
    }

    /// Point inside or on a convex polygon
    ///
    /// The result is meaningless for non-convex polygons.
    pub fn contains_point(&self, pt: Point2D) -> bool {
        match self.vertices.len() {
            0 => return false,
            1 => return self.vertices[0] == pt,
            _ => {}
        }

        // Walking the vertices from inside the polygon never changes turning
        // direction.
        let n = self.vertices.len();
        let mut orientation = Sign::Zero;
        for i in 0..n {
            let v = Vector2D::between(pt, self.vertices[i]);
            let w = Vector2D::between(pt, self.vertices[cyclic_next(i, n)]);
            let current = sign(v.perp_dot(w));
            if current == Sign::Zero && self.edge(i).is_point_on_line(pt) {
                return true;
            }
            if orientation == Sign::Zero {
                orientation = current;
            } else if orientation != current {
                return false;
            }
        }
        true
    }

    /// Unsigned area by the shoelace formula
    pub fn area(&self) -> f64 {
        self.signed_area_doubled().abs() / 2.0
    }

    /// Center of mass of the polygon's area
    ///
    /// Falls back to the mean of the vertices when the area vanishes.
    pub fn centroid(&self) -> Option<Point2D> {
        if self.vertices.is_empty() {
            return None;
        }
        let doubled = self.signed_area_doubled();
        if fp_equal(doubled, 0.0) {
            let n = self.vertices.len() as f64;
            let (sx, sy) = self
                .vertices
                .iter()
                .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
            return Some(Point2D::new(sx / n, sy / n));
        }

        let n = self.vertices.len();
        let (mut cx, mut cy) = (0.0, 0.0);
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[cyclic_next(i, n)];
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        let factor = 1.0 / (3.0 * doubled);
        Some(Point2D::new(cx * factor, cy * factor))
    }

    fn signed_area_doubled(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[cyclic_next(i, n)];
                a.x * b.y - b.x * a.y
            })
            .sum()
    }
}

impl From<Vec<Point2D>> for Polygon2D {
    fn from(vertices: Vec<Point2D>) -> Self {
        Self::from_vertices(vertices)
    }
}

/// All edges of a closed path bend the same way
///
/// Collinear consecutive edges are ignored. Paths of three or fewer points
/// are always convex.
pub fn is_convex_path(path: &[Point2D]) -> bool {
    let n = path.len();
    if n <= 3 {
        return true;
    }

    let mut orientation: Option<bool> = None;
    let mut prev = Vector2D::between(path[0], path[1]);
    for i in 1..n {
        let next = Vector2D::between(path[i], path[cyclic_next(i, n)]);
        let turn = prev.perp_dot(next);
        prev = next;
        if fp_equal(turn, 0.0) {
            continue;
        }
        let cw = fp_greater(turn, 0.0);
        match orientation {
            None => orientation = Some(cw),
            Some(o) if o != cw => return false,
            Some(_) => {}
        }
    }
    true
}
