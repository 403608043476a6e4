//! Triangles with normalized winding

use std::fmt;

use super::circle::Circle2D;
use super::fp::cyclic_next;
use super::line::Line2D;
use super::point::{Point2D, Vector2D};
use crate::error::GeometryError;

/// Triangle whose vertices are stored counter-clockwise (screen coordinates)
///
/// Collinear or coincident vertices are allowed; query them with
/// [`Triangle2D::is_point`], [`Triangle2D::is_line`] and
/// [`Triangle2D::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2D {
    vertices: [Point2D; 3],
}

impl Triangle2D {
    /// Build a triangle, swapping `b` and `c` if needed to wind ccw
    pub fn new(a: Point2D, b: Point2D, c: Point2D) -> Self {
        let ccw = Vector2D::between(a, b).is_ccw(Vector2D::between(b, c));
        let vertices = if ccw { [a, b, c] } else { [a, c, b] };
        Self { vertices }
    }

    #[inline]
    pub fn vertex(&self, idx: usize) -> Point2D {
        self.vertices[idx]
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2D; 3] {
        &self.vertices
    }

    pub fn has_vertex(&self, pt: Point2D) -> bool {
        self.vertices.iter().any(|v| *v == pt)
    }

    /// Segment from vertex `idx` to the next vertex
    pub fn edge(&self, idx: usize) -> Line2D {
        Line2D::segment(self.vertices[idx], self.vertices[cyclic_next(idx, 3)])
    }

    /// All three vertices coincide
    pub fn is_point(&self) -> bool {
        self.vertices[0] == self.vertices[1] && self.vertices[0] == self.vertices[2]
    }

    /// Vertices are collinear without all coinciding
    pub fn is_line(&self) -> bool {
        if self.is_point() {
            return false;
        }
        let side01 = Line2D::segment(self.vertices[0], self.vertices[1]);
        self.vertices[0] == self.vertices[1] || side01.is_point_on_infinite_line(self.vertices[2])
    }

    pub fn is_degenerate(&self) -> bool {
        self.is_point() || self.is_line()
    }

    pub fn area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let v = Vector2D::between(self.vertices[0], self.vertices[1]);
        let w = Vector2D::between(self.vertices[0], self.vertices[2]);
        v.perp_dot(w).abs() / 2.0
    }

    /// Circle through all three vertices
    ///
    /// A triangle collapsed into a point yields a circle of radius zero,
    /// a triangle collapsed into a line has no circumcircle.
    pub fn circumcircle(&self) -> Result<Option<Circle2D>, GeometryError> {
        if self.is_point() {
            return Ok(Some(Circle2D::new(self.vertices[0], 0.0)));
        }
        if self.is_line() {
            return Ok(None);
        }
        let center = self.circumcenter()?;
        let radius = center.distance(self.vertices[0]);
        Ok(Some(Circle2D::new(center, radius)))
    }

    // Meeting point of the perpendicular bisectors of two sides.
    fn circumcenter(&self) -> Result<Point2D, GeometryError> {
        let side01 = self.edge(0);
        let side12 = self.edge(1);
        let bisector01 = Line2D::infinite(side01.midpoint(), side01.direction().ccw_normal());
        let bisector12 = Line2D::infinite(side12.midpoint(), side12.direction().ccw_normal());
        bisector01
            .intersect(&bisector12)
            .point()
            .ok_or_else(|| GeometryError::CircumcenterFailed(self.to_string()))
    }
}

impl fmt::Display for Triangle2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.vertices[0], self.vertices[1], self.vertices[2]
        )
    }
}
