//! Segments, rays and infinite lines
//!
//! All three share one representation: an anchor point and a direction
//! vector. They differ only in which parametric values `t` of
//! `anchor + t * direction` belong to the line.
//!
//! | Kind       | Valid `t`   | Start point | End point           |
//! |------------|-------------|-------------|---------------------|
//! | `Segment`  | `[0, 1]`    | anchor      | anchor + direction  |
//! | `Ray`      | `[0, inf)`  | anchor      | none                |
//! | `Infinite` | unbounded   | none        | none                |

use super::intersection::{intersect_lines, LineIntersection};
use super::point::{Point2D, Vector2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Segment,
    Ray,
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    anchor: Point2D,
    dir: Vector2D,
    kind: LineKind,
}

impl Line2D {
    pub fn new(kind: LineKind, anchor: Point2D, dir: Vector2D) -> Self {
        Self { anchor, dir, kind }
    }

    /// Segment from `start` to `end`
    pub fn segment(start: Point2D, end: Point2D) -> Self {
        Self::new(LineKind::Segment, start, Vector2D::between(start, end))
    }

    pub fn ray(start: Point2D, dir: Vector2D) -> Self {
        Self::new(LineKind::Ray, start, dir)
    }

    pub fn infinite(anchor: Point2D, dir: Vector2D) -> Self {
        Self::new(LineKind::Infinite, anchor, dir)
    }

    #[inline]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    #[inline]
    pub fn anchor(&self) -> Point2D {
        self.anchor
    }

    #[inline]
    pub fn direction(&self) -> Vector2D {
        self.dir
    }

    /// Zero direction: the line collapses into its anchor
    pub fn is_point(&self) -> bool {
        self.dir.is_zero()
    }

    pub fn has_start_point(&self) -> bool {
        matches!(self.kind, LineKind::Segment | LineKind::Ray)
    }

    pub fn start_point(&self) -> Option<Point2D> {
        self.has_start_point().then_some(self.anchor)
    }

    pub fn has_end_point(&self) -> bool {
        self.kind == LineKind::Segment
    }

    pub fn end_point(&self) -> Option<Point2D> {
        self.has_end_point().then(|| self.anchor.offset(self.dir))
    }

    /// Point halfway along the direction vector
    pub fn midpoint(&self) -> Point2D {
        self.anchor.offset(self.dir.scale(0.5))
    }

    /// Length of the direction vector
    pub fn length(&self) -> f64 {
        self.dir.length()
    }

    /// Same line traversed from the other end
    ///
    /// Only segments keep their point set; rays and infinite lines just flip
    /// their direction around the anchor.
    pub fn reversed(&self) -> Self {
        match self.kind {
            LineKind::Segment => Self::new(self.kind, self.anchor.offset(self.dir), -self.dir),
            _ => Self::new(self.kind, self.anchor, -self.dir),
        }
    }

    /// Parametric value of a point on the infinite extension of the line
    ///
    /// Returns `None` if the point is off the infinite extension. For a line
    /// collapsed into a point only the anchor itself is on it, at `t = 0`.
    pub fn parametric_value(&self, pt: Point2D) -> Option<f64> {
        if self.is_point() {
            return (pt == self.anchor).then_some(0.0);
        }
        let v = Vector2D::between(self.anchor, pt);
        if !v.is_parallel(self.dir) {
            return None;
        }
        let t = v.length() / self.dir.length();
        if v.has_same_direction(self.dir) {
            Some(t)
        } else {
            Some(-t)
        }
    }

    /// `anchor + t * direction`
    pub fn point_at(&self, t: f64) -> Point2D {
        self.anchor.offset(self.dir.scale(t))
    }

    /// Parametric value of a point if it lies on the line's valid range
    pub fn locate_point(&self, pt: Point2D) -> Option<f64> {
        let t = self.parametric_value(pt)?;
        let valid = match self.kind {
            LineKind::Segment => (0.0..=1.0).contains(&t),
            LineKind::Ray => t >= 0.0,
            LineKind::Infinite => true,
        };
        valid.then_some(t)
    }

    pub fn is_point_on_line(&self, pt: Point2D) -> bool {
        self.locate_point(pt).is_some()
    }

    pub fn is_point_on_infinite_line(&self, pt: Point2D) -> bool {
        self.parametric_value(pt).is_some()
    }

    pub fn is_parallel(&self, other: &Line2D) -> bool {
        self.dir.is_parallel(other.dir.normalize())
    }

    /// Parallel and sharing the same infinite extension
    pub fn is_coincident(&self, other: &Line2D) -> bool {
        self.is_parallel(other) && self.is_point_on_infinite_line(other.anchor)
    }

    pub fn intersect(&self, other: &Line2D) -> LineIntersection {
        intersect_lines(self, other)
    }
}
