//! Circles and rings

use super::fp::{fp_equal, fp_less, fp_less_equal};
use super::point::{Point2D, Vector2D};
use super::rect::Rect2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle2D {
    pub center: Point2D,
    pub radius: f64,
}

impl Circle2D {
    pub fn new(center: Point2D, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn is_point(&self) -> bool {
        fp_equal(self.radius, 0.0)
    }

    pub fn bounds(&self) -> Rect2D {
        Rect2D::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn offset(&self, v: Vector2D) -> Self {
        Self::new(self.center.offset(v), self.radius)
    }

    /// Inside or on the circle
    pub fn contains_point(&self, pt: Point2D) -> bool {
        fp_less_equal(pt.distance_squared(self.center), self.radius * self.radius)
    }

    pub fn is_point_on(&self, pt: Point2D) -> bool {
        fp_equal(pt.distance_squared(self.center), self.radius * self.radius)
    }

    /// Strictly inside, the circle itself excluded
    pub fn is_point_inside(&self, pt: Point2D) -> bool {
        fp_less(pt.distance_squared(self.center), self.radius * self.radius)
    }

    /// Point on the circumference; zero is 3 o'clock, growing angles run
    /// in the direction of positive y
    pub fn point_at_radian(&self, angle: f64) -> Point2D {
        Point2D::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// Area between two concentric circles
///
/// The outer circle belongs to the ring, the inner circle does too, but the
/// disk strictly inside the inner circle does not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring2D {
    inner: Circle2D,
    outer: Circle2D,
}

impl Ring2D {
    /// The radii may be given in either order
    pub fn new(center: Point2D, inner_radius: f64, outer_radius: f64) -> Self {
        let (inner_radius, outer_radius) = if outer_radius >= inner_radius {
            (inner_radius, outer_radius)
        } else {
            (outer_radius, inner_radius)
        };
        Self {
            inner: Circle2D::new(center, inner_radius),
            outer: Circle2D::new(center, outer_radius),
        }
    }

    pub fn center(&self) -> Point2D {
        self.inner.center
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner.radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer.radius
    }

    pub fn bounds(&self) -> Rect2D {
        self.outer.bounds()
    }

    pub fn offset(&self, v: Vector2D) -> Self {
        Self::new(self.center().offset(v), self.inner.radius, self.outer.radius)
    }

    pub fn contains_point(&self, pt: Point2D) -> bool {
        self.outer.contains_point(pt) && !self.inner.is_point_inside(pt)
    }
}
