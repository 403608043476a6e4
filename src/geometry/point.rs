//! Points, vectors and orientation conventions
//!
//! Both types compare with the global tolerance from [`super::fp`]. Because
//! that equality is not transitive they implement `PartialEq` only, never
//! `Eq` or `Hash`. Use [`crate::geometry::PointLookup`] to key data by position.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fp::{fp_equal, fp_greater, fp_less};

/// Orientation of the y axis
///
/// Winding predicates depend on whether y grows downward (screen) or upward
/// (cartesian). The crate's own algorithms always use [`CoordSystem::Screen`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordSystem {
    /// y grows downward
    #[default]
    Screen,
    /// y grows upward
    Cartesian,
}

/// Position in the plane
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point translated by a vector
    #[inline]
    pub fn offset(self, v: Vector2D) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }

    /// Point with both coordinates multiplied by a factor
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn distance(self, other: Point2D) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    #[inline]
    pub fn distance_squared(self, other: Point2D) -> f64 {
        self.as_dvec2().distance_squared(other.as_dvec2())
    }

    /// Point halfway between two points
    #[inline]
    pub fn midpoint(self, other: Point2D) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Tolerant lexicographic order: x first, then y
    pub fn cmp_xy(&self, other: &Point2D) -> Ordering {
        match cmp_tolerant(self.x, other.x) {
            Ordering::Equal => cmp_tolerant(self.y, other.y),
            ord => ord,
        }
    }

    /// Tolerant order on x only
    pub fn cmp_x(&self, other: &Point2D) -> Ordering {
        cmp_tolerant(self.x, other.x)
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

fn cmp_tolerant(a: f64, b: f64) -> Ordering {
    if fp_less(a, b) {
        Ordering::Less
    } else if fp_greater(a, b) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl PartialEq for Point2D {
    fn eq(&self, other: &Self) -> bool {
        fp_equal(self.x, other.x) && fp_equal(self.y, other.y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<DVec2> for Point2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2D> for DVec2 {
    fn from(p: Point2D) -> Self {
        p.as_dvec2()
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Point2D;

    fn add(self, v: Vector2D) -> Point2D {
        self.offset(v)
    }
}

impl Sub for Point2D {
    type Output = Vector2D;

    /// Vector pointing from `rhs` to `self`
    fn sub(self, rhs: Point2D) -> Vector2D {
        Vector2D::between(rhs, self)
    }
}

/// Displacement in the plane
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `from` to `to`
    #[inline]
    pub fn between(from: Point2D, to: Point2D) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.as_dvec2().length()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.as_dvec2().length_squared()
    }

    #[inline]
    pub fn dot(self, other: Vector2D) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// 2D cross product `self.x * other.y - self.y * other.x`
    #[inline]
    pub fn perp_dot(self, other: Vector2D) -> f64 {
        self.as_dvec2().perp_dot(other.as_dvec2())
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector with the same direction; a zero vector stays zero
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Exactly zero length
    #[inline]
    pub fn is_zero(self) -> bool {
        self.length_squared() == 0.0
    }

    pub fn is_parallel(self, other: Vector2D) -> bool {
        fp_equal(self.perp_dot(other), 0.0)
    }

    pub fn is_perpendicular(self, other: Vector2D) -> bool {
        fp_equal(self.dot(other), 0.0)
    }

    /// Parallel and pointing the same way
    pub fn has_same_direction(self, other: Vector2D) -> bool {
        self.is_parallel(other) && fp_greater(self.dot(other), 0.0)
    }

    pub fn has_acute_angle(self, other: Vector2D) -> bool {
        fp_greater(self.dot(other), 0.0)
    }

    pub fn has_obtuse_angle(self, other: Vector2D) -> bool {
        fp_less(self.dot(other), 0.0)
    }

    /// Turning from `self` to `other` is counter-clockwise in screen coordinates
    pub fn is_ccw(self, other: Vector2D) -> bool {
        self.is_ccw_in(other, CoordSystem::Screen)
    }

    pub fn is_ccw_in(self, other: Vector2D, system: CoordSystem) -> bool {
        let pd = self.perp_dot(other);
        match system {
            CoordSystem::Screen => fp_less(pd, 0.0),
            CoordSystem::Cartesian => fp_greater(pd, 0.0),
        }
    }

    /// Turning from `self` to `other` is clockwise in screen coordinates
    pub fn is_cw(self, other: Vector2D) -> bool {
        self.is_cw_in(other, CoordSystem::Screen)
    }

    pub fn is_cw_in(self, other: Vector2D, system: CoordSystem) -> bool {
        let pd = self.perp_dot(other);
        match system {
            CoordSystem::Screen => fp_greater(pd, 0.0),
            CoordSystem::Cartesian => fp_less(pd, 0.0),
        }
    }

    /// Normal rotated clockwise in screen coordinates
    pub fn cw_normal(self) -> Self {
        self.cw_normal_in(CoordSystem::Screen)
    }

    pub fn cw_normal_in(self, system: CoordSystem) -> Self {
        match system {
            CoordSystem::Screen => Self::new(-self.y, self.x),
            CoordSystem::Cartesian => Self::new(self.y, -self.x),
        }
    }

    /// Normal rotated counter-clockwise in screen coordinates
    pub fn ccw_normal(self) -> Self {
        self.ccw_normal_in(CoordSystem::Screen)
    }

    pub fn ccw_normal_in(self, system: CoordSystem) -> Self {
        match system {
            CoordSystem::Screen => Self::new(self.y, -self.x),
            CoordSystem::Cartesian => Self::new(-self.y, self.x),
        }
    }
}

impl PartialEq for Vector2D {
    fn eq(&self, other: &Self) -> bool {
        fp_equal(self.x, other.x) && fp_equal(self.y, other.y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, factor: f64) -> Vector2D {
        self.scale(factor)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Self::new(-self.x, -self.y)
    }
}
