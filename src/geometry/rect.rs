//! Axis-aligned rectangles

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fp::{fp_equal, fp_greater_equal, fp_less_equal};
use super::point::Point2D;

/// Axis-aligned rectangle in screen orientation
///
/// Always normalized so that `left <= right` and `top <= bottom`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Rect2D {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Rect2D {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let mut rect = Self {
            left,
            top,
            right,
            bottom,
        };
        rect.normalize();
        rect
    }

    /// Rectangle spanned by two opposite corners
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Smallest rectangle containing all points; zero rect for no points
    pub fn bounding_box<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        iter.fold(Self::from_corners(*first, *first), |mut rect, pt| {
            rect.left = rect.left.min(pt.x);
            rect.right = rect.right.max(pt.x);
            rect.top = rect.top.min(pt.y);
            rect.bottom = rect.bottom.max(pt.y);
            rect
        })
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn set_left(&mut self, val: f64) {
        self.left = val;
        self.normalize();
    }

    pub fn set_top(&mut self, val: f64) {
        self.top = val;
        self.normalize();
    }

    pub fn set_right(&mut self, val: f64) {
        self.right = val;
        self.normalize();
    }

    pub fn set_bottom(&mut self, val: f64) {
        self.bottom = val;
        self.normalize();
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn left_top(&self) -> Point2D {
        Point2D::new(self.left, self.top)
    }

    pub fn right_top(&self) -> Point2D {
        Point2D::new(self.right, self.top)
    }

    pub fn left_bottom(&self) -> Point2D {
        Point2D::new(self.left, self.bottom)
    }

    pub fn right_bottom(&self) -> Point2D {
        Point2D::new(self.right, self.bottom)
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Zero width or zero height
    pub fn is_degenerate(&self) -> bool {
        fp_equal(self.left, self.right) || fp_equal(self.top, self.bottom)
    }

    /// Grow by `by` on every side
    pub fn inflate(&mut self, by: f64) {
        self.left -= by;
        self.right += by;
        self.top -= by;
        self.bottom += by;
        self.normalize();
    }

    /// Copy grown by `by` on every side
    pub fn inflated(mut self, by: f64) -> Self {
        self.inflate(by);
        self
    }

    /// Point inside or on the rectangle
    pub fn contains_point(&self, pt: Point2D) -> bool {
        fp_greater_equal(pt.x, self.left)
            && fp_less_equal(pt.x, self.right)
            && fp_greater_equal(pt.y, self.top)
            && fp_less_equal(pt.y, self.bottom)
    }

    /// Overlapping region; the zero rectangle if the two are disjoint
    pub fn intersect(&self, other: &Rect2D) -> Rect2D {
        if self.left > other.right
            || other.left > self.right
            || self.top > other.bottom
            || other.top > self.bottom
        {
            return Rect2D::default();
        }
        Rect2D::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    fn normalize(&mut self) {
        if self.left > self.right {
            std::mem::swap(&mut self.left, &mut self.right);
        }
        if self.top > self.bottom {
            std::mem::swap(&mut self.top, &mut self.bottom);
        }
    }
}

impl PartialEq for Rect2D {
    fn eq(&self, other: &Self) -> bool {
        fp_equal(self.left, other.left)
            && fp_equal(self.top, other.top)
            && fp_equal(self.right, other.right)
            && fp_equal(self.bottom, other.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_on_construction() {
        let r = Rect2D::new(10.0, 20.0, 0.0, 5.0);
        assert_eq!(r.left(), 0.0);
        assert_eq!(r.right(), 10.0);
        assert_eq!(r.top(), 5.0);
        assert_eq!(r.bottom(), 20.0);
    }

    #[test]
    fn test_setters_renormalize() {
        let mut r = Rect2D::new(0.0, 0.0, 10.0, 10.0);
        r.set_left(20.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 20.0);
        r.set_bottom(-5.0);
        assert_eq!(r.top(), -5.0);
        assert_eq!(r.bottom(), 0.0);
    }

    #[test]
    fn test_corners_and_center() {
        let r = Rect2D::new(0.0, 0.0, 4.0, 2.0);
        assert_eq!(r.left_top(), Point2D::new(0.0, 0.0));
        assert_eq!(r.right_bottom(), Point2D::new(4.0, 2.0));
        assert_eq!(r.center(), Point2D::new(2.0, 1.0));
        assert!((r.width() - 4.0).abs() < 1e-12);
        assert!((r.height() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_contains_point_includes_boundary() {
        let r = Rect2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Point2D::new(0.0, 5.0)));
        assert!(r.contains_point(Point2D::new(10.0 + 5e-8, 10.0)));
        assert!(!r.contains_point(Point2D::new(10.1, 5.0)));
    }

    #[test]
    fn test_intersect() {
        let a = Rect2D::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect2D::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersect(&b), Rect2D::new(5.0, 5.0, 10.0, 10.0));

        let c = Rect2D::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.intersect(&c), Rect2D::default());
    }

    #[test]
    fn test_bounding_box() {
        let pts = [
            Point2D::new(3.0, -1.0),
            Point2D::new(-2.0, 4.0),
            Point2D::new(0.0, 0.0),
        ];
        assert_eq!(Rect2D::bounding_box(&pts), Rect2D::new(-2.0, -1.0, 3.0, 4.0));
        assert_eq!(Rect2D::bounding_box(&Vec::<Point2D>::new()), Rect2D::default());
    }

    #[test]
    fn test_degenerate_and_inflate() {
        let mut r = Rect2D::new(0.0, 0.0, 10.0, 0.0);
        assert!(r.is_degenerate());
        r.inflate(1.0);
        assert!(!r.is_degenerate());
        assert_eq!(r, Rect2D::new(-1.0, -1.0, 11.0, 1.0));
    }
}
