//! Intersection of any two lines
//!
//! The result is tagged with the shape of the overlap. Skew lines can only
//! meet in a point; coincident lines can share a point, a segment, a ray or
//! the whole infinite line.

use super::fp::{fp_equal, fp_greater, fp_less};
use super::line::{Line2D, LineKind};
use super::point::{Point2D, Vector2D};

/// Shape of a line intersection without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionKind {
    None,
    Point,
    Segment,
    Ray,
    InfiniteLine,
}

/// Result of intersecting two lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection {
    None,
    Point(Point2D),
    Segment(Line2D),
    Ray(Line2D),
    InfiniteLine(Line2D),
}

impl LineIntersection {
    pub fn kind(&self) -> IntersectionKind {
        match self {
            LineIntersection::None => IntersectionKind::None,
            LineIntersection::Point(_) => IntersectionKind::Point,
            LineIntersection::Segment(_) => IntersectionKind::Segment,
            LineIntersection::Ray(_) => IntersectionKind::Ray,
            LineIntersection::InfiniteLine(_) => IntersectionKind::InfiniteLine,
        }
    }

    /// The intersection point, if the lines met in exactly one point
    pub fn point(&self) -> Option<Point2D> {
        match self {
            LineIntersection::Point(pt) => Some(*pt),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, LineIntersection::None)
    }
}

/// Closed interval of parametric values, normalized so that `a <= b`
#[derive(Debug, Clone, Copy)]
struct Interval {
    a: f64,
    b: f64,
}

impl Interval {
    fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    fn intersect(self, other: Interval) -> Option<Interval> {
        let (first, second) = if self.a <= other.a {
            (self, other)
        } else {
            (other, self)
        };
        if first.b < second.a {
            None
        } else if first.b >= second.b {
            Some(second)
        } else {
            Some(Interval::new(second.a, first.b))
        }
    }
}

/// Intersect two lines of any kind
pub fn intersect_lines(a: &Line2D, b: &Line2D) -> LineIntersection {
    if a.is_point() {
        return intersect_point_line(a.anchor(), b);
    }
    if b.is_point() {
        return intersect_point_line(b.anchor(), a);
    }
    if a.is_coincident(b) {
        return intersect_coincident_lines(a, b);
    }
    if a.is_parallel(b) {
        return LineIntersection::None;
    }
    intersect_skew_lines(a, b)
}

fn intersect_point_line(pt: Point2D, line: &Line2D) -> LineIntersection {
    if line.is_point_on_line(pt) {
        LineIntersection::Point(pt)
    } else {
        LineIntersection::None
    }
}

// Both lines are expressed as intervals in the parameter space of `a`.
fn intersect_coincident_lines(a: &Line2D, b: &Line2D) -> LineIntersection {
    let a_ival = Interval::new(
        if a.has_start_point() { 0.0 } else { f64::NEG_INFINITY },
        if a.has_end_point() { 1.0 } else { f64::INFINITY },
    );

    let same_dir = b.direction().has_same_direction(a.direction());
    let unbounded_start = if same_dir { f64::NEG_INFINITY } else { f64::INFINITY };
    let unbounded_end = -unbounded_start;
    let begin = b
        .start_point()
        .and_then(|pt| a.parametric_value(pt))
        .unwrap_or(unbounded_start);
    let end = b
        .end_point()
        .and_then(|pt| a.parametric_value(pt))
        .unwrap_or(unbounded_end);
    let b_ival = Interval::new(begin, end);

    let Some(overlap) = a_ival.intersect(b_ival) else {
        return LineIntersection::None;
    };

    let open_start = overlap.a == f64::NEG_INFINITY;
    let open_end = overlap.b == f64::INFINITY;
    match (open_start, open_end) {
        (false, false) => {
            if fp_equal(overlap.a, overlap.b) {
                LineIntersection::Point(a.point_at(overlap.a))
            } else {
                LineIntersection::Segment(Line2D::segment(
                    a.point_at(overlap.a),
                    a.point_at(overlap.b),
                ))
            }
        }
        (true, false) => LineIntersection::Ray(Line2D::ray(a.point_at(overlap.b), -a.direction())),
        (false, true) => LineIntersection::Ray(Line2D::ray(a.point_at(overlap.a), a.direction())),
        (true, true) => LineIntersection::InfiniteLine(Line2D::infinite(a.anchor(), a.direction())),
    }
}

fn intersect_skew_lines(a: &Line2D, b: &Line2D) -> LineIntersection {
    let u = a.direction();
    let v = b.direction();
    let w = Vector2D::between(b.anchor(), a.anchor());

    // Denominators are non-zero for non-parallel lines.
    let t_a = (v.y * w.x - v.x * w.y) / v.perp_dot(u);
    let t_b = u.perp_dot(w) / u.perp_dot(v);

    if is_parameter_in_range(t_a, a.kind()) && is_parameter_in_range(t_b, b.kind()) {
        LineIntersection::Point(a.point_at(t_a))
    } else {
        LineIntersection::None
    }
}

fn is_parameter_in_range(t: f64, kind: LineKind) -> bool {
    match kind {
        LineKind::Segment => !fp_less(t, 0.0) && !fp_greater(t, 1.0),
        LineKind::Ray => !fp_less(t, 0.0),
        LineKind::Infinite => true,
    }
}
