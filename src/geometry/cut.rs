//! Splitting a convex polygon along an infinite line

use super::fp::{fp_greater, fp_less};
use super::line::Line2D;
use super::point::{Point2D, Vector2D};
use super::polygon::Polygon2D;

/// Side of a line a point lies on, looking along the line's direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSide {
    Left,
    Right,
    /// On the line, within tolerance
    Center,
}

/// Classify a point against the infinite extension of a line
pub fn side_of_line(line: &Line2D, pt: Point2D) -> LineSide {
    let pd = line.direction().perp_dot(Vector2D::between(line.anchor(), pt));
    if fp_less(pd, 0.0) {
        LineSide::Left
    } else if fp_greater(pd, 0.0) {
        LineSide::Right
    } else {
        LineSide::Center
    }
}

/// Cut a convex polygon by the infinite extension of a line
///
/// Returns at most two polygons, left side first. Vertices on the line
/// are shared by both halves. A polygon that only touches the line comes
/// back whole, as does a polygon lying entirely on the line. An empty input
/// yields a single empty polygon.
pub fn cut_convex_polygon(poly: &Polygon2D, line: &Line2D) -> Vec<Polygon2D> {
    let mut left = Polygon2D::new();
    let mut right = Polygon2D::new();
    let mut strictly_left = false;
    let mut strictly_right = false;

    let n = poly.vertex_count();
    let mut prev_side: Option<LineSide> = None;
    for i in 0..n {
        let pt = poly.vertex(i);
        let side = side_of_line(line, pt);

        // The crossing point goes in before the current vertex.
        if is_crossing(prev_side, side) {
            if let Some(isect) = crossing_point(line, poly.vertex(i - 1), pt) {
                left.add_vertex(isect);
                right.add_vertex(isect);
            }
        }

        match side {
            LineSide::Left => {
                left.add_vertex(pt);
                strictly_left = true;
            }
            LineSide::Right => {
                right.add_vertex(pt);
                strictly_right = true;
            }
            LineSide::Center => {
                left.add_vertex(pt);
                right.add_vertex(pt);
            }
        }
        prev_side = Some(side);
    }

    // Closing edge, only for proper polygons.
    if n > 2 {
        let first = poly.vertex(0);
        if is_crossing(prev_side, side_of_line(line, first)) {
            if let Some(isect) = crossing_point(line, poly.vertex(n - 1), first) {
                left.add_vertex(isect);
                right.add_vertex(isect);
            }
        }
    }

    if left.is_empty() && right.is_empty() {
        return vec![left];
    }
    if !strictly_left && !strictly_right {
        return vec![left];
    }
    let mut result = Vec::with_capacity(2);
    if !left.is_empty() && strictly_left {
        result.push(left);
    }
    if !right.is_empty() && strictly_right {
        result.push(right);
    }
    result
}

fn is_crossing(prev: Option<LineSide>, now: LineSide) -> bool {
    matches!(
        (prev, now),
        (Some(LineSide::Right), LineSide::Left) | (Some(LineSide::Left), LineSide::Right)
    )
}

fn crossing_point(line: &Line2D, from: Point2D, to: Point2D) -> Option<Point2D> {
    line.intersect(&Line2D::segment(from, to)).point()
}
