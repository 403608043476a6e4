//! Intersection of convex polygons
//!
//! O'Rourke, Chien, Olson and Naddor, "A new linear algorithm for
//! intersecting convex polygons" (1982). Both polygons are walked with one
//! cursor each. At every step the current edges are intersected and the
//! cursor whose edge lags behind the other is advanced, collecting the
//! vertices of whichever polygon is currently inside.
//!
//! Inputs with fewer than three vertices are handled as points and
//! segments. Non-convex inputs produce an empty polygon.

use super::fp::{fp_greater, fp_less, fp_less_equal};
use super::intersection::LineIntersection;
use super::line::Line2D;
use super::point::{Point2D, Vector2D};
use super::polygon::Polygon2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inside {
    P,
    Q,
    Unknown,
}

/// Cursor over the vertices of a ccw polygon
///
/// The current edge is the one ending in the current vertex.
struct Traversal<'a> {
    poly: &'a Polygon2D,
    idx: usize,
    edge: Line2D,
    flag: Inside,
}

impl<'a> Traversal<'a> {
    fn new(poly: &'a Polygon2D, start: usize, flag: Inside) -> Self {
        Self {
            poly,
            idx: start,
            edge: poly.edge(Self::edge_index(poly, start)),
            flag,
        }
    }

    fn edge_index(poly: &Polygon2D, idx: usize) -> usize {
        if idx != 0 {
            idx - 1
        } else {
            poly.edge_count() - 1
        }
    }

    fn point(&self) -> Point2D {
        self.poly.vertex(self.idx)
    }

    fn advance(&mut self) {
        self.idx = (self.idx + 1) % self.poly.vertex_count();
        self.edge = self.poly.edge(Self::edge_index(self.poly, self.idx));
    }

    fn collect_point_if_inside(&self, inside: Inside, out: &mut Polygon2D) {
        if inside == self.flag {
            out.add_unique_vertex(self.point());
        }
    }

    /// On the inner side of the current edge, the edge itself included
    fn has_on_inside(&self, pt: Point2D) -> bool {
        let start = self.edge.anchor();
        fp_less_equal(self.edge.direction().perp_dot(Vector2D::between(start, pt)), 0.0)
    }

    fn is_edge_ccw_or_collinear(&self, edge: &Line2D) -> bool {
        fp_less_equal(self.edge.direction().perp_dot(edge.direction()), 0.0)
    }
}

/// Intersect two convex polygons
///
/// Returns an empty polygon if they don't overlap or if either input is
/// not convex. A point or segment input yields the part of it inside the
/// other polygon.
pub fn intersect_convex_polygons(p_in: &Polygon2D, q_in: &Polygon2D) -> Polygon2D {
    if p_in.is_empty() || q_in.is_empty() {
        return Polygon2D::new();
    }
    if p_in.vertex_count() == 1 {
        return intersect_with_point(p_in.vertex(0), q_in);
    }
    if q_in.vertex_count() == 1 {
        return intersect_with_point(q_in.vertex(0), p_in);
    }
    if p_in.vertex_count() == 2 {
        return intersect_with_segment(&p_in.edge(0), q_in);
    }
    if q_in.vertex_count() == 2 {
        return intersect_with_segment(&q_in.edge(0), p_in);
    }
    if !p_in.is_convex() || !q_in.is_convex() {
        return Polygon2D::new();
    }

    let p_poly = make_ccw(p_in);
    let q_poly = make_ccw(q_in);
    let max_iter = 2 * (p_poly.edge_count() + q_poly.edge_count());

    let mut p = Traversal::new(&p_poly, 1, Inside::P);
    let mut q = Traversal::new(&q_poly, 1, Inside::Q);
    let mut inside = Inside::Unknown;
    let mut first: Option<(Point2D, usize)> = None;
    let mut result = Polygon2D::new();

    for iter in 0..=max_iter {
        // Collinear overlaps count as no intersection.
        if let LineIntersection::Point(pt) = p.edge.intersect(&q.edge) {
            match first {
                None => first = Some((pt, iter)),
                Some((first_pt, first_iter)) => {
                    if pt == first_pt && first_iter + 1 != iter {
                        return result;
                    }
                }
            }
            result.add_unique_vertex(pt);
            inside = if q.has_on_inside(p.point()) {
                Inside::P
            } else {
                Inside::Q
            };
        }

        let advance_q = if q.is_edge_ccw_or_collinear(&p.edge) {
            q.has_on_inside(p.point())
        } else {
            !p.has_on_inside(q.point())
        };
        if advance_q {
            q.collect_point_if_inside(inside, &mut result);
            q.advance();
        } else {
            p.collect_point_if_inside(inside, &mut result);
            p.advance();
        }
    }

    // No crossing edges: disjoint, or one polygon contains the other.
    if q_poly.contains_point(p.point()) {
        p_poly
    } else if p_poly.contains_point(q.point()) {
        q_poly
    } else {
        Polygon2D::new()
    }
}

fn intersect_with_point(pt: Point2D, poly: &Polygon2D) -> Polygon2D {
    if poly.contains_point(pt) {
        Polygon2D::from_point(pt)
    } else {
        Polygon2D::new()
    }
}

fn intersect_with_segment(segment: &Line2D, poly: &Polygon2D) -> Polygon2D {
    let mut result = Polygon2D::new();
    for i in 0..poly.edge_count() {
        match segment.intersect(&poly.edge(i)) {
            LineIntersection::Point(pt) => {
                result.add_unique_vertex(pt);
            }
            LineIntersection::Segment(overlap) => {
                result.add_unique_vertex(overlap.anchor());
                result.add_unique_vertex(overlap.point_at(1.0));
            }
            _ => {}
        }
    }

    // With two crossings neither end of the segment can be inside.
    if result.vertex_count() <= 1 {
        let found = result.vertices().first().copied();
        let start = segment.anchor();
        let end = segment.point_at(1.0);
        if found != Some(start) && poly.contains_point(start) && !result.has_vertex(start) {
            result.insert_vertex(0, start);
        }
        if found != Some(end) && poly.contains_point(end) {
            result.add_unique_vertex(end);
        }
    }
    result
}

/// The polygon itself if it already winds ccw, else its reverse
fn make_ccw(poly: &Polygon2D) -> Polygon2D {
    if is_ccw(poly) {
        poly.clone()
    } else {
        poly.reversed()
    }
}

// Convex, so the first proper turn decides the winding.
fn is_ccw(poly: &Polygon2D) -> bool {
    let n = poly.edge_count();
    (0..n)
        .map(|i| {
            poly.edge(i)
                .direction()
                .perp_dot(poly.edge((i + 1) % n).direction())
        })
        .find(|turn| fp_less(*turn, 0.0) || fp_greater(*turn, 0.0))
        .map_or(false, |turn| fp_less(turn, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rect::Rect2D;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn rect_poly(l: f64, t: f64, r: f64, b: f64) -> Polygon2D {
        Polygon2D::from_rect(&Rect2D::new(l, t, r, b))
    }

    fn same_vertex_set(a: &Polygon2D, b: &Polygon2D) -> bool {
        a.vertex_count() == b.vertex_count()
            && a.vertices().iter().all(|v| b.has_vertex(*v))
    }

    #[test]
    fn test_self_intersection_is_identity() {
        let sq = rect_poly(0.0, 0.0, 10.0, 10.0);
        let result = intersect_convex_polygons(&sq, &sq);
        assert!(same_vertex_set(&result, &sq));

        let tri = Polygon2D::from_vertices(vec![p(0.0, 0.0), p(10.0, 0.0), p(5.0, 8.0)]);
        let result = intersect_convex_polygons(&tri, &tri);
        assert!(same_vertex_set(&result, &tri));
    }

    #[test]
    fn test_overlapping_squares() {
        let a = rect_poly(0.0, 0.0, 10.0, 10.0);
        let b = rect_poly(5.0, 5.0, 15.0, 15.0);
        let result = intersect_convex_polygons(&a, &b);
        assert!(same_vertex_set(&result, &rect_poly(5.0, 5.0, 10.0, 10.0)));
        assert!((result.area() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_polygons() {
        let a = rect_poly(0.0, 0.0, 10.0, 10.0);
        let b = rect_poly(20.0, 20.0, 30.0, 30.0);
        assert!(intersect_convex_polygons(&a, &b).is_empty());
    }

    #[test]
    fn test_contained_polygon() {
        let outer = rect_poly(0.0, 0.0, 10.0, 10.0);
        let inner = rect_poly(2.0, 2.0, 4.0, 4.0);
        let result = intersect_convex_polygons(&outer, &inner);
        assert!(same_vertex_set(&result, &inner));
        let result = intersect_convex_polygons(&inner, &outer);
        assert!(same_vertex_set(&result, &inner));
    }

    #[test]
    fn test_point_input() {
        let sq = rect_poly(0.0, 0.0, 10.0, 10.0);
        let inside = Polygon2D::from_point(p(3.0, 3.0));
        assert_eq!(intersect_convex_polygons(&inside, &sq).vertices(), &[p(3.0, 3.0)]);
        let outside = Polygon2D::from_point(p(13.0, 3.0));
        assert!(intersect_convex_polygons(&sq, &outside).is_empty());
    }

    #[test]
    fn test_segment_input() {
        let sq = rect_poly(0.0, 0.0, 10.0, 10.0);
        let crossing = Polygon2D::from_vertices(vec![p(-5.0, 5.0), p(15.0, 5.0)]);
        let result = intersect_convex_polygons(&crossing, &sq);
        assert_eq!(result.vertex_count(), 2);
        assert!(result.has_vertex(p(0.0, 5.0)));
        assert!(result.has_vertex(p(10.0, 5.0)));

        let half_in = Polygon2D::from_vertices(vec![p(5.0, 5.0), p(15.0, 5.0)]);
        let result = intersect_convex_polygons(&sq, &half_in);
        assert_eq!(result.vertices(), &[p(5.0, 5.0), p(10.0, 5.0)]);

        let fully_in = Polygon2D::from_vertices(vec![p(2.0, 2.0), p(8.0, 8.0)]);
        let result = intersect_convex_polygons(&fully_in, &sq);
        assert_eq!(result.vertices(), &[p(2.0, 2.0), p(8.0, 8.0)]);
    }

    #[test]
    fn test_non_convex_input() {
        let dart = Polygon2D::from_vertices(vec![p(0.0, 0.0), p(5.0, 2.0), p(10.0, 0.0), p(5.0, 10.0)]);
        let sq = rect_poly(0.0, 0.0, 10.0, 10.0);
        assert!(intersect_convex_polygons(&dart, &sq).is_empty());
    }

    #[test]
    fn test_triangle_clipped_by_square() {
        let tri = Polygon2D::from_vertices(vec![p(-10.0, 5.0), p(20.0, -5.0), p(20.0, 15.0)]);
        let sq = rect_poly(0.0, 0.0, 10.0, 10.0);
        let result = intersect_convex_polygons(&tri, &sq);
        assert!(result.is_convex());
        assert!(result.vertex_count() >= 4);
        for v in result.vertices() {
            assert!(sq.contains_point(*v));
            assert!(tri.contains_point(*v));
        }
    }
}
