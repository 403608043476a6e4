//! Delaunay triangulation via Bowyer-Watson
//!
//! Points are inserted one at a time into a triangulation seeded with a
//! triangle that encloses all of them. Every triangle whose circumcircle
//! contains the new point is removed, and the hole is re-triangulated by
//! connecting the point to the boundary edges of the hole.
//!
//! Points are processed in ascending x order. A triangle whose
//! circumcircle lies entirely left of the current point can never be hit
//! again and moves to a settled list, which keeps the active list short.
//!
//! # References
//!
//! - [Paul Bourke, Triangulate](http://paulbourke.net/papers/triangulate/)

use std::time::Instant;

use tracing::{debug, warn};

use crate::error::GeometryError;
use crate::geometry::fp::{fp_greater, fp_less_equal};
use crate::geometry::{Circle2D, Line2D, Point2D, Rect2D, Triangle2D};

/// Scale of the enclosing triangle relative to the samples' extent
const SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Triangle annotated with data the triangulation queries repeatedly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayTriangle {
    triangle: Triangle2D,
    circumcircle: Circle2D,
    bounds: Rect2D,
    radius_squared: f64,
}

impl DelaunayTriangle {
    /// Wrap a triangle, computing its circumcircle
    ///
    /// Fails for triangles collapsed into a line, which have no circumcircle,
    /// and when the circumcenter cannot be computed.
    pub fn new(triangle: Triangle2D) -> Result<Self, GeometryError> {
        let circumcircle = triangle
            .circumcircle()?
            .ok_or_else(|| GeometryError::DegenerateTriangle(triangle.to_string()))?;
        Ok(Self {
            triangle,
            circumcircle,
            bounds: Rect2D::bounding_box(triangle.vertices()),
            radius_squared: circumcircle.radius * circumcircle.radius,
        })
    }

    #[inline]
    pub fn triangle(&self) -> &Triangle2D {
        &self.triangle
    }

    #[inline]
    pub fn vertex(&self, idx: usize) -> Point2D {
        self.triangle.vertex(idx)
    }

    /// Index of the vertex equal to `pt`
    pub fn find_vertex(&self, pt: Point2D) -> Option<usize> {
        if !self.bounds.contains_point(pt) {
            return None;
        }
        self.triangle.vertices().iter().position(|v| *v == pt)
    }

    pub fn edge(&self, idx: usize) -> Line2D {
        self.triangle.edge(idx)
    }

    /// Inside or on the circumcircle
    pub fn is_point_in_circumcircle(&self, pt: Point2D) -> bool {
        fp_less_equal(pt.distance_squared(self.circumcircle.center), self.radius_squared)
    }

    #[inline]
    pub fn circumcenter(&self) -> Point2D {
        self.circumcircle.center
    }

    #[inline]
    pub fn circumradius(&self) -> f64 {
        self.circumcircle.radius
    }

    pub fn circumcircle(&self) -> Circle2D {
        self.circumcircle
    }

    // The circumcircle lies entirely left of `pt`.
    fn has_settled(&self, pt: Point2D) -> bool {
        fp_greater(pt.x - self.circumcircle.center.x, self.circumcircle.radius)
    }
}

/// Result of a Delaunay triangulation
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    triangles: Vec<DelaunayTriangle>,
}

impl Triangulation {
    pub fn triangles(&self) -> &[DelaunayTriangle] {
        &self.triangles
    }

    /// Plain triangles without the cached circumcircles
    pub fn plain_triangles(&self) -> Vec<Triangle2D> {
        self.triangles.iter().map(|t| t.triangle).collect()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Triangulate a set of distinct points
///
/// Fewer than three points, or points whose bounding box is degenerate,
/// produce an empty triangulation. If a circumcircle can't be computed
/// along the way the whole run is discarded and the error is returned; no
/// partial triangulation is ever observable.
pub fn triangulate(samples: &[Point2D]) -> Result<Triangulation, GeometryError> {
    let start = Instant::now();
    let Some(super_triangle) = enclosing_triangle(samples) else {
        return Ok(Triangulation::default());
    };

    let result = run_bowyer_watson(samples, &super_triangle);
    match &result {
        Ok(t) => debug!(
            "Delaunay triangulation: {} samples -> {} triangles in {:.2?}",
            samples.len(),
            t.len(),
            start.elapsed()
        ),
        Err(e) => warn!("Delaunay triangulation aborted: {}", e),
    }
    result
}

fn run_bowyer_watson(
    samples: &[Point2D],
    super_triangle: &Triangle2D,
) -> Result<Triangulation, GeometryError> {
    let mut points: Vec<Point2D> = samples.to_vec();
    points.extend_from_slice(super_triangle.vertices());
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut active = vec![DelaunayTriangle::new(*super_triangle)?];
    let mut settled: Vec<DelaunayTriangle> = Vec::new();
    let mut edges: Vec<(Point2D, Point2D)> = Vec::new();

    for &pt in &points {
        edges.clear();
        collect_hole_edges(pt, &mut active, &mut settled, &mut edges);
        remove_shared_edges(&mut edges);
        for &(a, b) in &edges {
            let t = Triangle2D::new(pt, a, b);
            if !t.is_degenerate() {
                active.push(DelaunayTriangle::new(t)?);
            }
        }
    }
    settled.append(&mut active);

    settled.retain(|t| {
        !t.triangle
            .vertices()
            .iter()
            .any(|v| super_triangle.has_vertex(*v))
    });
    Ok(Triangulation { triangles: settled })
}

/// Remove every active triangle whose circumcircle contains `pt`,
/// collecting its edges, and retire triangles left behind by the sweep
fn collect_hole_edges(
    pt: Point2D,
    active: &mut Vec<DelaunayTriangle>,
    settled: &mut Vec<DelaunayTriangle>,
    edges: &mut Vec<(Point2D, Point2D)>,
) {
    let mut i = 0;
    while i < active.len() {
        let t = active[i];
        if t.has_settled(pt) {
            settled.push(active.remove(i));
        } else if t.is_point_in_circumcircle(pt) {
            for j in 0..3 {
                edges.push((t.vertex(j), t.vertex((j + 1) % 3)));
            }
            active.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Drop every edge that occurs more than once, all copies included
fn remove_shared_edges(edges: &mut Vec<(Point2D, Point2D)>) {
    let mut shared = vec![false; edges.len()];
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            if is_same_edge(edges[i], edges[j]) {
                shared[i] = true;
                shared[j] = true;
            }
        }
    }
    let mut flags = shared.into_iter();
    edges.retain(|_| !flags.next().unwrap_or(false));
}

fn is_same_edge(a: (Point2D, Point2D), b: (Point2D, Point2D)) -> bool {
    (a.0 == b.0 && a.1 == b.1) || (a.0 == b.1 && a.1 == b.0)
}

/// Triangle strictly containing all points; `None` for a degenerate extent
fn enclosing_triangle(points: &[Point2D]) -> Option<Triangle2D> {
    let bounds = Rect2D::bounding_box(points);
    if bounds.is_degenerate() {
        return None;
    }
    let dim = bounds.width().max(bounds.height());
    let c = bounds.center();
    let s = SUPER_TRIANGLE_SCALE;
    Some(Triangle2D::new(
        Point2D::new(c.x - s * dim, c.y - dim),
        Point2D::new(c.x, c.y + s * dim),
        Point2D::new(c.x + s * dim, c.y - dim),
    ))
}

/// No vertex lies strictly inside any triangle's circumcircle
///
/// Triangles without a circumcircle are skipped.
pub fn is_delaunay_condition_satisfied(triangles: &[Triangle2D]) -> bool {
    triangles.iter().all(|t| {
        let Ok(Some(circle)) = t.circumcircle() else {
            return true;
        };
        triangles
            .iter()
            .flat_map(|other| other.vertices().iter())
            .all(|v| !circle.is_point_inside(*v))
    })
}
