//! Voronoi tessellation as the dual of a Delaunay triangulation
//!
//! Each Delaunay edge maps to a Voronoi edge: the segment between the
//! circumcenters of its two triangles, or a ray leaving the single
//! circumcenter of a hull edge. The Voronoi edges around a sample are
//! chained into a polygon and clipped to the border rectangle.

use std::time::Instant;

use tracing::debug;

use crate::error::GeometryError;
use crate::generation::delaunay::{triangulate, DelaunayTriangle, Triangulation};
use crate::geometry::fp::{cyclic_next, cyclic_prev};
use crate::geometry::{
    cut_convex_polygon, intersect_convex_polygons, Line2D, LineIntersection, Point2D,
    PointLookup, Polygon2D, Rect2D, Vector2D,
};

/// Minimum distance at which open cells are closed off
const FAR_DISTANCE: f64 = 100_000.0;

/// A sample together with the region of the plane closest to it
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiTile {
    pub seed: Point2D,
    pub outline: Polygon2D,
}

/// Tiles of a tessellation, ordered by seed position (x, then y)
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    tiles: Vec<VoronoiTile>,
    triangulation: Triangulation,
    border: Rect2D,
}

impl Tessellation {
    pub fn tiles(&self) -> &[VoronoiTile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<VoronoiTile> {
        self.tiles
    }

    /// Triangulation the tiles were built from; empty below three samples
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn border(&self) -> Rect2D {
        self.border
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Tessellate samples inside their own bounding box grown by `offset`
pub fn tessellate_with_offset(
    samples: &[Point2D],
    offset: f64,
) -> Result<Tessellation, GeometryError> {
    let border = Rect2D::bounding_box(samples).inflated(offset);
    tessellate(samples, border)
}

/// Tessellate distinct samples, clipping every tile to `border`
///
/// # Arguments
///
/// * `samples` - Tile seeds; duplicates are not allowed
/// * `border` - Rectangle all tiles are clipped to
///
/// # Returns
///
/// One tile per sample that ends up in the triangulation. A single sample
/// owns the whole border, two samples split it along their bisector. Three
/// or more collinear samples have no triangulation and produce no tiles.
pub fn tessellate(samples: &[Point2D], border: Rect2D) -> Result<Tessellation, GeometryError> {
    let start = Instant::now();
    let mut tessellation = Tessellation {
        tiles: Vec::new(),
        triangulation: Triangulation::default(),
        border,
    };

    match samples {
        [] => {}
        [seed] => tessellation.tiles.push(VoronoiTile {
            seed: *seed,
            outline: border_polygon(&border, *seed),
        }),
        [a, b] => tessellation.tiles = split_border(*a, *b, &border),
        _ => {
            let triangulation = triangulate(samples)?;
            tessellation.tiles = build_tiles(&triangulation, &border);
            tessellation.triangulation = triangulation;
        }
    }

    debug!(
        "Voronoi tessellation: {} tiles from {} samples in {:.2?}",
        tessellation.tiles.len(),
        samples.len(),
        start.elapsed()
    );
    Ok(tessellation)
}

/// Whole border as a polygon, or a point polygon at `at` for a border
/// without area
fn border_polygon(border: &Rect2D, at: Point2D) -> Polygon2D {
    if border.is_degenerate() {
        Polygon2D::from_point(at)
    } else {
        Polygon2D::from_rect(border)
    }
}

// ============================================================================
// TWO SAMPLES
// ============================================================================

fn split_border(a: Point2D, b: Point2D, border: &Rect2D) -> Vec<VoronoiTile> {
    let bisector = Line2D::infinite(a.midpoint(b), Vector2D::between(a, b).ccw_normal());
    let mut pieces = cut_convex_polygon(&Polygon2D::from_rect(border), &bisector);
    if pieces.len() != 2 {
        return Vec::new();
    }

    let (first, second) = (pieces.remove(0), pieces.remove(0));
    let (outline_a, outline_b) = if is_on_same_side(a, &first, &bisector) {
        (first, second)
    } else {
        (second, first)
    };
    vec![
        VoronoiTile { seed: a, outline: outline_a },
        VoronoiTile { seed: b, outline: outline_b },
    ]
}

// Vertices on the line itself are ignored.
fn is_on_same_side(pt: Point2D, poly: &Polygon2D, line: &Line2D) -> bool {
    let side_of = |p: Point2D| line.direction().is_ccw(Vector2D::between(line.anchor(), p));
    let pt_side = side_of(pt);
    poly.vertices()
        .iter()
        .filter(|v| !line.is_point_on_infinite_line(**v))
        .all(|v| side_of(*v) == pt_side)
}

// ============================================================================
// DELAUNAY EDGES
// ============================================================================

/// Delaunay edge and the (up to two) triangles sharing it
#[derive(Debug, Clone, Copy)]
struct DelaunayEdge {
    start: Point2D,
    end: Point2D,
    first: usize,
    second: Option<usize>,
}

impl DelaunayEdge {
    fn connects(&self, a: Point2D, b: Point2D) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Dual edge, `None` if both circumcenters coincide
    fn voronoi_edge(&self, triangles: &[DelaunayTriangle]) -> Option<Line2D> {
        let center = triangles[self.first].circumcenter();
        match self.second {
            Some(other) => {
                let other_center = triangles[other].circumcenter();
                (center != other_center).then(|| Line2D::segment(center, other_center))
            }
            // Triangles are counter-clockwise, so the clockwise normal of a
            // hull edge points away from the hull.
            None => Some(Line2D::ray(
                center,
                Vector2D::between(self.start, self.end).cw_normal(),
            )),
        }
    }
}

fn add_edge(edges: &mut Vec<DelaunayEdge>, start: Point2D, end: Point2D, triangle: usize) {
    match edges.iter_mut().find(|e| e.connects(start, end)) {
        Some(edge) => {
            if edge.first != triangle && edge.second.is_none() {
                edge.second = Some(triangle);
            }
        }
        None => edges.push(DelaunayEdge {
            start,
            end,
            first: triangle,
            second: None,
        }),
    }
}

/// Delaunay edges incident to each vertex, ordered by vertex position
fn collect_delaunay_edges(triangles: &[DelaunayTriangle]) -> Vec<(Point2D, Vec<DelaunayEdge>)> {
    let mut lookup: PointLookup<Vec<DelaunayEdge>> = PointLookup::new();
    for (t_idx, triangle) in triangles.iter().enumerate() {
        for i in 0..3 {
            let vertex = triangle.vertex(i);
            let prev = triangle.vertex(cyclic_prev(i, 3));
            let next = triangle.vertex(cyclic_next(i, 3));
            let edges = lookup.get_or_insert_with(vertex, Vec::new);
            add_edge(edges, prev, vertex, t_idx);
            add_edge(edges, vertex, next, t_idx);
        }
    }

    let mut entries = lookup.into_entries();
    entries.sort_by(|(a, _), (b, _)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    entries
}

fn build_tiles(triangulation: &Triangulation, border: &Rect2D) -> Vec<VoronoiTile> {
    let triangles = triangulation.triangles();
    let clip = border_polygon(border, border.left_top());
    let far = FAR_DISTANCE.max(100.0 * (border.width() + border.height()));

    collect_delaunay_edges(triangles)
        .into_iter()
        .filter_map(|(seed, edges)| {
            let voronoi_edges = edges
                .iter()
                .filter_map(|e| e.voronoi_edge(triangles))
                .collect();
            let outline = PolygonBuilder::new(voronoi_edges, far).build(&clip);
            (!outline.is_empty()).then_some(VoronoiTile { seed, outline })
        })
        .collect()
}

// ============================================================================
// POLYGON BUILDER
// ============================================================================

/// Chains the Voronoi edges around one sample into a polygon
///
/// Cells of interior samples are bounded by segments only. Cells on the
/// hull are open and bounded by two rays, which are cut off far away.
struct PolygonBuilder {
    edges: Vec<Line2D>,
    far: f64,
}

impl PolygonBuilder {
    fn new(edges: Vec<Line2D>, far: f64) -> Self {
        Self { edges, far }
    }

    fn build(mut self, clip: &Polygon2D) -> Polygon2D {
        let ends = self.take_end_edges();
        let mut vertices = Vec::with_capacity(self.edges.len() + 3);

        if let [first_end, second_end] = ends.as_slice() {
            vertices.push(self.distant_point(first_end));
            let mut next = first_end.start_point().and_then(|pt| self.take_next_edge(pt));
            self.chain(&mut next, &mut vertices);
            vertices.extend(second_end.start_point());
            vertices.push(self.distant_point(second_end));
            fix_intersecting_end_edges(&mut vertices);
        } else if !self.edges.is_empty() {
            let mut next = Some(self.edges.remove(0));
            self.chain(&mut next, &mut vertices);
        }

        intersect_convex_polygons(&Polygon2D::from_vertices(vertices), clip)
    }

    fn chain(&mut self, next: &mut Option<Line2D>, vertices: &mut Vec<Point2D>) {
        while let Some(edge) = next.take() {
            vertices.extend(edge.start_point());
            *next = edge.end_point().and_then(|pt| self.take_next_edge(pt));
        }
    }

    /// Remove the (at most two) rays
    fn take_end_edges(&mut self) -> Vec<Line2D> {
        let mut ends = Vec::with_capacity(2);
        while ends.len() < 2 {
            match self.edges.iter().position(|e| !e.has_end_point()) {
                Some(idx) => ends.push(self.edges.remove(idx)),
                None => break,
            }
        }
        ends
    }

    /// Remove the edge touching `connector`, oriented to start there
    fn take_next_edge(&mut self, connector: Point2D) -> Option<Line2D> {
        let idx = self.edges.iter().position(|e| {
            e.start_point() == Some(connector) || e.end_point() == Some(connector)
        })?;
        let edge = self.edges.remove(idx);
        if edge.start_point() == Some(connector) {
            Some(edge)
        } else {
            Some(edge.reversed())
        }
    }

    fn distant_point(&self, ray: &Line2D) -> Point2D {
        ray.anchor().offset(ray.direction().normalize().scale(self.far))
    }
}

/// Join the two far ends if the bounding rays cross each other
fn fix_intersecting_end_edges(vertices: &mut Vec<Point2D>) {
    let n = vertices.len();
    if n < 4 {
        return;
    }
    let first = Line2D::segment(vertices[1], vertices[0]);
    let last = Line2D::segment(vertices[n - 2], vertices[n - 1]);
    if let LineIntersection::Point(pt) = first.intersect(&last) {
        if pt != vertices[1] && pt != vertices[n - 2] {
            vertices[0] = pt;
            vertices.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::poisson::{PoissonDiscSampler, DEFAULT_CANDIDATES};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn total_area(tess: &Tessellation) -> f64 {
        tess.tiles().iter().map(|t| t.outline.area()).sum()
    }

    #[test]
    fn test_no_samples() {
        let tess = tessellate(&[], Rect2D::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(tess.is_empty());
    }

    #[test]
    fn test_single_sample_owns_border() {
        let border = Rect2D::new(0.0, 0.0, 10.0, 10.0);
        let tess = tessellate(&[p(3.0, 4.0)], border).unwrap();
        assert_eq!(tess.len(), 1);
        let outline = &tess.tiles()[0].outline;
        assert_eq!(outline.vertex_count(), 4);
        assert!((outline.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_degenerate_border() {
        let tess = tessellate_with_offset(&[p(3.0, 4.0)], 0.0).unwrap();
        assert_eq!(tess.len(), 1);
        assert_eq!(tess.tiles()[0].outline.vertices(), &[p(3.0, 4.0)]);
    }

    #[test]
    fn test_two_samples_split_at_bisector() {
        let (a, b) = (p(0.0, 0.0), p(10.0, 0.0));
        let tess = tessellate_with_offset(&[a, b], 0.0).unwrap();
        assert_eq!(tess.len(), 2);
        assert_eq!(tess.tiles()[0].seed, a);
        assert_eq!(tess.tiles()[1].seed, b);
        assert!(tess.tiles()[0].outline.has_vertex(p(5.0, 0.0)));
        assert!(tess.tiles()[0].outline.has_vertex(p(0.0, 0.0)));
        assert!(!tess.tiles()[0].outline.has_vertex(p(10.0, 0.0)));
        assert!(tess.tiles()[1].outline.has_vertex(p(5.0, 0.0)));
        assert!(tess.tiles()[1].outline.has_vertex(p(10.0, 0.0)));
    }

    #[test]
    fn test_two_samples_in_square() {
        let (a, b) = (p(2.0, 5.0), p(8.0, 5.0));
        let tess = tessellate(&[b, a], Rect2D::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(tess.len(), 2);
        for tile in tess.tiles() {
            assert!((tile.outline.area() - 50.0).abs() < 1e-9);
            assert!(tile.outline.contains_point(tile.seed));
        }
    }

    #[test]
    fn test_square_of_four() {
        let samples = [p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0), p(10.0, 10.0)];
        let tess = tessellate_with_offset(&samples, 0.0).unwrap();
        assert_eq!(tess.len(), 4);
        for tile in tess.tiles() {
            assert!((tile.outline.area() - 25.0).abs() < 1e-6, "{:?}", tile);
            assert!(tile.outline.contains_point(tile.seed));
            assert!(tile.outline.has_vertex(p(5.0, 5.0)));
        }
        // Ordered by x, then y.
        let seeds: Vec<Point2D> = tess.tiles().iter().map(|t| t.seed).collect();
        assert_eq!(seeds, vec![p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0), p(10.0, 10.0)]);
    }

    #[test]
    fn test_single_sample_in_empty_border() {
        let seed = p(3.0, 4.0);
        let tess = tessellate(&[seed], Rect2D::new(3.0, 4.0, 3.0, 4.0)).unwrap();
        assert_eq!(tess.len(), 1);
        assert_eq!(tess.tiles()[0].outline.vertices(), &[seed]);

        let zero_width = tessellate(&[seed], Rect2D::new(3.0, 0.0, 3.0, 8.0)).unwrap();
        assert_eq!(zero_width.tiles()[0].outline.vertices(), &[seed]);
    }

    #[test]
    fn test_collinear_samples_produce_no_tiles() {
        let samples = [p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0)];
        let tess = tessellate(&samples, Rect2D::new(-1.0, -1.0, 11.0, 1.0)).unwrap();
        assert!(tess.is_empty());
    }

    #[test]
    fn test_tiles_cover_border() {
        let domain = Rect2D::new(0.0, 0.0, 60.0, 40.0);
        let sampler = PoissonDiscSampler::new(domain, 5.0, DEFAULT_CANDIDATES).unwrap();
        let samples = sampler.generate(&mut ChaCha8Rng::seed_from_u64(11));
        let tess = tessellate(&samples, domain).unwrap();

        assert_eq!(tess.len(), samples.len());
        assert!((total_area(&tess) - domain.width() * domain.height()).abs() < 1e-4);
        for tile in tess.tiles() {
            assert!(tile.outline.is_convex());
            assert!(tile.outline.contains_point(tile.seed));
            for v in tile.outline.vertices() {
                assert!(domain.contains_point(*v));
            }
        }
    }

    #[test]
    fn test_tile_points_are_closest_to_own_seed() {
        let domain = Rect2D::new(0.0, 0.0, 30.0, 30.0);
        let sampler = PoissonDiscSampler::new(domain, 6.0, DEFAULT_CANDIDATES).unwrap();
        let samples = sampler.generate(&mut ChaCha8Rng::seed_from_u64(4));
        let tess = tessellate(&samples, domain).unwrap();

        for tile in tess.tiles() {
            let inner = tile.outline.centroid().unwrap();
            let own = inner.distance(tile.seed);
            for other in &samples {
                assert!(own <= inner.distance(*other) + 1e-6);
            }
        }
    }

    #[test]
    fn test_fix_intersecting_end_edges() {
        // Two far ends whose segments back to the chain cross at (0, 5).
        let mut vertices = vec![p(5.0, 10.0), p(-5.0, 0.0), p(5.0, 0.0), p(-5.0, 10.0)];
        fix_intersecting_end_edges(&mut vertices);
        assert_eq!(vertices, vec![p(0.0, 5.0), p(-5.0, 0.0), p(5.0, 0.0)]);
    }
}
