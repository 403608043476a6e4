//! End-to-end checks on generated maps and their building blocks

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_voronoi_map::*;

fn p(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y)
}

fn spec(seed: u64, topography: TopographyKind) -> MapSpec {
    MapSpec {
        topography,
        ..MapSpecBuilder::new()
            .seed(seed)
            .bounds(Rect2D::new(0.0, 0.0, 120.0, 80.0))
            .unwrap()
            .min_sample_distance(5.0)
            .unwrap()
            .build()
            .unwrap()
    }
}

fn noise_map(seed: u64) -> Map {
    Map::generate(spec(seed, TopographyKind::FractalNoise)).unwrap()
}

fn continent_map(seed: u64) -> Map {
    let kind = TopographyKind::Continents {
        land_ratio: 0.45,
        continent_count: 4,
    };
    Map::generate(spec(seed, kind)).unwrap()
}

fn samples(seed: u64, domain: Rect2D, min_dist: f64) -> Vec<Point2D> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    PoissonDiscSampler::new(domain, min_dist, 30)
        .unwrap()
        .generate(&mut rng)
}

// ===== SAMPLING & TRIANGULATION =====

#[test]
fn spec_without_builder_is_validated() {
    let spec = MapSpec {
        min_sample_distance: 0.0,
        ..MapSpecBuilder::new().seed(1).build().unwrap()
    };
    assert!(matches!(
        Map::generate(spec),
        Err(MapError::InvalidConfig(_))
    ));
    assert!(matches!(
        PoissonDiscSampler::new(spec.bounds, 0.0, 30),
        Err(MapError::InvalidConfig(_))
    ));
}

#[test]
fn poisson_samples_keep_their_distance() {
    let domain = Rect2D::new(0.0, 0.0, 100.0, 100.0);
    let points = samples(5, domain, 5.0);
    assert!(points.len() > 100);

    for (i, a) in points.iter().enumerate() {
        assert!(domain.contains_point(*a));
        for b in &points[i + 1..] {
            assert!(a.distance(*b) >= 5.0 - 1e-7, "{:?} and {:?} too close", a, b);
        }
    }
}

#[test]
fn poisson_sampling_is_reproducible() {
    let domain = Rect2D::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(samples(77, domain, 5.0), samples(77, domain, 5.0));
    assert_ne!(samples(77, domain, 5.0), samples(78, domain, 5.0));
}

#[test]
fn triangulation_is_delaunay() {
    let points = samples(3, Rect2D::new(0.0, 0.0, 60.0, 60.0), 4.0);
    let triangulation = triangulate(&points).unwrap();
    assert!(!triangulation.is_empty());
    assert!(is_delaunay_condition_satisfied(&triangulation.plain_triangles()));

    for tri in triangulation.triangles() {
        let circle = tri.circumcircle();
        for pt in &points {
            assert!(!circle.is_point_inside(*pt), "{:?} inside {:?}", pt, circle);
        }
    }
}

#[test]
fn square_triangulates_into_two_triangles() {
    let square = [p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0), p(10.0, 10.0)];
    let triangulation = triangulate(&square).unwrap();
    assert_eq!(triangulation.len(), 2);

    let area: f64 = triangulation
        .triangles()
        .iter()
        .map(|t| t.triangle().area())
        .sum();
    assert!((area - 100.0).abs() < 1e-9);
    for corner in &square {
        assert!(triangulation
            .triangles()
            .iter()
            .any(|t| t.find_vertex(*corner).is_some()));
    }
}

#[test]
fn right_triangle_circumcircle() {
    let circle = Triangle2D::new(p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0))
        .circumcircle()
        .unwrap()
        .unwrap();
    assert_eq!(circle.center, p(2.0, 2.0));
    assert!((circle.radius - 8f64.sqrt()).abs() < 1e-12);
}

// ===== TESSELLATION =====

#[test]
fn two_samples_split_along_bisector() {
    let a = p(0.0, 0.0);
    let b = p(10.0, 0.0);
    let tess = tessellate(&[a, b], Rect2D::bounding_box(&[a, b])).unwrap();
    assert_eq!(tess.len(), 2);

    let left = &tess.tiles()[0].outline;
    let right = &tess.tiles()[1].outline;
    assert!(left.vertices().iter().all(|v| v.x <= 5.0 + 1e-9));
    assert!(right.vertices().iter().all(|v| v.x >= 5.0 - 1e-9));
    assert!(left.has_vertex(p(5.0, 0.0)));
    assert!(right.has_vertex(p(5.0, 0.0)));
}

#[test]
fn single_sample_owns_whole_border() {
    let border = Rect2D::new(-20.0, 5.0, 30.0, 45.0);
    let tess = tessellate(&[p(12.0, 17.0)], border).unwrap();
    assert_eq!(tess.len(), 1);

    let outline = &tess.tiles()[0].outline;
    assert_eq!(outline.vertex_count(), 4);
    for corner in [
        border.left_top(),
        border.right_top(),
        border.right_bottom(),
        border.left_bottom(),
    ] {
        assert!(outline.has_vertex(corner), "missing corner {:?}", corner);
    }
}

#[test]
fn tiles_cover_the_border() {
    let border = Rect2D::new(0.0, 0.0, 70.0, 50.0);
    let points = samples(12, border, 4.0);
    let tess = tessellate(&points, border).unwrap();
    assert_eq!(tess.len(), points.len());

    let area: f64 = tess.tiles().iter().map(|t| t.outline.area()).sum();
    assert!((area - border.width() * border.height()).abs() < 1e-4);
    for tile in tess.tiles() {
        assert!(tile.outline.is_convex());
        assert!(tile.outline.contains_point(tile.seed));
    }
}

#[test]
fn convex_intersection_identity_and_disjoint() {
    let map = noise_map(4);
    for tile in map.tiles().iter().take(25) {
        let clipped = intersect_convex_polygons(&tile.shape, &tile.shape);
        for v in tile.shape.vertices() {
            assert!(clipped.has_vertex(*v));
        }
        for v in clipped.vertices() {
            assert!(tile.shape.has_vertex(*v));
        }
    }

    let a = Polygon2D::from_rect(&Rect2D::new(0.0, 0.0, 1.0, 1.0));
    let b = Polygon2D::from_rect(&Rect2D::new(3.0, 3.0, 4.0, 4.0));
    assert!(intersect_convex_polygons(&a, &b).is_empty());
}

// ===== GENERATED MAPS =====

#[test]
fn tiles_contain_their_seeds() {
    let map = noise_map(1);
    assert!(map.tile_count() > 50);
    for tile in map.tiles() {
        assert!(tile.shape.contains_point(tile.seed), "{:?}", tile.seed);
        assert!(map.bounds().contains_point(tile.seed));
    }
}

#[test]
fn adjacency_is_symmetric() {
    let map = noise_map(2);

    for (idx, tile) in map.tiles().iter().enumerate() {
        assert!(tile.neighbor_count() > 0);
        for &n in tile.neighbors() {
            assert_ne!(n, idx);
            assert!(map.tile(n).unwrap().neighbors().contains(&idx));
        }
    }
    for (idx, node) in map.nodes().iter().enumerate() {
        for &n in node.neighbors() {
            assert_ne!(n, idx);
            assert!(map.node(n).unwrap().neighbors().contains(&idx));
        }
    }
}

#[test]
fn shared_corners_are_one_node() {
    let map = noise_map(6);
    for tile in map.tiles() {
        assert_eq!(tile.node_count(), tile.shape.vertex_count());
        for (&node, corner) in tile.nodes().iter().zip(tile.shape.vertices()) {
            assert_eq!(map.node(node).unwrap().pos, *corner);
            assert_eq!(map.representation().node_index_at(*corner), Some(node));
        }
    }

    let total_corners: usize = map.tiles().iter().map(|t| t.node_count()).sum();
    assert!(map.node_count() < total_corners);
}

#[test]
fn noise_elevations_are_bounded() {
    let map = noise_map(8);
    for node in map.nodes() {
        assert!(node.is_assigned());
        assert!((-1.0..=1.0).contains(&node.elevation()));
    }
    for tile in map.tiles() {
        assert!((-1.0..=1.0).contains(&tile.elevation()));
    }
}

#[test]
fn continent_elevations_are_bounded() {
    let map = continent_map(9);
    let mut land = 0;
    for node in map.nodes() {
        assert!(node.elevation() == 1.0 || node.elevation() == -1.0);
        if node.elevation() > 0.0 {
            land += 1;
        }
    }
    for tile in map.tiles() {
        assert!((-1.0..=1.0).contains(&tile.elevation()));
    }
    assert!(land > 0);
    assert!(land <= (map.node_count() as f64 * 0.45) as usize);
}

#[test]
fn generation_is_deterministic() {
    let a = continent_map(10);
    let b = continent_map(10);
    assert_eq!(a.tile_count(), b.tile_count());
    for (ta, tb) in a.tiles().iter().zip(b.tiles()) {
        assert_eq!(ta.seed, tb.seed);
        assert_eq!(ta.elevation(), tb.elevation());
    }
}

#[test]
fn terrain_seed_changes_only_elevation() {
    let base = spec(11, TopographyKind::FractalNoise);
    let other = MapSpec {
        terrain_seed: base.terrain_seed.wrapping_add(1),
        ..base
    };
    let a = Map::generate(base).unwrap();
    let b = Map::generate(other).unwrap();

    assert_eq!(a.tile_count(), b.tile_count());
    assert!(a.tiles().iter().zip(b.tiles()).all(|(x, y)| x.seed == y.seed));
    assert!(a
        .nodes()
        .iter()
        .zip(b.nodes())
        .any(|(x, y)| x.elevation() != y.elevation()));
}

#[test]
fn hop_search_grows_with_hops() {
    let map = noise_map(13);
    let center = map.tile_count() / 2;
    let one = map.find_tiles_within_hops(center, 1).unwrap();
    let two = map.find_tiles_within_hops(center, 2).unwrap();

    assert_eq!(one.len(), map.tile(center).unwrap().neighbor_count() + 1);
    assert!(two.len() > one.len());
    assert!(one.iter().all(|t| two.contains(t)));
    assert!(matches!(
        map.find_tiles_within_hops(map.tile_count(), 1),
        Err(MapError::TileNotFound(_))
    ));
}

#[cfg(feature = "spatial-index")]
#[test]
fn nearest_tile_matches_containing_tile() {
    let map = noise_map(14);
    for tile in map.tiles().iter().step_by(7) {
        let centroid = tile.shape.centroid().unwrap();
        let idx = map.find_tile_near(centroid).unwrap();
        let found = map.tile(idx).unwrap();
        assert!(found.shape.contains_point(centroid));
    }
}
