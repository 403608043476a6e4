//! Example: Generate a tile map
//!
//! Runs the full pipeline once with fractal noise terrain and once with
//! continents, then prints some statistics and queries.

use rust_voronoi_map::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Voronoi Map Generation Example");
    println!("==============================\n");

    // Step 1: Configure the map
    let spec = MapSpecBuilder::new()
        .seed(42)
        .terrain_seed(7)
        .bounds(Rect2D::new(0.0, 0.0, 500.0, 500.0))?
        .min_sample_distance(10.0)?
        .sample_candidates(20)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {} (terrain {})", spec.seed, spec.terrain_seed);
    println!("  Size: {} x {}", spec.width(), spec.height());
    println!("  Min sample distance: {}", spec.min_sample_distance);
    println!(
        "  Noise: {} octaves, persistence {}",
        spec.noise.octaves, spec.noise.persistence
    );
    println!();

    // Step 2: Fractal noise terrain
    let map = Map::generate(spec)?;
    print_statistics("Fractal noise", &map);

    // Step 3: Same layout with continents
    let continent_spec = MapSpec {
        topography: TopographyKind::Continents {
            land_ratio: 0.4,
            continent_count: 4,
        },
        ..spec
    };
    let continents = Map::generate(continent_spec)?;
    print_statistics("Continents", &continents);

    // Step 4: Queries
    println!("Queries:");
    let center = map.bounds().center();
    #[cfg(feature = "spatial-index")]
    {
        if let Some(idx) = map.find_tile_near(center) {
            let tile = map.tile(idx).ok_or(MapError::TileNotFound(idx))?;
            println!(
                "  Tile near center: #{} at ({:.1}, {:.1}), {} neighbors",
                idx,
                tile.seed.x,
                tile.seed.y,
                tile.neighbor_count()
            );

            let region = map.find_tiles_within_hops(idx, 2)?;
            println!("  Tiles within 2 hops: {}", region.len());

            if let Some(extremes) = map.elevation_extremes(idx)? {
                println!(
                    "  Elevation range: {:.3} at ({:.1}, {:.1}) to {:.3} at ({:.1}, {:.1})",
                    extremes.min,
                    extremes.min_pos.x,
                    extremes.min_pos.y,
                    extremes.max,
                    extremes.max_pos.x,
                    extremes.max_pos.y
                );
            }
        }
    }
    #[cfg(not(feature = "spatial-index"))]
    println!("  Map center: ({:.1}, {:.1})", center.x, center.y);

    println!("\n=== Done ===");
    Ok(())
}

fn print_statistics(label: &str, map: &Map) {
    let tiles = map.tile_count().max(1) as f64;
    let avg_neighbors = map.tiles().iter().map(|t| t.neighbor_count()).sum::<usize>() as f64 / tiles;
    let avg_corners = map.tiles().iter().map(|t| t.node_count()).sum::<usize>() as f64 / tiles;
    let land = map.tiles().iter().filter(|t| t.elevation() > 0.0).count();

    println!("{}:", label);
    println!("  Tiles: {}", map.tile_count());
    println!("  Nodes: {}", map.node_count());
    println!("  Average neighbors per tile: {:.2}", avg_neighbors);
    println!("  Average corners per tile: {:.2}", avg_corners);
    println!(
        "  Land tiles: {} ({:.1}%)",
        land,
        land as f64 / tiles * 100.0
    );
    println!();
}
