//! Example: Generate a map in the background
//!
//! Simulates a UI loop that keeps drawing frames while the map is generated
//! on a worker thread, polling for the result once per frame.

use std::thread;
use std::time::{Duration, Instant};

use rust_voronoi_map::*;

const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let spec = MapSpecBuilder::new()
        .seed(2024)
        .bounds(Rect2D::new(0.0, 0.0, 800.0, 600.0))?
        .min_sample_distance(6.0)?
        .continents(0.45, 6)?
        .build()?;

    let mut task = MapGenerationTask::new(spec);
    task.start()?;
    println!("Generation started: {}", task.has_started());

    let start = Instant::now();
    let mut frames = 0usize;
    let map = loop {
        if let Some(result) = task.poll() {
            break result?;
        }
        // Draw a loading screen
        frames += 1;
        thread::sleep(FRAME_TIME);
    };

    println!(
        "Map ready after {} frames ({:.2?}): {} tiles, {} nodes",
        frames,
        start.elapsed(),
        map.tile_count(),
        map.node_count()
    );
    println!("Finished: {}", task.has_finished());

    let land = map.nodes().iter().filter(|n| n.elevation() > 0.0).count();
    println!(
        "Land nodes: {} of {} ({:.1}%)",
        land,
        map.node_count(),
        land as f64 / map.node_count().max(1) as f64 * 100.0
    );
    Ok(())
}
