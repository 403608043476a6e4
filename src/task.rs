//! Background map generation
//!
//! Generation runs on its own worker thread and hands the finished map back
//! over a channel. A UI loop calls [`MapGenerationTask::poll`] once per frame
//! and picks the map up when it arrives. Nothing of the map is visible before
//! that.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::config::MapSpec;
use crate::error::{MapError, Result};
use crate::map::Map;
use crate::terrain::TopographyGenerator;

const WORKER_NAME: &str = "map-generation";

type Job = Box<dyn FnOnce() -> Result<Map> + Send>;

struct Worker {
    receiver: Receiver<Result<Map>>,
    finished: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Single map generation run on a worker thread
///
/// # Example
///
/// ```rust,no_run
/// use rust_voronoi_map::*;
///
/// let spec = MapSpecBuilder::new().seed(7).build().unwrap();
/// let mut task = MapGenerationTask::new(spec);
/// task.start().unwrap();
///
/// loop {
///     if let Some(result) = task.poll() {
///         let map = result.unwrap();
///         println!("{} tiles", map.tile_count());
///         break;
///     }
///     // draw a frame
/// }
/// ```
pub struct MapGenerationTask {
    job: Option<Job>,
    worker: Option<Worker>,
    done: bool,
}

impl MapGenerationTask {
    /// Task generating a map with the topography selected in `spec`
    pub fn new(spec: MapSpec) -> Self {
        Self::from_job(Box::new(move || Map::generate(spec)))
    }

    /// Task generating a map with a custom topography generator
    pub fn with_topography<G>(spec: MapSpec, mut topography: G) -> Self
    where
        G: TopographyGenerator + Send + 'static,
    {
        Self::from_job(Box::new(move || {
            Map::generate_with_topography(spec, &mut topography)
        }))
    }

    fn from_job(job: Job) -> Self {
        Self {
            job: Some(job),
            worker: None,
            done: false,
        }
    }

    /// Spawn the worker thread
    ///
    /// # Errors
    ///
    /// Returns `MapError::GenerationFailed` if the task was already started
    /// or the thread could not be spawned.
    pub fn start(&mut self) -> Result<()> {
        let Some(job) = self.job.take() else {
            return Err(MapError::GenerationFailed(
                "generation task already started".to_string(),
            ));
        };

        let (sender, receiver) = mpsc::channel();
        let finished = Arc::new(AtomicBool::new(false));
        let worker_finished = Arc::clone(&finished);

        let handle = thread::Builder::new()
            .name(WORKER_NAME.to_owned())
            .spawn(move || {
                debug!("Map generation worker started");
                let result = job();
                if let Err(err) = &result {
                    error!("Map generation failed: {}", err);
                }
                // The receiver may be gone if the task was dropped.
                let _ = sender.send(result);
                worker_finished.store(true, Ordering::Release);
            })
            .map_err(|err| {
                MapError::GenerationFailed(format!("failed to spawn worker: {}", err))
            })?;

        self.worker = Some(Worker {
            receiver,
            finished,
            handle: Some(handle),
        });
        Ok(())
    }

    pub fn has_started(&self) -> bool {
        self.worker.is_some()
    }

    /// Whether the worker has produced its result
    ///
    /// Stays true after the result has been taken.
    pub fn has_finished(&self) -> bool {
        self.done
            || self
                .worker
                .as_ref()
                .is_some_and(|w| w.finished.load(Ordering::Acquire))
    }

    /// Take the result if the worker is done, without blocking
    ///
    /// Returns `None` while generation is running, before the task is
    /// started, and after the result has been taken once.
    pub fn poll(&mut self) -> Option<Result<Map>> {
        let worker = self.worker.as_ref()?;
        if self.done {
            return None;
        }
        let result = match worker.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(lost_worker()),
        };
        self.finish();
        Some(result)
    }

    /// Block until the map is generated, starting the task if needed
    ///
    /// # Errors
    ///
    /// Returns the generation error, or `MapError::GenerationFailed` if the
    /// result was already taken or the worker died.
    pub fn wait(mut self) -> Result<Map> {
        if !self.has_started() {
            self.start()?;
        }
        if self.done {
            return Err(MapError::GenerationFailed(
                "generation result already taken".to_string(),
            ));
        }
        let result = match &self.worker {
            Some(worker) => worker.receiver.recv().unwrap_or_else(|_| Err(lost_worker())),
            None => Err(lost_worker()),
        };
        self.finish();
        result
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(handle) = self.worker.as_mut().and_then(|w| w.handle.take()) {
            if handle.join().is_err() {
                error!("Map generation worker panicked");
            }
        }
    }
}

impl std::fmt::Debug for MapGenerationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapGenerationTask")
            .field("started", &self.has_started())
            .field("finished", &self.has_finished())
            .finish()
    }
}

fn lost_worker() -> MapError {
    MapError::GenerationFailed("worker exited without a result".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSpecBuilder;
    use crate::geometry::Rect2D;
    use crate::terrain::FlatTopography;
    use std::time::Duration;

    fn small_spec(seed: u64) -> MapSpec {
        MapSpecBuilder::new()
            .seed(seed)
            .terrain_seed(seed + 1)
            .bounds(Rect2D::new(0.0, 0.0, 40.0, 40.0))
            .unwrap()
            .min_sample_distance(4.0)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_not_started() {
        let mut task = MapGenerationTask::new(small_spec(1));
        assert!(!task.has_started());
        assert!(!task.has_finished());
        assert!(task.poll().is_none());
    }

    #[test]
    fn test_poll_until_finished() {
        let spec = small_spec(2);
        let expected = Map::generate(spec).unwrap();

        let mut task = MapGenerationTask::new(spec);
        task.start().unwrap();
        assert!(task.has_started());

        let map = loop {
            if let Some(result) = task.poll() {
                break result.unwrap();
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert!(task.has_finished());
        assert!(task.poll().is_none());
        assert_eq!(map.tile_count(), expected.tile_count());
        assert_eq!(map.node_count(), expected.node_count());
    }

    #[test]
    fn test_wait_starts_task() {
        let map = MapGenerationTask::new(small_spec(3)).wait().unwrap();
        assert!(map.tile_count() > 0);
    }

    #[test]
    fn test_double_start() {
        let mut task = MapGenerationTask::new(small_spec(4));
        task.start().unwrap();
        assert!(matches!(task.start(), Err(MapError::GenerationFailed(_))));
        assert!(task.wait().is_ok());
    }

    #[test]
    fn test_custom_topography() {
        let task = MapGenerationTask::with_topography(small_spec(5), FlatTopography(0.25));
        let map = task.wait().unwrap();
        assert!(map.nodes().iter().all(|n| n.elevation() == 0.25));
        assert!(map.tiles().iter().all(|t| t.elevation() == 0.25));
    }
}
