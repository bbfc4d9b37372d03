use std::{
    io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, instrument};

use crate::{
    error::{Error, Result},
    map::StationMap,
    parser::aggregate_chunk,
    planner::{plan, ChunkRange},
};

struct Task {
    path: Arc<Path>,
    range: ChunkRange,
}

/// Fixed set of workers fed from a bounded queue. Each task is one chunk, and
/// each finished chunk is sent back as an owned [`StationMap`].
pub struct ChunkPool {
    tasks: mpsc::Sender<Task>,
    results: mpsc::UnboundedReceiver<Result<StationMap>>,
    workers: Vec<JoinHandle<()>>,
}

impl ChunkPool {
    /// Spawns `size` workers on the current tokio runtime.
    pub fn new(size: NonZeroUsize) -> Self {
        let (tasks, queue) = mpsc::channel::<Task>(size.get());
        let (done, results) = mpsc::unbounded_channel();
        let queue = Arc::new(Mutex::new(queue));

        let workers = (0..size.get())
            .map(|_| {
                let queue = queue.clone();
                let done = done.clone();
                tokio::spawn(async move {
                    loop {
                        let task = queue.lock().await.recv().await;
                        let Some(Task { path, range }) = task else {
                            break;
                        };
                        if done.send(aggregate_chunk(&path, range).await).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        Self {
            tasks,
            results,
            workers,
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    async fn submit(&self, path: Arc<Path>, range: ChunkRange) -> Result<()> {
        self.tasks
            .send(Task { path, range })
            .await
            .map_err(|_| Error::Io(io::Error::other("chunk pool is closed")))
    }

    async fn next_result(&mut self) -> Result<StationMap> {
        self.results
            .recv()
            .await
            .unwrap_or_else(|| Err(Error::Io(io::Error::other("chunk workers exited early"))))
    }

    /// Scans the whole file, one task per planned chunk, and merges the
    /// partial maps once every chunk has reported back. The pool is torn down
    /// before returning, on success and on failure alike; the first error wins.
    #[instrument(skip(self), fields(workers = self.size()))]
    pub async fn process(mut self, path: &Path) -> Result<StationMap> {
        let outcome = self.collect(path).await;
        let teardown = self.shutdown().await;
        let results = outcome?;
        teardown?;
        Ok(results)
    }

    async fn collect(&mut self, path: &Path) -> Result<StationMap> {
        let file_size = tokio::fs::metadata(path).await?.len();
        let chunks = NonZeroUsize::new(self.size()).unwrap_or(NonZeroUsize::MIN);
        let ranges = plan(file_size, chunks);
        info!(
            file_size_mib = file_size / (1024 * 1024),
            chunk_size_mib = file_size / chunks.get() as u64 / (1024 * 1024),
            chunks = chunks.get(),
            "processing file"
        );

        let path: Arc<Path> = Arc::from(path);
        for range in &ranges {
            self.submit(path.clone(), *range).await?;
        }

        let mut results = StationMap::new();
        for _ in 0..ranges.len() {
            results = results.merge(self.next_result().await?);
        }
        debug!(locations = results.len(), "all chunks merged");
        Ok(results)
    }

    /// Closes task intake and waits for every worker to exit.
    async fn shutdown(self) -> Result<()> {
        let Self {
            tasks,
            results,
            workers,
        } = self;
        drop(tasks);
        drop(results);
        for worker in workers {
            worker.await.map_err(|error| Error::Io(io::Error::other(error)))?;
        }
        Ok(())
    }
}

/// One-shot run: builds a pool of `chunks` workers and processes `path`.
pub async fn process_file(path: impl Into<PathBuf>, chunks: NonZeroUsize) -> Result<StationMap> {
    let path = path.into();
    ChunkPool::new(chunks).process(&path).await
}
