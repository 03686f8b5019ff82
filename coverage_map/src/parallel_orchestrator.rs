// THEORY:
// Each map's resolution reads only that map's legend and pixels, so a week of maps is
// embarrassingly parallel. The `ParallelOrchestrator` fans the per-map work out onto
// tokio's blocking pool (the search is CPU-bound and never awaits) and gates it with a
// semaphore sized to the machine, so a large week cannot flood the pool.
//
// Results are joined in the order the maps were supplied, and the same fold and sort
// as the sequential orchestrator runs over them. Parallelism changes the wall clock,
// never the output.

use crate::config::BatchConfig;
use crate::core_modules::event_record::EventRecord;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::BatchError;
use crate::orchestrator::{BatchReport, MapEntry, assemble, resolve_map};
use futures::future::join_all;
use log::debug;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub struct ParallelOrchestrator {
    config: BatchConfig,
    permits: Arc<Semaphore>,
    worker_count: usize,
}

impl ParallelOrchestrator {
    /// One worker per logical CPU.
    pub fn new(config: BatchConfig) -> Self {
        Self::with_workers(config, num_cpus::get())
    }

    pub fn with_workers(config: BatchConfig, workers: usize) -> Self {
        let worker_count = workers.max(1);
        Self {
            config,
            permits: Arc::new(Semaphore::new(worker_count)),
            worker_count,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub async fn run<B>(
        &self,
        national: Vec<EventRecord>,
        maps: Vec<MapEntry<B>>,
    ) -> Result<BatchReport, BatchError>
    where
        B: PixelBuffer + Send + 'static,
    {
        debug!(
            "resolving {} maps on {} workers",
            maps.len(),
            self.worker_count
        );

        let config = self.config;
        let tasks = maps.into_iter().map(|entry| {
            let permits = Arc::clone(&self.permits);
            async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| BatchError::Worker(e.to_string()))?;

                let title = entry.title.clone();
                let outcome = tokio::task::spawn_blocking(move || resolve_map(&entry, &config))
                    .await
                    .map_err(|e| BatchError::Worker(e.to_string()))??;

                Ok::<_, BatchError>((title, outcome))
            }
        });

        let outcomes = join_all(tasks)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        assemble(national, outcomes)
    }
}
