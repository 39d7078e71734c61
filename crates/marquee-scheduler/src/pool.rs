//! Bounded worker pool and result drain.
//!
//! Jobs flow through a bounded job queue to `N` workers; every non-empty
//! result goes to a bounded result queue which a single drain consumes in
//! completion order. The result queue closes once the last worker exits,
//! which only happens after the job queue is closed and empty.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};

use crate::{Job, JobContext, JobResult, SchedulerError};

/// Default number of workers.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Capacity of the job queue.
pub const JOB_QUEUE_CAPACITY: usize = 10;

/// Capacity of the result queue.
pub const RESULT_QUEUE_CAPACITY: usize = 10;

/// A fixed-size pool running jobs concurrently.
pub struct WorkerPool {
    workers: usize,
    ctx: Arc<JobContext>,
    notify: bool,
}

impl WorkerPool {
    /// Create a pool. A worker count of zero is raised to one.
    pub fn new(workers: usize, ctx: Arc<JobContext>, notify: bool) -> Self {
        Self {
            workers: workers.max(1),
            ctx,
            notify,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run jobs until the job queue is closed and drained.
    ///
    /// Returns once every worker has exited, dropping the last result
    /// sender so the result queue closes. Returns the number of results
    /// produced.
    pub async fn run(&self, jobs: mpsc::Receiver<Job>, results: mpsc::Sender<JobResult>) -> usize {
        let jobs = Arc::new(Mutex::new(jobs));

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let jobs = Arc::clone(&jobs);
            let results = results.clone();
            let ctx = Arc::clone(&self.ctx);
            let notify = self.notify;

            handles.push(tokio::spawn(async move {
                debug!(worker_id, "worker started");
                let mut produced = 0usize;

                loop {
                    let job = {
                        let mut rx = jobs.lock().await;
                        rx.recv().await
                    };

                    let Some(job) = job else {
                        // Queue closed and empty
                        break;
                    };

                    debug!(worker_id, job_id = job.id(), theater_id = %job.theater_id(), "worker picked up job");

                    let Some(result) = job.run(&ctx, notify).await else {
                        continue;
                    };

                    if results.send(result).await.is_err() {
                        warn!(worker_id, "result queue closed, stopping worker");
                        break;
                    }
                    produced += 1;
                }

                debug!(worker_id, produced, "worker stopped");
                produced
            }));
        }
        drop(results);

        let mut produced = 0;
        for handle in handles {
            match handle.await {
                Ok(count) => produced += count,
                Err(e) => error!(error = %e, "worker task failed"),
            }
        }

        produced
    }
}

/// Consume results until the queue closes, reporting each finished job.
///
/// Returns job names in completion order.
pub async fn drain(mut results: mpsc::Receiver<JobResult>) -> Vec<String> {
    let mut finished = Vec::new();
    while let Some(result) = results.recv().await {
        let name = result.job_name();
        info!(job = %name, "job finished");
        finished.push(name);
    }
    finished
}

/// Feed `jobs` through a pool of `workers` and drain the results.
pub async fn run_pipeline(
    ctx: Arc<JobContext>,
    jobs: Vec<Job>,
    workers: usize,
    notify: bool,
) -> Result<Vec<String>, SchedulerError> {
    let (job_tx, job_rx) = mpsc::channel(JOB_QUEUE_CAPACITY);
    let (result_tx, result_rx) = mpsc::channel(RESULT_QUEUE_CAPACITY);

    let submitted = jobs.len();
    let producer = tokio::spawn(async move {
        for job in jobs {
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        // job_tx dropped here, closing the queue
    });

    let drainer = tokio::spawn(drain(result_rx));

    let pool = WorkerPool::new(workers, ctx, notify);
    info!(workers = pool.workers(), jobs = submitted, "starting worker pool");
    let produced = pool.run(job_rx, result_tx).await;

    producer.await?;
    let finished = drainer.await?;

    info!(
        submitted,
        produced,
        skipped = submitted - produced,
        "all jobs done"
    );
    Ok(finished)
}
