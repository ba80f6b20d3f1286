//! Bounded parallel task runner
//!
//! Executes a list of independent units of work on a fixed-size worker pool
//! with a per-task timeout. Every submitted task produces exactly one
//! [`TaskResult`] tagged with its original submission index, so callers can
//! correlate failures back to the row that produced the task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::HarvestError;

/// Why a task produced no value
#[derive(Debug, Error)]
pub enum TaskFailure {
    #[error("task timed out")]
    Timeout,

    #[error(transparent)]
    Failed(#[from] HarvestError),

    #[error("worker panicked: {0}")]
    Panicked(String),
}

/// Outcome of one submitted task
///
/// `index` is the original submission position, preserved regardless of
/// completion order.
#[derive(Debug)]
pub struct TaskResult<T> {
    pub index: usize,
    pub outcome: Result<T, TaskFailure>,
}

impl<T> TaskResult<T> {
    /// Returns true if the task completed with a value
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs all tasks on a pool of `worker_count` workers
///
/// Tasks are dispatched in submission order; at most `worker_count` run at
/// any moment. The timeout clock starts when a worker picks the task up, not
/// at submission, and the task future is dropped at the deadline so
/// timed-out work stops. Any error a task returns, and any panic inside a
/// task, is converted into a [`TaskFailure`] rather than escaping the pool.
///
/// The returned vector holds one result per input task, in input order.
pub async fn run_all<F, Fut, T>(
    tasks: Vec<F>,
    worker_count: usize,
    task_timeout: Duration,
) -> Vec<TaskResult<T>>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = crate::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(worker_count));

    let mut handles = Vec::with_capacity(tasks.len());
    for task in tasks {
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Err(TaskFailure::Panicked("worker pool closed".to_string())),
            };
            match timeout(task_timeout, task()).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(TaskFailure::Failed(e)),
                Err(_) => Err(TaskFailure::Timeout),
            }
        }));
    }

    // Results are collected sequentially in submission order
    let mut results = Vec::with_capacity(handles.len());
    for (index, handle) in handles.into_iter().enumerate() {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(TaskFailure::Panicked(e.to_string())),
        };
        if let Err(failure) = &outcome {
            tracing::warn!("Task {} failed: {}", index, failure);
        }
        results.push(TaskResult { index, outcome });
    }
    results
}
