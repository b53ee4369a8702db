//! Parallel processing utilities

use crate::error::{CodequalError, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }
}

/// Shared flag used to stop a run between files
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once cancelled
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CodequalError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Build a dedicated pool; `None` means one thread per CPU
pub fn build_thread_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let count = threads.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(count)
        .build()
        .map_err(|e| CodequalError::ParallelExecution {
            message: format!("Failed to build thread pool with {} threads: {}", count, e),
        })
}

/// Execute a function on every item with progress reporting, stopping at the
/// first error. Output order matches input order.
pub fn process_with_progress<T, F, R, P>(
    items: &[T],
    parallel: bool,
    f: F,
    progress_callback: P,
) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    let run = |item: &T| {
        let result = f(item);
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        progress_callback(ProgressUpdate::new(
            done,
            total,
            format!("Processing item {}/{}", done, total),
        ));
        result
    };

    if parallel {
        items.par_iter().map(run).collect()
    } else {
        items.iter().map(run).collect()
    }
}
