//! Rayon thread pool configuration for batch extraction.
//!
//! Use [WorkerPool::install] to run a parallel batch with a fixed number of
//! threads, or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;
use tracing::warn;

/// Configures how many worker threads are used for parallel batch execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use all available CPU cores (Rayon default).
    pub fn default_workers() -> Self {
        Self::default()
    }

    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a thread pool with this worker count. If [workers](WorkerPool::workers) is 0,
    /// uses the global Rayon pool. Otherwise builds a temporary pool with that many threads,
    /// falling back to the global pool if the build fails.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                warn!(
                    workers = self.workers,
                    error = %err,
                    "failed to build worker pool; using the global pool"
                );
                f()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn install_runs_on_requested_thread_count() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool.install(rayon::current_num_threads);
        assert_eq!(threads, 2);
    }

    #[test]
    fn default_pool_runs_closure() {
        let sum: u32 = WorkerPool::default_workers().install(|| (1..=10u32).into_par_iter().sum());
        assert_eq!(sum, 55);
    }
}
