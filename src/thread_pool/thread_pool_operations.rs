//! Worker Pool Operations - Pure DOP Functions
//!
//! No methods, no self, just transformations over `WorkerPoolData`.

use super::thread_pool_data::{JobFailure, WorkerPoolConfig, WorkerPoolData};
use crate::error::{DimensionError, DimensionResult};
use crossbeam_channel::{bounded, RecvTimeoutError};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Number of workers a config resolves to
pub fn resolve_thread_count(config: &WorkerPoolConfig) -> usize {
    if config.threads == 0 {
        num_cpus::get().max(1)
    } else {
        config.threads
    }
}

/// Create a worker pool
pub fn create_worker_pool(config: WorkerPoolConfig) -> DimensionResult<WorkerPoolData> {
    let threads = resolve_thread_count(&config);
    let name = config.thread_name.clone();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(move |index| format!("{}-{}", name, index))
        .build()
        .map_err(|e| DimensionError::WorkerPool {
            error: e.to_string(),
        })?;

    log::debug!(
        "[WorkerPool] Created pool '{}' with {} threads",
        config.thread_name,
        threads
    );

    Ok(WorkerPoolData {
        pool,
        config,
        jobs_submitted: AtomicU64::new(0),
        jobs_completed: AtomicU64::new(0),
    })
}

/// Run `job` on the pool and block the calling thread until it finishes.
///
/// A panic inside the job is caught and reported as `JobFailure::Panicked`.
/// With a timeout, the caller stops waiting after `timeout`; the job itself
/// keeps running on its worker and its result is discarded.
///
/// Must not be called from a worker of the same pool when every worker may be
/// blocked the same way.
pub fn run_blocking<T, F>(
    data: &WorkerPoolData,
    job: F,
    timeout: Option<Duration>,
) -> Result<T, JobFailure>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (sender, receiver) = bounded(1);
    data.jobs_submitted.fetch_add(1, Ordering::Relaxed);

    data.pool.spawn(move || {
        let result = catch_unwind(AssertUnwindSafe(job)).map_err(|payload| panic_message(&*payload));
        // receiver is gone after a timeout
        let _ = sender.send(result);
    });

    let outcome = match timeout {
        Some(limit) => receiver.recv_timeout(limit).map_err(|e| match e {
            RecvTimeoutError::Timeout => JobFailure::TimedOut(limit),
            RecvTimeoutError::Disconnected => JobFailure::Disconnected,
        })?,
        None => receiver.recv().map_err(|_| JobFailure::Disconnected)?,
    };

    data.jobs_completed.fetch_add(1, Ordering::Relaxed);
    outcome.map_err(JobFailure::Panicked)
}

/// Text of a caught panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Jobs submitted and jobs whose result was received
pub fn job_counts(data: &WorkerPoolData) -> (u64, u64) {
    (
        data.jobs_submitted.load(Ordering::Relaxed),
        data.jobs_completed.load(Ordering::Relaxed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pool() -> WorkerPoolData {
        create_worker_pool(WorkerPoolConfig {
            threads: 2,
            thread_name: "test-worker".to_string(),
        })
        .expect("Failed to create worker pool")
    }

    #[test]
    fn test_run_blocking_returns_value() {
        let pool = create_test_pool();
        let value = run_blocking(&pool, || 21 * 2, None).expect("job result");
        assert_eq!(value, 42);
        assert_eq!(job_counts(&pool), (1, 1));
    }

    #[test]
    fn test_run_blocking_runs_on_worker_thread() {
        let pool = create_test_pool();
        let name = run_blocking(
            &pool,
            || std::thread::current().name().map(str::to_string),
            None,
        )
        .expect("job result");
        assert!(name.expect("named worker").starts_with("test-worker-"));
    }

    #[test]
    fn test_panic_is_reported() {
        let pool = create_test_pool();
        let result: Result<(), _> = run_blocking(&pool, || panic!("generator exploded"), None);
        match result {
            Err(JobFailure::Panicked(message)) => assert_eq!(message, "generator exploded"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_timeout_is_reported() {
        let pool = create_test_pool();
        let result = run_blocking(
            &pool,
            || std::thread::sleep(Duration::from_millis(500)),
            Some(Duration::from_millis(10)),
        );
        assert!(matches!(result, Err(JobFailure::TimedOut(_))));
    }

    #[test]
    fn test_zero_threads_resolves_to_cpu_count() {
        let config = WorkerPoolConfig::default();
        assert_eq!(resolve_thread_count(&config), num_cpus::get().max(1));
    }
}
