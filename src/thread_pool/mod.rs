//! Background worker pool
//!
//! Level construction work (stem factories) runs here while the calling
//! thread waits; registration itself stays on the caller.

pub mod thread_pool_data;
pub mod thread_pool_operations;

pub use thread_pool_data::{JobFailure, WorkerPoolConfig, WorkerPoolData};
pub use thread_pool_operations::{
    create_worker_pool, job_counts, panic_message, resolve_thread_count, run_blocking,
};
