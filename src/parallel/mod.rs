pub mod batch;
pub mod pool;

pub use batch::{extract_batch, BatchItem};
pub use pool::WorkerPool;
