pub mod batch;
pub mod pool;

pub use batch::{resolve_batch, BatchEntry};
pub use pool::WorkerPool;
