//! Worker-pool matrix multiplication engine
//!
//! The engine splits a matrix product into per-cell tasks, executes them on
//! a fixed pool of threads, and appends one record per computed cell to an
//! append-only sink. On top of that it provides the one-shot and background
//! run orchestration used by the `gridmul` binary.

pub mod generate;
pub mod pool;
pub mod runner;
pub mod sink;
pub mod stop;
pub mod workdir;

pub use generate::{random_matrix, random_square};
pub use pool::multiply;
pub use runner::{effective_workers, run_background, run_once};
pub use sink::{CellRecord, CellSink, FileCellSink, MemoryCellSink};
pub use stop::StopToken;
pub use workdir::Workdir;
