//! Worker-pool matrix multiplication.
//!
//! The output index space is split into single-cell tasks. A fixed pool of
//! scoped threads pulls tasks from a shared channel; each worker computes
//! the dot product for its cell, appends the record to the sink, and sends
//! the result to the aggregator. The thread scope is the completion
//! barrier: when `multiply` returns `Ok`, every cell has been computed and
//! appended exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::unbounded;

use gridmul_common::{GridmulError, Matrix, Result};

use crate::sink::{CellRecord, CellSink};

/// One output cell to compute.
#[derive(Debug, Clone, Copy)]
struct CellTask {
    row: usize,
    col: usize,
}

// ── Entry point ────────────────────────────────────────────────────────

/// Multiply `a` by `b` on `workers` threads, appending one record per
/// output cell to `sink`.
///
/// Arguments are validated before any thread is spawned or the sink is
/// touched: incompatible shapes fail with
/// [`GridmulError::DimensionMismatch`], a zero-sized pool with
/// [`GridmulError::InvalidPoolSize`].
///
/// Failure is fail-fast: the first worker error is returned, remaining
/// queued tasks are abandoned, and cells already in flight may still reach
/// the sink. The caller decides what to do with the partially written log.
pub fn multiply(a: &Matrix, b: &Matrix, workers: usize, sink: &dyn CellSink) -> Result<Matrix> {
    validate_args(a, b, workers)?;

    let rows = a.rows();
    let cols = b.cols();

    let (task_tx, task_rx) = unbounded::<CellTask>();
    // The receiver outlives this loop, so sends cannot fail.
    for row in 0..rows {
        for col in 0..cols {
            let _ = task_tx.send(CellTask { row, col });
        }
    }
    drop(task_tx);

    let (result_tx, result_rx) = unbounded::<Result<CellRecord>>();
    let failed = AtomicBool::new(false);
    let mut out = Matrix::zeros(rows, cols)?;

    let (completed, first_error) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let failed = &failed;
            handles.push(scope.spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    if failed.load(Ordering::Relaxed) {
                        break;
                    }
                    let record = CellRecord {
                        row: task.row,
                        col: task.col,
                        value: dot(a, b, task.row, task.col),
                    };
                    match sink.append(&record) {
                        Ok(()) => {
                            if result_tx.send(Ok(record)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            failed.store(true, Ordering::Relaxed);
                            let _ = result_tx.send(Err(e));
                            break;
                        }
                    }
                }
            }));
        }
        drop(result_tx);

        // Aggregate while the workers run; the iterator ends once every
        // worker has dropped its sender.
        let mut completed = 0usize;
        let mut first_error: Option<GridmulError> = None;
        for outcome in result_rx.iter() {
            match outcome {
                Ok(record) => {
                    out.set(record.row, record.col, record.value);
                    completed += 1;
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        for handle in handles {
            if handle.join().is_err() && first_error.is_none() {
                first_error = Some(GridmulError::Worker("worker thread panicked".to_string()));
            }
        }
        (completed, first_error)
    });

    if let Some(e) = first_error {
        return Err(e);
    }
    if completed != rows * cols {
        return Err(GridmulError::Worker(format!(
            "expected {} cell results, got {completed}",
            rows * cols
        )));
    }
    Ok(out)
}

// ── Cell computation ───────────────────────────────────────────────────

/// Dot product of row `row` of `a` with column `col` of `b`.
fn dot(a: &Matrix, b: &Matrix, row: usize, col: usize) -> i64 {
    let mut acc = 0i64;
    for k in 0..a.cols() {
        acc += a.get(row, k) * b.get(k, col);
    }
    acc
}

// ── Validation ─────────────────────────────────────────────────────────

fn validate_args(a: &Matrix, b: &Matrix, workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(GridmulError::InvalidPoolSize(workers));
    }
    if a.cols() != b.rows() {
        return Err(GridmulError::DimensionMismatch {
            left_rows: a.rows(),
            left_cols: a.cols(),
            right_rows: b.rows(),
            right_cols: b.cols(),
        });
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────
