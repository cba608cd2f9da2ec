//! One-shot and background run orchestration.
//!
//! `run_once` performs one generate -> multiply -> save pass; the sink log
//! is reset before the multiplication so it holds exactly the records of
//! that run. `run_background` repeats the pass until its stop token fires,
//! with iteration-numbered file names and one shared log reset only at
//! task start, so records accumulate across iterations.

use rand::thread_rng;
use tracing::info;

use gridmul_common::{textfmt, GridmulConfig, Matrix, Result};

use crate::generate::random_square;
use crate::pool::multiply;
use crate::sink::FileCellSink;
use crate::stop::StopToken;
use crate::workdir::Workdir;

/// Resolve the configured worker count, defaulting to the machine's
/// available parallelism.
pub fn effective_workers(config: &GridmulConfig) -> usize {
    config.pool.workers.unwrap_or_else(num_cpus::get)
}

/// Generate two matrices, multiply them on the pool, and persist inputs,
/// result, and the per-cell log under the working folder.
///
/// Returns the result matrix.
pub fn run_once(config: &GridmulConfig) -> Result<Matrix> {
    let workdir = Workdir::new(&config.run.workdir);
    workdir.ensure_exists()?;

    let size = config.run.matrix_size;
    let workers = effective_workers(config);
    let mut rng = thread_rng();

    let a = random_square(size, config.run.value_min, config.run.value_max, &mut rng)?;
    let b = random_square(size, config.run.value_min, config.run.value_max, &mut rng)?;
    textfmt::save_matrix(&workdir.matrix_a(), &a)?;
    textfmt::save_matrix(&workdir.matrix_b(), &b)?;
    info!(size, workdir = %workdir.root().display(), "input matrices generated and saved");

    let sink = FileCellSink::new(workdir.intermediate());
    sink.reset()?;
    let result = multiply(&a, &b, workers, &sink)?;
    textfmt::save_matrix(&workdir.result(), &result)?;
    info!(
        workers,
        result = %workdir.result().display(),
        log = %sink.path().display(),
        "result matrix saved"
    );

    Ok(result)
}

/// Repeatedly generate and multiply matrix pairs until `token` stops the
/// loop.
///
/// Iteration files are numbered from 1. All iterations share one cell log,
/// reset once up front. The token is checked at iteration boundaries only.
/// Returns the number of completed iterations.
pub fn run_background(config: &GridmulConfig, token: &StopToken) -> Result<u64> {
    let workdir = Workdir::new(&config.run.workdir);
    workdir.ensure_exists()?;

    let size = config.run.matrix_size;
    let workers = effective_workers(config);
    let sink = FileCellSink::new(workdir.intermediate());
    sink.reset()?;

    let mut rng = thread_rng();
    let mut iteration = 0u64;
    while !token.is_stopped() {
        iteration += 1;
        let a = random_square(size, config.run.value_min, config.run.value_max, &mut rng)?;
        let b = random_square(size, config.run.value_min, config.run.value_max, &mut rng)?;
        textfmt::save_matrix(&workdir.matrix_a_iter(iteration), &a)?;
        textfmt::save_matrix(&workdir.matrix_b_iter(iteration), &b)?;

        let result = multiply(&a, &b, workers, &sink)?;
        textfmt::save_matrix(&workdir.result_iter(iteration), &result)?;
        info!(iteration, "background iteration complete");
    }

    info!(iterations = iteration, log = %sink.path().display(), "background task stopped");
    Ok(iteration)
}
