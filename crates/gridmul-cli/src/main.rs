//! gridmul command-line application
//!
//! Generates random matrices, multiplies them on a worker pool while
//! logging every computed cell to a shared file, then repeats the whole
//! pass in a background task for a fixed duration.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{error, info};

use gridmul_common::{ConfigBuilder, GridmulConfig};
use gridmul_engine::{effective_workers, run_background, run_once, StopToken};

/// gridmul - parallel matrix multiplication with a file-backed cell log
#[derive(Parser)]
#[command(name = "gridmul")]
#[command(about = "Parallel matrix multiplication on a worker pool")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Square matrix size
    #[arg(long, value_name = "N")]
    size: Option<usize>,

    /// Working folder for matrix and log files
    #[arg(long, value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// Background task duration in seconds
    #[arg(long, value_name = "SECS")]
    duration_secs: Option<u64>,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, value_name = "FMT")]
    log_format: Option<String>,

    /// Run only the one-shot multiplication, skipping the background task
    #[arg(long)]
    skip_background: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_configuration(&cli)?;
    setup_logging(&config)?;

    if let Err(e) = run(&cli, &config) {
        error!("Run failed: {}", e);

        // Show error chain
        let mut source = e.source();
        while let Some(err) = source {
            error!("  Caused by: {}", err);
            source = err.source();
        }

        std::process::exit(1);
    }

    Ok(())
}

/// Load configuration from file and merge with CLI arguments
fn load_configuration(cli: &Cli) -> Result<GridmulConfig> {
    let builder = match &cli.config {
        Some(path) => ConfigBuilder::from_file(path)
            .with_context(|| format!("cannot load config file {}", path.display()))?,
        None => ConfigBuilder::new(),
    };

    builder
        .matrix_size(cli.size)
        .workdir(cli.workdir.clone())
        .duration_secs(cli.duration_secs)
        .workers(cli.threads)
        .log_level(cli.log_level.clone())
        .log_format(cli.log_format.clone())
        .build()
        .context("Failed to build configuration")
}

/// Setup logging based on configuration
fn setup_logging(config: &GridmulConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.logging.format.as_str() {
        "json" => {
            subscriber
                .json()
                .with_timer(tracing_subscriber::fmt::time::uptime())
                .init();
        }
        "compact" => {
            subscriber.compact().init();
        }
        _ => {
            subscriber.pretty().init();
        }
    }

    Ok(())
}

/// One-shot run followed by the timed background task.
fn run(cli: &Cli, config: &GridmulConfig) -> Result<()> {
    info!(
        size = config.run.matrix_size,
        workers = effective_workers(config),
        workdir = %config.run.workdir.display(),
        "starting one-shot multiplication"
    );
    run_once(config).context("one-shot multiplication failed")?;

    if cli.skip_background {
        return Ok(());
    }

    info!(secs = config.run.duration_secs, "starting background task");
    let token = StopToken::new();
    let background = {
        let config = config.clone();
        let token = token.clone();
        thread::spawn(move || run_background(&config, &token))
    };

    thread::sleep(Duration::from_secs(config.run.duration_secs));
    token.stop();

    let iterations = background
        .join()
        .map_err(|_| anyhow!("background task panicked"))?
        .context("background task failed")?;
    info!(iterations, "background task finished");

    Ok(())
}
