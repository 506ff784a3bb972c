//! Command line driver: a single clustering run (optionally appending to a run log), or a strong/weak
//! scaling sweep.

use clap::Parser;
use kmeans_scaling::{
    default_num_threads, AccumulationStrategy, IterationReport, KMeans, KMeansError, KMeansHooks, RunConfig,
    RunLog, ScalingHarness, ScalingMode,
};
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "kmeans-scaling")]
#[command(version, about = "Parallel k-means over synthetic 2D points, with strong/weak scaling sweeps", long_about = None)]
struct Cli {
    /// Number of points (N0 of the scaling sweeps)
    #[arg(short = 'n', long, default_value_t = 10_000_000)]
    points: usize,

    /// Number of clusters
    #[arg(short = 'k', long, default_value_t = 50)]
    clusters: usize,

    /// Maximum number of iterations
    #[arg(short, long = "max-iter", default_value_t = 150)]
    max_iter: usize,

    /// Worker threads (maximum worker count of a sweep). Defaults to the hardware parallelism
    #[arg(short, long)]
    threads: Option<usize>,

    /// Scaling mode: none, strong or weak
    #[arg(long, default_value = "none")]
    mode: ScalingMode,

    /// Centroid accumulation strategy: atomic or local
    #[arg(long, default_value = "local")]
    strategy: AccumulationStrategy,

    /// Random seed. Defaults to the current wall-clock time
    #[arg(long)]
    seed: Option<u64>,

    /// Append a run log to this file (mode `none` only)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Number of point assignments to print after a single run
    #[arg(long, default_value_t = 10)]
    show_points: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    KMeans(#[from] KMeansError),

    #[error("run log: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::KMeans(err) => err.exit_code(),
            CliError::Io(_) => 5,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let threads = cli.threads.unwrap_or_else(default_num_threads);
    let config = RunConfig::default()
        .with_num_points(cli.points)
        .with_k(cli.clusters)
        .with_max_iterations(cli.max_iter)
        .with_num_threads(threads)
        .with_strategy(cli.strategy);
    config.validate()?;
    let seed = cli.seed.unwrap_or_else(wall_clock_seed);
    info!(?config, seed, mode = %cli.mode, "starting");

    match cli.mode {
        ScalingMode::None => single_run(&cli, config, seed),
        mode => {
            if cli.log_file.is_some() {
                warn!("--log-file is ignored in scaling mode");
            }
            scaling_sweep(config, threads, seed, mode)
        }
    }
}

fn single_run(cli: &Cli, config: RunConfig, seed: u64) -> Result<(), CliError> {
    let kmean = KMeans::new(config)?;
    let mut store = kmean.generate::<f64>(seed)?;

    let log = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let mut log = RunLog::new(BufWriter::new(file));
            log.header(&chrono::Local::now(), &config)?;
            Some(RefCell::new(log))
        }
        None => None,
    };
    let log_error: RefCell<Option<io::Error>> = RefCell::new(None);
    let log_iteration = |report: &IterationReport<'_, f64>| {
        if let Some(log) = &log {
            if let Err(err) = log.borrow_mut().iteration(report) {
                log_error.borrow_mut().get_or_insert(err);
            }
        }
    };
    let hooks = KMeansHooks::build().iteration_done(&log_iteration).build();

    let result = kmean.kmeans_lloyd(&mut store, &hooks);

    if let Some(err) = log_error.into_inner() {
        return Err(err.into());
    }
    if let Some(log) = log {
        let mut log: RunLog<BufWriter<File>> = log.into_inner();
        log.summary(&result)?;
    }

    println!("k-means finished after {} iterations ({}) with {} threads, strategy {}.",
        result.iterations, result.status, config.num_threads, config.strategy);
    for (j, (c, count)) in result.centroids.iter().zip(result.centroid_frequency.iter()).enumerate() {
        println!("Centroid {:2}: ({:.4}, {:.4}) with {} points", j, c.x, c.y, count);
    }
    println!("Total time: {:.4} s", result.elapsed.as_secs_f64());

    if cli.show_points > 0 {
        println!();
        println!("Assignment of the first {} points:", cli.show_points.min(store.len()));
        for (i, p) in store.points().iter().take(cli.show_points).enumerate() {
            match p.cluster {
                Some(c) => println!("Point {}: ({:.2}, {:.2}) -> cluster {}", i, p.x, p.y, c),
                None => println!("Point {}: ({:.2}, {:.2}) -> unassigned", i, p.x, p.y),
            }
        }
    }
    Ok(())
}

fn scaling_sweep(base: RunConfig, max_threads: usize, seed: u64, mode: ScalingMode) -> Result<(), CliError> {
    let harness = ScalingHarness::new(base, max_threads, seed);
    match mode {
        ScalingMode::Strong => println!("\n--- Strong scaling (N={}) ---", base.num_points),
        ScalingMode::Weak => println!("\n--- Weak scaling (initial N={}) ---", base.num_points),
        ScalingMode::None => {}
    }
    for sample in harness.run::<f64>(mode)? {
        println!("Threads: {:2}, N={}, Iterations: {}, Time: {:.4} s",
            sample.threads, sample.num_points, sample.iterations, sample.elapsed.as_secs_f64());
    }
    Ok(())
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
