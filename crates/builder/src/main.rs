mod download;
mod feeds;

use clap::Parser;
use linemap::prelude::*;
use std::{path::PathBuf, time::Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "linemap-build",
    version,
    about = "Build map-ready transit datasets from GTFS feeds"
)]
struct Args {
    /// Systems to build. Defaults to every configured system
    operators: Vec<String>,

    /// Build every configured system
    #[arg(long, conflicts_with = "operators")]
    all: bool,

    /// Directory the datasets are written to
    #[arg(short, long, default_value = "data")]
    output: PathBuf,

    /// Directory downloaded archives are kept in
    #[arg(long, default_value = "data/gtfs-cache")]
    cache_dir: PathBuf,

    /// JSON file with operator configurations, replacing the built-in ones
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Download archives again even when cached
    #[arg(long)]
    refresh: bool,

    /// Number of systems built at once
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let registry = match &args.registry {
        Some(path) => match Registry::from_json_file(path) {
            Ok(registry) => registry,
            Err(err) => {
                error!("Failed to read registry {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => Registry::default(),
    };

    let ids: Vec<String> = if args.all || args.operators.is_empty() {
        registry.ids().map(String::from).collect()
    } else {
        args.operators.clone()
    };
    if let Some(unknown) = ids.iter().find(|id| registry.get(id).is_err()) {
        let available: Vec<&str> = registry.ids().collect();
        eprintln!("Unknown system: {unknown}");
        eprintln!("Available: {}", available.join(", "));
        std::process::exit(1);
    }

    let jobs: Vec<Job> = ids
        .iter()
        .map(|id| match feeds::find(id) {
            Some(feed) if feed.optional => Job::optional(id),
            _ => Job::new(id),
        })
        .collect();
    let to_fetch: Vec<&feeds::Feed> = ids.iter().filter_map(|id| feeds::find(id)).collect();

    info!("Building transit data for {} systems", jobs.len());
    let now = Instant::now();
    let source = download::prefetch(&to_fetch, &args.cache_dir, args.refresh).await;

    let runner = Runner::new(Pipeline::new(registry), &args.output).with_jobs(args.jobs);
    let report = match tokio::task::spawn_blocking(move || runner.run(&source, &jobs)).await {
        Ok(report) => report,
        Err(err) => {
            error!("Build worker stopped unexpectedly: {err}");
            std::process::exit(1);
        }
    };

    println!("{report}");
    if report.aborted() {
        for (id, err) in report.failures() {
            error!("{id}: {err}");
        }
        std::process::exit(1);
    }
    info!("Build complete in {:?}", now.elapsed());
}
