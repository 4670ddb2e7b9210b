use rayon::{ThreadPoolBuilder, prelude::*};
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};
use tracing::{debug, error, info, warn};

use crate::{
    dataset::{Summary, store},
    pipeline::{self, Pipeline},
};

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Where feed archives come from.
pub trait FeedSource: Sync {
    fn fetch(&self, operator_id: &str) -> Result<Vec<u8>, FetchError>;
}

/// An operator to build. Optional jobs may fail without failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub operator_id: String,
    pub optional: bool,
}

impl Job {
    pub fn new(operator_id: &str) -> Self {
        Self {
            operator_id: operator_id.into(),
            optional: false,
        }
    }

    pub fn optional(operator_id: &str) -> Self {
        Self {
            operator_id: operator_id.into(),
            optional: true,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Built { summary: Summary, path: PathBuf },
    Skipped { error: pipeline::Error },
    Failed { error: pipeline::Error },
    /// Never started because an earlier required job failed.
    Cancelled,
}

#[derive(Debug)]
pub struct OperatorReport {
    pub operator_id: String,
    pub outcome: Outcome,
}

/// Per-operator outcomes of a run, in job order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub operators: Vec<OperatorReport>,
}

impl RunReport {
    /// Counts summed over every built operator.
    pub fn totals(&self) -> Summary {
        let mut totals = Summary::default();
        self.operators.iter().for_each(|report| {
            if let Outcome::Built { summary, .. } = &report.outcome {
                totals += *summary;
            }
        });
        totals
    }

    /// True when a required operator failed.
    pub fn aborted(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &pipeline::Error)> {
        self.operators
            .iter()
            .filter_map(|report| match &report.outcome {
                Outcome::Failed { error } => Some((report.operator_id.as_str(), error)),
                _ => None,
            })
    }

    pub fn built(&self) -> usize {
        self.operators
            .iter()
            .filter(|report| matches!(report.outcome, Outcome::Built { .. }))
            .count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.operators {
            match &report.outcome {
                Outcome::Built { summary, path } => writeln!(
                    f,
                    "{:<24} built    {} routes, {} stations, {} geometries -> {}",
                    report.operator_id,
                    summary.routes,
                    summary.stations,
                    summary.geometries,
                    path.display()
                )?,
                Outcome::Skipped { error } => {
                    writeln!(f, "{:<24} skipped  {error}", report.operator_id)?
                }
                Outcome::Failed { error } => {
                    writeln!(f, "{:<24} failed   {error}", report.operator_id)?
                }
                Outcome::Cancelled => writeln!(f, "{:<24} cancelled", report.operator_id)?,
            }
        }
        let totals = self.totals();
        write!(
            f,
            "Total: {} routes, {} stations, {} geometries across {} systems",
            totals.routes,
            totals.stations,
            totals.geometries,
            self.built()
        )
    }
}

/// Fetches, builds and writes a batch of operators.
#[derive(Debug)]
pub struct Runner {
    pipeline: Pipeline,
    output_dir: PathBuf,
    jobs: usize,
}

impl Runner {
    pub fn new<P: AsRef<Path>>(pipeline: Pipeline, output_dir: P) -> Self {
        Self {
            pipeline,
            output_dir: output_dir.as_ref().to_path_buf(),
            jobs: 1,
        }
    }

    /// Number of operators built at once. 1 builds them in order.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn run<S: FeedSource>(&self, source: &S, jobs: &[Job]) -> RunReport {
        info!("Building {} systems", jobs.len());
        let now = Instant::now();
        let cancelled = AtomicBool::new(false);

        let operators: Vec<OperatorReport> = if self.jobs > 1 {
            match ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| {
                    jobs.par_iter()
                        .map(|job| self.run_job(source, job, &cancelled))
                        .collect()
                }),
                Err(err) => {
                    warn!("Could not start {} workers, building in order: {err}", self.jobs);
                    self.run_sequential(source, jobs, &cancelled)
                }
            }
        } else {
            self.run_sequential(source, jobs, &cancelled)
        };

        let report = RunReport { operators };
        debug!("Run took {:?}", now.elapsed());
        report
    }

    fn run_sequential<S: FeedSource>(
        &self,
        source: &S,
        jobs: &[Job],
        cancelled: &AtomicBool,
    ) -> Vec<OperatorReport> {
        jobs.iter()
            .map(|job| self.run_job(source, job, cancelled))
            .collect()
    }

    fn run_job<S: FeedSource>(
        &self,
        source: &S,
        job: &Job,
        cancelled: &AtomicBool,
    ) -> OperatorReport {
        let outcome = if cancelled.load(Ordering::SeqCst) {
            debug!("Not starting {}, run was aborted", job.operator_id);
            Outcome::Cancelled
        } else {
            match self.process(source, &job.operator_id) {
                Ok((summary, path)) => Outcome::Built { summary, path },
                Err(error) if job.optional => {
                    warn!("Skipping optional system {}: {error}", job.operator_id);
                    Outcome::Skipped { error }
                }
                Err(error) => {
                    error!("Building {} failed: {error}", job.operator_id);
                    cancelled.store(true, Ordering::SeqCst);
                    Outcome::Failed { error }
                }
            }
        };
        OperatorReport {
            operator_id: job.operator_id.clone(),
            outcome,
        }
    }

    fn process<S: FeedSource>(
        &self,
        source: &S,
        operator_id: &str,
    ) -> Result<(Summary, PathBuf), pipeline::Error> {
        let config = self.pipeline.registry().get(operator_id)?;
        info!("Processing {}", config.name);
        let bytes = source.fetch(operator_id).map_err(|err| {
            pipeline::Error::UpstreamFetchFailure {
                operator: operator_id.to_string(),
                reason: err.to_string(),
            }
        })?;
        let dataset = self.pipeline.build(operator_id, &bytes)?;
        let path = store::write(&dataset, &self.output_dir)?;
        Ok((dataset.summary(), path))
    }
}
