// crates/bcsd_workflow/src/runner.rs

//! Job runner seam and the serial implementation.
//!
//! The cluster job-array runner is an external collaborator; it calls the
//! pipeline once per job and owns retries and timeouts. `SerialRunner`
//! implements the same `run(jobs, job_fn)` contract in-process for local
//! sweeps: one job at a time, failures isolated per job.

use crate::error::WorkflowError;
use crate::job::JobOutcome;
use bcsd_config::JobParameters;
use tracing::{error, info};

/// Per-job closure handed to a runner.
pub type JobFn<'a> = dyn Fn(&JobParameters) -> Result<JobOutcome, WorkflowError> + 'a;

/// Aggregate result of a sweep.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Jobs that published an output.
    pub published: usize,
    /// Jobs skipped because the destination existed.
    pub skipped: usize,
    /// Jobs that returned an in-memory result (interactive).
    pub inspected: usize,
    /// Failed jobs with their error rendering.
    pub failed: Vec<(JobParameters, String)>,
}

impl RunReport {
    /// Total number of jobs processed.
    pub fn total(&self) -> usize {
        self.published + self.skipped + self.inspected + self.failed.len()
    }

    /// Whether every job succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// External scheduler contract: run every job through `job_fn`.
pub trait JobRunner {
    /// Process `jobs`, never letting one job's failure affect another.
    fn run(&self, jobs: &[JobParameters], job_fn: &JobFn<'_>) -> RunReport;
}

/// In-process runner: jobs start-to-finish, one at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialRunner;

impl SerialRunner {
    /// New serial runner.
    pub fn new() -> Self {
        Self
    }
}

impl JobRunner for SerialRunner {
    fn run(&self, jobs: &[JobParameters], job_fn: &JobFn<'_>) -> RunReport {
        let mut report = RunReport::default();
        for job in jobs {
            match job_fn(job) {
                Ok(outcome) => {
                    let stage = outcome.stage();
                    match outcome {
                        JobOutcome::Published(path) => {
                            info!("{job} - {stage} \"{}\"", path.display());
                            report.published += 1;
                        }
                        JobOutcome::Skipped => {
                            info!("{job} - {stage}, destination exists");
                            report.skipped += 1;
                        }
                        JobOutcome::Inspected(_) => {
                            info!("{job} - inspected at {stage} (no write)");
                            report.inspected += 1;
                        }
                    }
                }
                Err(err) => {
                    error!("{job} - failed: {err}");
                    report.failed.push((job.clone(), err.to_string()));
                }
            }
        }
        info!(
            "sweep complete: {} published, {} skipped, {} failed of {} jobs",
            report.published,
            report.skipped,
            report.failed.len(),
            report.total()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcsd_config::Scenario;
    use std::path::PathBuf;

    fn jobs(n: u16) -> Vec<JobParameters> {
        (0..n)
            .map(|i| JobParameters {
                model: "CCSM4".into(),
                scenario: Scenario::Historical,
                year: 1990 + i,
                variable: "tasmax".into(),
            })
            .collect()
    }

    #[test]
    fn test_failures_are_isolated() {
        let jobs = jobs(3);
        let runner = SerialRunner::new();

        // The middle job fails; the others still run.
        let report = runner.run(&jobs, &|job| {
            if job.year == 1991 {
                Err(WorkflowError::TransformFailure {
                    variable: job.variable.clone(),
                    reason: "boom".into(),
                })
            } else {
                Ok(JobOutcome::Published(PathBuf::from(format!(
                    "/out/{}.nc4",
                    job.year
                ))))
            }
        });

        assert_eq!(report.published, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0.year, 1991);
        assert!(!report.is_clean());
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_clean_sweep() {
        let jobs = jobs(2);
        let report = SerialRunner::new().run(&jobs, &|_| Ok(JobOutcome::Skipped));
        assert!(report.is_clean());
        assert_eq!(report.skipped, 2);
    }
}
