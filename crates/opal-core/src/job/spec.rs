//! Job file parser with validation.
//!
//! A job file names the algorithm to dispatch and where its inputs and
//! outputs live:
//!
//! ```toml
//! module = "builtin"
//! class = "Echo"
//! data_dir = "/srv/jobs/42/input"
//! output_dir = "/srv/jobs/42/output"
//! parameters = "sample=0.1"
//! threads = 4
//! timeout_secs = 600
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name the dispatcher is told to write results to, inside `output_dir`.
pub const RESULTS_FILE_NAME: &str = "results.csv";

const DEFAULT_THREADS: usize = 4;
const DEFAULT_TIMEOUT_SECS: u64 = 1800;

/// Errors that can occur during job file parsing and validation.
#[derive(Debug, Error)]
pub enum JobSpecError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("job field {0:?} must not be empty")]
    EmptyField(&'static str),

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// One dispatcher invocation, as described by a job file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobSpec {
    pub module: String,
    pub class: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub parameters: String,
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_threads() -> usize {
    DEFAULT_THREADS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl JobSpec {
    /// Path handed to the dispatcher as its results argument.
    pub fn results_csv_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE_NAME)
    }

    /// The six positional dispatcher arguments, in order.
    pub fn dispatcher_args(&self) -> Vec<String> {
        vec![
            self.module.clone(),
            self.class.clone(),
            self.data_dir.display().to_string(),
            self.threads.to_string(),
            self.results_csv_path().display().to_string(),
            self.parameters.clone(),
        ]
    }
}

/// Parse and validate a job file's contents.
pub fn parse_job_toml(content: &str) -> Result<JobSpec, JobSpecError> {
    let spec: JobSpec = toml::from_str(content)?;
    validate(&spec)?;
    Ok(spec)
}

fn validate(spec: &JobSpec) -> Result<(), JobSpecError> {
    if spec.module.trim().is_empty() {
        return Err(JobSpecError::EmptyField("module"));
    }
    if spec.class.trim().is_empty() {
        return Err(JobSpecError::EmptyField("class"));
    }
    if is_empty_path(&spec.data_dir) {
        return Err(JobSpecError::EmptyField("data_dir"));
    }
    if is_empty_path(&spec.output_dir) {
        return Err(JobSpecError::EmptyField("output_dir"));
    }
    if spec.timeout_secs == 0 {
        return Err(JobSpecError::ZeroTimeout);
    }
    Ok(())
}

fn is_empty_path(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
