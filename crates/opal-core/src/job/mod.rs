//! Jobs -- run the dispatcher as a child process from a job file.
//!
//! A job file ([`JobSpec`]) names the algorithm, its input directory and an
//! output directory. [`run_job`] prepares the output directory, spawns the
//! dispatcher with the six positional arguments and reports a [`JobOutcome`].

pub mod executor;
pub mod spec;

pub use executor::{JobOutcome, JobStatus, run_job};
pub use spec::{JobSpec, JobSpecError, RESULTS_FILE_NAME, parse_job_toml};
