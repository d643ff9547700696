//! Stable exit codes for the opal binaries.
//!
//! Argument parse failures exit with clap's own code (2).

use opal_core::job::JobStatus;

/// Dispatch succeeded, or the job completed.
pub const OK: i32 = 0;
/// Dispatch failed, the job failed, or the job could not be run at all.
pub const FAILED: i32 = 1;
/// `opal-job` killed the dispatcher after its timeout.
pub const TIMED_OUT: i32 = 3;

/// Exit code `opal-job` reports for a finished job.
pub fn for_status(status: JobStatus) -> i32 {
    match status {
        JobStatus::Completed => OK,
        JobStatus::Failed => FAILED,
        JobStatus::TimedOut => TIMED_OUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_distinct_codes() {
        assert_eq!(for_status(JobStatus::Completed), OK);
        assert_eq!(for_status(JobStatus::Failed), FAILED);
        assert_eq!(for_status(JobStatus::TimedOut), TIMED_OUT);
    }
}
