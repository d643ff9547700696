use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::spec::JobSpec;

/// How long to keep reading pipes once the dispatcher itself has exited or
/// been killed. A background process the dispatcher started may hold them
/// open indefinitely.
const PIPE_DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Terminal state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// The dispatcher exited with code 0.
    Completed,
    /// The dispatcher exited non-zero or was killed by a signal.
    Failed,
    /// The dispatcher was killed after exceeding `timeout_secs`.
    TimedOut,
}

/// The result of running one job through the dispatcher.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub status: JobStatus,
    /// Exit code of the dispatcher, or `None` if it was killed.
    pub exit_code: Option<i32>,
    /// Last non-empty stdout line of a completed job.
    pub result: Option<String>,
    /// Entry names found in the output directory after the run, sorted.
    pub outputs: Vec<String>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: i64,
}

/// Run `spec` by spawning `dispatcher` with the six positional arguments.
///
/// The output directory is created first. The child's `stdout` and `stderr`
/// are captured; a child that outlives `spec.timeout_secs` is killed and
/// reported as [`JobStatus::TimedOut`], keeping whatever it printed so far.
/// Failing to spawn or wait on the child is an error; a child that runs and
/// fails is a [`JobStatus::Failed`] outcome.
pub async fn run_job(spec: &JobSpec, dispatcher: &Path) -> Result<JobOutcome> {
    tokio::fs::create_dir_all(&spec.output_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create output directory {}",
                spec.output_dir.display()
            )
        })?;

    let args = spec.dispatcher_args();
    let start = Instant::now();
    let timeout = Duration::from_secs(spec.timeout_secs);

    tracing::info!(
        dispatcher = %dispatcher.display(),
        module = %spec.module,
        class = %spec.class,
        timeout_secs = spec.timeout_secs,
        "starting job"
    );

    let mut child = Command::new(dispatcher)
        .args(&args)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to execute dispatcher {}", dispatcher.display()))?;

    // Pipes are read by background tasks so a chatty child cannot block on a
    // full pipe buffer, and so partial output survives a timeout.
    let stdout = PipeCapture::spawn(child.stdout.take());
    let stderr = PipeCapture::spawn(child.stderr.take());

    let (status, exit_code, timeout_note) = match tokio::time::timeout(timeout, child.wait()).await
    {
        Ok(Ok(exit)) => {
            let status = if exit.success() {
                JobStatus::Completed
            } else {
                JobStatus::Failed
            };
            (status, exit.code(), None)
        }
        Ok(Err(e)) => {
            return Err(e).with_context(|| {
                format!("failed to wait on dispatcher {}", dispatcher.display())
            });
        }
        Err(_) => {
            let _ = child.kill().await;
            let note = format!("job timed out after {}s", spec.timeout_secs);
            (JobStatus::TimedOut, None, Some(note))
        }
    };

    let stdout = stdout.finish().await;
    let mut stderr = stderr.finish().await;
    if let Some(note) = timeout_note {
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            stderr.push('\n');
        }
        stderr.push_str(&note);
    }

    let result = match status {
        JobStatus::Completed => last_line(&stdout),
        JobStatus::Failed | JobStatus::TimedOut => None,
    };
    let outputs = list_outputs(&spec.output_dir).await?;

    let outcome = JobOutcome {
        status,
        exit_code,
        result,
        outputs,
        stdout,
        stderr,
        duration_ms: elapsed_ms(start),
    };

    match outcome.status {
        JobStatus::Completed => {
            tracing::info!(
                duration_ms = outcome.duration_ms,
                outputs = outcome.outputs.len(),
                "job completed"
            );
        }
        JobStatus::Failed => {
            tracing::warn!(exit_code = ?outcome.exit_code, "job failed");
        }
        JobStatus::TimedOut => {
            tracing::warn!(timeout_secs = spec.timeout_secs, "job timed out");
        }
    }

    Ok(outcome)
}

/// Accumulates one child pipe in a background task.
struct PipeCapture {
    buf: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl PipeCapture {
    fn spawn<R>(pipe: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let task = tokio::spawn(async move {
            let Some(mut pipe) = pipe else {
                return;
            };
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => sink.lock().await.extend_from_slice(&chunk[..n]),
                }
            }
        });
        Self { buf, task }
    }

    /// Wait up to [`PIPE_DRAIN_GRACE`] for end-of-file, then return what was
    /// read so far.
    async fn finish(self) -> String {
        let abort = self.task.abort_handle();
        if tokio::time::timeout(PIPE_DRAIN_GRACE, self.task).await.is_err() {
            tracing::debug!("pipe still open after dispatcher exit; abandoning reader");
            abort.abort();
        }
        let bytes = self.buf.lock().await;
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Names of the entries in `dir`, sorted.
async fn list_outputs(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to list output directory {}", dir.display()))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to list output directory {}", dir.display()))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn last_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(str::to_owned)
}

fn elapsed_ms(start: Instant) -> i64 {
    i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX)
}
