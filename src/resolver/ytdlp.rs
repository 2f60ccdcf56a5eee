use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::capture::{read_capped, OutputBudget};
use super::AudioResolver;
use crate::config::ResolverConfig;
use crate::error::{ResolveError, ResolveResult};
use crate::models::ResolvedAudio;

/// Best audio-only format, metadata dumped as a single JSON document.
pub const RESOLVE_FLAGS: [&str; 3] = ["-f", "bestaudio", "--dump-json"];

pub const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw result of one finished child process.
#[derive(Debug)]
struct Captured {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Runs `yt-dlp` (or a compatible binary) as a child process per request.
///
/// The URL is handed over as its own argv element and no shell is involved.
/// Children are bounded by a concurrency cap, a wall-clock timeout and a
/// combined stdout/stderr byte budget; any child still running when its
/// request gives up is killed.
#[derive(Debug)]
pub struct YtDlp {
    program: String,
    max_output_bytes: usize,
    timeout: Duration,
    permits: Semaphore,
}

impl YtDlp {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            program: config.program.clone(),
            max_output_bytes: config.max_output_bytes,
            timeout: config.timeout,
            permits: Semaphore::new(config.max_concurrent.max(1)),
        }
    }

    /// Argument vector for resolving `url`, program name excluded.
    pub fn resolve_args(url: &str) -> Vec<&str> {
        let mut args: Vec<&str> = RESOLVE_FLAGS.to_vec();
        args.push(url);
        args
    }

    /// Run the resolver under a concurrency permit and the configured timeout.
    async fn run_permitted(&self, args: &[&str]) -> ResolveResult<Captured> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ResolveError::Io(io::Error::other("resolver pool closed")))?;
        self.run(args, self.timeout).await
    }

    async fn run(&self, args: &[&str], timeout: Duration) -> ResolveResult<Captured> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            warn!(program = %self.program, error = %e, "Failed to spawn resolver");
            ResolveError::Spawn(e)
        })?;
        debug!(program = %self.program, pid = ?child.id(), "Resolver spawned");

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let budget = OutputBudget::new(self.max_output_bytes);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let outcome = tokio::time::timeout(timeout, async {
            tokio::try_join!(
                read_capped(stdout_pipe, &budget, &mut stdout),
                read_capped(stderr_pipe, &budget, &mut stderr)
            )?;
            child.wait().await.map_err(ResolveError::Io)
        })
        .await;

        match outcome {
            Ok(Ok(status)) => {
                debug!(
                    status = %status,
                    stdout_len = stdout.len(),
                    stderr_len = stderr.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Resolver finished"
                );
                Ok(Captured {
                    status,
                    stdout,
                    stderr,
                })
            }
            Ok(Err(ResolveError::OutputTooLarge { limit, .. })) => {
                warn!(program = %self.program, limit, "Resolver output over cap, killing child");
                let _ = child.start_kill();
                Err(ResolveError::OutputTooLarge {
                    limit,
                    stderr: String::from_utf8_lossy(&stderr).into_owned(),
                })
            }
            Ok(Err(e)) => {
                let _ = child.start_kill();
                Err(e)
            }
            Err(_) => {
                warn!(
                    program = %self.program,
                    timeout = ?timeout,
                    "Resolver timed out, killing child"
                );
                let _ = child.start_kill();
                Err(ResolveError::Timeout(timeout))
            }
        }
    }
}

/// Interpret a successful resolver's stdout.
///
/// A bare `null` document has no fields to read and counts as unparseable.
pub fn parse_metadata(stdout: &[u8]) -> ResolveResult<ResolvedAudio> {
    let doc: Value = serde_json::from_slice(stdout).map_err(ResolveError::Parse)?;
    if doc.is_null() {
        return Err(ResolveError::Parse(serde::de::Error::custom(
            "resolver emitted a null document",
        )));
    }
    Ok(ResolvedAudio::from_resolver_json(&doc))
}

fn failure(captured: &Captured) -> ResolveError {
    ResolveError::Failed {
        stderr: String::from_utf8_lossy(&captured.stderr).into_owned(),
    }
}

#[async_trait]
impl AudioResolver for YtDlp {
    async fn resolve(&self, url: &str) -> ResolveResult<ResolvedAudio> {
        let captured = self.run_permitted(&Self::resolve_args(url)).await?;
        if !captured.status.success() {
            return Err(failure(&captured));
        }
        parse_metadata(&captured.stdout)
    }

    async fn version(&self) -> ResolveResult<String> {
        // Skips the permit queue so health checks stay fast under load.
        let timeout = self.timeout.min(VERSION_TIMEOUT);
        let captured = self.run(&["--version"], timeout).await?;
        if !captured.status.success() {
            return Err(failure(&captured));
        }
        Ok(String::from_utf8_lossy(&captured.stdout).trim().to_string())
    }
}
