use crate::detect::LinterSpec;
use crate::parser;
use crate::types::{Tool, Violation};
use futures::future::join_all;
use serde::Serialize;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, trace, warn};

/// Shell exit code for "command not found"
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// stderr fragments that mean the binary is not installed
const NOT_FOUND_MARKERS: [&str; 2] = ["command not found", "is not recognized"];

/// Outcome category of a linter run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Error,
    NotFound,
}

/// Result of running one linter
#[derive(Debug, Clone, PartialEq)]
pub struct LinterRunResult {
    pub tool: Tool,
    pub status: RunStatus,
    pub violations: Vec<Violation>,
    pub error: Option<String>,
    pub command: String,
}

impl LinterRunResult {
    pub fn is_failure(&self) -> bool {
        self.status != RunStatus::Success
    }
}

/// Captured output of a finished (or unstartable) process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    /// None when the process was killed by a signal or never ran
    pub exit_code: Option<i32>,
    pub not_found: bool,
}

#[derive(Debug)]
pub(crate) enum InvokeError {
    Spawn(io::Error),
    Wait(io::Error),
    Timeout(Duration),
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::Spawn(e) => write!(f, "Failed to start: {}", e),
            InvokeError::Wait(e) => write!(f, "Failed to wait for process: {}", e),
            InvokeError::Timeout(limit) => write!(f, "Timed out after {:?}", limit),
        }
    }
}

/// Spawn the linter and capture its output
pub(crate) async fn invoke(spec: &LinterSpec, cwd: &Path) -> Result<RawOutput, InvokeError> {
    let args = spec.full_args();
    debug!("Running {} {:?} in {}", spec.command, args, cwd.display());

    let child = Command::new(&spec.command)
        .args(&args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(RawOutput {
                stderr: e.to_string(),
                not_found: true,
                ..Default::default()
            });
        }
        Err(e) => return Err(InvokeError::Spawn(e)),
    };

    let output = match spec.timeout {
        None => child.wait_with_output().await,
        Some(timeout) => {
            let sleep = tokio::time::sleep(timeout);
            tokio::pin!(sleep);
            tokio::select! {
                result = child.wait_with_output() => result,
                // Dropping the pending wait drops the child, which kills it
                _ = &mut sleep => return Err(InvokeError::Timeout(timeout)),
            }
        }
    }
    .map_err(InvokeError::Wait)?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code();
    let not_found = is_not_found(spec.tool, exit_code, &stderr);
    trace!(
        "{} exited with {:?}, {} bytes stdout, {} bytes stderr",
        spec.tool,
        exit_code,
        stdout.len(),
        stderr.len()
    );

    Ok(RawOutput {
        stdout,
        stderr,
        exit_code,
        not_found,
    })
}

/// Whether the exit looks like the shell could not find the binary.
/// A normal exit never counts, whatever stderr says.
fn is_not_found(tool: Tool, exit_code: Option<i32>, stderr: &str) -> bool {
    if exit_code == Some(EXIT_COMMAND_NOT_FOUND) {
        return true;
    }
    !exits_normally(tool, exit_code) && NOT_FOUND_MARKERS.iter().any(|m| stderr.contains(m))
}

fn exits_normally(tool: Tool, exit_code: Option<i32>) -> bool {
    exit_code.is_some_and(|code| (0..=tool.max_normal_exit_code()).contains(&code))
}

/// Classify a finished run and parse its output
pub fn interpret(spec: &LinterSpec, raw: RawOutput) -> LinterRunResult {
    let command = spec.command_line();
    let tool = spec.tool;

    if raw.not_found {
        return LinterRunResult {
            tool,
            status: RunStatus::NotFound,
            violations: vec![],
            error: Some(format!(
                "'{}' is not installed. Install it with: {}",
                spec.command,
                tool.install_hint()
            )),
            command,
        };
    }

    if !exits_normally(tool, raw.exit_code) {
        let detail = raw
            .stderr
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("no error output");
        let exit = raw
            .exit_code
            .map_or_else(|| "killed by signal".to_string(), |c| format!("exit code {}", c));
        return LinterRunResult {
            tool,
            status: RunStatus::Error,
            violations: vec![],
            error: Some(format!("{} failed ({}): {}", spec.command, exit, detail)),
            command,
        };
    }

    let output = if raw.stdout.is_empty() {
        &raw.stderr
    } else {
        &raw.stdout
    };
    let violations = parser::parse(tool, output);
    debug!("{} reported {} violations", tool, violations.len());

    LinterRunResult {
        tool,
        status: RunStatus::Success,
        violations,
        error: None,
        command,
    }
}

/// Run one linter end to end
pub async fn run_linter(spec: &LinterSpec, cwd: &Path) -> LinterRunResult {
    match invoke(spec, cwd).await {
        Ok(raw) => interpret(spec, raw),
        Err(e) => {
            debug!("Linter '{}' did not finish: {}", spec.tool, e);
            LinterRunResult {
                tool: spec.tool,
                status: RunStatus::Error,
                violations: vec![],
                error: Some(e.to_string()),
                command: spec.command_line(),
            }
        }
    }
}

/// Run all linters concurrently; results keep the order of `specs`
pub async fn run_all(specs: &[LinterSpec], cwd: &Path) -> Vec<LinterRunResult> {
    info!("Running {} linters", specs.len());
    let results = join_all(specs.iter().map(|spec| run_linter(spec, cwd))).await;

    let mut failed = 0;
    for result in results.iter().filter(|r| r.is_failure()) {
        failed += 1;
        warn!(
            "[{}] {}: {}",
            result.tool,
            result.command,
            result.error.as_deref().unwrap_or_default()
        );
    }
    info!(
        "Linters complete: {} succeeded, {} failed",
        results.len() - failed,
        failed
    );
    results
}
