//! Subprocess-backed notebook operations.
//!
//! Both operations shell out to `jupyter nbconvert`; this crate never parses
//! notebook JSON itself.

mod convert;
mod execute;

pub use convert::{convert_notebook, ConvertOptions};
pub use execute::{execute_notebook, ExecuteOptions};

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::ToolError;
use crate::result::OpOutcome;

/// Program used to invoke nbconvert (env override: `NBDOCS_JUPYTER`).
pub(crate) fn default_jupyter() -> String {
    std::env::var("NBDOCS_JUPYTER").unwrap_or_else(|_| "jupyter".to_string())
}

/// Run a prepared command to completion, optionally bounded by `limit`.
///
/// On timeout the child is killed and a Timeout outcome is returned; any
/// other completion is classified by exit code. Spawn and wait failures are
/// `ToolError`s, not outcomes.
pub(crate) async fn run_bounded(
    mut cmd: Command,
    limit: Option<Duration>,
) -> Result<OpOutcome, ToolError> {
    let start = std::time::Instant::now();
    let program = cmd.as_std().get_program().to_string_lossy().to_string();

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let child = cmd
        .spawn()
        .map_err(|e| ToolError::Process(format!("failed to spawn {}: {}", program, e)))?;

    let output = if let Some(limit) = limit {
        // Take the child id before the process is consumed by wait_with_output.
        let child_id = child.id();

        match timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                ToolError::Process(format!("failed to wait for {}: {}", program, e))
            })?,
            Err(_) => {
                if let Some(pid) = child_id {
                    #[cfg(unix)]
                    {
                        let _ = std::process::Command::new("kill")
                            .args(["-9", &pid.to_string()])
                            .spawn();
                    }
                    #[cfg(windows)]
                    {
                        let _ = std::process::Command::new("taskkill")
                            .args(["/F", "/PID", &pid.to_string()])
                            .spawn();
                    }
                }
                let duration_ms = start.elapsed().as_millis() as u64;
                return Ok(OpOutcome::timeout(limit.as_secs()).with_duration(duration_ms));
            }
        }
    } else {
        child
            .wait_with_output()
            .await
            .map_err(|e| ToolError::Process(format!("failed to wait for {}: {}", program, e)))?
    };

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let duration_ms = start.elapsed().as_millis() as u64;

    Ok(OpOutcome::from_process(exit_code, stdout, stderr).with_duration(duration_ms))
}
