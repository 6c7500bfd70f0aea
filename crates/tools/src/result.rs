//! Outcome types for notebook operations.

use serde::{Deserialize, Serialize};

/// Status of a single notebook operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpStatus {
    /// The operation completed and the subprocess exited cleanly.
    Success,
    /// The operation completed but the subprocess reported failure.
    Error,
    /// The subprocess exceeded its time budget and was killed.
    Timeout,
}

impl OpStatus {
    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, OpStatus::Success)
    }

    /// Returns true if the status indicates an error.
    pub fn is_error(&self) -> bool {
        matches!(self, OpStatus::Error)
    }

    /// Returns true if the status indicates a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, OpStatus::Timeout)
    }
}

impl std::fmt::Display for OpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpStatus::Success => write!(f, "success"),
            OpStatus::Error => write!(f, "error"),
            OpStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// Result of running one notebook operation.
///
/// Per-notebook failures are values, not errors: the driver records the
/// outcome and moves on to the next file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpOutcome {
    /// Operation status.
    pub status: OpStatus,

    /// Error description if status is not Success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Captured standard output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    /// Captured standard error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,

    /// Subprocess exit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Wall-clock duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl OpOutcome {
    /// Create a timeout outcome.
    pub fn timeout(limit_seconds: u64) -> Self {
        Self {
            status: OpStatus::Timeout,
            error: Some(format!("timed out after {} seconds", limit_seconds)),
            stdout: None,
            stderr: None,
            exit_code: None,
            duration_ms: None,
        }
    }

    /// Classify a finished subprocess by its exit code and captured output.
    ///
    /// The error description keeps the last non-empty stderr line, which is
    /// where nbconvert puts the actual cause.
    pub fn from_process(exit_code: i32, stdout: String, stderr: String) -> Self {
        let status = if exit_code == 0 {
            OpStatus::Success
        } else {
            OpStatus::Error
        };

        let error = if exit_code != 0 {
            let cause = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("")
                .trim();
            if cause.is_empty() {
                Some(format!("exited with code {}", exit_code))
            } else {
                Some(format!("exited with code {}: {}", exit_code, cause))
            }
        } else {
            None
        };

        Self {
            status,
            error,
            stdout: Some(stdout),
            stderr: Some(stderr),
            exit_code: Some(exit_code),
            duration_ms: None,
        }
    }

    /// Set the wall-clock duration.
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Returns true if the outcome indicates success.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Human-readable failure description for logs and the summary.
    pub fn describe(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| self.status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(OpStatus::Success.to_string(), "success");
        assert_eq!(OpStatus::Error.to_string(), "error");
        assert_eq!(OpStatus::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_status_methods() {
        assert!(OpStatus::Success.is_success());
        assert!(!OpStatus::Success.is_error());
        assert!(OpStatus::Error.is_error());
        assert!(OpStatus::Timeout.is_timeout());
    }

    #[test]
    fn test_from_process_success() {
        let outcome = OpOutcome::from_process(0, "done".to_string(), String::new());
        assert!(outcome.is_success());
        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_from_process_failure_keeps_stderr_cause() {
        let stderr = "warning: something\nCellExecutionError: name 'x' is not defined\n".to_string();
        let outcome = OpOutcome::from_process(1, String::new(), stderr);
        assert!(!outcome.is_success());
        let desc = outcome.describe();
        assert!(desc.contains("exited with code 1"));
        assert!(desc.contains("CellExecutionError"));
    }

    #[test]
    fn test_from_process_failure_empty_stderr() {
        let outcome = OpOutcome::from_process(2, String::new(), "  \n".to_string());
        assert_eq!(outcome.describe(), "exited with code 2");
    }

    #[test]
    fn test_timeout_outcome() {
        let outcome = OpOutcome::timeout(600).with_duration(600_123);
        assert!(outcome.status.is_timeout());
        assert_eq!(outcome.duration_ms, Some(600_123));
        assert!(outcome.describe().contains("600 seconds"));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = OpOutcome::from_process(0, "ok".to_string(), String::new());
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"exit_code\":0"));
    }
}
