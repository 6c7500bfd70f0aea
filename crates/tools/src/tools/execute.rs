//! Notebook execution via `jupyter nbconvert --execute`.

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use crate::error::ToolError;
use crate::result::OpOutcome;

use super::{default_jupyter, run_bounded};

/// Options for executing a notebook in place.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Program used to invoke nbconvert.
    pub jupyter: String,

    /// Time budget for running all cells of one notebook.
    pub timeout: Duration,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            jupyter: default_jupyter(),
            timeout: Duration::from_secs(600),
        }
    }
}

/// Run all cells of a notebook and write the executed notebook back to the
/// same file.
///
/// The budget is passed to nbconvert as the per-cell timeout and also bounds
/// the subprocess as a whole, so a wedged kernel cannot stall the build.
pub async fn execute_notebook(
    path: &Path,
    opts: &ExecuteOptions,
) -> Result<OpOutcome, ToolError> {
    tracing::debug!(
        notebook = %path.display(),
        timeout_secs = opts.timeout.as_secs(),
        "Executing notebook in place"
    );

    let mut cmd = Command::new(&opts.jupyter);
    cmd.arg("nbconvert")
        .arg("--to")
        .arg("notebook")
        .arg("--execute")
        .arg("--inplace")
        .arg(format!(
            "--ExecutePreprocessor.timeout={}",
            opts.timeout.as_secs()
        ))
        .arg(path);

    run_bounded(cmd, Some(opts.timeout)).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::result::OpStatus;

    fn opts(program: &str) -> ExecuteOptions {
        ExecuteOptions {
            jupyter: program.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_execute_classifies_clean_exit() {
        let outcome = execute_notebook(Path::new("nb.ipynb"), &opts("true"))
            .await
            .unwrap();
        assert_eq!(outcome.status, OpStatus::Success);
    }

    #[tokio::test]
    async fn test_execute_classifies_failed_exit() {
        let outcome = execute_notebook(Path::new("nb.ipynb"), &opts("false"))
            .await
            .unwrap();
        assert_eq!(outcome.status, OpStatus::Error);
        assert!(!outcome.is_success());
    }
}
