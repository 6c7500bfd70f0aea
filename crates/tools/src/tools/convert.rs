//! Notebook to reStructuredText conversion via `jupyter nbconvert`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

use crate::error::ToolError;
use crate::result::OpOutcome;

use super::{default_jupyter, run_bounded};

/// Options for converting a notebook to rst.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Program used to invoke nbconvert.
    pub jupyter: String,

    /// Root output directory. Each notebook gets a subdirectory named after
    /// its stem, holding the `.rst` body and any extracted cell outputs.
    pub outdir: PathBuf,

    /// Optional time budget for the conversion subprocess.
    pub timeout: Option<Duration>,
}

impl ConvertOptions {
    /// Options writing below `outdir` with the default program and no budget.
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            jupyter: default_jupyter(),
            outdir: outdir.into(),
            timeout: None,
        }
    }
}

/// Convert one notebook to reStructuredText under `<outdir>/<stem>/`.
///
/// The target subdirectory is created first so nbconvert has somewhere to put
/// extracted images alongside the body.
pub async fn convert_notebook(
    path: &Path,
    opts: &ConvertOptions,
) -> Result<OpOutcome, ToolError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            ToolError::Process(format!("notebook path has no usable stem: {}", path.display()))
        })?;
    let target = opts.outdir.join(stem);
    tokio::fs::create_dir_all(&target).await?;

    tracing::debug!(
        notebook = %path.display(),
        target = %target.display(),
        "Converting notebook to rst"
    );

    let mut cmd = Command::new(&opts.jupyter);
    cmd.arg("nbconvert")
        .arg("--to")
        .arg("rst")
        .arg(path)
        .arg("--output-dir")
        .arg(&target);

    run_bounded(cmd, opts.timeout).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::result::OpStatus;

    #[tokio::test]
    async fn test_convert_creates_target_subdirectory() {
        let out = tempfile::tempdir().unwrap();
        let mut opts = ConvertOptions::new(out.path());
        opts.jupyter = "true".to_string();

        let outcome = convert_notebook(Path::new("tut01_intro_regions.ipynb"), &opts)
            .await
            .unwrap();
        assert_eq!(outcome.status, OpStatus::Success);
        assert!(out.path().join("tut01_intro_regions").is_dir());
    }

    #[tokio::test]
    async fn test_convert_classifies_failed_exit() {
        let out = tempfile::tempdir().unwrap();
        let mut opts = ConvertOptions::new(out.path());
        opts.jupyter = "false".to_string();

        let outcome = convert_notebook(Path::new("tut01_intro_regions.ipynb"), &opts)
            .await
            .unwrap();
        assert_eq!(outcome.status, OpStatus::Error);
    }

    #[tokio::test]
    async fn test_convert_rejects_stemless_path() {
        let opts = ConvertOptions::new("/tmp");
        let err = convert_notebook(Path::new(""), &opts).await.unwrap_err();
        assert!(err.to_string().contains("stem"));
    }
}
