//! Sequential selection-and-run flow.
//!
//! One invocation walks four phases over the run set: optional cleanup of old
//! artifacts, optional execution, optional conversion, then the summary. Each
//! notebook is processed to completion before the next; a failing notebook
//! never aborts the rest of the run.

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use nbdocs_tools::{
    convert_notebook, execute_notebook, ConvertOptions, ExecuteOptions, NotebookPattern,
};

use crate::config::BuildConfig;
use crate::discover;
use crate::policy::GatingPolicy;
use crate::report::RunReport;

/// Phase toggles for one invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub execute: bool,
    pub convert: bool,
    pub clear_old: bool,
    pub outdir: PathBuf,
}

impl RunOptions {
    /// Resolve phase toggles from the CLI flags and the configuration.
    ///
    /// Execution runs only when neither `--noexec` nor the environment toggle
    /// disables it.
    pub fn resolve(
        noexec: bool,
        noconv: bool,
        clearold: bool,
        outdir: PathBuf,
        config: &BuildConfig,
    ) -> Self {
        Self {
            execute: !noexec && config.execute_enabled,
            convert: !noconv,
            clear_old: clearold,
            outdir,
        }
    }
}

/// The selection-and-run driver.
pub struct Driver {
    config: BuildConfig,
    policy: GatingPolicy,
    options: RunOptions,
}

impl Driver {
    pub fn new(config: BuildConfig, policy: GatingPolicy, options: RunOptions) -> Self {
        Self {
            config,
            policy,
            options,
        }
    }

    /// Run the full flow and return the categorized report.
    ///
    /// Fails fast if the output directory is missing; per-notebook failures
    /// are folded into the report instead.
    pub async fn run(&self) -> Result<RunReport> {
        ensure!(
            self.options.outdir.is_dir(),
            "output directory {} does not exist",
            self.options.outdir.display()
        );

        let (run_set, skipped) = self.select()?;
        let mut report = RunReport::new(self.options.convert);
        report.skipped = skipped;

        if run_set.is_empty() {
            tracing::warn!(
                source_dir = %self.config.source_dir.display(),
                "No candidate notebooks found"
            );
            return Ok(report);
        }

        tracing::info!(
            candidates = run_set.len(),
            skipped = report.skipped.len(),
            "Notebook selection done"
        );

        if self.options.clear_old {
            self.clear_old()?;
        }

        if self.options.execute {
            let opts = ExecuteOptions {
                jupyter: self.config.jupyter.clone(),
                timeout: self.config.exec_timeout,
            };
            for name in &run_set {
                let path = self.config.source_dir.join(name);
                tracing::info!(notebook = %name, "Executing notebook");
                match execute_notebook(&path, &opts).await {
                    Ok(outcome) if outcome.is_success() => {
                        tracing::info!(
                            notebook = %name,
                            duration_ms = outcome.duration_ms,
                            "Execution succeeded"
                        );
                        report.exec_success.push(name.clone());
                    }
                    Ok(outcome) => {
                        let desc = outcome.describe();
                        tracing::warn!(notebook = %name, error = %desc, "Execution failed");
                        report.exec_failed.push((name.clone(), desc));
                    }
                    Err(e) => {
                        tracing::warn!(notebook = %name, error = %e, "Execution failed");
                        report.exec_failed.push((name.clone(), e.to_string()));
                    }
                }
            }
        }

        if self.options.convert {
            let mut opts = ConvertOptions::new(&self.options.outdir);
            opts.jupyter = self.config.jupyter.clone();
            for name in &run_set {
                let path = self.config.source_dir.join(name);
                tracing::info!(notebook = %name, "Converting notebook");
                match convert_notebook(&path, &opts).await {
                    Ok(outcome) if outcome.is_success() => {
                        tracing::info!(
                            notebook = %name,
                            duration_ms = outcome.duration_ms,
                            "Conversion succeeded"
                        );
                        report.conv_success.push(name.clone());
                    }
                    Ok(outcome) => {
                        let desc = outcome.describe();
                        tracing::warn!(notebook = %name, error = %desc, "Conversion failed");
                        report.conv_failed.push((name.clone(), desc));
                    }
                    Err(e) => {
                        tracing::warn!(notebook = %name, error = %e, "Conversion failed");
                        report.conv_failed.push((name.clone(), e.to_string()));
                    }
                }
            }
        }

        Ok(report)
    }

    /// Split discovered candidates into run set and skip set.
    ///
    /// Prefixes are processed in configured order, names sorted within each.
    fn select(&self) -> Result<(Vec<String>, Vec<String>)> {
        let mut run_set = Vec::new();
        let mut skipped = Vec::new();
        for prefix in &self.config.prefixes {
            let pattern = discover::prefix_pattern(prefix, &self.config.extension)?;
            for name in discover::matching_names(&self.config.source_dir, &pattern)? {
                if self.policy.allows(&name, &self.config.availability) {
                    run_set.push(name);
                } else {
                    skipped.push(name);
                }
            }
        }
        Ok((run_set, skipped))
    }

    /// Delete previously converted artifacts matching the run patterns.
    ///
    /// Converted artifacts are `.rst` files and per-notebook asset
    /// directories, so the match is on the stem form `<prefix>[0-9]*`.
    /// A failed removal is logged and skipped.
    fn clear_old(&self) -> Result<()> {
        for prefix in &self.config.prefixes {
            let pattern = NotebookPattern::new(&format!("{}[0-9]*", prefix))?;
            let entries = fs::read_dir(&self.options.outdir).with_context(|| {
                format!("read output directory {}", self.options.outdir.display())
            })?;
            for entry in entries {
                let entry = entry?;
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };
                if !pattern.matches(name) {
                    continue;
                }
                let path = entry.path();
                match fs::remove_file(&path) {
                    Ok(()) => {
                        tracing::info!(path = %path.display(), "Deleted old artifact");
                    }
                    // Directories need the recursive removal.
                    Err(_) => match fs::remove_dir_all(&path) {
                        Ok(()) => {
                            tracing::info!(path = %path.display(), "Deleted old artifact directory");
                        }
                        Err(e) => {
                            tracing::warn!(
                                path = %path.display(),
                                error = %e,
                                "Failed to delete old artifact"
                            );
                        }
                    },
                }
            }
        }
        Ok(())
    }
}
