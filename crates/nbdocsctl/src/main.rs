//! nbdocs binary.
//!
//! Batch-executes the tutorial notebooks and converts them to
//! reStructuredText for the documentation build.

mod config;
mod discover;
mod driver;
mod policy;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::BuildConfig;
use crate::driver::{Driver, RunOptions};
use crate::policy::GatingPolicy;

#[derive(Debug, Parser)]
#[command(
    name = "nbdocs",
    version,
    about = "Execute tutorial notebooks and convert them to reStructuredText"
)]
struct Cli {
    /// Don't execute notebooks
    #[arg(long)]
    noexec: bool,

    /// No conversion to rst
    #[arg(long)]
    noconv: bool,

    /// Output directory for converted notebooks
    #[arg(long, default_value = "rst")]
    outdir: PathBuf,

    /// Delete existing converted artifacts matching the run patterns before
    /// processing
    #[arg(long)]
    clearold: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,nbdocs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = BuildConfig::from_env()?;
    tracing::info!(
        source_dir = %config.source_dir.display(),
        archive_available = config.availability.archive,
        user_server_available = config.availability.user_server,
        "Configuration loaded"
    );

    if !cli.noexec && !config.execute_enabled {
        tracing::info!("Notebook execution disabled by NBDOCS_EXECUTE");
    }

    let options = RunOptions::resolve(cli.noexec, cli.noconv, cli.clearold, cli.outdir, &config);
    let policy = GatingPolicy::default_rules()?;

    let driver = Driver::new(config, policy, options);
    let report = driver.run().await?;
    report.print();

    Ok(())
}
