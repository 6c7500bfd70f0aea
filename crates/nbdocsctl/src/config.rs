//! Build configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Availability probes evaluated once at startup.
///
/// The gated tutorials read from external stores; a probe is true when the
/// corresponding root directory is present on this machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Availability {
    /// The gridded/ungridded data archive is mounted.
    pub archive: bool,
    /// The user file-server area is reachable.
    pub user_server: bool,
}

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory scanned for candidate notebooks.
    pub source_dir: PathBuf,

    /// Notebook name prefixes, in processing order.
    pub prefixes: Vec<String>,

    /// Notebook file extension (without the dot).
    pub extension: String,

    /// Program used to invoke nbconvert.
    pub jupyter: String,

    /// Whether the execution phase may run at all. `--noexec` skips execution
    /// for one invocation; this switches it off for an environment.
    pub execute_enabled: bool,

    /// Time budget for running all cells of one notebook.
    pub exec_timeout: Duration,

    /// Availability probes backing the gating policy.
    pub availability: Availability,
}

impl BuildConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let source_dir = PathBuf::from(
            std::env::var("NBDOCS_SOURCE_DIR").unwrap_or_else(|_| "notebooks".to_string()),
        );

        let jupyter = std::env::var("NBDOCS_JUPYTER").unwrap_or_else(|_| "jupyter".to_string());

        let execute_enabled = std::env::var("NBDOCS_EXECUTE")
            .ok()
            .and_then(|s| parse_bool(&s))
            .unwrap_or(true);

        let timeout_secs: u64 = std::env::var("NBDOCS_EXEC_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(600);

        let archive_root = std::env::var("NBDOCS_ARCHIVE_ROOT")
            .unwrap_or_else(|_| "/lustre/storeA/project/aerocom".to_string());

        let user_server_root = std::env::var("NBDOCS_USER_SERVER_ROOT")
            .unwrap_or_else(|_| "/metno/aerocom_users_database".to_string());

        let availability = Availability {
            archive: PathBuf::from(&archive_root).is_dir(),
            user_server: PathBuf::from(&user_server_root).is_dir(),
        };

        Ok(Self {
            source_dir,
            prefixes: vec!["tut".to_string(), "add".to_string()],
            extension: "ipynb".to_string(),
            jupyter,
            execute_enabled,
            exec_timeout: Duration::from_secs(timeout_secs),
            availability,
        })
    }
}

/// Parse a boolean environment value; unrecognized values mean "unset".
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
