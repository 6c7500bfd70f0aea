//! Gating policy for conditionally included notebooks.
//!
//! Some tutorials only work with access to external data stores. The policy
//! is an ordered rule list: the first rule whose pattern matches a notebook
//! name decides which availability probe gates it. Names matching no rule are
//! always included.

use nbdocs_tools::{NotebookPattern, ToolError};

use crate::config::Availability;

/// Availability requirement referenced by a gating rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Needs the data archive mounted.
    Archive,
    /// Needs the user file-server area.
    UserServer,
}

impl Requirement {
    fn satisfied(self, avail: &Availability) -> bool {
        match self {
            Requirement::Archive => avail.archive,
            Requirement::UserServer => avail.user_server,
        }
    }
}

/// A single gating rule.
#[derive(Debug, Clone)]
struct GateRule {
    pattern: NotebookPattern,
    requires: Requirement,
}

/// Ordered, first-match-wins rule list.
#[derive(Debug, Clone, Default)]
pub struct GatingPolicy {
    rules: Vec<GateRule>,
}

impl GatingPolicy {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Rules are evaluated in registration order.
    pub fn require(mut self, pattern: &str, requires: Requirement) -> Result<Self, ToolError> {
        self.rules.push(GateRule {
            pattern: NotebookPattern::new(pattern)?,
            requires,
        });
        Ok(self)
    }

    /// True when `name` may run under the given availability.
    pub fn allows(&self, name: &str, avail: &Availability) -> bool {
        match self.rules.iter().find(|r| r.pattern.matches(name)) {
            Some(rule) => rule.requires.satisfied(avail),
            None => true,
        }
    }

    /// Gating for the shipped tutorial set.
    ///
    /// The intro/reading tutorials all need the data archive; the user-server
    /// setup notebook needs the user file-server area instead.
    pub fn default_rules() -> Result<Self, ToolError> {
        GatingPolicy::new()
            .require("add01_intro_time_handling.ipynb", Requirement::Archive)?
            .require("add02_read_ebas_nasa_ames.ipynb", Requirement::Archive)?
            .require("add03_ebas_database_browser.ipynb", Requirement::Archive)?
            .require("add04_stationdata_merging.ipynb", Requirement::Archive)?
            .require("tut001_setup_userserver.ipynb", Requirement::UserServer)?
            .require("tut00_get_started.ipynb", Requirement::Archive)?
            .require("tut01_intro_regions.ipynb", Requirement::Archive)?
            .require("tut02_intro_class_ReadGridded.ipynb", Requirement::Archive)?
            .require("tut03_intro_class_ReadGriddedMulti.ipynb", Requirement::Archive)?
            .require("tut04_intro_class_GriddedData.ipynb", Requirement::Archive)?
            .require("tut05_intro_ungridded_reading.ipynb", Requirement::Archive)?
            .require("tut06_intro_colocation.ipynb", Requirement::Archive)
    }
}
