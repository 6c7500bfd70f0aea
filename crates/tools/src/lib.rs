//! nbdocs Tool Library
//!
//! Subprocess-backed notebook operations for the documentation build driver.
//!
//! This crate provides:
//! - Outcome types for per-notebook operations (success / error / timeout)
//! - Glob-style notebook name patterns
//! - Execute-in-place and convert-to-rst operations via `jupyter nbconvert`

pub mod error;
pub mod pattern;
pub mod result;
pub mod tools;

pub use error::ToolError;
pub use pattern::NotebookPattern;
pub use result::{OpOutcome, OpStatus};
pub use tools::{convert_notebook, execute_notebook, ConvertOptions, ExecuteOptions};
