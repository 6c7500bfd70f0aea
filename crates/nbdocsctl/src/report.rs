//! Categorized run summary.
//!
//! The summary is the program's user-facing output and goes to stdout;
//! per-file progress and failure diagnostics go through tracing.

/// Per-notebook results accumulated over one invocation.
///
/// Failure entries carry the recorded error description next to the name.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    convert_requested: bool,
    pub skipped: Vec<String>,
    pub exec_success: Vec<String>,
    pub exec_failed: Vec<(String, String)>,
    pub conv_success: Vec<String>,
    pub conv_failed: Vec<(String, String)>,
}

impl RunReport {
    pub fn new(convert_requested: bool) -> Self {
        Self {
            convert_requested,
            ..Default::default()
        }
    }

    /// Render the summary sections in fixed order.
    ///
    /// Conversion sections only appear when conversion was requested; the
    /// other sections are always printed, even when empty.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push('\n');

        section(&mut out, "SKIPPED NOTEBOOKS", self.skipped.iter().cloned());
        section(
            &mut out,
            "EXECUTION SUCCEEDED",
            self.exec_success.iter().cloned(),
        );
        section(&mut out, "EXECUTION FAILED", failures(&self.exec_failed));

        if self.convert_requested {
            section(
                &mut out,
                "CONVERSION TO RST SUCCEEDED",
                self.conv_success.iter().cloned(),
            );
            section(
                &mut out,
                "CONVERSION TO RST FAILED",
                failures(&self.conv_failed),
            );
        }

        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

fn failures(entries: &[(String, String)]) -> impl Iterator<Item = String> + '_ {
    entries.iter().map(|(name, err)| format!("{} ({})", name, err))
}

fn section(out: &mut String, title: &str, lines: impl Iterator<Item = String>) {
    out.push('\n');
    out.push_str("--------------\n");
    out.push_str(title);
    out.push('\n');
    out.push_str("--------------\n");
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_in_fixed_order() {
        let mut report = RunReport::new(true);
        report.skipped.push("tut00_get_started.ipynb".to_string());
        report.exec_success.push("tut01_intro_regions.ipynb".to_string());
        report
            .exec_failed
            .push(("tut02_broken.ipynb".to_string(), "exited with code 1".to_string()));
        report.conv_success.push("tut01_intro_regions.ipynb".to_string());
        report
            .conv_failed
            .push(("tut02_broken.ipynb".to_string(), "exited with code 1".to_string()));

        let rendered = report.render();
        let skipped = rendered.find("SKIPPED NOTEBOOKS").unwrap();
        let exec_ok = rendered.find("EXECUTION SUCCEEDED").unwrap();
        let exec_fail = rendered.find("EXECUTION FAILED").unwrap();
        let conv_ok = rendered.find("CONVERSION TO RST SUCCEEDED").unwrap();
        let conv_fail = rendered.find("CONVERSION TO RST FAILED").unwrap();
        assert!(skipped < exec_ok && exec_ok < exec_fail);
        assert!(exec_fail < conv_ok && conv_ok < conv_fail);
    }

    #[test]
    fn test_conversion_sections_only_when_requested() {
        let report = RunReport::new(false);
        let rendered = report.render();
        assert!(rendered.contains("SKIPPED NOTEBOOKS"));
        assert!(rendered.contains("EXECUTION FAILED"));
        assert!(!rendered.contains("CONVERSION"));
    }

    #[test]
    fn test_failure_entries_carry_description() {
        let mut report = RunReport::new(true);
        report.conv_failed.push((
            "add01_intro_time_handling.ipynb".to_string(),
            "timed out after 600 seconds".to_string(),
        ));
        let rendered = report.render();
        assert!(rendered
            .contains("add01_intro_time_handling.ipynb (timed out after 600 seconds)"));
    }
}
