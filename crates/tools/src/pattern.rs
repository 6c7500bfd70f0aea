//! Glob-style notebook name patterns.
//!
//! Patterns use shell wildcards matched against the whole file name:
//! `*` (any run of characters), `?` (one character), and `[...]` character
//! classes, so `tut[0-9]*.ipynb` matches `tut01_intro_regions.ipynb` but not
//! `tutorial.ipynb`. Compiled once to an anchored regex.

use regex::Regex;

use crate::error::ToolError;

/// A compiled glob pattern for notebook names.
#[derive(Debug, Clone)]
pub struct NotebookPattern {
    glob: String,
    regex: Regex,
}

impl NotebookPattern {
    /// Compile a glob pattern.
    pub fn new(glob: &str) -> Result<Self, ToolError> {
        let expr = glob_to_regex(glob)?;
        let regex = Regex::new(&expr).map_err(|e| ToolError::Pattern {
            pattern: glob.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// True when `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The source glob.
    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

impl std::fmt::Display for NotebookPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glob)
    }
}

/// Translate a glob into an anchored regex expression.
fn glob_to_regex(glob: &str) -> Result<String, ToolError> {
    let mut expr = String::with_capacity(glob.len() * 2 + 2);
    expr.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            '[' => {
                let mut class = String::new();
                // Both `[!...]` and `[^...]` negate, as in fnmatch.
                if matches!(chars.peek(), Some(&'!') | Some(&'^')) {
                    chars.next();
                    class.push('^');
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    if c == '\\' {
                        class.push_str("\\\\");
                    } else {
                        class.push(c);
                    }
                }
                if !closed || class.is_empty() || class == "^" {
                    return Err(ToolError::Pattern {
                        pattern: glob.to_string(),
                        reason: "unterminated or empty character class".to_string(),
                    });
                }
                expr.push('[');
                expr.push_str(&class);
                expr.push(']');
            }
            _ => expr.push_str(&regex::escape(&c.to_string())),
        }
    }

    expr.push('$');
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_digit_pattern() {
        let p = NotebookPattern::new("tut[0-9]*.ipynb").unwrap();
        assert!(p.matches("tut01_intro_regions.ipynb"));
        assert!(p.matches("tut001_setup_userserver.ipynb"));
        assert!(p.matches("tut0.ipynb"));
        assert!(!p.matches("tutorial.ipynb"));
        assert!(!p.matches("add01_intro_time_handling.ipynb"));
    }

    #[test]
    fn test_match_is_anchored() {
        let p = NotebookPattern::new("tut[0-9]*.ipynb").unwrap();
        assert!(!p.matches("xtut01.ipynb"));
        assert!(!p.matches("tut01.ipynb.bak"));
    }

    #[test]
    fn test_stem_pattern_matches_files_and_dirs() {
        let p = NotebookPattern::new("add[0-9]*").unwrap();
        assert!(p.matches("add02_read_ebas_nasa_ames.rst"));
        assert!(p.matches("add02_read_ebas_nasa_ames"));
        assert!(!p.matches("addendum"));
    }

    #[test]
    fn test_question_mark_and_negated_class() {
        let p = NotebookPattern::new("tut?[!a]*").unwrap();
        assert!(p.matches("tut0b_x"));
        assert!(!p.matches("tut0a_x"));
    }

    #[test]
    fn test_literal_dots_are_not_wildcards() {
        let p = NotebookPattern::new("a.ipynb").unwrap();
        assert!(p.matches("a.ipynb"));
        assert!(!p.matches("axipynb"));
    }

    #[test]
    fn test_unterminated_class_is_an_error() {
        assert!(NotebookPattern::new("tut[0-9*.ipynb").is_err());
        assert!(NotebookPattern::new("tut[]").is_err());
    }
}
