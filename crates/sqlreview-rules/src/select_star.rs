//! Check that flags wildcard selection.
//!
//! # Rationale
//!
//! `select *` silently changes a model's contract whenever an upstream
//! table gains or loses columns. Enumerating columns keeps schema drift
//! visible in review.

use crate::pattern::LinePattern;
use once_cell::sync::Lazy;
use sqlreview_core::{Check, FileChange, Finding, Severity};
use std::collections::HashSet;

/// Rule name for the wildcard selection check.
pub const NAME: &str = "SELECT_STAR";

static SELECT_STAR: Lazy<LinePattern> = Lazy::new(|| LinePattern::new(r"\bselect\s+\*"));

/// Flags `select *` on added lines.
#[derive(Debug, Clone)]
pub struct SelectStar {
    severity: Severity,
}

impl Default for SelectStar {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectStar {
    /// Creates the check with its default severity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Overrides the severity for emitted findings.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Check for SelectStar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags SELECT * in changed model SQL"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, change: &FileChange) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for line in &change.added_lines {
            let trimmed = line.trim();
            if SELECT_STAR.find(trimmed).is_some() && seen.insert(trimmed) {
                findings.push(
                    Finding::new(
                        NAME,
                        self.severity,
                        &change.path,
                        "SELECT * detected - enumerate columns explicitly to avoid schema drift",
                    )
                    .with_line(trimmed),
                );
            }
        }

        findings
    }
}
