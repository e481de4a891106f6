//! Check that flags `select distinct`.
//!
//! # Rationale
//!
//! DISTINCT usually papers over a fan-out introduced by a bad join grain.
//! Deduplicating upstream, or fixing the join, keeps the model's grain
//! explicit; a deliberate DISTINCT deserves a comment saying so.

use crate::pattern::LinePattern;
use once_cell::sync::Lazy;
use sqlreview_core::{Check, FileChange, Finding, Severity};
use std::collections::HashSet;

/// Rule name for the distinct selection check.
pub const NAME: &str = "SELECT_DISTINCT";

static SELECT_DISTINCT: Lazy<LinePattern> =
    Lazy::new(|| LinePattern::new(r"\bselect\s+distinct\b"));

/// Flags `select distinct` on added lines.
#[derive(Debug, Clone)]
pub struct SelectDistinct {
    severity: Severity,
}

impl Default for SelectDistinct {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectDistinct {
    /// Creates the check with its default severity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Overrides the severity for emitted findings.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Check for SelectDistinct {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags SELECT DISTINCT, which often hides join grain problems"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, change: &FileChange) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for line in &change.added_lines {
            let trimmed = line.trim();
            if SELECT_DISTINCT.find(trimmed).is_some() && seen.insert(trimmed) {
                findings.push(
                    Finding::new(
                        NAME,
                        self.severity,
                        &change.path,
                        "SELECT DISTINCT detected - deduplicate upstream or document why \
                         the grain requires it",
                    )
                    .with_line(trimmed),
                );
            }
        }

        findings
    }
}
