//! Check that flags joins with no join condition.
//!
//! # Rationale
//!
//! A `JOIN` with no `ON` or `USING` clause multiplies row counts. The ON
//! clause frequently sits on the line after the join, so the check reads a
//! bounded one-line-ahead window over the added lines before reporting.
//! `CROSS JOIN` states cartesian intent explicitly and is exempt.

use crate::pattern::{mask_templating, LinePattern};
use once_cell::sync::Lazy;
use sqlreview_core::{Check, FileChange, Finding, Severity};
use std::collections::HashSet;

/// Rule name for the cartesian join check.
pub const NAME: &str = "CARTESIAN_JOIN";

static JOIN: Lazy<LinePattern> = Lazy::new(|| LinePattern::new(r"\bjoin\b"));
static CROSS_JOIN: Lazy<LinePattern> = Lazy::new(|| LinePattern::new(r"\bcross\s+join\b"));
static JOIN_CONDITION: Lazy<LinePattern> = Lazy::new(|| LinePattern::new(r"\b(?:on|using)\b"));

/// Flags `JOIN` clauses with no `ON`/`USING` on the same or next added line.
#[derive(Debug, Clone)]
pub struct CartesianJoin {
    severity: Severity,
}

impl Default for CartesianJoin {
    fn default() -> Self {
        Self::new()
    }
}

impl CartesianJoin {
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

impl Check for CartesianJoin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags JOINs with no ON or USING clause on the same or next line"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, change: &FileChange) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for (idx, line) in change.added_lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("--") {
                continue;
            }

            let masked = mask_templating(line);
            if !JOIN.is_match(&masked) || CROSS_JOIN.is_match(&masked) {
                continue;
            }
            if JOIN_CONDITION.is_match(&masked) {
                continue;
            }

            // The condition may continue on the next added line.
            let next_has_condition = change
                .added_lines
                .get(idx + 1)
                .is_some_and(|next| JOIN_CONDITION.is_match(&mask_templating(next)));
            if next_has_condition {
                continue;
            }

            if seen.insert(trimmed) {
                findings.push(
                    Finding::new(
                        NAME,
                        self.severity,
                        &change.path,
                        "JOIN without an ON or USING clause - this produces a cartesian product",
                    )
                    .with_line(trimmed),
                );
            }
        }

        findings
    }
}
