//! Check that flags bare dbt model names.
//!
//! # Rationale
//!
//! Referencing a model by its table name (`stg_orders`) instead of
//! `{{ ref('stg_orders') }}` hides the edge from the dependency graph, so
//! builds can run out of order and lineage tooling goes blind.

use crate::pattern::{mask_templating, LinePattern};
use once_cell::sync::Lazy;
use sqlreview_core::{Check, FileChange, Finding, Severity};
use std::collections::HashSet;

/// Rule name for the missing ref() check.
pub const NAME: &str = "MISSING_REF";

static BARE_MODEL: Lazy<LinePattern> = Lazy::new(|| {
    LinePattern::new(r"\b(?:from|join)\s+((?:stg|fct|dim|int|mart|base)_[a-zA-Z0-9_]+)\b")
});

/// Flags model-prefixed names used directly in `FROM`/`JOIN` without `ref()`.
#[derive(Debug, Clone)]
pub struct MissingRef {
    severity: Severity,
}

impl Default for MissingRef {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingRef {
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

impl Check for MissingRef {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags dbt model names used in FROM/JOIN without ref()"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, change: &FileChange) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for line in &change.added_lines {
            if line.contains("ref(") {
                continue;
            }

            let trimmed = line.trim();
            let masked = mask_templating(line);
            let Some(model) = BARE_MODEL.capture(&masked, 1) else {
                continue;
            };

            if seen.insert(trimmed) {
                findings.push(
                    Finding::new(
                        NAME,
                        self.severity,
                        &change.path,
                        format!(
                            "Direct reference to dbt model \"{model}\" - use \
                             {{{{ ref('{model}') }}}} to track lineage"
                        ),
                    )
                    .with_line(trimmed),
                );
            }
        }

        findings
    }
}
