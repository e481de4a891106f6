//! Check that flags hardcoded schema references.
//!
//! # Rationale
//!
//! A literal `schema.table` in `FROM` or `JOIN` bypasses the project's
//! lineage graph and breaks environment promotion. Models should go
//! through `{{ ref() }}`, raw tables through `{{ source() }}`. Templated
//! expressions are masked before matching so the rule can never fire on
//! the references it exists to encourage.

use crate::pattern::{mask_templating, LinePattern};
use once_cell::sync::Lazy;
use sqlreview_core::{Check, FileChange, Finding, Severity};
use std::collections::HashSet;

/// Rule name for the hardcoded schema reference check.
pub const NAME: &str = "HARDCODED_SCHEMA";

static SCHEMA_REF: Lazy<LinePattern> = Lazy::new(|| {
    LinePattern::new(r"\b(?:from|join)\s+([a-zA-Z_][a-zA-Z0-9_]*)\.([a-zA-Z_][a-zA-Z0-9_]*)")
});

/// Flags `schema.table` references inside `FROM`/`JOIN` on added lines.
#[derive(Debug, Clone)]
pub struct HardcodedSchema {
    severity: Severity,
}

impl Default for HardcodedSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl HardcodedSchema {
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

impl Check for HardcodedSchema {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags schema.table references not wrapped in ref() or source()"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, change: &FileChange) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for line in &change.added_lines {
            let trimmed = line.trim();
            if trimmed.starts_with("--") {
                continue;
            }

            let masked = mask_templating(line);
            let (Some(schema), Some(table)) =
                (SCHEMA_REF.capture(&masked, 1), SCHEMA_REF.capture(&masked, 2))
            else {
                continue;
            };

            if seen.insert(trimmed) {
                findings.push(
                    Finding::new(
                        NAME,
                        self.severity,
                        &change.path,
                        format!(
                            "Hardcoded schema reference \"{schema}.{table}\" - use \
                             {{{{ ref() }}}} for dbt models or {{{{ source() }}}} for raw tables"
                        ),
                    )
                    .with_line(trimmed),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(lines: &[&str]) -> FileChange {
        FileChange {
            path: "models/orders.sql".to_string(),
            added_lines: lines.iter().map(ToString::to_string).collect(),
            removed_lines: Vec::new(),
            full_content: lines.join("\n"),
        }
    }

    #[test]
    fn flags_schema_reference_in_from() {
        let findings = HardcodedSchema::new().check(&change(&["select * from prod.customers"]));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("prod.customers"));
    }

    #[test]
    fn flags_schema_reference_in_join() {
        let findings = HardcodedSchema::new().check(&change(&["join analytics.orders o"]));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("analytics.orders"));
    }

    #[test]
    fn templated_reference_does_not_fire() {
        let findings =
            HardcodedSchema::new().check(&change(&["from {{ ref('stg_orders') }} o"]));
        assert!(findings.is_empty());
    }

    #[test]
    fn templated_source_does_not_fire() {
        let findings = HardcodedSchema::new()
            .check(&change(&["from {{ source('raw', 'customers') }} c"]));
        assert!(findings.is_empty());
    }

    #[test]
    fn comment_lines_are_skipped() {
        let findings = HardcodedSchema::new().check(&change(&["-- from prod.customers"]));
        assert!(findings.is_empty());
    }

    #[test]
    fn alias_dot_column_in_select_list_is_not_a_reference() {
        let findings = HardcodedSchema::new().check(&change(&["select o.amount"]));
        assert!(findings.is_empty());
    }

    #[test]
    fn repeated_identical_lines_emit_one_finding() {
        let findings = HardcodedSchema::new()
            .check(&change(&["from prod.users", "from prod.users"]));
        assert_eq!(findings.len(), 1);
    }
}
