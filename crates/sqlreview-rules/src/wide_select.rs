//! File-scoped check that flags very wide select lists.
//!
//! # Rationale
//!
//! A model selecting dozens of columns in one statement is usually doing
//! several models' jobs. The check extracts the first `SELECT ... FROM`
//! span of the reconstructed file content and counts comma-separated
//! items; commas inside function calls inflate the count slightly, an
//! accepted cost of text-level matching.

use crate::pattern::LinePattern;
use once_cell::sync::Lazy;
use sqlreview_core::{Check, FileChange, Finding, Severity};

/// Rule name for the wide select list check.
pub const NAME: &str = "TOO_MANY_COLUMNS";

/// Default select-list item threshold.
pub const DEFAULT_MAX_COLUMNS: usize = 25;

static SELECT_SPAN: Lazy<LinePattern> =
    Lazy::new(|| LinePattern::new(r"(?s)\bselect\b(.*?)\bfrom\b"));

/// Flags models whose first select list exceeds a column threshold.
#[derive(Debug, Clone)]
pub struct WideSelect {
    severity: Severity,
    max_columns: usize,
}

impl Default for WideSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl WideSelect {
    /// Creates the check with its default severity and threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Info,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }

    /// Sets the select-list item threshold.
    #[must_use]
    pub fn max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    /// Overrides the severity for emitted findings.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Check for WideSelect {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags models whose first select list exceeds a column threshold"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, change: &FileChange) -> Vec<Finding> {
        // No anchor pair means no finding, not an error.
        let Some(span) = SELECT_SPAN.capture(&change.full_content, 1) else {
            return Vec::new();
        };

        let count = span.split(',').count();
        if count <= self.max_columns {
            return Vec::new();
        }

        vec![Finding::new(
            NAME,
            self.severity,
            &change.path,
            format!(
                "Select list has {count} items (threshold {}) - consider narrowing \
                 the model or splitting it",
                self.max_columns
            ),
        )]
    }
}
