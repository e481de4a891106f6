//! Deduplication, grouping, and status computation for findings.

use crate::diff::FileChange;
use crate::types::{Finding, Severity};

use serde::Serialize;
use std::collections::HashSet;

/// Terminal status of a review run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// No error-severity findings.
    Passing,
    /// At least one error-severity finding.
    Failing,
}

impl ReviewStatus {
    /// Returns the process exit code for this status.
    ///
    /// Exit code 2 is reserved by the CLI for operational failures that
    /// never reach the core.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Passing => 0,
            Self::Failing => 1,
        }
    }
}

/// Change statistics surfaced in the report header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    /// Number of files reviewed.
    pub files_reviewed: usize,
    /// Total lines added across all reviewed files.
    pub lines_added: usize,
    /// Total lines removed across all reviewed files.
    pub lines_removed: usize,
}

impl ReviewStats {
    /// Derives statistics from the parsed file changes.
    #[must_use]
    pub fn from_changes(changes: &[FileChange]) -> Self {
        Self {
            files_reviewed: changes.len(),
            lines_added: changes.iter().map(|c| c.added_lines.len()).sum(),
            lines_removed: changes.iter().map(|c| c.removed_lines.len()).sum(),
        }
    }
}

/// Findings grouped by severity, plus run statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Error-severity findings; any entry here fails the review.
    pub errors: Vec<Finding>,
    /// Warning-severity findings.
    pub warnings: Vec<Finding>,
    /// Info-severity findings.
    pub infos: Vec<Finding>,
    /// Statistics about the reviewed changes.
    pub stats: ReviewStats,
}

impl Report {
    /// Returns the terminal status: failing iff the error bucket is non-empty.
    #[must_use]
    pub fn status(&self) -> ReviewStatus {
        if self.errors.is_empty() {
            ReviewStatus::Passing
        } else {
            ReviewStatus::Failing
        }
    }

    /// Returns the total number of findings across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.infos.len()
    }

    /// Returns `(errors, warnings, infos)` counts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.errors.len(), self.warnings.len(), self.infos.len())
    }

    /// Iterates all findings in severity order (errors first).
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.infos.iter())
    }
}

/// Deduplicates, groups, and orders findings.
///
/// Pure and idempotent: the same multiset of findings, in any order,
/// produces the same report. Exact duplicate `(rule, file, line)` triples
/// are dropped via a set scoped to this call; each severity bucket is then
/// re-sorted by `(file, rule, line)`, which is the documented deterministic
/// ordering choice, so neither check execution order nor collaborator
/// arrival order is observable.
#[must_use]
pub fn aggregate(findings: Vec<Finding>, stats: ReviewStats) -> Report {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut report = Report {
        stats,
        ..Report::default()
    };

    for finding in findings {
        let (rule, file, line) = finding.key();
        if !seen.insert((rule.to_string(), file.to_string(), line.to_string())) {
            continue;
        }
        match finding.severity {
            Severity::Error => report.errors.push(finding),
            Severity::Warning => report.warnings.push(finding),
            Severity::Info => report.infos.push(finding),
        }
    }

    for bucket in [&mut report.errors, &mut report.warnings, &mut report.infos] {
        bucket.sort_by(|a, b| a.key().cmp(&b.key()));
    }

    report
}
