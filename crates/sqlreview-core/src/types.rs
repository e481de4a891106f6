//! Core types for review findings.

use serde::{Deserialize, Serialize};

/// Severity level for review findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, does not fail the review.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed before merge.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Error returned when parsing an unrecognized severity string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0:?}")]
pub struct ParseSeverityError(String);

impl std::str::FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses a severity name, case-insensitively.
    ///
    /// The semantic collaborator reports severities as free-form strings;
    /// callers decide how to degrade on parse failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// A single issue reported by a check or by the semantic collaborator.
///
/// The `rule` identifier is an open set: built-in checks use stable
/// UPPER_SNAKE names, while the semantic collaborator may introduce new
/// names without any change to this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier (e.g., "SELECT_STAR").
    pub rule: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Path of the file the finding applies to; empty for project-level findings.
    pub file: String,
    /// Trimmed offending source line, or `None` for file-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Human-readable explanation, never empty.
    pub message: String,
}

impl Finding {
    /// Creates a new file-level finding without an offending line.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Attaches the offending source line, trimmed.
    #[must_use]
    pub fn with_line(mut self, line: impl AsRef<str>) -> Self {
        self.line = Some(line.as_ref().trim().to_string());
        self
    }

    /// Returns the deduplication key: identical `(rule, file, line)` triples
    /// describe the same literal issue.
    #[must_use]
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.rule, &self.file, self.line.as_deref().unwrap_or(""))
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.file, self.severity, self.rule, self.message
        )?;
        if let Some(line) = &self.line {
            write!(f, " (line: {line})")?;
        }
        Ok(())
    }
}
