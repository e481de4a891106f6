//! Check trait for defining review rules.

use crate::diff::FileChange;
use crate::types::{Finding, Severity};

/// A deterministic review check over one file change.
///
/// Implementations are pure functions: they must not mutate the change,
/// hold state across invocations, or perform I/O, and they must never
/// panic for well-formed input. A check that matches nothing returns an
/// empty vector.
///
/// Checks come in two shapes behind the same trait: line-scoped checks
/// iterate [`FileChange::added_lines`], file-scoped checks inspect
/// [`FileChange::full_content`].
///
/// # Example
///
/// ```ignore
/// use sqlreview_core::{Check, FileChange, Finding, Severity};
///
/// pub struct NoSelectInto;
///
/// impl Check for NoSelectInto {
///     fn name(&self) -> &'static str { "NO_SELECT_INTO" }
///     fn default_severity(&self) -> Severity { Severity::Error }
///
///     fn check(&self, change: &FileChange) -> Vec<Finding> {
///         change
///             .added_lines
///             .iter()
///             .filter(|l| l.to_lowercase().contains("select into"))
///             .map(|l| {
///                 Finding::new(self.name(), self.default_severity(), &change.path, "...")
///                     .with_line(l)
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the stable UPPER_SNAKE rule identifier (e.g., "SELECT_STAR").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this check looks for.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this check.
    fn default_severity(&self) -> Severity;

    /// Inspects a single file change and returns any findings.
    ///
    /// At most one finding per distinct `(file, trimmed line)` pair may be
    /// emitted per check, even when the same literal line appears in
    /// several hunks.
    fn check(&self, change: &FileChange) -> Vec<Finding>;
}

/// Type alias for boxed Check trait objects.
pub type CheckBox = Box<dyn Check>;
