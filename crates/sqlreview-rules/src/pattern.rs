//! Narrow predicate interface over text pattern matching.
//!
//! The deterministic checks match text, not grammar. Keeping every
//! predicate behind [`LinePattern`] means a future structural SQL parser
//! can replace the regex layer without touching check orchestration.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Placeholder substituted for `{{ ... }}` expressions before matching.
///
/// Contains none of the keywords the checks look for, so a templated
/// reference can never satisfy a predicate designed to encourage it.
pub const TEMPLATED: &str = "__TEMPLATED__";

static TEMPLATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^}]*\}\}").expect("valid templating pattern"));

/// A compiled, case-insensitive text predicate.
pub struct LinePattern {
    regex: Regex,
}

impl LinePattern {
    /// Compiles a pattern; matching is always case-insensitive.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. All call
    /// sites pass string literals covered by tests.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self {
            regex: Regex::new(&format!("(?i){pattern}")).expect("valid check pattern"),
        }
    }

    /// Returns the byte span of the first match, if any.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }

    /// Returns true when the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the text of the given capture group in the first match.
    #[must_use]
    pub fn capture<'t>(&self, text: &'t str, group: usize) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|c| c.get(group))
            .map(|m| m.as_str())
    }
}

/// Replaces `{{ ... }}` expressions with [`TEMPLATED`] so templated
/// references are invisible to the predicates.
#[must_use]
pub fn mask_templating(line: &str) -> String {
    TEMPLATING.replace_all(line, TEMPLATED).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_match_span() {
        let p = LinePattern::new(r"\bselect\b");
        assert_eq!(p.find("  select 1"), Some(2..8));
        assert_eq!(p.find("inserted"), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let p = LinePattern::new(r"\bjoin\b");
        assert!(p.is_match("LEFT JOIN orders"));
        assert!(p.is_match("left join orders"));
    }

    #[test]
    fn capture_extracts_groups() {
        let p = LinePattern::new(r"from\s+(\w+)\.(\w+)");
        assert_eq!(p.capture("FROM prod.users", 1), Some("prod"));
        assert_eq!(p.capture("FROM prod.users", 2), Some("users"));
    }

    #[test]
    fn mask_hides_templated_expressions() {
        let masked = mask_templating("from {{ ref('stg_orders') }} o");
        assert_eq!(masked, format!("from {TEMPLATED} o"));
    }

    #[test]
    fn mask_handles_multiple_expressions() {
        let masked = mask_templating("{{ a }} join {{ b }}");
        assert!(!masked.contains("{{"));
    }

    #[test]
    fn mask_leaves_plain_lines_untouched() {
        assert_eq!(mask_templating("select 1"), "select 1");
    }
}
