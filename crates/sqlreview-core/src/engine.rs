//! Rule engine for orchestrating check execution.

use crate::check::{Check, CheckBox};
use crate::config::Config;
use crate::diff::FileChange;
use crate::types::Finding;

use tracing::{debug, info};

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    checks: Vec<CheckBox>,
    config: Option<Config>,
}

impl EngineBuilder {
    /// Creates a new builder with no checks registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a check.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Registers a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Registers several boxed checks at once.
    #[must_use]
    pub fn check_boxes(mut self, checks: impl IntoIterator<Item = CheckBox>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets the configuration used for rule enablement and severity overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            checks: self.checks,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Runs a statically registered set of checks over file changes.
///
/// Checks are mutually independent; the engine runs all checks for one
/// file before moving to the next, but the returned collection is
/// unordered by contract. Ordering is imposed later by
/// [`aggregate`](crate::aggregate::aggregate), so execution order is never
/// observable in the output.
pub struct Engine {
    checks: Vec<CheckBox>,
    config: Config,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Applies every enabled check to every file change.
    ///
    /// Disabled rules are skipped; configured severity overrides are
    /// applied here so individual checks keep their baked-in defaults.
    #[must_use]
    pub fn run(&self, changes: &[FileChange]) -> Vec<Finding> {
        let mut findings = Vec::new();

        for change in changes {
            debug!("checking {}", change.path);
            for check in &self.checks {
                if !self.config.is_rule_enabled(check.name()) {
                    debug!("skipping disabled rule: {}", check.name());
                    continue;
                }

                let mut emitted = check.check(change);
                if let Some(severity) = self.config.rule_severity(check.name()) {
                    for finding in &mut emitted {
                        finding.severity = severity;
                    }
                }
                findings.extend(emitted);
            }
        }

        info!(
            findings = findings.len(),
            files = changes.len(),
            checks = self.checks.len(),
            "deterministic checks complete"
        );
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    struct MatchEverything;

    impl Check for MatchEverything {
        fn name(&self) -> &'static str {
            "MATCH_EVERYTHING"
        }
        fn default_severity(&self) -> Severity {
            Severity::Error
        }
        fn check(&self, change: &FileChange) -> Vec<Finding> {
            vec![Finding::new(
                self.name(),
                self.default_severity(),
                &change.path,
                "matched",
            )]
        }
    }

    fn change(path: &str) -> FileChange {
        FileChange {
            path: path.to_string(),
            added_lines: Vec::new(),
            removed_lines: Vec::new(),
            full_content: String::new(),
        }
    }

    #[test]
    fn runs_every_check_for_every_file() {
        let engine = Engine::builder()
            .check(MatchEverything)
            .check(MatchEverything)
            .build();
        let findings = engine.run(&[change("a.sql"), change("b.sql")]);
        assert_eq!(findings.len(), 4);
    }

    #[test]
    fn disabled_rule_is_skipped() {
        let config = Config::parse("[rules.MATCH_EVERYTHING]\nenabled = false\n")
            .expect("valid config");
        let engine = Engine::builder()
            .check(MatchEverything)
            .config(config)
            .build();
        assert!(engine.run(&[change("a.sql")]).is_empty());
    }

    #[test]
    fn severity_override_is_applied_by_the_engine() {
        let config = Config::parse("[rules.MATCH_EVERYTHING]\nseverity = \"info\"\n")
            .expect("valid config");
        let engine = Engine::builder()
            .check(MatchEverything)
            .config(config)
            .build();
        let findings = engine.run(&[change("a.sql")]);
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn permuting_changes_yields_the_same_finding_set() {
        let engine = Engine::builder().check(MatchEverything).build();
        let forward = engine.run(&[change("a.sql"), change("b.sql")]);
        let mut backward = engine.run(&[change("b.sql"), change("a.sql")]);
        for finding in &forward {
            let pos = backward
                .iter()
                .position(|f| f == finding)
                .expect("finding present under permutation");
            backward.remove(pos);
        }
        assert!(backward.is_empty());
    }
}
