//! Check set assembly.

use crate::wide_select::DEFAULT_MAX_COLUMNS;
use crate::{
    wide_select, CartesianJoin, HardcodedSchema, MissingRef, SelectDistinct, SelectStar,
    WideSelect,
};
use sqlreview_core::{CheckBox, Config};

/// Returns every built-in check with default settings.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(SelectStar::new()),
        Box::new(HardcodedSchema::new()),
        Box::new(MissingRef::new()),
        Box::new(SelectDistinct::new()),
        Box::new(CartesianJoin::new()),
        Box::new(WideSelect::new()),
    ]
}

/// Returns every built-in check with per-rule options applied from config.
///
/// Only rule-specific options are handled here; enablement and severity
/// overrides are the engine's job.
#[must_use]
pub fn configured_checks(config: &Config) -> Vec<CheckBox> {
    let mut wide = WideSelect::new();
    if let Some(rule_config) = config.rules.get(wide_select::NAME) {
        let max = rule_config.get_int("max_columns", as_i64(DEFAULT_MAX_COLUMNS));
        wide = wide.max_columns(usize::try_from(max).unwrap_or(DEFAULT_MAX_COLUMNS));
    }

    vec![
        Box::new(SelectStar::new()),
        Box::new(HardcodedSchema::new()),
        Box::new(MissingRef::new()),
        Box::new(SelectDistinct::new()),
        Box::new(CartesianJoin::new()),
        Box::new(wide),
    ]
}

fn as_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlreview_core::{Check, FileChange};

    #[test]
    fn all_checks_are_registered() {
        let names: Vec<&str> = all_checks().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "SELECT_STAR",
                "HARDCODED_SCHEMA",
                "MISSING_REF",
                "SELECT_DISTINCT",
                "CARTESIAN_JOIN",
                "TOO_MANY_COLUMNS",
            ]
        );
    }

    #[test]
    fn rule_names_are_stable_upper_snake() {
        for check in all_checks() {
            let name = check.name();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit()));
            assert!(!check.description().is_empty());
        }
    }

    #[test]
    fn configured_checks_apply_max_columns_option() {
        let config = Config::parse("[rules.TOO_MANY_COLUMNS]\nmax_columns = 2\n")
            .expect("valid config");
        let checks = configured_checks(&config);

        let wide = checks
            .iter()
            .find(|c| c.name() == wide_select::NAME)
            .expect("wide select registered");
        let content = "select a, b, c from t";
        let change = FileChange {
            path: "models/a.sql".to_string(),
            added_lines: vec![content.to_string()],
            removed_lines: Vec::new(),
            full_content: content.to_string(),
        };
        assert_eq!(wide.check(&change).len(), 1);
    }
}
