//! Configuration types for sqlreview.

use crate::types::Severity;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for sqlreview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File suffix selecting which diff sections are reviewed.
    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    /// When true, only deterministic checks run and the semantic
    /// collaborator is never invoked.
    #[serde(default)]
    pub skip_semantic: bool,

    /// Semantic collaborator settings.
    #[serde(default)]
    pub semantic: SemanticSettings,

    /// Per-rule configurations, keyed by rule name (e.g., "SELECT_STAR").
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_extension: default_target_extension(),
            skip_semantic: false,
            semantic: SemanticSettings::default(),
            rules: HashMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Settings for the semantic collaborator.
///
/// The API key is deliberately absent: it resolves from the environment or
/// a CLI flag, never from a checked-in config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticSettings {
    /// Model identifier override.
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_target_extension() -> String {
    ".sql".to_string()
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_sql_files() {
        let config = Config::default();
        assert_eq!(config.target_extension, ".sql");
        assert!(!config.skip_semantic);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn parse_config() {
        let toml = r#"
target_extension = ".sql"
skip_semantic = true

[semantic]
model = "claude-haiku-4-5-20251001"

[rules.SELECT_STAR]
enabled = true
severity = "warning"

[rules.TOO_MANY_COLUMNS]
max_columns = 40
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert!(config.skip_semantic);
        assert_eq!(
            config.semantic.model.as_deref(),
            Some("claude-haiku-4-5-20251001")
        );
        assert_eq!(config.rule_severity("SELECT_STAR"), Some(Severity::Warning));
        assert!(config.is_rule_enabled("SELECT_STAR"));

        let rule_config = config.rules.get("TOO_MANY_COLUMNS").expect("rule present");
        assert_eq!(rule_config.get_int("max_columns", 25), 40);
    }

    #[test]
    fn unknown_rules_default_to_enabled_with_no_override() {
        let config = Config::default();
        assert!(config.is_rule_enabled("SELECT_STAR"));
        assert!(config.rule_severity("SELECT_STAR").is_none());
    }

    #[test]
    fn disabled_rule_is_reported_disabled() {
        let config = Config::parse("[rules.MISSING_REF]\nenabled = false\n").expect("parse");
        assert!(!config.is_rule_enabled("MISSING_REF"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("target_extension = [").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
