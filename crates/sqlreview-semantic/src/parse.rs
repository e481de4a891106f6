//! Parsing model completions into findings.
//!
//! The model is asked for a JSON array of `{rule, severity, message}`
//! objects, but completions routinely arrive wrapped in prose or markdown
//! fences. Extraction is forgiving; the rule vocabulary is an open set so
//! new categories can be introduced by editing the prompt alone.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use sqlreview_core::{Finding, Severity};

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("valid fence pattern"));

/// One entry of the model's findings array, before validation.
#[derive(Debug, Deserialize)]
struct RawFinding {
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    message: String,
}

/// Returns the first JSON array in the completion text.
///
/// Prefers a fenced block; otherwise falls back to the outermost
/// bracket pair, then to the trimmed text itself.
fn extract_json_array(text: &str) -> &str {
    if let Some(fenced) = JSON_FENCE.captures(text).and_then(|c| c.get(1)) {
        return fenced.as_str().trim();
    }
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

/// Maps a completion to findings for `file`.
///
/// Returns `None` when no JSON array can be parsed. Entries with an empty
/// message are dropped; a missing rule becomes `"UNKNOWN"`; severities
/// outside the known vocabulary degrade to [`Severity::Info`].
#[must_use]
pub fn findings_from_response(completion: &str, file: &str) -> Option<Vec<Finding>> {
    let json_text = extract_json_array(completion);
    let raw: Vec<RawFinding> = serde_json::from_str(json_text).ok()?;

    Some(
        raw.into_iter()
            .filter(|entry| !entry.message.trim().is_empty())
            .map(|entry| {
                let severity = entry
                    .severity
                    .as_deref()
                    .and_then(|s| s.parse::<Severity>().ok())
                    .unwrap_or(Severity::Info);
                Finding::new(
                    entry.rule.unwrap_or_else(|| "UNKNOWN".to_string()),
                    severity,
                    file,
                    entry.message,
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "models/orders.sql";

    #[test]
    fn parses_a_bare_json_array() {
        let completion = r#"[{"rule": "BUSINESS_LOGIC", "severity": "warning", "message": "m"}]"#;
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "BUSINESS_LOGIC");
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].file, FILE);
    }

    #[test]
    fn parses_a_fenced_array() {
        let completion = "Here are my findings:\n```json\n[{\"rule\": \"R\", \"severity\": \"error\", \"message\": \"m\"}]\n```\nDone.";
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn parses_an_array_surrounded_by_prose() {
        let completion = "I found one issue. [{\"rule\": \"R\", \"severity\": \"info\", \"message\": \"m\"}] Let me know.";
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn empty_array_yields_no_findings() {
        let findings = findings_from_response("[]", FILE).expect("parseable");
        assert!(findings.is_empty());
    }

    #[test]
    fn prose_without_json_is_rejected() {
        assert!(findings_from_response("Everything looks good to me.", FILE).is_none());
    }

    #[test]
    fn unknown_severity_degrades_to_info() {
        let completion = r#"[{"rule": "R", "severity": "catastrophic", "message": "m"}]"#;
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn missing_rule_becomes_unknown() {
        let completion = r#"[{"severity": "info", "message": "m"}]"#;
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings[0].rule, "UNKNOWN");
    }

    #[test]
    fn entries_without_a_message_are_dropped() {
        let completion = r#"[{"rule": "R", "severity": "error", "message": ""}, {"rule": "S", "severity": "info", "message": "kept"}]"#;
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "S");
    }

    #[test]
    fn novel_rule_names_pass_through_unchanged() {
        let completion = r#"[{"rule": "INCREMENTAL_STRATEGY_RISK", "severity": "warning", "message": "m"}]"#;
        let findings = findings_from_response(completion, FILE).expect("parseable");
        assert_eq!(findings[0].rule, "INCREMENTAL_STRATEGY_RISK");
    }
}
