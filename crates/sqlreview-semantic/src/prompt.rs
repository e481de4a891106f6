//! Review prompt construction.
//!
//! The rule vocabulary lives in the prompt text, not in any Rust type:
//! adding a category means editing this template.

/// Template for the per-file review prompt.
///
/// `{filename}` and `{sql_content}` are substituted by [`build_prompt`].
const PROMPT_TEMPLATE: &str = r#"You are reviewing a changed dbt SQL model for issues that pattern
matching cannot catch.

File: {filename}

```sql
{sql_content}
```

Look for problems such as:
- BUSINESS_LOGIC: calculations or filters that look wrong or contradictory
- PERFORMANCE_RISK: patterns likely to scan or join far more data than needed
- DATA_QUALITY: missing null handling, implicit casts, silent row loss
- NAMING: columns or CTEs whose names misstate what they contain
- INCREMENTAL_STRATEGY_RISK: incremental logic that can drop or duplicate rows

You may introduce other UPPER_SNAKE rule names when none of the above fit.

Respond with only a JSON array. Each element must be:
{"rule": "<UPPER_SNAKE name>", "severity": "error" | "warning" | "info", "message": "<one sentence>"}

Respond with [] if the model looks fine."#;

/// Builds the review prompt for one file.
#[must_use]
pub fn build_prompt(filename: &str, sql_content: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{filename}", filename)
        .replace("{sql_content}", sql_content)
}
