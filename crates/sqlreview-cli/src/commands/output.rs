//! Shared output formatting for review reports.

use anyhow::Result;
use sqlreview_core::{Finding, Report};

use crate::OutputFormat;

const WIDTH: usize = 62;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Print a review report in the specified format.
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &Report) {
    let (errors, warnings, infos) = report.counts();

    println!("{}", "=".repeat(WIDTH));
    println!("  SQL Review Report");
    println!("{}", "=".repeat(WIDTH));
    println!();
    println!("Files reviewed : {}", report.stats.files_reviewed);
    println!(
        "Lines changed  : +{} / -{}",
        report.stats.lines_added, report.stats.lines_removed
    );
    println!("Total findings : {}", report.total());
    println!();

    if report.total() == 0 {
        println!("No issues found. Looks good!");
        println!();
        println!("{}", "=".repeat(WIDTH));
        return;
    }

    print_bucket("ERRORS", RED, &report.errors);
    print_bucket("WARNINGS", YELLOW, &report.warnings);
    print_bucket("INFOS", BLUE, &report.infos);

    println!("{}", "=".repeat(WIDTH));
    println!("  Summary");
    println!("{}", "=".repeat(WIDTH));
    if errors > 0 {
        println!(
            "{RED}FAILED{RESET}  - {errors} error(s)  |  {warnings} warning(s)  |  {infos} info(s)"
        );
    } else {
        println!(
            "{GREEN}PASSED{RESET}  - 0 errors  |  {warnings} warning(s)  |  {infos} info(s)"
        );
    }
    println!("{}", "=".repeat(WIDTH));
}

fn print_bucket(label: &str, color: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    println!("{}", "-".repeat(WIDTH));
    println!("{color}{label}  ({}){RESET}", findings.len());
    println!("{}", "-".repeat(WIDTH));

    for finding in findings {
        println!(
            "[{}] {}",
            finding.severity.to_string().to_uppercase(),
            finding.rule
        );
        println!("  File    : {}", finding.file);
        if let Some(line) = &finding.line {
            println!("  Line    : {}", snippet(line));
        }
        println!("  Message : {}", finding.message);
        println!();
    }
}

/// Truncates long offending lines for terminal display.
fn snippet(line: &str) -> String {
    const MAX: usize = 80;
    if line.chars().count() > MAX {
        let head: String = line.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        line.to_string()
    }
}

fn print_json(report: &Report) -> Result<()> {
    let payload = serde_json::json!({
        "status": report.status(),
        "stats": report.stats,
        "errors": report.errors,
        "warnings": report.warnings,
        "infos": report.infos,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_compact(report: &Report) {
    for finding in report.iter() {
        println!("{finding}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_truncates_long_lines() {
        let long = "x".repeat(120);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), 83);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn snippet_leaves_short_lines_alone() {
        assert_eq!(snippet("select 1"), "select 1");
    }
}
