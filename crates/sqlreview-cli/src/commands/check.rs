//! Check command implementation.

use anyhow::{bail, Context, Result};
use sqlreview_core::{
    aggregate, parse_diff, Config, Engine, FileChange, Finding, ReviewStats, ReviewStatus,
};
use sqlreview_rules::configured_checks;
use sqlreview_semantic::{SemanticConfig, SemanticReviewer, DEFAULT_BASE_URL, DEFAULT_MODEL};

use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    diff: Option<&Path>,
    no_semantic: bool,
    model: Option<String>,
    api_key: Option<String>,
    format: OutputFormat,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;

    let diff_text = read_diff(diff)?;
    if diff_text.trim().is_empty() {
        println!("Empty diff - nothing to review.");
        return Ok(());
    }

    let changes = parse_diff(&diff_text, &config.target_extension);
    if changes.is_empty() {
        println!("No {} files found in diff.", config.target_extension);
        return Ok(());
    }

    let mut builder = Engine::builder().config(config.clone());
    for check in configured_checks(&config) {
        builder = builder.check_box(check);
    }
    let engine = builder.build();

    tracing::info!(
        "Reviewing {} changed file(s) with {} rules",
        changes.len(),
        engine.check_count()
    );

    let mut findings = engine.run(&changes);

    if !(no_semantic || config.skip_semantic) {
        findings.extend(semantic_findings(&config, model, api_key, &changes));
    }

    let report = aggregate(findings, ReviewStats::from_changes(&changes));
    super::output::print(&report, format)?;

    // Exit with error code if there are error-severity findings
    if report.status() == ReviewStatus::Failing {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let path = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", path.display());
            }
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
    }
}

/// Reads the raw diff from a file or from stdin.
fn read_diff(diff: Option<&Path>) -> Result<String> {
    match diff {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read diff file: {}", path.display())),
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("no diff provided - use --diff FILE or pipe from git diff");
            }
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("Failed to read diff from stdin")?;
            Ok(text)
        }
    }
}

/// Runs the semantic collaborator, degrading to zero findings when it is
/// unavailable.
fn semantic_findings(
    config: &Config,
    model: Option<String>,
    api_key: Option<String>,
    changes: &[FileChange],
) -> Vec<Finding> {
    let semantic_config = SemanticConfig {
        model: model
            .or_else(|| config.semantic.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        base_url: config
            .semantic
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        api_key,
        ..SemanticConfig::default()
    };

    match SemanticReviewer::new(semantic_config) {
        Ok(reviewer) => reviewer.analyze_changes(changes),
        Err(error) => {
            tracing::warn!(%error, "skipping semantic checks");
            Vec::new()
        }
    }
}
