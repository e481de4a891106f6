//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# sqlreview configuration

# File suffix selecting which diff sections are reviewed
target_extension = ".sql"

# Skip model-backed semantic checks entirely
skip_semantic = false

[semantic]
# model = "claude-haiku-4-5-20251001"
# base_url = "https://api.anthropic.com/v1"

# Rule configurations
# Each rule can be disabled and have its severity overridden

[rules.SELECT_DISTINCT]
enabled = true
# severity = "info"  # Override default severity

# [rules.TOO_MANY_COLUMNS]
# max_columns = 40
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("sqlreview.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created sqlreview.toml");
    println!("\nNext steps:");
    println!("  1. Edit sqlreview.toml to configure rules");
    println!("  2. Run: git diff | sqlreview check");

    Ok(())
}
