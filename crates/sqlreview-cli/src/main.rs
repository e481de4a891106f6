//! sqlreview CLI tool.
//!
//! Usage:
//! ```bash
//! git diff | sqlreview check
//! sqlreview check --diff changes.diff --no-semantic
//! sqlreview list-rules
//! sqlreview init
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Reviews SQL model changes with deterministic rules and model-backed analysis
#[derive(Parser)]
#[command(name = "sqlreview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a unified diff
    Check {
        /// Path to a diff file; reads stdin when omitted
        #[arg(long)]
        diff: Option<PathBuf>,

        /// Skip model-backed semantic checks
        #[arg(long)]
        no_semantic: bool,

        /// Model used for semantic checks
        #[arg(long)]
        model: Option<String>,

        /// API key for semantic checks
        #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for review reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Reports go to stdout; diagnostics must not interleave with them.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            diff,
            no_semantic,
            model,
            api_key,
            format,
        } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            commands::check::run(
                diff.as_deref(),
                no_semantic,
                model,
                api_key,
                format,
                &source,
            )
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    };

    // Exit code 2 marks operational failures; finding-driven failures
    // exit 1 from inside the check command.
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(2);
    }
}
