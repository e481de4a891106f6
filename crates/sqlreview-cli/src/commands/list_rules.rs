//! List rules command implementation.

use sqlreview_core::Check;
use sqlreview_rules::all_checks;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<20} {:<10} Description", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for check in all_checks() {
        println!(
            "{:<20} {:<10} {}",
            check.name(),
            check.default_severity(),
            check.description()
        );
    }

    println!("\nDisable a rule or override its severity in sqlreview.toml:");
    println!("  [rules.SELECT_DISTINCT]");
    println!("  enabled = false");
}
