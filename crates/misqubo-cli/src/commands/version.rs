//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Maximum Independent Set as QUBO",
        style("misqubo").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  misqubo-core  Graph builders, QUBO encoding, exhaustive oracle");
    println!("  misqubo-cli   Command-line interface");
    println!();
    println!(
        "Max brute-force dimension: {}",
        style(misqubo_core::MAX_BRUTE_FORCE_DIM).yellow()
    );
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
