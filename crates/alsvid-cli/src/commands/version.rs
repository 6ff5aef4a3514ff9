//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - qubit mapping and routing for coupling-constrained devices",
        style("Alsvid").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  alsvid-device  Coupling graphs and routing tables");
    println!("  alsvid-route   Placement and routing policies");
    println!("  alsvid-cli     Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/alsvid").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
