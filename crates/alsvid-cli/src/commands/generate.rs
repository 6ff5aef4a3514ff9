//! Generate command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;

use alsvid_route::sequence::{format_sequence, generate_sequence};

/// Execute the generate command.
pub fn execute(qubits: u32, length: usize, seed: u64, output: &str) -> Result<()> {
    anyhow::ensure!(qubits >= 2, "Need at least 2 qubits to form pairs");

    let operations = generate_sequence(qubits, length, seed);
    fs::write(output, format_sequence(&operations))
        .with_context(|| format!("Failed to write sequence file: {output}"))?;

    println!(
        "{} Wrote {} operations over {} qubits (seed {}) to {}",
        style("✓").green().bold(),
        style(operations.len()).yellow(),
        qubits,
        seed,
        style(output).green(),
    );
    Ok(())
}
