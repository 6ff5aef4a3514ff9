//! Compare command implementation: run every applicable policy over the
//! same device and report costs side by side.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use alsvid_device::RoutingTable;
use alsvid_route::sequence::ParsedSequence;
use alsvid_route::{
    BridgeRouter, CostModel, PinnedBridgeRouter, Placer, RouteContext, RoutePolicy, SwapRouter,
};

use crate::StrategyChoice;

use super::common;

/// Inputs for the compare command.
pub struct CompareArgs {
    pub topology: Option<String>,
    pub device: Option<String>,
    pub directed: bool,
    pub sequence: Option<String>,
    pub dir: Option<String>,
    pub random: Option<usize>,
    pub seed: u64,
    pub pins: Vec<u32>,
    pub cost_model: Option<String>,
    pub strategy: StrategyChoice,
}

/// One policy's accumulated results across a batch.
struct PolicyTotals {
    name: String,
    cost: u64,
    swaps: u64,
    bridges: u64,
    detours: u64,
    failures: usize,
}

/// Execute the compare command.
pub fn execute(args: &CompareArgs) -> Result<()> {
    let graph = common::load_graph(
        args.topology.as_deref(),
        args.device.as_deref(),
        args.directed,
    )?;
    let table = RoutingTable::build(&graph).context("Device rejected")?;
    let cost_model = common::load_cost_model(args.cost_model.as_deref())?;

    println!(
        "{} Comparing policies on {} sites, {} edges",
        style("→").cyan().bold(),
        style(graph.num_sites()).green(),
        style(graph.num_edges()).green(),
    );

    let sequences = collect_sequences(args, graph.num_sites() as u32)?;
    let total_ops: usize = sequences.iter().map(|s| s.operations.len()).sum();
    let total_barriers: usize = sequences.iter().map(|s| s.barriers).sum();
    println!(
        "  Input: {} sequences, {} operations, {} barriers",
        sequences.len(),
        total_ops,
        total_barriers
    );

    let policies = build_policies(&args.pins);
    let mut totals: Vec<PolicyTotals> = policies
        .iter()
        .map(|p| PolicyTotals {
            name: p.name().to_string(),
            cost: 0,
            swaps: 0,
            bridges: 0,
            detours: 0,
            failures: 0,
        })
        .collect();

    let placer = Placer::new(common::frequency_strategy(args.strategy));
    let bar = batch_progress(sequences.len());

    for parsed in &sequences {
        let placed = placer.place(&graph, &parsed.operations)?;
        let ctx = RouteContext::new(&graph, &table, &cost_model);

        for (policy, total) in policies.iter().zip(totals.iter_mut()) {
            let mut mapping = placed.clone();
            match policy.run(&ctx, &mut mapping, &parsed.operations) {
                Ok(outcome) => {
                    total.cost += outcome.cost;
                    total.swaps += outcome.swaps;
                    total.bridges += outcome.bridges;
                    total.detours += outcome.detours;
                }
                Err(e) => {
                    total.failures += 1;
                    tracing::warn!(policy = policy.name(), error = %e, "run failed");
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    print_table(&totals);
    Ok(())
}

/// Gather the input sequences: a single file, a directory of `.seq` files,
/// or one generated sequence.
fn collect_sequences(args: &CompareArgs, num_qubits: u32) -> Result<Vec<ParsedSequence>> {
    if let Some(dir) = &args.dir {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {dir}"))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "seq"))
            .collect();
        paths.sort();
        anyhow::ensure!(!paths.is_empty(), "No .seq files in {dir}");

        return paths
            .iter()
            .map(|path| common::load_sequence_file(path))
            .collect();
    }

    let parsed = common::load_sequence(args.sequence.as_deref(), args.random, args.seed, num_qubits)?;
    Ok(vec![parsed])
}

/// The policy lineup: swap and bridge always, pinned when pins are given.
fn build_policies(pins: &[u32]) -> Vec<Box<dyn RoutePolicy>> {
    let mut policies: Vec<Box<dyn RoutePolicy>> = vec![Box::new(SwapRouter), Box::new(BridgeRouter)];
    if !pins.is_empty() {
        policies.push(Box::new(PinnedBridgeRouter::new(pins.iter().copied())));
    }
    policies
}

fn batch_progress(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("  [{bar:30}] {pos}/{len} sequences")
            .expect("static template")
            .progress_chars("=> "),
    );
    bar
}

fn print_table(totals: &[PolicyTotals]) {
    println!();
    println!(
        "  {:<22} {:>10} {:>8} {:>8} {:>8} {:>9}",
        style("Policy").bold(),
        style("Cost").bold(),
        style("Swaps").bold(),
        style("Bridges").bold(),
        style("Detours").bold(),
        style("Failures").bold(),
    );

    let best = totals
        .iter()
        .filter(|t| t.failures == 0)
        .map(|t| t.cost)
        .min();

    for total in totals {
        let cost = if Some(total.cost) == best {
            style(total.cost.to_string()).green().bold()
        } else {
            style(total.cost.to_string()).yellow()
        };
        println!(
            "  {:<22} {:>10} {:>8} {:>8} {:>8} {:>9}",
            total.name, cost, total.swaps, total.bridges, total.detours, total.failures,
        );
    }
}
