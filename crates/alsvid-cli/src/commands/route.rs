//! Route command implementation.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use alsvid_device::RoutingTable;
use alsvid_route::{Placer, RouteContext, RouteReport};

use crate::{PolicyChoice, StrategyChoice};

use super::common;

/// Inputs for the route command.
pub struct RouteArgs {
    pub topology: Option<String>,
    pub device: Option<String>,
    pub directed: bool,
    pub sequence: Option<String>,
    pub random: Option<usize>,
    pub seed: u64,
    pub policy: PolicyChoice,
    pub pins: Vec<u32>,
    pub cost_model: Option<String>,
    pub strategy: StrategyChoice,
    pub trace: bool,
    pub export: Option<String>,
}

/// Execute the route command.
pub fn execute(args: &RouteArgs) -> Result<()> {
    let graph = common::load_graph(
        args.topology.as_deref(),
        args.device.as_deref(),
        args.directed,
    )?;
    let table = RoutingTable::build(&graph).context("Device rejected")?;

    println!(
        "{} Routing on {} sites, {} edges",
        style("→").cyan().bold(),
        style(graph.num_sites()).green(),
        style(graph.num_edges()).green(),
    );

    let parsed = common::load_sequence(
        args.sequence.as_deref(),
        args.random,
        args.seed,
        graph.num_sites() as u32,
    )?;
    println!(
        "  Loaded: {} operations, {} barriers",
        parsed.operations.len(),
        parsed.barriers
    );

    let cost_model = common::load_cost_model(args.cost_model.as_deref())?;
    let placer = Placer::new(common::frequency_strategy(args.strategy));
    let mut mapping = placer.place(&graph, &parsed.operations)?;
    let initial = mapping.clone();
    println!("  Initial mapping: {initial}");

    let policy = common::build_policy(args.policy, &args.pins);
    let ctx = RouteContext::new(&graph, &table, &cost_model).with_trace(args.trace);
    let outcome = policy
        .run(&ctx, &mut mapping, &parsed.operations)
        .with_context(|| format!("{} failed", policy.name()))?;

    println!("{} Routing complete", style("✓").green().bold());
    println!(
        "  Cost: {} ({} swaps, {} bridges, {} detours)",
        style(outcome.cost).yellow().bold(),
        outcome.swaps,
        outcome.bridges,
        outcome.detours,
    );

    if args.trace {
        if let Some(snapshots) = &outcome.trace {
            for (op, snapshot) in parsed.operations.iter().zip(snapshots) {
                println!("  {op}: {snapshot}");
            }
        }
    }

    let report = RouteReport::new(policy.name(), &graph, initial, parsed.barriers, outcome);
    if let Some(export) = &args.export {
        report.to_file(Path::new(export))?;
        println!("  Report: {}", style(export).green());
    }

    Ok(())
}
