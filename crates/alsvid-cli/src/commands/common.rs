//! Shared helpers for the CLI commands: device/sequence loading and policy
//! construction.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use alsvid_device::{CouplingGraph, Directionality};
use alsvid_route::sequence::{ParsedSequence, generate_sequence, parse_sequence};
use alsvid_route::{
    BridgeRouter, CostModel, FrequencyStrategy, PinnedBridgeRouter, RoutePolicy, SwapRouter,
};

use crate::{PolicyChoice, StrategyChoice};

/// Resolve a named built-in device.
///
/// Sized families take a trailing site count (`ring4`, `linear5`,
/// `star16`, `full8`); `qx4` is the 5-site directed IBM QX4 map.
pub fn builtin_device(name: &str) -> Result<CouplingGraph> {
    let name = name.to_lowercase();
    match name.as_str() {
        "qx4" | "ibmqx4" => return Ok(CouplingGraph::ibmqx4()),
        _ => {}
    }

    for (prefix, build) in [
        ("ring", CouplingGraph::ring as fn(u32) -> CouplingGraph),
        ("linear", CouplingGraph::linear),
        ("star", CouplingGraph::star),
        ("full", CouplingGraph::full),
    ] {
        if let Some(rest) = name.strip_prefix(prefix) {
            let n: u32 = rest
                .parse()
                .with_context(|| format!("bad site count in device name '{name}'"))?;
            anyhow::ensure!(n >= 2, "device '{name}' needs at least 2 sites");
            return Ok(build(n));
        }
    }

    anyhow::bail!("Unknown device: '{name}'")
}

/// Load the coupling graph from a topology file or a built-in device name.
pub fn load_graph(
    topology: Option<&str>,
    device: Option<&str>,
    directed: bool,
) -> Result<CouplingGraph> {
    let directionality = if directed {
        Directionality::Unidirectional
    } else {
        Directionality::Bidirectional
    };

    match (topology, device) {
        (Some(path), _) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read topology file: {path}"))?;
            CouplingGraph::parse(&source, directionality)
                .with_context(|| format!("Failed to parse topology file: {path}"))
        }
        (None, Some(name)) => builtin_device(name),
        (None, None) => anyhow::bail!("Provide either --topology or --device"),
    }
}

/// Load an operation sequence from a file or generate a random one.
pub fn load_sequence(
    sequence: Option<&str>,
    random: Option<usize>,
    seed: u64,
    num_qubits: u32,
) -> Result<ParsedSequence> {
    match (sequence, random) {
        (Some(path), _) => load_sequence_file(Path::new(path)),
        (None, Some(len)) => Ok(ParsedSequence {
            operations: generate_sequence(num_qubits, len, seed),
            barriers: 0,
        }),
        (None, None) => anyhow::bail!("Provide either --sequence or --random"),
    }
}

/// Parse one sequence file.
pub fn load_sequence_file(path: &Path) -> Result<ParsedSequence> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sequence file: {}", path.display()))?;
    parse_sequence(&source)
        .with_context(|| format!("Failed to parse sequence file: {}", path.display()))
}

/// Load the cost model, defaulting when no file is given.
pub fn load_cost_model(path: Option<&str>) -> Result<CostModel> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read cost model: {path}"))?;
            CostModel::from_json(&source)
                .with_context(|| format!("Failed to parse cost model: {path}"))
        }
        None => Ok(CostModel::default()),
    }
}

/// Map the CLI strategy flag onto the placement strategy.
pub fn frequency_strategy(choice: StrategyChoice) -> FrequencyStrategy {
    match choice {
        StrategyChoice::ControlOnly => FrequencyStrategy::ControlOnly,
        StrategyChoice::BothOperands => FrequencyStrategy::BothOperands,
    }
}

/// Construct the selected routing policy.
pub fn build_policy(choice: PolicyChoice, pins: &[u32]) -> Box<dyn RoutePolicy> {
    match choice {
        PolicyChoice::Swap => Box::new(SwapRouter),
        PolicyChoice::Bridge => Box::new(BridgeRouter),
        PolicyChoice::Pinned => Box::new(PinnedBridgeRouter::new(pins.iter().copied())),
    }
}
