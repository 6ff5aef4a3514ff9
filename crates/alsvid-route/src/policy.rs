//! Routing policy contract and shared run machinery.

use serde::{Deserialize, Serialize};

use alsvid_device::{CouplingGraph, Directionality, RoutingTable};

use crate::cost::CostModel;
use crate::error::{RouteError, RouteResult};
use crate::mapping::Mapping;
use crate::sequence::Operation;

/// Read-only context shared by every policy run against one device.
///
/// The graph and routing table are built once per device; the cost model is
/// the weight table all policies charge against. Comparative studies run
/// several policies over one context.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    /// Device connectivity.
    pub graph: &'a CouplingGraph,
    /// Precomputed shortest-path tables for the same device.
    pub table: &'a RoutingTable,
    /// Cost weights.
    pub cost: &'a CostModel,
    /// Record a mapping snapshot after every routed operation.
    pub trace: bool,
}

impl<'a> RouteContext<'a> {
    /// Create a context with tracing disabled.
    pub fn new(graph: &'a CouplingGraph, table: &'a RoutingTable, cost: &'a CostModel) -> Self {
        Self {
            graph,
            table,
            cost,
            trace: false,
        }
    }

    /// Enable or disable per-operation mapping snapshots.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Result of one policy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOutcome {
    /// Accumulated routing cost.
    pub cost: u64,
    /// Number of swaps performed.
    pub swaps: u64,
    /// Number of bridge substitutions performed.
    pub bridges: u64,
    /// Number of pinned-site detours taken.
    pub detours: u64,
    /// Number of operations routed.
    pub operations: usize,
    /// Mapping snapshot after each operation, when tracing was requested.
    pub trace: Option<Vec<Mapping>>,
}

/// A routing policy: consumes an operation stream, moves logical qubits
/// into adjacency through the mapping, and accounts cost.
///
/// Policies process operations strictly in order and mutate the mapping in
/// place; the caller owns the mapping exclusively for the duration of one
/// run. All policies share the same contract so drivers can swap them
/// freely for comparative studies.
pub trait RoutePolicy: Send + Sync {
    /// Get the name of this policy.
    fn name(&self) -> &str;

    /// Route every operation, mutating `mapping` and returning the
    /// accumulated outcome.
    fn run(
        &self,
        ctx: &RouteContext<'_>,
        mapping: &mut Mapping,
        operations: &[Operation],
    ) -> RouteResult<RouteOutcome>;
}

/// Validate the caller contract before any mutation.
///
/// The mapping must be a permutation covering exactly the device, the
/// routing table must match the graph, and every operation must reference
/// two distinct in-range logical qubits.
pub(crate) fn check_preconditions(
    ctx: &RouteContext<'_>,
    mapping: &Mapping,
    operations: &[Operation],
) -> RouteResult<()> {
    let n = ctx.graph.num_sites();
    if ctx.table.num_sites() != n {
        return Err(RouteError::CorruptMapping(format!(
            "routing table covers {} sites, device has {n}",
            ctx.table.num_sites()
        )));
    }
    if mapping.num_sites() != n {
        return Err(RouteError::CorruptMapping(format!(
            "mapping covers {} sites, device has {n}",
            mapping.num_sites()
        )));
    }
    if !mapping.is_permutation() {
        return Err(RouteError::CorruptMapping(
            "mapping is not a permutation".into(),
        ));
    }
    for (index, op) in operations.iter().enumerate() {
        for qubit in [op.control, op.target] {
            if qubit.0 as usize >= n {
                return Err(RouteError::QubitOutOfRange {
                    qubit: qubit.0,
                    num_qubits: n as u32,
                });
            }
        }
        if op.control == op.target {
            return Err(RouteError::MalformedSequence(format!(
                "operation {index} has identical control and target {}",
                op.control
            )));
        }
    }
    Ok(())
}

/// Cost of executing an operation whose operands sit on adjacent sites.
///
/// On unidirectional devices an operation over a coupling that only exists
/// in the opposite orientation pays the reorientation surcharge.
pub(crate) fn execution_cost(
    graph: &CouplingGraph,
    cost: &CostModel,
    control_site: u32,
    target_site: u32,
) -> u64 {
    match graph.directionality() {
        Directionality::Bidirectional => cost.direct,
        Directionality::Unidirectional => {
            if graph.connected(control_site, target_site) {
                cost.direct
            } else {
                cost.reversed
            }
        }
    }
}

/// Whether the coupling between two sites can drive a gate in the
/// `from -> to` orientation.
pub(crate) fn oriented(graph: &CouplingGraph, from: u32, to: u32) -> bool {
    match graph.directionality() {
        Directionality::Bidirectional => true,
        Directionality::Unidirectional => graph.connected(from, to),
    }
}
