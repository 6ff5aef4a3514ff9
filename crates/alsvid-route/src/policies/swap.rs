//! Plain swap routing.

use tracing::{debug, info, instrument};

use crate::error::{RouteError, RouteResult};
use crate::mapping::Mapping;
use crate::policy::{RouteContext, RouteOutcome, RoutePolicy, check_preconditions, execution_cost};
use crate::sequence::Operation;

/// Swap-chain routing policy.
///
/// For each operation, walks the target qubit along the precomputed
/// shortest path toward the control qubit, swapping adjacent occupants
/// until the two are coupled, then charges the execution cost. This is the
/// baseline every other policy is measured against.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapRouter;

impl RoutePolicy for SwapRouter {
    fn name(&self) -> &str {
        "SwapRouter"
    }

    #[instrument(skip(self, ctx, mapping, operations))]
    fn run(
        &self,
        ctx: &RouteContext<'_>,
        mapping: &mut Mapping,
        operations: &[Operation],
    ) -> RouteResult<RouteOutcome> {
        check_preconditions(ctx, mapping, operations)?;

        let mut cost = 0u64;
        let mut swaps = 0u64;
        let mut trace = ctx.trace.then(Vec::new);

        for op in operations {
            let mut current = site_of(mapping, op.target.0)?;
            let dest = site_of(mapping, op.control.0)?;

            let mut next = ctx.table.next_hop(current, dest);
            while next != dest {
                mapping.swap_sites(current, next);
                cost += ctx.cost.swap;
                swaps += 1;
                debug!(%op, from = current, to = next, "swap");
                current = next;
                next = ctx.table.next_hop(current, dest);
            }

            cost += execution_cost(ctx.graph, ctx.cost, dest, current);

            if let Some(trace) = trace.as_mut() {
                trace.push(mapping.clone());
            }
        }

        info!(
            policy = self.name(),
            operations = operations.len(),
            cost,
            swaps,
            "run complete"
        );
        Ok(RouteOutcome {
            cost,
            swaps,
            bridges: 0,
            detours: 0,
            operations: operations.len(),
            trace,
        })
    }
}

/// Locate a logical qubit, upholding the permutation contract.
pub(crate) fn site_of(mapping: &Mapping, qubit: u32) -> RouteResult<u32> {
    mapping
        .site_of(crate::qubit::Qubit(qubit))
        .ok_or_else(|| RouteError::CorruptMapping(format!("qubit q{qubit} not resident")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_device::{CouplingGraph, RoutingTable};

    use crate::cost::CostModel;
    use crate::qubit::Qubit;

    fn ctx_parts(graph: CouplingGraph) -> (CouplingGraph, RoutingTable, CostModel) {
        let table = RoutingTable::build(&graph).unwrap();
        (graph, table, CostModel::default())
    }

    #[test]
    fn test_adjacent_pair_costs_direct_only() {
        let (graph, table, cost) = ctx_parts(CouplingGraph::linear(3));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(3);
        let ops = vec![Operation::new(0u32, 1u32)];
        let outcome = SwapRouter.run(&ctx, &mut mapping, &ops).unwrap();

        assert_eq!(outcome.cost, 1);
        assert_eq!(outcome.swaps, 0);
        assert_eq!(mapping, Mapping::identity(3));
    }

    #[test]
    fn test_ring_distance_two_costs_one_swap() {
        // 4-site ring, operation (control=0, target=2): one swap brings the
        // target adjacent, then the direct execution.
        let (graph, table, cost) = ctx_parts(CouplingGraph::ring(4));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(4);
        let ops = vec![Operation::new(0u32, 2u32)];
        let outcome = SwapRouter.run(&ctx, &mut mapping, &ops).unwrap();

        assert_eq!(outcome.swaps, 1);
        assert_eq!(outcome.cost, 7 + 1);
        assert!(mapping.is_permutation());
    }

    #[test]
    fn test_chain_walk_accumulates_swaps() {
        let (graph, table, cost) = ctx_parts(CouplingGraph::linear(5));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(5);
        let ops = vec![Operation::new(0u32, 4u32)];
        let outcome = SwapRouter.run(&ctx, &mut mapping, &ops).unwrap();

        // Distance 4: three swaps bring the target adjacent to site 0.
        assert_eq!(outcome.swaps, 3);
        assert_eq!(outcome.cost, 3 * 7 + 1);
        assert_eq!(mapping.site_of(Qubit(4)), Some(1));
    }

    #[test]
    fn test_reversed_coupling_surcharge() {
        // qx4 has 1 -> 0 but not 0 -> 1: control 0, target 1 is adjacent
        // yet wrongly oriented.
        let (graph, table, cost) = ctx_parts(CouplingGraph::ibmqx4());
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(5);
        let ops = vec![Operation::new(0u32, 1u32)];
        let outcome = SwapRouter.run(&ctx, &mut mapping, &ops).unwrap();
        assert_eq!(outcome.cost, 5);

        let mut mapping = Mapping::identity(5);
        let ops = vec![Operation::new(1u32, 0u32)];
        let outcome = SwapRouter.run(&ctx, &mut mapping, &ops).unwrap();
        assert_eq!(outcome.cost, 1);
    }

    #[test]
    fn test_trace_snapshots_every_operation() {
        let (graph, table, cost) = ctx_parts(CouplingGraph::linear(4));
        let ctx = RouteContext::new(&graph, &table, &cost).with_trace(true);

        let mut mapping = Mapping::identity(4);
        let ops = vec![Operation::new(0u32, 2u32), Operation::new(1u32, 3u32)];
        let outcome = SwapRouter.run(&ctx, &mut mapping, &ops).unwrap();

        let trace = outcome.trace.unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[1], mapping);
        for snapshot in &trace {
            assert!(snapshot.is_permutation());
        }
    }

    #[test]
    fn test_cost_monotone_over_operations() {
        let (graph, table, cost) = ctx_parts(CouplingGraph::linear(5));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let ops = crate::sequence::generate_sequence(5, 50, 9);
        let mut last = 0;
        for end in 1..=ops.len() {
            let mut fresh = Mapping::identity(5);
            let outcome = SwapRouter.run(&ctx, &mut fresh, &ops[..end]).unwrap();
            assert!(outcome.cost >= last);
            last = outcome.cost;
        }
    }
}
