//! Bridge routing with pinned sites.

use rustc_hash::FxHashSet;
use tracing::instrument;

use crate::error::RouteResult;
use crate::mapping::Mapping;
use crate::policy::{RouteContext, RouteOutcome, RoutePolicy};
use crate::sequence::Operation;

use super::bridge::route_bridged;

/// Bridge routing that never swaps through a configured set of sites.
///
/// Pinned sites model qubits that must stay put for the duration of a run,
/// typically because they hold state an enclosing computation still needs.
/// The walk detours around them, which is a heuristic without a termination
/// guarantee: a pin set that severs every detour fails the run with
/// [`RouteError::NoDetour`], and a cycling walk is cut off by the
/// per-operation step budget.
///
/// [`RouteError::NoDetour`]: crate::error::RouteError::NoDetour
#[derive(Debug, Clone, Default)]
pub struct PinnedBridgeRouter {
    pinned: FxHashSet<u32>,
}

impl PinnedBridgeRouter {
    /// Create a router with the given pinned physical sites.
    pub fn new(pinned: impl IntoIterator<Item = u32>) -> Self {
        Self {
            pinned: pinned.into_iter().collect(),
        }
    }

    /// The pinned sites.
    pub fn pinned(&self) -> impl Iterator<Item = u32> + '_ {
        self.pinned.iter().copied()
    }
}

impl RoutePolicy for PinnedBridgeRouter {
    fn name(&self) -> &str {
        "PinnedBridgeRouter"
    }

    #[instrument(skip(self, ctx, mapping, operations))]
    fn run(
        &self,
        ctx: &RouteContext<'_>,
        mapping: &mut Mapping,
        operations: &[Operation],
    ) -> RouteResult<RouteOutcome> {
        route_bridged(self.name(), ctx, mapping, operations, Some(&self.pinned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_device::{CouplingGraph, RoutingTable};

    use crate::cost::CostModel;
    use crate::error::RouteError;
    use crate::qubit::Qubit;

    fn ctx_parts(graph: CouplingGraph) -> (CouplingGraph, RoutingTable, CostModel) {
        let table = RoutingTable::build(&graph).unwrap();
        (graph, table, CostModel::default())
    }

    #[test]
    fn test_empty_pin_set_matches_bridge_router() {
        use crate::policies::BridgeRouter;

        let (graph, table, cost) = ctx_parts(CouplingGraph::linear(5));
        let ctx = RouteContext::new(&graph, &table, &cost);
        let ops = crate::sequence::generate_sequence(5, 30, 3);

        let mut a = Mapping::identity(5);
        let plain = BridgeRouter.run(&ctx, &mut a, &ops).unwrap();

        let mut b = Mapping::identity(5);
        let pinned = PinnedBridgeRouter::new([]).run(&ctx, &mut b, &ops).unwrap();

        assert_eq!(plain.cost, pinned.cost);
        assert_eq!(a, b);
    }

    #[test]
    fn test_detour_around_pinned_site() {
        // Ring walk 2 -> 0 prefers the hop through 1; with 1 pinned the
        // walk detours through 3 instead.
        let (graph, table, cost) = ctx_parts(CouplingGraph::ring(4));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(4);
        let ops = vec![Operation::new(0u32, 2u32)];
        let outcome = PinnedBridgeRouter::new([1])
            .run(&ctx, &mut mapping, &ops)
            .unwrap();

        assert_eq!(outcome.detours, 1);
        assert_eq!(outcome.bridges, 1);
        assert_eq!(outcome.cost, 4);
        // The occupant of the pinned site never moved.
        assert_eq!(mapping.qubit_at(1), Qubit(1));
    }

    #[test]
    fn test_fully_pinned_neighborhood_fails_deterministically() {
        // With both middle sites of the 4-ring pinned, operation (0, 2)
        // has no detour at all; the run must fail rather than loop.
        let (graph, table, cost) = ctx_parts(CouplingGraph::ring(4));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(4);
        let ops = vec![Operation::new(0u32, 2u32)];
        let err = PinnedBridgeRouter::new([1, 3])
            .run(&ctx, &mut mapping, &ops)
            .unwrap_err();

        assert!(matches!(err, RouteError::NoDetour { site: 1 }));
    }

    #[test]
    fn test_detour_reroutes_the_whole_walk() {
        // Ring of 6, operation (0, 3). The preferred walk is 3-2-1-0, but
        // site 2 is pinned, so the walk goes the long way: detour to 4,
        // swap, then bridge over 5.
        let (graph, table, cost) = ctx_parts(CouplingGraph::ring(6));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(6);
        let ops = vec![Operation::new(0u32, 3u32)];
        let outcome = PinnedBridgeRouter::new([2])
            .run(&ctx, &mut mapping, &ops)
            .unwrap();

        assert_eq!(outcome.detours, 1);
        assert_eq!(outcome.swaps, 1);
        assert_eq!(outcome.bridges, 1);
        assert_eq!(outcome.cost, 7 + 4);
        // The walker went around: the target sits on site 4 now, and the
        // pinned site's occupant never moved.
        assert_eq!(mapping.site_of(Qubit(3)), Some(4));
        assert_eq!(mapping.qubit_at(2), Qubit(2));
    }

    #[test]
    fn test_adjacent_operations_ignore_pins() {
        // Pinned sites only constrain swap intermediaries; an operation
        // whose operands are already coupled executes in place.
        let (graph, table, cost) = ctx_parts(CouplingGraph::linear(3));
        let ctx = RouteContext::new(&graph, &table, &cost);

        let mut mapping = Mapping::identity(3);
        let ops = vec![Operation::new(1u32, 0u32)];
        let outcome = PinnedBridgeRouter::new([0, 1, 2])
            .run(&ctx, &mut mapping, &ops)
            .unwrap();

        assert_eq!(outcome.cost, 1);
        assert_eq!(outcome.detours, 0);
    }
}
