//! Swap routing with bridge substitution.

use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument};

use crate::error::{RouteError, RouteResult};
use crate::mapping::Mapping;
use crate::policy::{
    RouteContext, RouteOutcome, RoutePolicy, check_preconditions, execution_cost, oriented,
};
use crate::sequence::Operation;

use super::swap::site_of;

/// Bridge-substituting routing policy.
///
/// Walks the shortest path like [`SwapRouter`](super::SwapRouter), with two
/// refinements. Before each walk the endpoint with the smaller out-degree
/// leads, which tends to shorten the swap chain on irregular devices. And
/// the walk stops one hop short of the destination: across the final three
/// sites the operation executes as a bridge instead of a last swap, at a
/// cost that depends on how the two hop edges are oriented.
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeRouter;

impl RoutePolicy for BridgeRouter {
    fn name(&self) -> &str {
        "BridgeRouter"
    }

    #[instrument(skip(self, ctx, mapping, operations))]
    fn run(
        &self,
        ctx: &RouteContext<'_>,
        mapping: &mut Mapping,
        operations: &[Operation],
    ) -> RouteResult<RouteOutcome> {
        route_bridged(self.name(), ctx, mapping, operations, None)
    }
}

/// Shared walk for the bridge policy and its pinned-site refinement.
///
/// `pinned` sites are never swapped through: when the walk's next hop is
/// pinned, the walk redirects to an unpinned neighbor of the current site
/// that does not route straight back. The redirect search can fail, and a
/// pathological pin set can cycle the walk, so both cases degrade into
/// deterministic errors: [`RouteError::NoDetour`] and
/// [`RouteError::StepBudgetExhausted`] (budget N^2 per operation).
pub(crate) fn route_bridged(
    policy: &str,
    ctx: &RouteContext<'_>,
    mapping: &mut Mapping,
    operations: &[Operation],
    pinned: Option<&FxHashSet<u32>>,
) -> RouteResult<RouteOutcome> {
    check_preconditions(ctx, mapping, operations)?;

    let n = ctx.graph.num_sites();
    let budget = n * n;
    let mut cost = 0u64;
    let mut swaps = 0u64;
    let mut bridges = 0u64;
    let mut detours = 0u64;
    let mut trace = ctx.trace.then(Vec::new);

    for (index, op) in operations.iter().enumerate() {
        let mut current = site_of(mapping, op.target.0)?;
        let mut dest = site_of(mapping, op.control.0)?;

        // The better-connected endpoint stays put; the cheaper side walks.
        let mut roles_swapped = false;
        if ctx.graph.out_degree(current) > ctx.graph.out_degree(dest) {
            std::mem::swap(&mut current, &mut dest);
            roles_swapped = true;
        }

        let mut steps = 0usize;
        let mut next = ctx.table.next_hop(current, dest);
        loop {
            if next == dest {
                // Already coupled: plain execution, no bridge.
                let (control_site, target_site) = endpoint_sites(current, dest, roles_swapped);
                cost += execution_cost(ctx.graph, ctx.cost, control_site, target_site);
                break;
            }

            if let Some(pinned) = pinned {
                if pinned.contains(&next) {
                    steps += 1;
                    if steps > budget {
                        return Err(RouteError::StepBudgetExhausted {
                            budget,
                            operation: index,
                        });
                    }
                    let detour = ctx
                        .graph
                        .neighbors(current)
                        .find(|&j| !pinned.contains(&j) && ctx.table.next_hop(j, dest) != current)
                        .ok_or(RouteError::NoDetour { site: next })?;
                    debug!(%op, blocked = next, via = detour, "pinned detour");
                    detours += 1;
                    next = detour;
                    continue;
                }
            }

            if ctx.table.next_hop(next, dest) == dest {
                // Bridge position: current - next - dest.
                let (control_site, target_site) = endpoint_sites(current, dest, roles_swapped);
                let control_edge = oriented(ctx.graph, control_site, next);
                let target_edge = oriented(ctx.graph, next, target_site);
                if control_edge && target_edge {
                    cost += ctx.cost.bridge;
                } else if control_edge {
                    // Salvage the oriented control edge: swap the target
                    // into the middle and execute directly.
                    mapping.swap_sites(next, target_site);
                    swaps += 1;
                    cost += ctx.cost.bridge_mixed;
                } else {
                    cost += ctx.cost.bridge_reversed;
                }
                bridges += 1;
                debug!(%op, over = next, control_edge, target_edge, "bridge");
                break;
            }

            steps += 1;
            if steps > budget {
                return Err(RouteError::StepBudgetExhausted {
                    budget,
                    operation: index,
                });
            }
            mapping.swap_sites(current, next);
            cost += ctx.cost.swap;
            swaps += 1;
            debug!(%op, from = current, to = next, "swap");
            current = next;
            next = ctx.table.next_hop(current, dest);
        }

        if let Some(trace) = trace.as_mut() {
            trace.push(mapping.clone());
        }
    }

    info!(
        policy,
        operations = operations.len(),
        cost,
        swaps,
        bridges,
        detours,
        "run complete"
    );
    Ok(RouteOutcome {
        cost,
        swaps,
        bridges,
        detours,
        operations: operations.len(),
        trace,
    })
}

/// Control/target sites at the current walk state.
fn endpoint_sites(current: u32, dest: u32, roles_swapped: bool) -> (u32, u32) {
    if roles_swapped {
        (current, dest)
    } else {
        (dest, current)
    }
}
