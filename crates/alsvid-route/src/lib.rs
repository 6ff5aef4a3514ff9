//! Alsvid Placement and Routing
//!
//! This crate solves the qubit-mapping problem for a fixed device: given a
//! coupling graph and a stream of two-qubit operations, it produces an
//! initial logical-to-physical placement and routes every operation into
//! adjacency with swaps or bridge substitutions, accounting the accumulated
//! cost.
//!
//! # Architecture
//!
//! ```text
//! CouplingGraph ──► RoutingTable          (alsvid-device, built once)
//!        │               │
//!        ▼               ▼
//!     Placer ──► Mapping ──► RoutePolicy::run ──► RouteOutcome
//!                  ▲                │
//!                  └── swaps ───────┘
//! ```
//!
//! The device side is immutable and shared; the [`Mapping`] is owned by
//! exactly one policy run at a time and mutated in place. Operations are
//! processed strictly in order, with no reordering or look-ahead.
//!
//! # Example
//!
//! ```rust
//! use alsvid_device::{CouplingGraph, RoutingTable};
//! use alsvid_route::{CostModel, Placer, RouteContext, RoutePolicy, SwapRouter};
//! use alsvid_route::sequence::parse_sequence;
//!
//! let graph = CouplingGraph::ring(4);
//! let table = RoutingTable::build(&graph).unwrap();
//! let cost = CostModel::default();
//!
//! let parsed = parse_sequence("0 2 1 3").unwrap();
//! let mut mapping = Placer::default().place(&graph, &parsed.operations).unwrap();
//!
//! let ctx = RouteContext::new(&graph, &table, &cost);
//! let outcome = SwapRouter.run(&ctx, &mut mapping, &parsed.operations).unwrap();
//! assert!(outcome.cost > 0);
//! ```
//!
//! # Built-in policies
//!
//! | Policy | Strategy |
//! |--------|----------|
//! | [`SwapRouter`] | Swap chains along shortest paths |
//! | [`BridgeRouter`] | Swap chains, final two hops as a bridge |
//! | [`PinnedBridgeRouter`] | Bridge routing that detours around pinned sites |
//!
//! All three charge against one shared [`CostModel`], so comparative
//! studies vary the weights rather than the code.
//!
//! # Custom policies
//!
//! Implement the [`RoutePolicy`] trait to add a routing strategy:
//!
//! ```rust
//! use alsvid_route::{Mapping, RouteContext, RouteOutcome, RoutePolicy, RouteResult};
//! use alsvid_route::sequence::Operation;
//!
//! struct NullRouter;
//!
//! impl RoutePolicy for NullRouter {
//!     fn name(&self) -> &str { "null" }
//!
//!     fn run(
//!         &self,
//!         _ctx: &RouteContext<'_>,
//!         _mapping: &mut Mapping,
//!         operations: &[Operation],
//!     ) -> RouteResult<RouteOutcome> {
//!         Ok(RouteOutcome {
//!             cost: 0,
//!             swaps: 0,
//!             bridges: 0,
//!             detours: 0,
//!             operations: operations.len(),
//!             trace: None,
//!         })
//!     }
//! }
//! ```

pub mod cost;
pub mod error;
pub mod mapping;
pub mod placement;
pub mod policy;
pub mod qubit;
pub mod report;
pub mod sequence;

// Built-in policies
pub mod policies;

pub use cost::CostModel;
pub use error::{RouteError, RouteResult};
pub use mapping::Mapping;
pub use placement::{FrequencyStrategy, Placer};
pub use policies::{BridgeRouter, PinnedBridgeRouter, SwapRouter};
pub use policy::{RouteContext, RouteOutcome, RoutePolicy};
pub use qubit::Qubit;
pub use report::{DeviceSummary, RouteReport};
