//! Alsvid Device Model
//!
//! This crate provides the hardware-side data structures for qubit mapping:
//! the coupling graph of a fixed physical device and the all-pairs
//! shortest-path routing table derived from it. It forms the foundation of
//! the Alsvid routing stack.
//!
//! # Overview
//!
//! A device is described by its [`CouplingGraph`]: which pairs of physical
//! sites can host a two-qubit gate, and in which orientation. From the graph
//! a [`RoutingTable`] is computed once via Floyd-Warshall relaxation; it
//! answers `distance`/`next_hop` queries in O(1) and reconstructs shortest
//! paths in O(path length), which is what makes the routing policies in
//! `alsvid-route` cheap per operation.
//!
//! Both types are immutable after construction and are meant to be shared
//! read-only across every routing run against the same device.
//!
//! # Example
//!
//! ```rust
//! use alsvid_device::{CouplingGraph, RoutingTable};
//!
//! // A 5-site ring device.
//! let graph = CouplingGraph::ring(5);
//! let table = RoutingTable::build(&graph).unwrap();
//!
//! assert_eq!(graph.num_edges(), 5);
//! assert_eq!(table.distance(0, 2), 2);
//! assert_eq!(table.next_hop(0, 2), 1);
//! ```
//!
//! # Topology files
//!
//! Devices can also be parsed from the adjacency-list token format used by
//! the experiment drivers: one neighbor list per site, each terminated by
//! `-1`, with a final trailing `-1`:
//!
//! ```rust
//! use alsvid_device::{CouplingGraph, Directionality};
//!
//! // 0-1-2 chain.
//! let graph = CouplingGraph::parse("1 -1 0 2 -1 1 -1 -1", Directionality::Bidirectional)
//!     .unwrap();
//! assert_eq!(graph.num_sites(), 3);
//! ```

pub mod error;
pub mod graph;
pub mod routing;

pub use error::{DeviceError, DeviceResult};
pub use graph::{CouplingGraph, Directionality};
pub use routing::{RoutingTable, UNREACHABLE};
