//! All-pairs shortest-path routing tables.
//!
//! A [`RoutingTable`] is derived from a [`CouplingGraph`] once, up front, by
//! Floyd-Warshall relaxation. Routing policies then answer every
//! distance/next-hop query in O(1) and reconstruct paths in O(path length)
//! without re-running a search per gate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeviceError, DeviceResult};
use crate::graph::CouplingGraph;

/// Distance sentinel for unreachable pairs during construction.
///
/// A successfully built table never exposes this value: construction fails
/// with [`DeviceError::Disconnected`] instead.
pub const UNREACHABLE: u32 = u32::MAX;

/// No-path sentinel in the next-hop matrix during construction.
const NO_ROUTE: u32 = u32::MAX;

/// Precomputed shortest-path distances and first hops for one device.
///
/// Immutable after construction and safe to share read-only across
/// concurrent or successive routing runs against the same device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    /// `distance[i][j]`: shortest hop count from site i to site j.
    distance: Vec<Vec<u32>>,
    /// `next_hop[i][j]`: first site on a shortest path from i to j.
    next_hop: Vec<Vec<u32>>,
}

impl RoutingTable {
    /// Build the table for a coupling graph.
    ///
    /// Fails with [`DeviceError::Disconnected`] if any pair of sites has no
    /// path; a disconnected device cannot be routed on and is rejected
    /// before any allocation runs.
    pub fn build(graph: &CouplingGraph) -> DeviceResult<Self> {
        let n = graph.num_sites();
        let mut distance = vec![vec![UNREACHABLE; n]; n];
        let mut next_hop = vec![vec![NO_ROUTE; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    distance[i][j] = 0;
                    next_hop[i][j] = i as u32;
                } else if graph.coupled(i as u32, j as u32) {
                    distance[i][j] = 1;
                    next_hop[i][j] = j as u32;
                }
            }
        }

        // Floyd-Warshall. The first hop is inherited from the i->k leg so
        // that iterative next-hop walks reconstruct a shortest path.
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = distance[i][k].saturating_add(distance[k][j]);
                    if through < distance[i][j] {
                        distance[i][j] = through;
                        next_hop[i][j] = next_hop[i][k];
                    }
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                if i != j && next_hop[i][j] == NO_ROUTE {
                    return Err(DeviceError::Disconnected {
                        from: i as u32,
                        to: j as u32,
                    });
                }
            }
        }

        debug!(sites = n, "routing table built");
        Ok(Self { distance, next_hop })
    }

    /// Number of sites covered by the table.
    #[inline]
    pub fn num_sites(&self) -> usize {
        self.distance.len()
    }

    /// Shortest hop count between two sites.
    #[inline]
    pub fn distance(&self, from: u32, to: u32) -> u32 {
        self.distance[from as usize][to as usize]
    }

    /// First site on a shortest path from `from` to `to`.
    ///
    /// For `from == to` this is `from` itself.
    #[inline]
    pub fn next_hop(&self, from: u32, to: u32) -> u32 {
        self.next_hop[from as usize][to as usize]
    }

    /// Sites strictly between `from` and `to` on a shortest path.
    ///
    /// Follows the next-hop matrix iteratively and stops the moment the
    /// target is reached; the construction invariant rules out missing
    /// entries, so the walk always terminates in `distance(from, to)` steps.
    pub fn path(&self, from: u32, to: u32) -> Vec<u32> {
        let mut interior = Vec::new();
        let mut current = self.next_hop(from, to);
        while current != to {
            interior.push(current);
            current = self.next_hop(current, to);
        }
        interior
    }
}
