//! Coupling graph: which pairs of physical sites can host a two-qubit gate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeviceError, DeviceResult};

/// Whether coupling edges are one-way or symmetric.
///
/// On bidirectional devices every coupling can drive a two-qubit gate in
/// either orientation, and the adjacency matrix must be symmetric. On
/// unidirectional devices each edge has a fixed orientation; reversed or
/// bridged executions carry extra cost, which the routing policies account
/// for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directionality {
    /// Symmetric couplings; the adjacency matrix is validated for symmetry.
    Bidirectional,
    /// Oriented couplings; asymmetry is permitted.
    Unidirectional,
}

/// Connectivity graph of a fixed physical device.
///
/// Sites are dense indices in `[0, num_sites)`. The graph is immutable after
/// construction: all constructors validate the structure up front and every
/// later query is read-only, so a single graph can be shared across any
/// number of routing runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingGraph {
    /// Dense adjacency matrix; `adjacency[i][j]` is true iff a directed
    /// coupling edge i -> j exists. The diagonal is always false.
    adjacency: Vec<Vec<bool>>,
    /// Raw out-degree per site (self excluded).
    out_degree: Vec<u32>,
    /// Undirected edge count (raw directed count / 2).
    num_edges: u32,
    directionality: Directionality,
}

impl CouplingGraph {
    /// Build a graph from per-site adjacency lists.
    ///
    /// `lists[i]` holds the neighbor indices of site `i`. In
    /// [`Directionality::Bidirectional`] mode the resulting matrix must be
    /// symmetric.
    pub fn from_adjacency_lists(
        lists: &[Vec<u32>],
        directionality: Directionality,
    ) -> DeviceResult<Self> {
        let n = lists.len();
        let mut adjacency = vec![vec![false; n]; n];
        let mut out_degree = vec![0u32; n];
        let mut raw_edges = 0u32;

        for (i, neighbors) in lists.iter().enumerate() {
            for &j in neighbors {
                if j as usize >= n {
                    return Err(DeviceError::SiteOutOfRange {
                        site: j,
                        num_sites: n as u32,
                    });
                }
                if j as usize == i {
                    continue;
                }
                if !adjacency[i][j as usize] {
                    adjacency[i][j as usize] = true;
                    out_degree[i] += 1;
                    raw_edges += 1;
                }
            }
        }

        let graph = Self {
            adjacency,
            out_degree,
            num_edges: raw_edges / 2,
            directionality,
        };
        graph.verify()?;

        debug!(
            sites = graph.num_sites(),
            edges = graph.num_edges(),
            "coupling graph built"
        );
        Ok(graph)
    }

    /// Build a graph from the sentinel token stream of a topology file.
    ///
    /// The format is one adjacency list per site, each terminated by `-1`,
    /// with one extra trailing `-1` marking end-of-input. The site count is
    /// not written explicitly; it is the number of sentinels minus one.
    pub fn from_tokens(
        tokens: impl IntoIterator<Item = i64>,
        directionality: Directionality,
    ) -> DeviceResult<Self> {
        let tokens: Vec<i64> = tokens.into_iter().collect();

        let sentinels = tokens.iter().filter(|&&t| t == -1).count();
        if sentinels < 2 {
            return Err(DeviceError::MalformedTopology(
                "expected at least two -1 sentinels".into(),
            ));
        }
        let num_sites = sentinels - 1;

        let mut lists: Vec<Vec<u32>> = vec![vec![]; num_sites];
        let mut site = 0usize;
        for &token in &tokens {
            if site == num_sites {
                break;
            }
            if token == -1 {
                site += 1;
            } else if token >= 0 {
                let neighbor = u32::try_from(token).map_err(|_| {
                    DeviceError::MalformedTopology(format!("token {token} out of range"))
                })?;
                lists[site].push(neighbor);
            } else {
                return Err(DeviceError::MalformedTopology(format!(
                    "unexpected negative token {token}"
                )));
            }
        }
        if site < num_sites {
            return Err(DeviceError::MalformedTopology(format!(
                "truncated stream: {site} of {num_sites} adjacency lists"
            )));
        }

        Self::from_adjacency_lists(&lists, directionality)
    }

    /// Parse a topology description from text.
    ///
    /// The text is the whitespace-separated integer token stream consumed by
    /// [`from_tokens`](Self::from_tokens).
    pub fn parse(source: &str, directionality: Directionality) -> DeviceResult<Self> {
        let tokens = source
            .split_whitespace()
            .map(|t| {
                t.parse::<i64>()
                    .map_err(|_| DeviceError::MalformedTopology(format!("bad token '{t}'")))
            })
            .collect::<DeviceResult<Vec<_>>>()?;
        Self::from_tokens(tokens, directionality)
    }

    /// Check the symmetry invariant for bidirectional devices.
    fn verify(&self) -> DeviceResult<()> {
        if self.directionality == Directionality::Unidirectional {
            return Ok(());
        }
        for i in 0..self.num_sites() {
            for j in (i + 1)..self.num_sites() {
                if self.adjacency[i][j] != self.adjacency[j][i] {
                    let (a, b) = if self.adjacency[i][j] {
                        (i as u32, j as u32)
                    } else {
                        (j as u32, i as u32)
                    };
                    return Err(DeviceError::AsymmetricCoupling { a, b });
                }
            }
        }
        Ok(())
    }

    /// Number of physical sites.
    #[inline]
    pub fn num_sites(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edge count.
    #[inline]
    pub fn num_edges(&self) -> u32 {
        self.num_edges
    }

    /// Edge directionality mode.
    #[inline]
    pub fn directionality(&self) -> Directionality {
        self.directionality
    }

    /// Raw out-degree of a site.
    #[inline]
    pub fn out_degree(&self, site: u32) -> u32 {
        self.out_degree[site as usize]
    }

    /// Whether a directed coupling edge `a -> b` exists.
    #[inline]
    pub fn connected(&self, a: u32, b: u32) -> bool {
        self.adjacency[a as usize][b as usize]
    }

    /// Whether `a` and `b` are coupled in either orientation.
    ///
    /// This is the adjacency notion used for distances: on unidirectional
    /// devices a one-way edge still brings the pair within gate reach, just
    /// at a different cost.
    #[inline]
    pub fn coupled(&self, a: u32, b: u32) -> bool {
        self.adjacency[a as usize][b as usize] || self.adjacency[b as usize][a as usize]
    }

    /// Iterate the sites coupled to `site` (either orientation, self
    /// excluded).
    pub fn neighbors(&self, site: u32) -> impl Iterator<Item = u32> + '_ {
        (0..self.num_sites() as u32).filter(move |&j| j != site && self.coupled(site, j))
    }

    /// Linear chain 0-1-2-...-(n-1), bidirectional.
    pub fn linear(n: u32) -> Self {
        let mut lists: Vec<Vec<u32>> = vec![vec![]; n as usize];
        for i in 0..n.saturating_sub(1) {
            lists[i as usize].push(i + 1);
            lists[(i + 1) as usize].push(i);
        }
        Self::from_adjacency_lists(&lists, Directionality::Bidirectional)
            .expect("linear topology is symmetric")
    }

    /// Ring 0-1-...-(n-1)-0, bidirectional.
    pub fn ring(n: u32) -> Self {
        let mut lists: Vec<Vec<u32>> = vec![vec![]; n as usize];
        for i in 0..n {
            let next = (i + 1) % n;
            if next != i {
                lists[i as usize].push(next);
                lists[next as usize].push(i);
            }
        }
        Self::from_adjacency_lists(&lists, Directionality::Bidirectional)
            .expect("ring topology is symmetric")
    }

    /// Star with site 0 at the center, bidirectional.
    pub fn star(n: u32) -> Self {
        let mut lists: Vec<Vec<u32>> = vec![vec![]; n as usize];
        for i in 1..n {
            lists[0].push(i);
            lists[i as usize].push(0);
        }
        Self::from_adjacency_lists(&lists, Directionality::Bidirectional)
            .expect("star topology is symmetric")
    }

    /// Fully connected graph, bidirectional.
    pub fn full(n: u32) -> Self {
        let mut lists: Vec<Vec<u32>> = vec![vec![]; n as usize];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    lists[i as usize].push(j);
                }
            }
        }
        Self::from_adjacency_lists(&lists, Directionality::Bidirectional)
            .expect("full topology is symmetric")
    }

    /// The 5-site IBM QX4 device with its published CNOT orientations.
    pub fn ibmqx4() -> Self {
        let lists = vec![
            vec![],
            vec![0],
            vec![0, 1, 4],
            vec![2, 4],
            vec![],
        ];
        Self::from_adjacency_lists(&lists, Directionality::Unidirectional)
            .expect("qx4 adjacency lists are in range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let g = CouplingGraph::linear(5);
        assert_eq!(g.num_sites(), 5);
        assert_eq!(g.num_edges(), 4);
        assert!(g.connected(0, 1));
        assert!(g.connected(1, 0));
        assert!(!g.connected(0, 2));
        assert_eq!(g.out_degree(0), 1);
        assert_eq!(g.out_degree(2), 2);
    }

    #[test]
    fn test_ring_neighbors() {
        let g = CouplingGraph::ring(4);
        assert_eq!(g.num_edges(), 4);
        let mut n: Vec<u32> = g.neighbors(0).collect();
        n.sort_unstable();
        assert_eq!(n, vec![1, 3]);
    }

    #[test]
    fn test_star_out_degree() {
        let g = CouplingGraph::star(5);
        assert_eq!(g.out_degree(0), 4);
        assert_eq!(g.out_degree(3), 1);
    }

    #[test]
    fn test_asymmetric_rejected_in_bidirectional_mode() {
        let lists = vec![vec![1], vec![]];
        let err = CouplingGraph::from_adjacency_lists(&lists, Directionality::Bidirectional)
            .unwrap_err();
        assert!(matches!(
            err,
            DeviceError::AsymmetricCoupling { a: 0, b: 1 }
        ));
    }

    #[test]
    fn test_asymmetric_allowed_in_unidirectional_mode() {
        let lists = vec![vec![1], vec![]];
        let g =
            CouplingGraph::from_adjacency_lists(&lists, Directionality::Unidirectional).unwrap();
        assert!(g.connected(0, 1));
        assert!(!g.connected(1, 0));
        assert!(g.coupled(1, 0));
    }

    #[test]
    fn test_neighbor_out_of_range() {
        let lists = vec![vec![3], vec![0]];
        let err = CouplingGraph::from_adjacency_lists(&lists, Directionality::Bidirectional)
            .unwrap_err();
        assert!(matches!(err, DeviceError::SiteOutOfRange { site: 3, .. }));
    }

    #[test]
    fn test_from_tokens() {
        // 3-site chain: 0-1, 1-2.
        let tokens = vec![1, -1, 0, 2, -1, 1, -1, -1];
        let g = CouplingGraph::from_tokens(tokens, Directionality::Bidirectional).unwrap();
        assert_eq!(g.num_sites(), 3);
        assert_eq!(g.num_edges(), 2);
        assert!(g.connected(1, 2));
    }

    #[test]
    fn test_from_tokens_truncated() {
        let err = CouplingGraph::from_tokens(vec![1, -1, 0], Directionality::Bidirectional)
            .unwrap_err();
        assert!(matches!(err, DeviceError::MalformedTopology(_)));
    }

    #[test]
    fn test_parse() {
        let g = CouplingGraph::parse("1 -1 0 -1 -1", Directionality::Bidirectional).unwrap();
        assert_eq!(g.num_sites(), 2);
        assert!(g.connected(0, 1));
    }

    #[test]
    fn test_parse_bad_token() {
        let err = CouplingGraph::parse("1 x -1 -1", Directionality::Bidirectional).unwrap_err();
        assert!(matches!(err, DeviceError::MalformedTopology(_)));
    }

    #[test]
    fn test_ibmqx4() {
        let g = CouplingGraph::ibmqx4();
        assert_eq!(g.num_sites(), 5);
        assert!(g.connected(2, 4));
        assert!(!g.connected(4, 2));
        assert!(g.coupled(4, 2));
        assert_eq!(g.out_degree(2), 3);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let lists = vec![vec![1, 1], vec![0, 0]];
        let g =
            CouplingGraph::from_adjacency_lists(&lists, Directionality::Bidirectional).unwrap();
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.out_degree(0), 1);
    }
}
