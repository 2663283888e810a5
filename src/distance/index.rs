//! All-pairs shortest-path index.
//!
//! # Algorithm
//!
//! Floyd–Warshall relaxation over a dense row-major matrix. Direct
//! connections seed the matrix (parallel connections keep the cheapest), then
//! every node `k` is tried as an intermediate:
//!
//! ```text
//! if d(i,k) + d(k,j) < d(i,j):  d(i,j) = d(i,k) + d(k,j);  pred(i,j) = pred(k,j)
//! ```
//!
//! Sums touching [`INFINITY`] are skipped, so an unreachable leg can never
//! wrap around into a small distance.
//!
//! # Complexity
//!
//! O(V³) time, O(V²) memory.

use super::{add_costs, Cost, Network, INFINITY};
use crate::error::CarpError;

/// Shortest distances and predecessors between every pair of nodes.
///
/// Immutable once built; rebuild it if the network changes.
///
/// # Examples
///
/// ```
/// use u_carp::distance::{Network, NetworkIndex, INFINITY};
///
/// let mut network = Network::new(4).unwrap();
/// network.add_connection(0, 1, 2, false, false);
/// network.add_connection(1, 2, 3, false, false);
///
/// let index = NetworkIndex::build(&network);
/// assert_eq!(index.distance(0, 2), 5);
/// assert_eq!(index.distance(0, 3), INFINITY);
/// assert_eq!(index.reconstruct_path(0, 2).unwrap(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkIndex {
    size: usize,
    distances: Vec<Cost>,
    predecessors: Vec<Option<usize>>,
}

impl NetworkIndex {
    /// Computes the index for every node of `network`.
    pub fn build(network: &Network) -> Self {
        let n = network.node_count();
        let mut index = Self {
            size: n,
            distances: vec![INFINITY; n * n],
            predecessors: vec![None; n * n],
        };

        for u in 0..n {
            index.distances[u * n + u] = 0;
            for connection in network.connections(u) {
                let cell = u * n + connection.to;
                if connection.cost < index.distances[cell] {
                    index.distances[cell] = connection.cost;
                    index.predecessors[cell] = Some(u);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = index.distances[i * n + k];
                if d_ik == INFINITY {
                    continue;
                }
                for j in 0..n {
                    let d_kj = index.distances[k * n + j];
                    if d_kj == INFINITY {
                        continue;
                    }
                    let through = add_costs(d_ik, d_kj);
                    if through < index.distances[i * n + j] {
                        index.distances[i * n + j] = through;
                        index.predecessors[i * n + j] = index.predecessors[k * n + j];
                    }
                }
            }
        }

        index
    }

    /// Number of nodes covered by the index.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Shortest cost from `from` to `to`, or [`INFINITY`] when unreachable
    /// or either node is out of range.
    pub fn distance(&self, from: usize, to: usize) -> Cost {
        if from >= self.size || to >= self.size {
            return INFINITY;
        }
        self.distances[from * self.size + to]
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.distance(from, to) != INFINITY
    }

    /// Last node before `to` on the shortest `from → to` path.
    pub fn predecessor(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.predecessors[from * self.size + to]
    }

    /// Ordered node sequence of the shortest `from → to` path, both ends
    /// included. Empty if `to` is unreachable or a node is out of range.
    ///
    /// The predecessor walk is bounded by `2·V` steps; exceeding it, or
    /// hitting a missing predecessor on a reachable pair, yields
    /// [`CarpError::PathReconstruction`].
    pub fn reconstruct_path(&self, from: usize, to: usize) -> Result<Vec<usize>, CarpError> {
        if !self.is_reachable(from, to) {
            return Ok(Vec::new());
        }
        if from == to {
            return Ok(vec![from]);
        }

        let limit = 2 * self.size;
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            if path.len() > limit {
                return Err(CarpError::PathReconstruction { from, to });
            }
            current = self
                .predecessor(from, current)
                .ok_or(CarpError::PathReconstruction { from, to })?;
            path.push(current);
        }
        path.reverse();
        Ok(path)
    }
}
