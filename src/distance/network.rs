//! Adjacency-list road network.

use tracing::warn;

use super::{Cost, INFINITY};
use crate::error::CarpError;

/// A directed connection stored under its origin node.
///
/// Undirected edges are materialized as two connections with identical cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Destination node.
    pub to: usize,
    /// Traversal cost.
    pub cost: Cost,
    /// Whether the underlying edge or arc is a required element.
    pub required: bool,
}

/// The underlying network of an instance: nodes `0..node_count` and the
/// edges and arcs between them.
///
/// # Examples
///
/// ```
/// use u_carp::distance::Network;
///
/// let mut network = Network::new(3).unwrap();
/// assert!(network.add_connection(0, 1, 4, false, true));
/// assert!(network.add_connection(1, 2, 2, true, false));
/// assert!(!network.add_connection(0, 9, 1, false, false)); // ignored
/// assert_eq!(network.num_connections(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    adjacency: Vec<Vec<Connection>>,
}

impl Network {
    /// Creates a network with `node_count` isolated nodes.
    ///
    /// Fails with [`CarpError::InvalidInstance`] when `node_count` is zero.
    pub fn new(node_count: usize) -> Result<Self, CarpError> {
        if node_count == 0 {
            return Err(CarpError::InvalidInstance(
                "vertex count must be positive".to_string(),
            ));
        }
        Ok(Self {
            adjacency: vec![Vec::new(); node_count],
        })
    }

    /// Registers an edge (`directed == false`) or an arc from `u` to `v`.
    ///
    /// Out-of-range endpoints are ignored with a warning; returns whether the
    /// connection was added.
    pub fn add_connection(
        &mut self,
        u: usize,
        v: usize,
        cost: Cost,
        directed: bool,
        required: bool,
    ) -> bool {
        if !self.contains(u) || !self.contains(v) {
            warn!(
                u,
                v,
                node_count = self.node_count(),
                "ignoring connection with out-of-range endpoint"
            );
            return false;
        }
        if cost == INFINITY {
            warn!(u, v, "ignoring connection with unbounded cost");
            return false;
        }

        self.adjacency[u].push(Connection {
            to: v,
            cost,
            required,
        });
        if !directed {
            self.adjacency[v].push(Connection {
                to: u,
                cost,
                required,
            });
        }
        true
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if `node` is a valid index into this network.
    pub fn contains(&self, node: usize) -> bool {
        node < self.adjacency.len()
    }

    /// Outgoing connections of `node` (empty for out-of-range nodes).
    pub fn connections(&self, node: usize) -> &[Connection] {
        self.adjacency.get(node).map_or(&[], |c| c.as_slice())
    }

    /// Number of directed connection entries (an undirected edge counts twice).
    pub fn num_connections(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Number of directed connection entries flagged as required.
    pub fn num_required(&self) -> usize {
        self.adjacency
            .iter()
            .flatten()
            .filter(|c| c.required)
            .count()
    }
}
