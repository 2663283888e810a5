//! Error types shared by the routing core.

use thiserror::Error;

/// Errors raised while building or solving an arc routing instance.
///
/// `InvalidInstance` and `PathReconstruction` abort the operation that
/// produced them. `UnreachableService` and `OverCapacityService` are also
/// recorded on a [`Solution`](crate::models::Solution) to mark it infeasible
/// without discarding whatever routes were built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarpError {
    /// The instance parameters cannot describe a solvable problem.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
    /// A required element cannot be connected to the depot.
    #[error("service {service_id} is unreachable: node {node} is not connected to the depot")]
    UnreachableService {
        /// Id of the offending service.
        service_id: usize,
        /// Node (0-based) that cannot be reached from, or cannot return to, the depot.
        node: usize,
    },
    /// A single service needs more than one vehicle can carry.
    #[error("service {service_id} has demand {demand} above vehicle capacity {capacity}")]
    OverCapacityService {
        /// Id of the offending service.
        service_id: usize,
        /// Demand of the service.
        demand: u64,
        /// Vehicle capacity.
        capacity: u64,
    },
    /// The predecessor structure contains a cycle.
    #[error("predecessor cycle while reconstructing path {from} -> {to}")]
    PathReconstruction {
        /// Path origin.
        from: usize,
        /// Path destination.
        to: usize,
    },
}
