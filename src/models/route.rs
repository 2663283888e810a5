//! Route and visit types.

use serde::{Deserialize, Serialize};

use super::Orientation;
use crate::distance::Cost;

/// A single service performed within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visit {
    /// Position of the service in the [`ServiceCatalog`](super::ServiceCatalog).
    pub service: usize,
    /// Resolved traversal direction.
    pub orientation: Orientation,
}

impl Visit {
    /// Creates a visit of catalog entry `service` with the given orientation.
    pub fn new(service: usize, orientation: Orientation) -> Self {
        Self {
            service,
            orientation,
        }
    }

    /// Creates a forward visit of catalog entry `service`.
    pub fn forward(service: usize) -> Self {
        Self::new(service, Orientation::Forward)
    }
}

/// An ordered sequence of service visits performed by a single vehicle.
///
/// A route starts and ends at the depot (not stored in `visits`). Its demand
/// and cost are caches owned by the
/// [`RouteEvaluator`](crate::evaluation::RouteEvaluator): they are recomputed
/// from the visits whenever the sequence changes.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Route, Visit};
///
/// let route = Route::new(1, vec![Visit::forward(0), Visit::forward(2)]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.service_indices(), vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id: usize,
    visits: Vec<Visit>,
    total_demand: u64,
    total_cost: Cost,
}

impl Route {
    /// Creates a route with empty caches.
    pub fn new(id: usize, visits: Vec<Visit>) -> Self {
        Self {
            id,
            visits,
            total_demand: 0,
            total_cost: 0,
        }
    }

    /// Route identifier (1-based in solved solutions).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Returns the number of services (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route performs no service.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Catalog positions of the visited services, in order.
    pub fn service_indices(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.service).collect()
    }

    /// Cached total demand (set by evaluator).
    pub fn total_demand(&self) -> u64 {
        self.total_demand
    }

    /// Cached total cost (set by evaluator).
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    pub(crate) fn set_visits(&mut self, visits: Vec<Visit>) {
        self.visits = visits;
    }

    pub(crate) fn set_metrics(&mut self, total_demand: u64, total_cost: Cost) {
        self.total_demand = total_demand;
        self.total_cost = total_cost;
    }
}
