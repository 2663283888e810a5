//! Solution and violation types.

use std::time::Duration;

use super::Route;
use crate::distance::{Cost, INFINITY};
use crate::error::CarpError;

/// A type of inconsistency found when checking a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Route load above vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load of the route.
        load: u64,
        /// Vehicle capacity.
        capacity: u64,
    },
    /// A leg of the route cannot be travelled.
    UnreachableRoute {
        /// Route index in the solution.
        route_index: usize,
    },
    /// A catalog service is served by no route.
    MissingService {
        /// Id of the service.
        service_id: usize,
    },
    /// A catalog service is served more than once.
    DuplicateService {
        /// Id of the service.
        service_id: usize,
    },
    /// A route's cached demand or cost differs from a fresh evaluation.
    StaleRoute {
        /// Route index in the solution.
        route_index: usize,
    },
    /// The solution total differs from the sum of route costs.
    TotalCostMismatch {
        /// Cached total.
        cached: Cost,
        /// Sum of recomputed route costs.
        recomputed: Cost,
    },
}

/// An inconsistency in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete set of routes for an instance.
///
/// A solution whose construction ran into an unreachable or over-capacity
/// service is kept, marked infeasible with the offending error and an
/// [`INFINITY`] total cost, so callers can still inspect it.
///
/// # Examples
///
/// ```
/// use u_carp::models::Solution;
///
/// let sol = Solution::new();
/// assert_eq!(sol.num_routes(), 0);
/// assert!(sol.is_feasible());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: Cost,
    infeasibility: Option<CarpError>,
    construction_time: Duration,
    search_time: Duration,
    time_to_best: Duration,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty solution marked infeasible.
    pub fn infeasible(reason: CarpError) -> Self {
        let mut solution = Self::new();
        solution.mark_infeasible(reason);
        solution
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of services performed (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Total demand carried across all routes.
    pub fn total_demand(&self) -> u64 {
        self.routes
            .iter()
            .map(Route::total_demand)
            .fold(0, u64::saturating_add)
    }

    /// Returns the total cost, [`INFINITY`] when infeasible.
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    /// Returns `true` unless the solution was marked infeasible or has an
    /// unbounded cost.
    pub fn is_feasible(&self) -> bool {
        self.infeasibility.is_none() && self.total_cost != INFINITY
    }

    /// The reason this solution is infeasible, if one was recorded.
    pub fn infeasibility(&self) -> Option<&CarpError> {
        self.infeasibility.as_ref()
    }

    /// Time spent building the initial solution.
    pub fn construction_time(&self) -> Duration {
        self.construction_time
    }

    /// Time spent in local search.
    pub fn search_time(&self) -> Duration {
        self.search_time
    }

    /// Construction plus search time.
    pub fn execution_time(&self) -> Duration {
        self.construction_time + self.search_time
    }

    /// Elapsed time when the final routes were reached.
    pub fn time_to_best(&self) -> Duration {
        self.time_to_best
    }

    pub(crate) fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub(crate) fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    pub(crate) fn set_total_cost(&mut self, cost: Cost) {
        self.total_cost = cost;
    }

    pub(crate) fn mark_infeasible(&mut self, reason: CarpError) {
        self.infeasibility = Some(reason);
        self.total_cost = INFINITY;
    }

    pub(crate) fn set_timings(
        &mut self,
        construction_time: Duration,
        search_time: Duration,
        time_to_best: Duration,
    ) {
        self.construction_time = construction_time;
        self.search_time = search_time;
        self.time_to_best = time_to_best;
    }

    /// Renumbers routes `1..=n` in their current order.
    pub(crate) fn renumber_routes(&mut self) {
        for (i, route) in self.routes.iter_mut().enumerate() {
            route.set_id(i + 1);
        }
    }
}
