//! Route evaluator: the single source of truth for route cost and load.

use crate::distance::{add_costs, Cost, NetworkIndex, INFINITY};
use crate::error::CarpError;
use crate::models::{
    Route, ServiceCatalog, ServiceKind, Solution, Violation, ViolationType, Visit,
};

/// Evaluates routes against the shortest-path index and the service catalog.
///
/// Construction and local search never patch a cached cost: every candidate
/// sequence is priced with [`route_cost`](Self::route_cost) and every
/// committed change goes through [`refresh`](Self::refresh).
///
/// # Examples
///
/// ```
/// use u_carp::distance::{Network, NetworkIndex};
/// use u_carp::models::{Service, ServiceCatalog, Visit};
/// use u_carp::evaluation::RouteEvaluator;
///
/// let mut network = Network::new(3).unwrap();
/// network.add_connection(0, 1, 4, false, false);
/// network.add_connection(1, 2, 5, false, true);
/// let index = NetworkIndex::build(&network);
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.push(Service::edge(1, 1, 2, 3, 2, 5));
///
/// let evaluator = RouteEvaluator::new(&index, &catalog, 0, 10);
/// // depot→1 (4) + service (2) + traversal (5) + 2→depot (9)
/// assert_eq!(evaluator.route_cost(&[Visit::forward(0)]), 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    index: &'a NetworkIndex,
    catalog: &'a ServiceCatalog,
    depot: usize,
    capacity: u64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(
        index: &'a NetworkIndex,
        catalog: &'a ServiceCatalog,
        depot: usize,
        capacity: u64,
    ) -> Self {
        Self {
            index,
            catalog,
            depot,
            capacity,
        }
    }

    /// The depot every route starts and ends at.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The catalog visits refer to.
    pub fn catalog(&self) -> &'a ServiceCatalog {
        self.catalog
    }

    /// Exact cost of serving `visits` in order, from and back to the depot.
    ///
    /// Returns [`INFINITY`] as soon as a leg is unreachable. An empty route
    /// costs nothing.
    pub fn route_cost(&self, visits: &[Visit]) -> Cost {
        if visits.is_empty() {
            return 0;
        }

        let mut cost: Cost = 0;
        let mut last = self.depot;
        for visit in visits {
            let service = self.catalog.get(visit.service);
            let (entry, exit) = service.endpoints(visit.orientation);
            let leg = self.index.distance(last, entry);
            if leg == INFINITY {
                return INFINITY;
            }
            cost = add_costs(add_costs(cost, leg), service.fixed_cost());
            last = exit;
        }

        add_costs(cost, self.index.distance(last, self.depot))
    }

    /// Sum of the demands of `visits`, saturating at `u64::MAX`.
    pub fn route_demand(&self, visits: &[Visit]) -> u64 {
        visits
            .iter()
            .map(|v| self.catalog.get(v.service).demand())
            .fold(0, u64::saturating_add)
    }

    /// Returns `true` if `visits` fit in one vehicle.
    pub fn fits(&self, visits: &[Visit]) -> bool {
        self.route_demand(visits) <= self.capacity
    }

    /// Returns `true` if a vehicle already carrying `load` can take `extra`
    /// more.
    ///
    /// A sum past `u64::MAX` counts as over capacity.
    pub fn fits_with(&self, load: u64, extra: u64) -> bool {
        load.checked_add(extra).is_some_and(|total| total <= self.capacity)
    }

    /// Builds a route from a visit sequence with freshly computed caches.
    pub fn build_route(&self, id: usize, visits: Vec<Visit>) -> Route {
        let mut route = Route::new(id, visits);
        self.refresh_route(&mut route);
        route
    }

    /// Recomputes a route's cached demand and cost from its visits.
    pub fn refresh_route(&self, route: &mut Route) {
        let demand = self.route_demand(route.visits());
        let cost = self.route_cost(route.visits());
        route.set_metrics(demand, cost);
    }

    /// Recomputes every route and the solution total from scratch and drops
    /// routes left without services.
    ///
    /// A recorded infeasibility keeps the total at [`INFINITY`].
    pub fn refresh(&self, solution: &mut Solution) {
        solution.routes_mut().retain(|r| !r.is_empty());

        let mut total: Cost = 0;
        for route in solution.routes_mut() {
            self.refresh_route(route);
            total = add_costs(total, route.total_cost());
        }

        if solution.infeasibility().is_none() {
            solution.set_total_cost(total);
        }
    }

    /// Cheapest way to serve catalog entry `service` alone
    /// (`depot → service → depot`), over its orientations.
    ///
    /// Fails with [`CarpError::OverCapacityService`] if its demand exceeds the
    /// capacity and [`CarpError::UnreachableService`] if no orientation can
    /// be travelled. A route whose cost only saturates at [`INFINITY`] fails
    /// with [`CarpError::InvalidInstance`].
    pub fn standalone(&self, service: usize) -> Result<(Visit, Cost), CarpError> {
        let s = self.catalog.get(service);
        if s.demand() > self.capacity {
            return Err(CarpError::OverCapacityService {
                service_id: s.id(),
                demand: s.demand(),
                capacity: self.capacity,
            });
        }

        let mut best: Option<(Visit, Cost)> = None;
        for &orientation in s.orientations() {
            let visit = Visit::new(service, orientation);
            let cost = self.route_cost(&[visit]);
            if cost != INFINITY && best.as_ref().is_none_or(|b| cost < b.1) {
                best = Some((visit, cost));
            }
        }

        best.ok_or_else(|| {
            let travelable = s.orientations().iter().any(|&o| {
                let (entry, exit) = s.endpoints(o);
                self.index.is_reachable(self.depot, entry)
                    && self.index.is_reachable(exit, self.depot)
            });
            if travelable {
                return CarpError::InvalidInstance(format!(
                    "serving service {} alone exceeds the cost range",
                    s.id()
                ));
            }

            let (entry, exit) = s.endpoints(Default::default());
            let node = if self.index.is_reachable(self.depot, entry) {
                exit
            } else {
                entry
            };
            CarpError::UnreachableService {
                service_id: s.id(),
                node,
            }
        })
    }

    /// Expands a visit sequence into the full node walk
    /// `depot → … → depot`, following shortest paths between services.
    pub fn expand_route(&self, visits: &[Visit]) -> Result<Vec<usize>, CarpError> {
        let mut walk = vec![self.depot];
        let mut last = self.depot;

        for visit in visits {
            let service = self.catalog.get(visit.service);
            let (entry, exit) = service.endpoints(visit.orientation);
            self.extend_walk(&mut walk, last, entry, service.id())?;
            if service.kind() != ServiceKind::Node {
                walk.push(exit);
            }
            last = exit;
        }

        let last_id = visits
            .last()
            .map_or(0, |v| self.catalog.get(v.service).id());
        self.extend_walk(&mut walk, last, self.depot, last_id)?;
        Ok(walk)
    }

    fn extend_walk(
        &self,
        walk: &mut Vec<usize>,
        from: usize,
        to: usize,
        service_id: usize,
    ) -> Result<(), CarpError> {
        let path = self.index.reconstruct_path(from, to)?;
        if path.is_empty() {
            let node = if from == self.depot { to } else { from };
            return Err(CarpError::UnreachableService { service_id, node });
        }
        walk.extend(path.into_iter().skip(1));
        Ok(())
    }

    /// Checks a solution against the catalog: coverage, capacity, and
    /// agreement between cached and recomputed metrics.
    ///
    /// An empty list means the solution is consistent.
    pub fn check_solution(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut served = vec![0usize; self.catalog.len()];
        let mut recomputed_total: Cost = 0;

        for (idx, route) in solution.routes().iter().enumerate() {
            let demand = self.route_demand(route.visits());
            let cost = self.route_cost(route.visits());

            if cost == INFINITY {
                violations.push(Violation::new(ViolationType::UnreachableRoute {
                    route_index: idx,
                }));
            } else if cost != route.total_cost() || demand != route.total_demand() {
                violations.push(Violation::new(ViolationType::StaleRoute {
                    route_index: idx,
                }));
            }

            if demand > self.capacity {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load: demand,
                    capacity: self.capacity,
                }));
            }

            for visit in route.visits() {
                if let Some(count) = served.get_mut(visit.service) {
                    *count += 1;
                }
            }
            recomputed_total = add_costs(recomputed_total, cost);
        }

        for (position, &count) in served.iter().enumerate() {
            let service_id = self.catalog.get(position).id();
            match count {
                0 => violations.push(Violation::new(ViolationType::MissingService { service_id })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateService { service_id })),
            }
        }

        if solution.is_feasible() && recomputed_total != solution.total_cost() {
            violations.push(Violation::new(ViolationType::TotalCostMismatch {
                cached: solution.total_cost(),
                recomputed: recomputed_total,
            }));
        }

        violations
    }
}
