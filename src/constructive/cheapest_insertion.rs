//! Cheapest-insertion construction.
//!
//! # Algorithm
//!
//! Services are taken one at a time in the given order. For each, every
//! legal placement is priced with the route evaluator:
//!
//! - every route with spare capacity,
//! - every position in that route,
//! - both orientations for edge services,
//!
//! and compared with opening a new `depot → service → depot` route. The
//! globally cheapest option is committed. Ties go to the first candidate in
//! scan order (routes, then positions, then `Forward` before `Reverse`); an
//! existing route wins a tie against a new one.
//!
//! # Complexity
//!
//! O(n² · L) route evaluations overall, where L is the route length.

use tracing::{debug, trace, warn};

use crate::distance::{Cost, INFINITY};
use crate::evaluation::RouteEvaluator;
use crate::models::{Route, Solution, Visit};

/// A priced placement of a service inside an existing route.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    route: usize,
    position: usize,
    visit: Visit,
    delta: i128,
}

/// Constructs a solution by cheapest insertion, processing catalog entries
/// in `order`.
///
/// A service over capacity or unreachable from the depot stops construction
/// immediately; the routes built so far are returned, marked infeasible with
/// that error.
///
/// # Examples
///
/// ```
/// use u_carp::distance::{Network, NetworkIndex};
/// use u_carp::models::{Service, ServiceCatalog};
/// use u_carp::evaluation::RouteEvaluator;
/// use u_carp::constructive::cheapest_insertion;
///
/// // Depot 0 — 1 — 2, both nodes required.
/// let mut network = Network::new(3).unwrap();
/// network.add_connection(0, 1, 1, false, false);
/// network.add_connection(1, 2, 1, false, false);
/// let index = NetworkIndex::build(&network);
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.push(Service::node(1, 1, 2, 0));
/// catalog.push(Service::node(2, 2, 2, 0));
///
/// let evaluator = RouteEvaluator::new(&index, &catalog, 0, 10);
/// let solution = cheapest_insertion(&evaluator, &[0, 1]);
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.total_cost(), 4);
/// ```
pub fn cheapest_insertion(evaluator: &RouteEvaluator<'_>, order: &[usize]) -> Solution {
    let mut solution = Solution::new();

    for &service in order {
        let (alone, alone_cost) = match evaluator.standalone(service) {
            Ok(best) => best,
            Err(err) => {
                warn!(%err, "construction aborted");
                evaluator.refresh(&mut solution);
                solution.mark_infeasible(err);
                return solution;
            }
        };

        match best_insertion(evaluator, &solution, service) {
            Some(ins) if ins.delta <= i128::from(alone_cost) => {
                trace!(
                    service,
                    route = ins.route,
                    position = ins.position,
                    delta = %ins.delta,
                    "inserting into existing route"
                );
                let route = &mut solution.routes_mut()[ins.route];
                let mut visits = route.visits().to_vec();
                visits.insert(ins.position, ins.visit);
                route.set_visits(visits);
            }
            _ => {
                trace!(service, cost = alone_cost, "opening new route");
                let id = solution.num_routes() + 1;
                solution.add_route(Route::new(id, vec![alone]));
            }
        }
        evaluator.refresh(&mut solution);
    }

    debug!(
        routes = solution.num_routes(),
        cost = solution.total_cost(),
        "cheapest-insertion construction done"
    );
    solution
}

/// Cheapest placement of catalog entry `service` into an existing route.
fn best_insertion(
    evaluator: &RouteEvaluator<'_>,
    solution: &Solution,
    service: usize,
) -> Option<Insertion> {
    let s = evaluator.catalog().get(service);
    let mut best: Option<Insertion> = None;

    for (ri, route) in solution.routes().iter().enumerate() {
        if !evaluator.fits_with(route.total_demand(), s.demand()) {
            continue;
        }

        for pos in 0..=route.len() {
            for &orientation in s.orientations() {
                let visit = Visit::new(service, orientation);
                let mut candidate = route.visits().to_vec();
                candidate.insert(pos, visit);

                let cost = evaluator.route_cost(&candidate);
                if cost == INFINITY {
                    continue;
                }
                let delta = signed_delta(cost, route.total_cost());
                if best.as_ref().is_none_or(|b| delta < b.delta) {
                    best = Some(Insertion {
                        route: ri,
                        position: pos,
                        visit,
                        delta,
                    });
                }
            }
        }
    }

    best
}

fn signed_delta(new: Cost, old: Cost) -> i128 {
    i128::from(new) - i128::from(old)
}
