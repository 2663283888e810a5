//! One-service-per-route construction.
//!
//! Every service gets its own `depot → service → depot` route, using the
//! cheaper orientation for edge services. Always feasible when each service
//! is individually reachable and within capacity, which makes it the safety
//! net and the baseline the other heuristics are measured against.

use tracing::{debug, warn};

use crate::evaluation::RouteEvaluator;
use crate::models::{Route, Solution};

/// Builds one route per service, in `order`.
///
/// Stops at the first service that is over capacity or unreachable and
/// returns the routes built so far, marked infeasible with that error.
///
/// # Examples
///
/// ```
/// use u_carp::distance::{Network, NetworkIndex};
/// use u_carp::models::{Service, ServiceCatalog};
/// use u_carp::evaluation::RouteEvaluator;
/// use u_carp::constructive::one_service_per_route;
///
/// let mut network = Network::new(3).unwrap();
/// network.add_connection(0, 1, 2, false, false);
/// network.add_connection(0, 2, 3, false, false);
/// let index = NetworkIndex::build(&network);
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.push(Service::node(1, 1, 4, 1));
/// catalog.push(Service::node(2, 2, 4, 1));
///
/// let evaluator = RouteEvaluator::new(&index, &catalog, 0, 10);
/// let solution = one_service_per_route(&evaluator, &[0, 1]);
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.total_cost(), (2 + 1 + 2) + (3 + 1 + 3));
/// ```
pub fn one_service_per_route(evaluator: &RouteEvaluator<'_>, order: &[usize]) -> Solution {
    let mut solution = Solution::new();

    for &service in order {
        match evaluator.standalone(service) {
            Ok((visit, _)) => {
                let id = solution.num_routes() + 1;
                solution.add_route(Route::new(id, vec![visit]));
            }
            Err(err) => {
                warn!(%err, "construction aborted");
                evaluator.refresh(&mut solution);
                solution.mark_infeasible(err);
                return solution;
            }
        }
    }

    evaluator.refresh(&mut solution);
    debug!(
        routes = solution.num_routes(),
        cost = solution.total_cost(),
        "one-service-per-route construction done"
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::INFINITY;
    use crate::error::CarpError;
    use crate::test_utils::line;

    #[test]
    fn test_one_route_per_service() {
        let fx = line();
        let sol = one_service_per_route(&fx.evaluator(10), &[0, 1, 2]);
        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.num_served(), 3);
        let costs: Vec<u64> = sol.routes().iter().map(|r| r.total_cost()).collect();
        assert_eq!(costs, vec![5, 9, 11]);
        assert_eq!(sol.total_cost(), 25);
        assert!(sol.is_feasible());
    }

    #[test]
    fn test_over_capacity_fails_fast() {
        let fx = line();
        let sol = one_service_per_route(&fx.evaluator(2), &[0, 1, 2]);
        assert!(!sol.is_feasible());
        assert_eq!(sol.total_cost(), INFINITY);
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(
            sol.infeasibility(),
            Some(&CarpError::OverCapacityService {
                service_id: 1,
                demand: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_partial_routes_kept() {
        let fx = line();
        // Service 3 (demand 2) fits, then service 1 (demand 3) does not.
        let sol = one_service_per_route(&fx.evaluator(2), &[2, 0, 1]);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].total_cost(), 11);
        assert!(matches!(
            sol.infeasibility(),
            Some(CarpError::OverCapacityService { service_id: 1, .. })
        ));
    }

    #[test]
    fn test_empty_order() {
        let fx = line();
        let sol = one_service_per_route(&fx.evaluator(10), &[]);
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_cost(), 0);
        assert!(sol.is_feasible());
    }
}
