//! Merge: serve two routes with one vehicle.
//!
//! For every pair `r1 < r2` whose combined demand fits, both concatenations
//! (`r1 ++ r2`, then `r2 ++ r1`) are priced. The first one cheaper than the
//! two routes apart replaces `r1`; `r2` is emptied and dropped on refresh.

use super::Move;
use crate::distance::add_costs;
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

pub(super) fn find(routes: &[Route], evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    for r1 in 0..routes.len() {
        for r2 in (r1 + 1)..routes.len() {
            let (a, b) = (&routes[r1], &routes[r2]);
            if !evaluator.fits_with(a.total_demand(), b.total_demand()) {
                continue;
            }
            let before = add_costs(a.total_cost(), b.total_cost());

            for (head, tail) in [(a, b), (b, a)] {
                let mut merged = head.visits().to_vec();
                merged.extend_from_slice(tail.visits());
                if evaluator.route_cost(&merged) < before {
                    return Some(Move::pair(r1, merged, r2, Vec::new()));
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::one_service_per_route;
    use crate::distance::{Network, NetworkIndex};
    use crate::local_search::Neighborhood;
    use crate::models::{Service, ServiceCatalog};
    use crate::test_utils::line;

    #[test]
    fn test_merge_two_routes() {
        let fx = line();
        let eval = fx.evaluator(10);
        let mut sol = one_service_per_route(&eval, &[0, 1]);
        assert_eq!(sol.total_cost(), 5 + 9);

        assert!(Neighborhood::Merge.try_improve(&mut sol, &eval));
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].service_indices(), vec![0, 1]);
        assert_eq!(sol.total_cost(), 10);
        assert_eq!(sol.total_demand(), 6);
    }

    #[test]
    fn test_merge_blocked_by_capacity() {
        let fx = line();
        let eval = fx.evaluator(5);
        let sol = one_service_per_route(&eval, &[0, 1]);
        assert!(find(sol.routes(), &eval).is_none());
    }

    #[test]
    fn test_merge_tries_reverse_concatenation() {
        // Arcs A = 1→2 and B = 3→4. Going 2→3 costs 2 (via the depot) while
        // 4→1 costs 1, so only B ++ A improves.
        let mut network = Network::new(5).expect("valid");
        network.add_connection(0, 1, 1, true, false);
        network.add_connection(1, 2, 1, true, true);
        network.add_connection(2, 0, 1, true, false);
        network.add_connection(0, 3, 1, true, false);
        network.add_connection(3, 4, 1, true, true);
        network.add_connection(4, 0, 1, true, false);
        network.add_connection(4, 1, 1, true, false);
        let index = NetworkIndex::build(&network);
        let mut catalog = ServiceCatalog::new();
        catalog.push(Service::arc(1, 1, 2, 1, 0, 1));
        catalog.push(Service::arc(2, 3, 4, 1, 0, 1));
        let eval = RouteEvaluator::new(&index, &catalog, 0, 10);

        let mut sol = one_service_per_route(&eval, &[0, 1]);
        assert_eq!(sol.total_cost(), 6);

        assert!(Neighborhood::Merge.try_improve(&mut sol, &eval));
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].service_indices(), vec![1, 0]);
        assert_eq!(sol.total_cost(), 5);
    }
}
