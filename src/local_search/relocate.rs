//! Relocate: move one service to a different position.
//!
//! # Algorithm
//!
//! For each service, remove it from its route and try re-inserting it at
//! every position of every route (its own included), in both orientations
//! when it is an edge service. Moves into another route must respect the
//! target's capacity. The first placement that strictly lowers the cost of
//! the affected routes is returned.
//!
//! # Complexity
//!
//! O(n² · L) route evaluations per scan.

use super::Move;
use crate::distance::{add_costs, INFINITY};
use crate::evaluation::RouteEvaluator;
use crate::models::{Route, Visit};

pub(super) fn find(routes: &[Route], evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    let catalog = evaluator.catalog();

    for (r1, source) in routes.iter().enumerate() {
        for from in 0..source.len() {
            let moved = source.visits()[from];
            let service = catalog.get(moved.service);

            let mut reduced = source.visits().to_vec();
            reduced.remove(from);
            let reduced_cost = evaluator.route_cost(&reduced);
            if reduced_cost == INFINITY {
                continue;
            }

            for (r2, target) in routes.iter().enumerate() {
                if r1 == r2 {
                    for to in 0..=reduced.len() {
                        for &orientation in service.orientations() {
                            if to == from && orientation == moved.orientation {
                                continue;
                            }
                            let mut candidate = reduced.clone();
                            candidate.insert(to, Visit::new(moved.service, orientation));
                            if evaluator.route_cost(&candidate) < source.total_cost() {
                                return Some(Move::single(r1, candidate));
                            }
                        }
                    }
                    continue;
                }

                if !evaluator.fits_with(target.total_demand(), service.demand()) {
                    continue;
                }
                let before = add_costs(source.total_cost(), target.total_cost());

                for to in 0..=target.len() {
                    for &orientation in service.orientations() {
                        let mut candidate = target.visits().to_vec();
                        candidate.insert(to, Visit::new(moved.service, orientation));
                        let cost = evaluator.route_cost(&candidate);
                        if cost != INFINITY && add_costs(reduced_cost, cost) < before {
                            return Some(Move::pair(r1, reduced, r2, candidate));
                        }
                    }
                }
            }
        }
    }

    None
}
