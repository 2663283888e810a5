//! Swap: exchange one service between two routes.
//!
//! # Algorithm
//!
//! For every pair of routes `r1 < r2` and every pair of positions, put each
//! service in the other's slot, trying both orientations of incoming edge
//! services. Both routes must stay within capacity after the exchange. The
//! first exchange that strictly lowers the combined cost is returned.
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

    for r1 in 0..routes.len() {
        for r2 in (r1 + 1)..routes.len() {
            let (first, second) = (&routes[r1], &routes[r2]);
            let before = add_costs(first.total_cost(), second.total_cost());

            for p1 in 0..first.len() {
                let v1 = first.visits()[p1];
                let s1 = catalog.get(v1.service);

                for p2 in 0..second.len() {
                    let v2 = second.visits()[p2];
                    let s2 = catalog.get(v2.service);

                    let rest1 = first.total_demand().saturating_sub(s1.demand());
                    let rest2 = second.total_demand().saturating_sub(s2.demand());
                    if !evaluator.fits_with(rest1, s2.demand())
                        || !evaluator.fits_with(rest2, s1.demand())
                    {
                        continue;
                    }

                    for &o2 in s2.orientations() {
                        let mut a = first.visits().to_vec();
                        a[p1] = Visit::new(v2.service, o2);
                        let cost_a = evaluator.route_cost(&a);
                        if cost_a == INFINITY {
                            continue;
                        }

                        for &o1 in s1.orientations() {
                            let mut b = second.visits().to_vec();
                            b[p2] = Visit::new(v1.service, o1);
                            let cost_b = evaluator.route_cost(&b);
                            if cost_b != INFINITY && add_costs(cost_a, cost_b) < before {
                                return Some(Move::pair(r1, a, r2, b));
                            }
                        }
                    }
                }
            }
        }
    }

    None
}
