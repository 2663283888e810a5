//! Intra-route 2-opt: reverse a contiguous segment.
//!
//! # Algorithm
//!
//! For each route and each pair `i < j`, reverse the visits `i..=j`. Edge
//! services inside the segment are flipped, since the vehicle now crosses
//! them the other way; node and arc services keep their orientation. The
//! first reversal that strictly lowers the route cost is returned.
//!
//! # Complexity
//!
//! O(L²) route evaluations per route.

use super::Move;
use crate::evaluation::RouteEvaluator;
use crate::models::{Route, ServiceCatalog, ServiceKind, Visit};

pub(super) fn find(routes: &[Route], evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    for (ri, route) in routes.iter().enumerate() {
        let n = route.len();
        if n < 2 {
            continue;
        }

        for i in 0..n - 1 {
            for j in (i + 1)..n {
                let candidate = reversed(route.visits(), i, j, evaluator.catalog());
                if evaluator.route_cost(&candidate) < route.total_cost() {
                    return Some(Move::single(ri, candidate));
                }
            }
        }
    }

    None
}

/// Copy of `visits` with `i..=j` reversed and its edge services flipped.
fn reversed(visits: &[Visit], i: usize, j: usize, catalog: &ServiceCatalog) -> Vec<Visit> {
    let mut out = visits.to_vec();
    out[i..=j].reverse();
    for visit in &mut out[i..=j] {
        if catalog.get(visit.service).kind() == ServiceKind::Edge {
            visit.orientation = visit.orientation.flipped();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Orientation;
    use crate::test_utils::line;

    #[test]
    fn test_reversed_flips_edges_only() {
        let fx = line();
        let visits = vec![Visit::forward(0), Visit::forward(1), Visit::forward(2)];
        let out = reversed(&visits, 0, 2, &fx.catalog);

        assert_eq!(out.iter().map(|v| v.service).collect::<Vec<_>>(), vec![2, 1, 0]);
        assert_eq!(out[0].orientation, Orientation::Forward); // node
        assert_eq!(out[1].orientation, Orientation::Reverse);
        assert_eq!(out[2].orientation, Orientation::Reverse);
    }

    #[test]
    fn test_two_opt_untangles_route() {
        let fx = line();
        let eval = fx.evaluator(10);
        // 0→4 (4) + 2 + 3→2 (1) + 2 + 1→5 (4) + 1 + 5→0 (5)
        let route = eval.build_route(
            1,
            vec![
                Visit::new(1, Orientation::Reverse),
                Visit::new(0, Orientation::Reverse),
                Visit::forward(2),
            ],
        );
        assert_eq!(route.total_cost(), 19);

        let mv = find(std::slice::from_ref(&route), &eval).expect("improving move");
        let (_, visits) = &mv.changes[0];
        assert_eq!(
            visits,
            &vec![Visit::forward(0), Visit::forward(1), Visit::forward(2)]
        );
        assert_eq!(eval.route_cost(visits), 13);
    }

    #[test]
    fn test_optimal_route_unchanged() {
        let fx = line();
        let eval = fx.evaluator(10);
        let route = eval.build_route(
            1,
            vec![Visit::forward(0), Visit::forward(1), Visit::forward(2)],
        );
        assert_eq!(route.total_cost(), 13);
        assert!(find(std::slice::from_ref(&route), &eval).is_none());
    }
}
