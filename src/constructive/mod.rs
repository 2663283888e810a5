//! Constructive heuristics for building initial CARP solutions.
//!
//! - [`one_service_per_route`] — One `depot → service → depot` route per service, O(n)
//! - [`cheapest_insertion`] — Global cheapest insertion with orientation choice, O(n³)

mod cheapest_insertion;
mod single_service;

pub use cheapest_insertion::cheapest_insertion;
pub use single_service::one_service_per_route;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::evaluation::RouteEvaluator;
use crate::models::Solution;

/// Which constructive heuristic builds the initial solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConstructionStrategy {
    /// Cheapest insertion over all routes, positions and orientations.
    #[default]
    CheapestInsertion,
    /// One route per service; always feasible for individually servable services.
    OneServicePerRoute,
}

impl ConstructionStrategy {
    /// Builds an initial solution, processing catalog entries in `order`.
    #[instrument(skip_all, level = "debug", fields(strategy = ?self))]
    pub fn build(self, evaluator: &RouteEvaluator<'_>, order: &[usize]) -> Solution {
        match self {
            ConstructionStrategy::CheapestInsertion => cheapest_insertion(evaluator, order),
            ConstructionStrategy::OneServicePerRoute => one_service_per_route(evaluator, order),
        }
    }
}

/// Catalog processing order `0..len`, shuffled when an RNG is supplied.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_carp::constructive::service_order;
///
/// assert_eq!(service_order::<StdRng>(4, None), vec![0, 1, 2, 3]);
///
/// let a = service_order(10, Some(&mut StdRng::seed_from_u64(7)));
/// let b = service_order(10, Some(&mut StdRng::seed_from_u64(7)));
/// assert_eq!(a, b);
/// ```
pub fn service_order<R: Rng + ?Sized>(len: usize, rng: Option<&mut R>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if let Some(rng) = rng {
        order.shuffle(rng);
    }
    order
}
