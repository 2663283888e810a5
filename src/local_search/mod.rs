//! Local search for improving CARP solutions.
//!
//! - `relocate` — Move one service to another position or route
//! - `swap` — Exchange two services between routes
//! - `two_opt` — Intra-route segment reversal
//! - `merge` — Concatenate two routes into one vehicle
//!
//! The [`LocalSearch`] engine applies the first improving move of the first
//! neighborhood that has one, then restarts the scan, until a full scan finds
//! nothing (a local optimum). Every candidate is priced by the
//! [`RouteEvaluator`]; accepted moves strictly decrease the total cost.

mod merge;
mod relocate;
mod swap;
mod two_opt;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::distance::Cost;
use crate::evaluation::RouteEvaluator;
use crate::models::{Route, Solution, Visit};

/// A neighborhood the engine can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Move one service to another position or route.
    Relocate,
    /// Exchange one service between two routes.
    Swap,
    /// Reverse a contiguous segment of one route.
    TwoOpt,
    /// Concatenate two routes.
    Merge,
}

impl Neighborhood {
    /// All neighborhoods in default priority order.
    pub const ALL: [Neighborhood; 4] = [
        Neighborhood::Relocate,
        Neighborhood::Swap,
        Neighborhood::TwoOpt,
        Neighborhood::Merge,
    ];

    /// Short lowercase name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::Relocate => "relocate",
            Neighborhood::Swap => "swap",
            Neighborhood::TwoOpt => "two_opt",
            Neighborhood::Merge => "merge",
        }
    }

    /// Applies the first improving move of this neighborhood, if any.
    ///
    /// The solution is fully re-evaluated after the move and emptied routes
    /// are dropped. Returns `true` if a move was applied.
    pub fn try_improve(self, solution: &mut Solution, evaluator: &RouteEvaluator<'_>) -> bool {
        match self.find(solution.routes(), evaluator) {
            Some(mv) => {
                mv.apply(solution, evaluator);
                true
            }
            None => false,
        }
    }

    fn find(self, routes: &[Route], evaluator: &RouteEvaluator<'_>) -> Option<Move> {
        match self {
            Neighborhood::Relocate => relocate::find(routes, evaluator),
            Neighborhood::Swap => swap::find(routes, evaluator),
            Neighborhood::TwoOpt => two_opt::find(routes, evaluator),
            Neighborhood::Merge => merge::find(routes, evaluator),
        }
    }
}

/// An improving move: replacement visit sequences for the routes it touches.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Move {
    changes: Vec<(usize, Vec<Visit>)>,
}

impl Move {
    fn single(route: usize, visits: Vec<Visit>) -> Self {
        Self {
            changes: vec![(route, visits)],
        }
    }

    fn pair(first: usize, first_visits: Vec<Visit>, second: usize, second_visits: Vec<Visit>) -> Self {
        Self {
            changes: vec![(first, first_visits), (second, second_visits)],
        }
    }

    fn apply(self, solution: &mut Solution, evaluator: &RouteEvaluator<'_>) {
        for (route, visits) in self.changes {
            solution.routes_mut()[route].set_visits(visits);
        }
        evaluator.refresh(solution);
    }
}

/// Why a search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// A full scan found no improving move.
    #[default]
    LocalOptimum,
    /// The wall-clock budget ran out between scans.
    TimeBudgetExhausted,
    /// The configured move limit was reached.
    MoveLimitReached,
    /// The input solution was infeasible; nothing was done.
    SkippedInfeasible,
}

/// Statistics of one [`LocalSearch::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Accepted moves.
    pub moves: usize,
    /// Scans started (each ends at an accepted move or at the optimum).
    pub scans: usize,
    /// Accepted moves per neighborhood, in [`Neighborhood::ALL`] order.
    pub moves_by_neighborhood: [usize; 4],
    /// Solution cost before the run and after every accepted move.
    pub cost_trace: Vec<Cost>,
    /// Elapsed time when the last move was accepted.
    pub time_to_best: Duration,
    /// Why the run stopped.
    pub outcome: SearchOutcome,
}

/// First-improvement local search over a configurable list of neighborhoods.
///
/// # Examples
///
/// ```
/// use u_carp::distance::{Network, NetworkIndex};
/// use u_carp::models::{Service, ServiceCatalog};
/// use u_carp::evaluation::RouteEvaluator;
/// use u_carp::constructive::one_service_per_route;
/// use u_carp::local_search::{LocalSearch, SearchOutcome};
///
/// let mut network = Network::new(3).unwrap();
/// network.add_connection(0, 1, 1, false, false);
/// network.add_connection(1, 2, 1, false, false);
/// let index = NetworkIndex::build(&network);
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.push(Service::node(1, 1, 2, 0));
/// catalog.push(Service::node(2, 2, 2, 0));
/// let evaluator = RouteEvaluator::new(&index, &catalog, 0, 10);
///
/// let mut solution = one_service_per_route(&evaluator, &[0, 1]);
/// assert_eq!(solution.total_cost(), 6);
///
/// let stats = LocalSearch::new().run(&mut solution, &evaluator);
/// assert_eq!(stats.outcome, SearchOutcome::LocalOptimum);
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.total_cost(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSearch {
    neighborhoods: Vec<Neighborhood>,
    time_budget: Option<Duration>,
    max_moves: Option<usize>,
}

impl LocalSearch {
    /// Creates an engine scanning [`Neighborhood::ALL`] with no limits.
    pub fn new() -> Self {
        Self {
            neighborhoods: Neighborhood::ALL.to_vec(),
            time_budget: None,
            max_moves: None,
        }
    }

    /// Sets the neighborhoods to scan, in priority order.
    pub fn with_neighborhoods(mut self, neighborhoods: Vec<Neighborhood>) -> Self {
        self.neighborhoods = neighborhoods;
        self
    }

    /// Stops between scans once `budget` has elapsed.
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    /// Stops after `limit` accepted moves.
    pub fn with_max_moves(mut self, limit: Option<usize>) -> Self {
        self.max_moves = limit;
        self
    }

    /// Improves `solution` in place until a local optimum or a limit.
    ///
    /// Infeasible solutions are left untouched.
    #[instrument(skip_all, level = "debug")]
    pub fn run(&self, solution: &mut Solution, evaluator: &RouteEvaluator<'_>) -> SearchStats {
        let start = Instant::now();
        let mut stats = SearchStats {
            cost_trace: vec![solution.total_cost()],
            ..SearchStats::default()
        };

        if !solution.is_feasible() {
            warn!("skipping local search on an infeasible solution");
            stats.outcome = SearchOutcome::SkippedInfeasible;
            return stats;
        }

        'scan: loop {
            if self.time_budget.is_some_and(|b| start.elapsed() >= b) {
                stats.outcome = SearchOutcome::TimeBudgetExhausted;
                break;
            }
            if self.max_moves.is_some_and(|m| stats.moves >= m) {
                stats.outcome = SearchOutcome::MoveLimitReached;
                break;
            }

            stats.scans += 1;
            for &neighborhood in &self.neighborhoods {
                if neighborhood.try_improve(solution, evaluator) {
                    stats.moves += 1;
                    stats.moves_by_neighborhood[neighborhood as usize] += 1;
                    stats.cost_trace.push(solution.total_cost());
                    stats.time_to_best = start.elapsed();
                    debug!(
                        neighborhood = neighborhood.name(),
                        cost = solution.total_cost(),
                        routes = solution.num_routes(),
                        "accepted move"
                    );
                    continue 'scan;
                }
            }

            stats.outcome = SearchOutcome::LocalOptimum;
            break;
        }

        debug!(
            moves = stats.moves,
            scans = stats.scans,
            cost = solution.total_cost(),
            "local search finished"
        );
        stats
    }
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::new()
    }
}
