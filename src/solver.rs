//! Solve entry point: index, construct, improve.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::config::SolverConfig;
use crate::constructive::service_order;
use crate::distance::{Network, NetworkIndex};
use crate::error::CarpError;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{LocalSearch, SearchStats};
use crate::models::{ServiceCatalog, Solution};

/// A CARP solver over one network and one service catalog.
///
/// The solver owns its instance data. Each [`solve`](Self::solve) builds a
/// fresh [`NetworkIndex`] and drops it when done, so repeated solves never
/// share mutable state.
///
/// # Examples
///
/// ```
/// use u_carp::distance::Network;
/// use u_carp::models::{Service, ServiceCatalog};
/// use u_carp::solver::Solver;
///
/// let mut network = Network::new(3).unwrap();
/// network.add_connection(0, 1, 2, false, false);
/// network.add_connection(1, 2, 3, false, true);
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.push(Service::edge(1, 1, 2, 4, 1, 3));
///
/// let solution = Solver::new(network, catalog).solve(0, 10).unwrap();
/// assert!(solution.is_feasible());
/// // 0→1 (2) + service (1) + traversal (3) + 2→0 (5)
/// assert_eq!(solution.total_cost(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    network: Network,
    catalog: ServiceCatalog,
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the default configuration.
    pub fn new(network: Network, catalog: ServiceCatalog) -> Self {
        Self {
            network,
            catalog,
            config: SolverConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The road network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The registered services.
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the instance for a single depot and vehicle capacity.
    ///
    /// Invalid input (zero capacity, depot or service endpoint out of range)
    /// is an error. An unreachable or over-capacity service is not: the
    /// returned solution is marked infeasible and names it.
    ///
    /// Deterministic for a fixed configuration seed.
    pub fn solve(&self, depot: usize, capacity: u64) -> Result<Solution, CarpError> {
        self.solve_with_stats(depot, capacity).map(|(solution, _)| solution)
    }

    /// Like [`solve`](Self::solve), also returning local search statistics
    /// (`None` when the search did not run).
    #[instrument(skip_all, fields(depot = depot, capacity = capacity))]
    pub fn solve_with_stats(
        &self,
        depot: usize,
        capacity: u64,
    ) -> Result<(Solution, Option<SearchStats>), CarpError> {
        self.validate(depot, capacity)?;
        info!(
            nodes = self.network.node_count(),
            connections = self.network.num_connections(),
            services = self.catalog.len(),
            "solving"
        );

        let start = Instant::now();
        let index = NetworkIndex::build(&self.network);
        let evaluator = RouteEvaluator::new(&index, &self.catalog, depot, capacity);

        let order = if self.config.shuffle {
            let mut rng = StdRng::seed_from_u64(self.config.seed);
            service_order(self.catalog.len(), Some(&mut rng))
        } else {
            service_order::<StdRng>(self.catalog.len(), None)
        };

        let mut solution = self.config.strategy.build(&evaluator, &order);
        let construction_time = start.elapsed();
        let mut time_to_best = construction_time;

        let search_start = Instant::now();
        let stats = if solution.is_feasible() && !self.config.neighborhoods.is_empty() {
            let stats = LocalSearch::new()
                .with_neighborhoods(self.config.neighborhoods.clone())
                .with_time_budget(self.config.time_budget())
                .with_max_moves(self.config.max_moves)
                .run(&mut solution, &evaluator);
            if stats.moves > 0 {
                time_to_best = construction_time + stats.time_to_best;
            }
            Some(stats)
        } else {
            None
        };
        let search_time = search_start.elapsed();

        solution.renumber_routes();
        solution.set_timings(construction_time, search_time, time_to_best);

        match solution.infeasibility() {
            Some(reason) => info!(%reason, "solve finished: infeasible"),
            None => info!(
                cost = solution.total_cost(),
                routes = solution.num_routes(),
                moves = stats.as_ref().map_or(0, |s| s.moves),
                elapsed_us = solution.execution_time().as_micros(),
                "solve finished"
            ),
        }

        Ok((solution, stats))
    }

    fn validate(&self, depot: usize, capacity: u64) -> Result<(), CarpError> {
        if capacity == 0 {
            return Err(CarpError::InvalidInstance(
                "vehicle capacity must be positive".into(),
            ));
        }
        if !self.network.contains(depot) {
            return Err(CarpError::InvalidInstance(format!(
                "depot {depot} outside network of {} nodes",
                self.network.node_count()
            )));
        }
        if let Some(service) = self
            .catalog
            .iter()
            .find(|s| !self.network.contains(s.from()) || !self.network.contains(s.to()))
        {
            return Err(CarpError::InvalidInstance(format!(
                "service {} references a node outside the network",
                service.id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::ConstructionStrategy;
    use crate::models::Service;

    /// Line 0 — 1 — 2 — 3 — 4 — 5 with the same services as the unit fixture.
    fn line_solver() -> Solver {
        let mut network = Network::new(6).expect("valid");
        for u in 0..5 {
            network.add_connection(u, u + 1, 1, false, u == 1 || u == 3);
        }
        let mut catalog = ServiceCatalog::new();
        catalog.push(Service::edge(1, 1, 2, 3, 1, 1));
        catalog.push(Service::edge(2, 3, 4, 3, 1, 1));
        catalog.push(Service::node(3, 5, 2, 1));
        Solver::new(network, catalog)
    }

    #[test]
    fn test_solve_line() {
        let solution = line_solver().solve(0, 10).expect("valid instance");
        assert!(solution.is_feasible());
        assert_eq!(solution.num_routes(), 1);
        assert_eq!(solution.total_cost(), 13);
        assert_eq!(solution.routes()[0].id(), 1);
        assert!(solution.time_to_best() <= solution.execution_time());
    }

    #[test]
    fn test_construction_only_keeps_fallback_routes() {
        let config = SolverConfig::construction_only()
            .with_strategy(ConstructionStrategy::OneServicePerRoute);
        let (solution, stats) = line_solver()
            .with_config(config)
            .solve_with_stats(0, 10)
            .expect("valid instance");
        assert!(stats.is_none());
        assert_eq!(solution.num_routes(), 3);
        assert_eq!(solution.total_cost(), 25);
        let ids: Vec<usize> = solution.routes().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_improves_fallback() {
        let config =
            SolverConfig::default().with_strategy(ConstructionStrategy::OneServicePerRoute);
        let (solution, stats) = line_solver()
            .with_config(config)
            .solve_with_stats(0, 10)
            .expect("valid instance");
        let stats = stats.expect("search ran");
        assert!(stats.moves > 0);
        assert_eq!(stats.cost_trace.first(), Some(&25));
        assert_eq!(solution.total_cost(), 13);
    }

    #[test]
    fn test_seeded_solves_are_reproducible() {
        let solver = line_solver().with_config(SolverConfig::randomized(11));
        let a = solver.solve(0, 6).expect("valid instance");
        let b = solver.solve(0, 6).expect("valid instance");
        assert_eq!(a.routes(), b.routes());
        assert_eq!(a.total_cost(), b.total_cost());
    }

    #[test]
    fn test_invalid_input() {
        let solver = line_solver();
        assert!(matches!(
            solver.solve(0, 0),
            Err(CarpError::InvalidInstance(_))
        ));
        assert!(matches!(
            solver.solve(6, 10),
            Err(CarpError::InvalidInstance(_))
        ));

        let mut catalog = ServiceCatalog::new();
        catalog.push(Service::node(1, 9, 1, 0));
        let bad = Solver::new(Network::new(3).expect("valid"), catalog);
        assert!(matches!(
            bad.solve(0, 10),
            Err(CarpError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_over_capacity_is_not_an_error() {
        let solution = line_solver().solve(0, 2).expect("valid instance");
        assert!(!solution.is_feasible());
        assert!(matches!(
            solution.infeasibility(),
            Some(CarpError::OverCapacityService { service_id: 1, .. })
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let solver = Solver::new(Network::new(2).expect("valid"), ServiceCatalog::new());
        let solution = solver.solve(0, 5).expect("valid instance");
        assert!(solution.is_feasible());
        assert_eq!(solution.num_routes(), 0);
        assert_eq!(solution.total_cost(), 0);
    }
}
