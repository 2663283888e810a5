//! Property-based tests for the CARP solver.
//!
//! Random connected networks with a mix of required nodes and edges are
//! solved end to end, and the results are checked against an independent
//! re-evaluation.
//!
//! # Invariants tested
//!
//! - **Cost consistency:** The solution total equals the sum of freshly
//!   recomputed route costs.
//! - **Capacity:** No route carries more than the vehicle capacity.
//! - **Coverage:** Every service is served exactly once.
//! - **Idempotence:** Searching a local optimum again changes nothing.
//! - **Monotonicity:** Accepted moves strictly decrease the total cost.
//! - **Shortest paths:** Reconstructed paths realize the indexed distance.

use proptest::prelude::*;
use proptest::sample::Index;

use u_carp::constructive::one_service_per_route;
use u_carp::distance::{Network, NetworkIndex};
use u_carp::evaluation::RouteEvaluator;
use u_carp::local_search::LocalSearch;
use u_carp::models::{Service, ServiceCatalog};
use u_carp::{Solver, SolverConfig};

#[derive(Debug, Clone)]
struct RandomInstance {
    nodes: usize,
    edges: Vec<(usize, usize, u64)>,
    required_nodes: Vec<(usize, u64, u64)>,
    required_edges: Vec<(Index, u64, u64)>,
    capacity: u64,
    seed: u64,
}

impl RandomInstance {
    fn build(&self) -> (Network, ServiceCatalog) {
        let mut network = Network::new(self.nodes).expect("at least one node");
        for &(u, v, cost) in &self.edges {
            network.add_connection(u, v, cost, false, false);
        }

        let mut catalog = ServiceCatalog::new();
        for &(node, demand, service_cost) in &self.required_nodes {
            let id = catalog.len() + 1;
            catalog.push(Service::node(id, node, demand, service_cost));
        }
        for (pick, demand, service_cost) in &self.required_edges {
            let (u, v, cost) = self.edges[pick.index(self.edges.len())];
            let id = catalog.len() + 1;
            catalog.push(Service::edge(id, u, v, *demand, *service_cost, cost));
        }
        (network, catalog)
    }
}

/// Connected networks: a path through every node plus random chords.
fn instance_strategy() -> impl Strategy<Value = RandomInstance> {
    (3usize..8)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(1u64..10, n - 1),
                prop::collection::vec((0..n, 0..n, 1u64..10), 0..n),
                prop::collection::vec((1..n, 0u64..5, 0u64..4), 0..4),
                prop::collection::vec((any::<Index>(), 1u64..5, 0u64..4), 1..5),
                5u64..20,
                any::<u64>(),
            )
        })
        .prop_map(
            |(nodes, path, chords, required_nodes, required_edges, capacity, seed)| {
                let mut edges: Vec<(usize, usize, u64)> = path
                    .into_iter()
                    .enumerate()
                    .map(|(u, cost)| (u, u + 1, cost))
                    .collect();
                edges.extend(chords.into_iter().filter(|(u, v, _)| u != v));
                RandomInstance {
                    nodes,
                    edges,
                    required_nodes,
                    required_edges,
                    capacity,
                    seed,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: Solved instances are consistent, within capacity and
    /// serve every service exactly once.
    #[test]
    fn solution_is_consistent(inst in instance_strategy()) {
        let (network, catalog) = inst.build();
        let index = NetworkIndex::build(&network);
        let solver = Solver::new(network, catalog.clone())
            .with_config(SolverConfig::randomized(inst.seed));
        let solution = solver.solve(0, inst.capacity).expect("valid instance");
        prop_assert!(solution.is_feasible());

        let evaluator = RouteEvaluator::new(&index, &catalog, 0, inst.capacity);
        let recomputed: u64 = solution
            .routes()
            .iter()
            .map(|r| evaluator.route_cost(r.visits()))
            .sum();
        prop_assert_eq!(solution.total_cost(), recomputed);

        for route in solution.routes() {
            prop_assert!(!route.is_empty());
            prop_assert!(route.total_demand() <= inst.capacity);
        }

        let mut served: Vec<usize> = solution
            .routes()
            .iter()
            .flat_map(|r| r.service_indices())
            .collect();
        served.sort_unstable();
        prop_assert_eq!(served, (0..catalog.len()).collect::<Vec<_>>());

        let violations = evaluator.check_solution(&solution);
        prop_assert!(violations.is_empty(), "violations: {:?}", violations);
    }

    /// Property: A local optimum is a fixed point of the search.
    #[test]
    fn search_is_idempotent(inst in instance_strategy()) {
        let (network, catalog) = inst.build();
        let index = NetworkIndex::build(&network);
        let evaluator = RouteEvaluator::new(&index, &catalog, 0, inst.capacity);

        let mut solution = one_service_per_route(&evaluator, &(0..catalog.len()).collect::<Vec<_>>());
        let search = LocalSearch::new();
        search.run(&mut solution, &evaluator);

        let optimum = solution.clone();
        let stats = search.run(&mut solution, &evaluator);
        prop_assert_eq!(stats.moves, 0);
        prop_assert_eq!(solution, optimum);
    }

    /// Property: Every accepted move strictly lowers the total cost.
    #[test]
    fn search_costs_strictly_decrease(inst in instance_strategy()) {
        let (network, catalog) = inst.build();
        let index = NetworkIndex::build(&network);
        let evaluator = RouteEvaluator::new(&index, &catalog, 0, inst.capacity);

        let mut solution = one_service_per_route(&evaluator, &(0..catalog.len()).collect::<Vec<_>>());
        let initial = solution.total_cost();
        let stats = LocalSearch::new().run(&mut solution, &evaluator);

        prop_assert_eq!(stats.cost_trace.first().copied(), Some(initial));
        prop_assert_eq!(stats.cost_trace.len(), stats.moves + 1);
        prop_assert!(stats.cost_trace.windows(2).all(|w| w[1] < w[0]));
        prop_assert!(solution.total_cost() <= initial);
    }

    /// Property: A fixed seed gives the same solution.
    #[test]
    fn seeded_solve_is_deterministic(inst in instance_strategy()) {
        let (network, catalog) = inst.build();
        let solver = Solver::new(network, catalog)
            .with_config(SolverConfig::randomized(inst.seed));
        let a = solver.solve(0, inst.capacity).expect("valid instance");
        let b = solver.solve(0, inst.capacity).expect("valid instance");
        prop_assert_eq!(a.routes(), b.routes());
        prop_assert_eq!(a.total_cost(), b.total_cost());
    }

    /// Property: Reconstructed paths are walks whose cost is the distance.
    #[test]
    fn paths_realize_distances(inst in instance_strategy()) {
        let (network, _) = inst.build();
        let index = NetworkIndex::build(&network);

        for u in 0..inst.nodes {
            for v in 0..inst.nodes {
                let path = index.reconstruct_path(u, v).expect("acyclic predecessors");
                prop_assert_eq!(path.first().copied(), Some(u));
                prop_assert_eq!(path.last().copied(), Some(v));
                prop_assert!(path.len() <= inst.nodes);

                let walked: u64 = path
                    .windows(2)
                    .map(|w| {
                        network
                            .connections(w[0])
                            .iter()
                            .filter(|c| c.to == w[1])
                            .map(|c| c.cost)
                            .min()
                            .expect("consecutive nodes are adjacent")
                    })
                    .sum();
                prop_assert_eq!(walked, index.distance(u, v));
            }
        }
    }
}
