//! # u-carp
//!
//! Capacitated arc routing: serve every required node, edge and arc of a
//! network with capacity-limited vehicles leaving from and returning to a
//! single depot, at minimum travel plus service cost.
//!
//! ## Modules
//!
//! - [`distance`] — Network adjacency and the all-pairs shortest-path index
//! - [`models`] — Services, routes, solutions and consistency violations
//! - [`evaluation`] — Route cost and load, the single source of truth for pricing
//! - [`constructive`] — One-route-per-service and cheapest-insertion builders
//! - [`local_search`] — First-improvement search over relocate, swap, 2-opt and merge
//! - [`solver`] — Solve entry point tying the pieces together
//! - [`config`] — Solver settings, loadable from JSON
//! - [`io`] — `.dat` instance reader and solution writers
//!
//! ## Example
//!
//! ```
//! use u_carp::distance::Network;
//! use u_carp::models::{Service, ServiceCatalog};
//! use u_carp::Solver;
//!
//! // Depot 0 with two required edges hanging off node 1.
//! let mut network = Network::new(4).unwrap();
//! network.add_connection(0, 1, 1, false, false);
//! network.add_connection(1, 2, 2, false, true);
//! network.add_connection(1, 3, 2, false, true);
//!
//! let mut catalog = ServiceCatalog::new();
//! catalog.push(Service::edge(1, 1, 2, 4, 1, 2));
//! catalog.push(Service::edge(2, 1, 3, 4, 1, 2));
//!
//! let solution = Solver::new(network, catalog).solve(0, 10).unwrap();
//! assert!(solution.is_feasible());
//! assert_eq!(solution.num_routes(), 1);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod solver;

#[cfg(test)]
mod test_utils;

pub use config::SolverConfig;
pub use error::CarpError;
pub use solver::Solver;
