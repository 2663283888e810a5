//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::ConstructionStrategy;
use crate::local_search::Neighborhood;

/// Settings for one [`Solver`](crate::solver::Solver) run.
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use u_carp::config::SolverConfig;
/// use u_carp::constructive::ConstructionStrategy;
///
/// let config = SolverConfig::from_json(r#"{ "seed": 7, "shuffle": true }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert!(config.shuffle);
/// assert_eq!(config.strategy, ConstructionStrategy::CheapestInsertion);
/// assert_eq!(config.neighborhoods.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Seed for the randomized service order.
    pub seed: u64,
    /// Constructive heuristic for the initial solution.
    pub strategy: ConstructionStrategy,
    /// Shuffle the service processing order with `seed`.
    pub shuffle: bool,
    /// Local search neighborhoods in priority order; empty skips the search.
    pub neighborhoods: Vec<Neighborhood>,
    /// Wall-clock search budget in milliseconds.
    pub time_budget_ms: Option<u64>,
    /// Cap on accepted local search moves.
    pub max_moves: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            strategy: ConstructionStrategy::default(),
            shuffle: false,
            neighborhoods: Neighborhood::ALL.to_vec(),
            time_budget_ms: None,
            max_moves: None,
        }
    }
}

impl SolverConfig {
    /// Construction only, no local search.
    pub fn construction_only() -> Self {
        Self {
            neighborhoods: Vec::new(),
            ..Default::default()
        }
    }

    /// Shuffled service order driven by `seed`.
    pub fn randomized(seed: u64) -> Self {
        Self {
            seed,
            shuffle: true,
            ..Default::default()
        }
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Sets the seed for the service order.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the construction heuristic.
    pub fn with_strategy(mut self, strategy: ConstructionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables shuffling the service order.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the neighborhoods to scan; empty skips the search.
    pub fn with_neighborhoods(mut self, neighborhoods: Vec<Neighborhood>) -> Self {
        self.neighborhoods = neighborhoods;
        self
    }

    /// Limits local search to `budget` wall-clock time.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Stops local search after `limit` accepted moves.
    pub fn with_max_moves(mut self, limit: usize) -> Self {
        self.max_moves = Some(limit);
        self
    }

    /// The search budget as a [`Duration`].
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}
