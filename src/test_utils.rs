//! Shared fixtures for unit tests.

use crate::distance::{Network, NetworkIndex};
use crate::evaluation::RouteEvaluator;
use crate::models::{Service, ServiceCatalog};

pub(crate) struct Fixture {
    pub index: NetworkIndex,
    pub catalog: ServiceCatalog,
}

impl Fixture {
    pub fn evaluator(&self, capacity: u64) -> RouteEvaluator<'_> {
        RouteEvaluator::new(&self.index, &self.catalog, 0, capacity)
    }
}

/// Line 0 — 1 — 2 — 3 — 4 — 5, every edge cost 1, depot 0.
///
/// | idx | id | element      | demand | fixed cost | alone |
/// |-----|----|--------------|--------|------------|-------|
/// | 0   | 1  | edge (1, 2)  | 3      | 2          | 5     |
/// | 1   | 2  | edge (3, 4)  | 3      | 2          | 9     |
/// | 2   | 3  | node 5       | 2      | 1          | 11    |
///
/// Serving all three in one forward sweep costs 13.
pub(crate) fn line() -> Fixture {
    let mut network = Network::new(6).expect("valid");
    for u in 0..5 {
        let required = u == 1 || u == 3;
        network.add_connection(u, u + 1, 1, false, required);
    }

    let mut catalog = ServiceCatalog::new();
    catalog.push(Service::edge(1, 1, 2, 3, 1, 1));
    catalog.push(Service::edge(2, 3, 4, 3, 1, 1));
    catalog.push(Service::node(3, 5, 2, 1));

    Fixture {
        index: NetworkIndex::build(&network),
        catalog,
    }
}
