//! Road network and all-pairs shortest-path index.
//!
//! Provides the adjacency structure that instances are registered into and
//! the Floyd–Warshall index every costing decision reads from.

mod index;
mod network;

pub use index::NetworkIndex;
pub use network::{Connection, Network};

/// Travel, service and route cost. Costs are non-negative integers.
pub type Cost = u64;

/// Sentinel for "unreachable" distances and infeasible routes.
pub const INFINITY: Cost = Cost::MAX;

/// Adds two costs, propagating [`INFINITY`] instead of overflowing.
///
/// A finite sum that does not fit below [`INFINITY`] also becomes
/// [`INFINITY`], so route costs must stay below `Cost::MAX` to be told apart
/// from unreachable ones.
///
/// ```
/// use u_carp::distance::{add_costs, INFINITY};
///
/// assert_eq!(add_costs(3, 4), 7);
/// assert_eq!(add_costs(INFINITY, 1), INFINITY);
/// ```
pub fn add_costs(a: Cost, b: Cost) -> Cost {
    if a == INFINITY || b == INFINITY {
        return INFINITY;
    }
    a.checked_add(b).unwrap_or(INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_costs_saturates() {
        assert_eq!(add_costs(0, 0), 0);
        assert_eq!(add_costs(INFINITY, INFINITY), INFINITY);
        assert_eq!(add_costs(5, INFINITY), INFINITY);
        assert_eq!(add_costs(INFINITY - 1, 2), INFINITY);
    }
}
