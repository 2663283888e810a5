//! Required services and their traversal orientation.

use serde::{Deserialize, Serialize};

use crate::distance::{add_costs, Cost};

/// The kind of required element a service is tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// A required node; entry and exit coincide.
    Node,
    /// A required undirected edge; either endpoint may be entered first.
    Edge,
    /// A required arc; direction is fixed.
    Arc,
}

/// Traversal direction of a service inside a route.
///
/// Only edge services may be `Reverse`; nodes and arcs are always `Forward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Enter at `from`, leave at `to`.
    #[default]
    Forward,
    /// Enter at `to`, leave at `from`.
    Reverse,
}

impl Orientation {
    /// The opposite orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }
}

const BOTH: [Orientation; 2] = [Orientation::Forward, Orientation::Reverse];
const FORWARD_ONLY: [Orientation; 1] = [Orientation::Forward];

/// One unit of required work: a node, edge, or arc with demand and costs.
///
/// # Examples
///
/// ```
/// use u_carp::models::{Orientation, Service};
///
/// let edge = Service::edge(1, 3, 5, 2, 1, 4);
/// assert_eq!(edge.endpoints(Orientation::Forward), (3, 5));
/// assert_eq!(edge.endpoints(Orientation::Reverse), (5, 3));
/// assert_eq!(edge.fixed_cost(), 5); // service 1 + traversal 4
///
/// let node = Service::node(2, 7, 3, 6);
/// assert_eq!(node.endpoints(Orientation::Forward), (7, 7));
/// assert_eq!(node.fixed_cost(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    id: usize,
    kind: ServiceKind,
    from: usize,
    to: usize,
    demand: u64,
    service_cost: Cost,
    travel_cost: Cost,
}

impl Service {
    /// Creates a service of any kind.
    ///
    /// Node services are normalized so that `to == from` and the traversal
    /// cost is zero.
    pub fn new(
        id: usize,
        kind: ServiceKind,
        from: usize,
        to: usize,
        demand: u64,
        service_cost: Cost,
        travel_cost: Cost,
    ) -> Self {
        let (to, travel_cost) = match kind {
            ServiceKind::Node => (from, 0),
            ServiceKind::Edge | ServiceKind::Arc => (to, travel_cost),
        };
        Self {
            id,
            kind,
            from,
            to,
            demand,
            service_cost,
            travel_cost,
        }
    }

    /// A required node.
    pub fn node(id: usize, node: usize, demand: u64, service_cost: Cost) -> Self {
        Self::new(id, ServiceKind::Node, node, node, demand, service_cost, 0)
    }

    /// A required undirected edge between `a` and `b`.
    ///
    /// Takes demand, service cost and traversal cost in the same order as
    /// `ServiceCatalog::add_service`.
    pub fn edge(
        id: usize,
        a: usize,
        b: usize,
        demand: u64,
        service_cost: Cost,
        travel_cost: Cost,
    ) -> Self {
        Self::new(id, ServiceKind::Edge, a, b, demand, service_cost, travel_cost)
    }

    /// A required arc from `from` to `to`.
    pub fn arc(
        id: usize,
        from: usize,
        to: usize,
        demand: u64,
        service_cost: Cost,
        travel_cost: Cost,
    ) -> Self {
        Self::new(id, ServiceKind::Arc, from, to, demand, service_cost, travel_cost)
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Kind of required element.
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// First endpoint as registered.
    pub fn from(&self) -> usize {
        self.from
    }

    /// Second endpoint as registered.
    pub fn to(&self) -> usize {
        self.to
    }

    /// Load consumed on the vehicle.
    pub fn demand(&self) -> u64 {
        self.demand
    }

    /// Cost of performing the service.
    pub fn service_cost(&self) -> Cost {
        self.service_cost
    }

    /// Cost of traversing the edge or arc itself (zero for nodes).
    pub fn travel_cost(&self) -> Cost {
        self.travel_cost
    }

    /// Cost paid whenever the service is performed, regardless of where the
    /// vehicle comes from: service cost plus traversal cost for edges and arcs.
    pub fn fixed_cost(&self) -> Cost {
        match self.kind {
            ServiceKind::Node => self.service_cost,
            ServiceKind::Edge | ServiceKind::Arc => add_costs(self.service_cost, self.travel_cost),
        }
    }

    /// `(entry, exit)` nodes when performed with `orientation`.
    ///
    /// Arcs and nodes ignore the orientation.
    pub fn endpoints(&self, orientation: Orientation) -> (usize, usize) {
        match (self.kind, orientation) {
            (ServiceKind::Edge, Orientation::Reverse) => (self.to, self.from),
            _ => (self.from, self.to),
        }
    }

    /// Orientations worth trying when placing this service.
    pub fn orientations(&self) -> &'static [Orientation] {
        match self.kind {
            ServiceKind::Edge => &BOTH,
            ServiceKind::Node | ServiceKind::Arc => &FORWARD_ONLY,
        }
    }
}
