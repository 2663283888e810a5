//! Service catalog.

use tracing::warn;

use super::{Service, ServiceKind};
use crate::distance::Cost;

/// The ordered list of required services of an instance.
///
/// Services keep their arrival order; routes refer to them by position in
/// this catalog, not by id. Id uniqueness is the caller's responsibility.
///
/// # Examples
///
/// ```
/// use u_carp::models::{ServiceCatalog, ServiceKind};
///
/// let mut catalog = ServiceCatalog::new();
/// catalog.add_service(1, ServiceKind::Edge, 0, 1, 3, 2, 5);
/// catalog.add_service(2, ServiceKind::Node, 2, 2, 4, 1, 0);
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.total_demand(), 7);
/// assert_eq!(catalog.position_of(2), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a service built from raw attributes.
    #[allow(clippy::too_many_arguments)]
    pub fn add_service(
        &mut self,
        id: usize,
        kind: ServiceKind,
        from: usize,
        to: usize,
        demand: u64,
        service_cost: Cost,
        travel_cost: Cost,
    ) {
        if kind == ServiceKind::Node && (from != to || travel_cost != 0) {
            warn!(id, from, to, "node service with distinct endpoints, keeping `from`");
        }
        self.push(Service::new(
            id,
            kind,
            from,
            to,
            demand,
            service_cost,
            travel_cost,
        ));
    }

    /// Appends an already built service.
    pub fn push(&mut self, service: Service) {
        self.services.push(service);
    }

    /// Service at catalog position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &Service {
        &self.services[index]
    }

    /// All services in arrival order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Iterates over services in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Service> {
        self.services.iter()
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no service is registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Sum of all service demands.
    pub fn total_demand(&self) -> u64 {
        self.services
            .iter()
            .map(Service::demand)
            .fold(0, u64::saturating_add)
    }

    /// Catalog position of the first service with the given id.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.services.iter().position(|s| s.id() == id)
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a Service;
    type IntoIter = std::slice::Iter<'a, Service>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
