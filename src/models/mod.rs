//! Domain model types for capacitated arc routing.
//!
//! Provides the required services and their catalog, routes as ordered
//! sequences of oriented service visits, and solutions with their
//! infeasibility and consistency reporting.

mod catalog;
mod route;
mod service;
mod solution;

pub use catalog::ServiceCatalog;
pub use route::{Route, Visit};
pub use service::{Orientation, Service, ServiceKind};
pub use solution::{Solution, Violation, ViolationType};
