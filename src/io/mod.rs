//! Boundary adapters: the `.dat` instance reader and the solution writers.

mod instance;
mod solution;

pub use instance::{parse_instance, read_instance, Instance, ParseError};
pub use solution::{
    is_complete, write_solution, write_solution_json, RouteReport, SolutionReport, VisitRecord,
    INFEASIBLE_MARKER,
};
