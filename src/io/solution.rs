//! Solution export: the line-based text format and a JSON report.
//!
//! Text format, one route per line after a four-line header:
//!
//! ```text
//! <total cost>
//! <route count>
//! <execution time, µs>
//! <time to best, µs>
//!  0 1 <route id> <demand> <cost> <records> (D 0,<depot>,<depot>) (S <id>,<entry>,<exit>) … (D 0,<depot>,<depot>)
//! ```
//!
//! Node ids are written 1-based. `<records>` counts both depot records. A
//! solution that is infeasible or does not serve every catalog service
//! exactly once is written as the single line `infeasible`.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::distance::Cost;
use crate::models::{Route, ServiceCatalog, Solution};

/// Marker written instead of a solution body.
pub const INFEASIBLE_MARKER: &str = "infeasible";

/// One record of a route's visit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisitRecord {
    /// Departure from or return to the depot.
    Depot {
        /// Depot node, 1-based.
        node: usize,
    },
    /// One performed service.
    Service {
        /// Caller-assigned service id.
        id: usize,
        /// Node the service is entered at, 1-based.
        entry: usize,
        /// Node the service is left at, 1-based.
        exit: usize,
    },
}

/// Export view of one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteReport {
    /// Route identifier.
    pub id: usize,
    /// Load carried.
    pub demand: u64,
    /// Route cost, depot to depot.
    pub cost: Cost,
    /// Depot, services in order, depot.
    pub visits: Vec<VisitRecord>,
}

/// Export view of a solution. Node ids are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// Feasible and serving every service exactly once.
    pub feasible: bool,
    /// `None` when infeasible.
    pub total_cost: Option<Cost>,
    /// Number of vehicles used.
    pub num_routes: usize,
    /// Wall-clock solve time in microseconds.
    pub execution_time_us: u64,
    /// Microseconds until the final solution was reached.
    pub time_to_best_us: u64,
    /// Why the solution is infeasible, if a reason was recorded.
    pub infeasibility: Option<String>,
    /// Depot node, 1-based.
    pub depot: usize,
    /// One entry per route.
    pub routes: Vec<RouteReport>,
}

impl SolutionReport {
    /// Builds the report for `solution` over `catalog`, with a 0-based depot.
    pub fn new(solution: &Solution, catalog: &ServiceCatalog, depot: usize) -> Self {
        let feasible = is_complete(solution, catalog);
        Self {
            feasible,
            total_cost: feasible.then(|| solution.total_cost()),
            num_routes: solution.num_routes(),
            execution_time_us: micros(solution.execution_time().as_micros()),
            time_to_best_us: micros(solution.time_to_best().as_micros()),
            infeasibility: solution.infeasibility().map(ToString::to_string),
            depot: depot + 1,
            routes: solution
                .routes()
                .iter()
                .map(|r| route_report(r, catalog, depot))
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `true` if the solution is feasible and serves every catalog entry
/// exactly once.
pub fn is_complete(solution: &Solution, catalog: &ServiceCatalog) -> bool {
    if !solution.is_feasible() {
        return false;
    }
    let mut served = vec![0usize; catalog.len()];
    for route in solution.routes() {
        for visit in route.visits() {
            match served.get_mut(visit.service) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
    }
    served.iter().all(|&count| count == 1)
}

/// Writes `solution` in the text format.
///
/// # Examples
///
/// ```
/// use u_carp::distance::Network;
/// use u_carp::io::write_solution;
/// use u_carp::models::{Service, ServiceCatalog};
/// use u_carp::solver::Solver;
///
/// let mut network = Network::new(2).unwrap();
/// network.add_connection(0, 1, 2, false, false);
/// let mut catalog = ServiceCatalog::new();
/// catalog.push(Service::node(7, 1, 3, 1));
///
/// let solver = Solver::new(network, catalog);
/// let solution = solver.solve(0, 5).unwrap();
///
/// let mut out = Vec::new();
/// write_solution(&mut out, &solution, solver.catalog(), 0).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// let lines: Vec<&str> = text.lines().collect();
/// assert_eq!(lines[0], "5");
/// assert_eq!(lines[1], "1");
/// assert_eq!(lines[4], " 0 1 1 3 5 3 (D 0,1,1) (S 7,2,2) (D 0,1,1)");
/// ```
pub fn write_solution<W: Write>(
    mut out: W,
    solution: &Solution,
    catalog: &ServiceCatalog,
    depot: usize,
) -> io::Result<()> {
    if !is_complete(solution, catalog) {
        return writeln!(out, "{INFEASIBLE_MARKER}");
    }

    let report = SolutionReport::new(solution, catalog, depot);
    writeln!(out, "{}", solution.total_cost())?;
    writeln!(out, "{}", report.num_routes)?;
    writeln!(out, "{}", report.execution_time_us)?;
    writeln!(out, "{}", report.time_to_best_us)?;

    for route in &report.routes {
        write!(
            out,
            " 0 1 {} {} {} {}",
            route.id,
            route.demand,
            route.cost,
            route.visits.len()
        )?;
        for record in &route.visits {
            match record {
                VisitRecord::Depot { node } => write!(out, " (D 0,{node},{node})")?,
                VisitRecord::Service { id, entry, exit } => {
                    write!(out, " (S {id},{entry},{exit})")?
                }
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the JSON report of `solution`.
pub fn write_solution_json<W: Write>(
    out: W,
    solution: &Solution,
    catalog: &ServiceCatalog,
    depot: usize,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(out, &SolutionReport::new(solution, catalog, depot))
}

fn route_report(route: &Route, catalog: &ServiceCatalog, depot: usize) -> RouteReport {
    let depot_record = VisitRecord::Depot { node: depot + 1 };
    let mut visits = Vec::with_capacity(route.len() + 2);
    visits.push(depot_record);
    for visit in route.visits() {
        let service = catalog.get(visit.service);
        let (entry, exit) = service.endpoints(visit.orientation);
        visits.push(VisitRecord::Service {
            id: service.id(),
            entry: entry + 1,
            exit: exit + 1,
        });
    }
    visits.push(depot_record);

    RouteReport {
        id: route.id(),
        demand: route.total_demand(),
        cost: route.total_cost(),
        visits,
    }
}

fn micros(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CarpError;
    use crate::models::{Orientation, Visit};
    use crate::test_utils::line;

    fn render(solution: &Solution, catalog: &ServiceCatalog) -> String {
        let mut out = Vec::new();
        write_solution(&mut out, solution, catalog, 0).expect("in-memory write");
        String::from_utf8(out).expect("utf-8")
    }

    fn sweep(eval: &crate::evaluation::RouteEvaluator<'_>) -> Solution {
        let mut sol = Solution::new();
        sol.add_route(eval.build_route(
            1,
            vec![
                Visit::forward(0),
                Visit::new(1, Orientation::Reverse),
                Visit::forward(2),
            ],
        ));
        eval.refresh(&mut sol);
        sol
    }

    #[test]
    fn test_write_route_line() {
        let fx = line();
        let eval = fx.evaluator(10);
        let sol = sweep(&eval);
        let text = render(&sol, &fx.catalog);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], sol.total_cost().to_string());
        assert_eq!(lines[1], "1");
        assert_eq!(
            lines[4],
            format!(
                " 0 1 1 8 {} 5 (D 0,1,1) (S 1,2,3) (S 2,5,4) (S 3,6,6) (D 0,1,1)",
                sol.total_cost()
            )
        );
    }

    #[test]
    fn test_infeasible_marker() {
        let fx = line();
        let sol = Solution::infeasible(CarpError::OverCapacityService {
            service_id: 1,
            demand: 3,
            capacity: 2,
        });
        assert_eq!(render(&sol, &fx.catalog), "infeasible\n");
    }

    #[test]
    fn test_incomplete_coverage_is_infeasible() {
        let fx = line();
        let eval = fx.evaluator(10);
        let mut sol = Solution::new();
        sol.add_route(eval.build_route(1, vec![Visit::forward(0)]));
        eval.refresh(&mut sol);
        assert!(sol.is_feasible());
        assert!(!is_complete(&sol, &fx.catalog));
        assert_eq!(render(&sol, &fx.catalog), "infeasible\n");
    }

    #[test]
    fn test_json_report() {
        let fx = line();
        let eval = fx.evaluator(10);
        let sol = sweep(&eval);
        let report = SolutionReport::new(&sol, &fx.catalog, 0);
        assert!(report.feasible);
        assert_eq!(report.total_cost, Some(sol.total_cost()));
        assert_eq!(report.routes[0].visits.len(), 5);
        assert_eq!(
            report.routes[0].visits[2],
            VisitRecord::Service {
                id: 2,
                entry: 5,
                exit: 4
            }
        );

        let json = report.to_json().expect("serializable");
        assert!(json.contains("\"type\": \"depot\""));
        let back: SolutionReport = serde_json::from_str(&json).expect("valid json");
        assert_eq!(back, report);
    }

    #[test]
    fn test_json_report_infeasible() {
        let fx = line();
        let sol = Solution::infeasible(CarpError::UnreachableService {
            service_id: 3,
            node: 5,
        });
        let report = SolutionReport::new(&sol, &fx.catalog, 0);
        assert!(!report.feasible);
        assert_eq!(report.total_cost, None);
        assert!(report
            .infeasibility
            .as_deref()
            .is_some_and(|r| r.contains("service 3")));
    }
}
