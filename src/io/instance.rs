//! Reader for the CARP `.dat` instance format.
//!
//! ```text
//! Name:		example
//! Capacity:	10
//! Depot Node:	1
//! #Nodes:		4
//!
//! ReN.	DEMAND	S. COST
//! N3	2	1
//!
//! ReE.	From N.	To N.	T. COST	DEMAND	S. COST
//! E1	1	2	5	3	5
//!
//! ReA.	FROM N.	TO N.	T. COST	DEMAND	S. COST
//! A1	2	3	1	1	1
//!
//! EDGE	FROM N.	TO N.	T. COST
//! NrE1	3	4	2
//!
//! ARC	FROM N.	TO N.	T. COST
//! NrA1	4	1	3
//! ```
//!
//! Node ids are 1-based in the file and 0-based in memory. Services get ids
//! `1, 2, …` in reading order. Required edges and arcs are also added to the
//! network as traversable connections. Blank lines and lines starting with
//! `c` are skipped; other `key: value` lines outside sections are ignored.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::config::SolverConfig;
use crate::distance::{Cost, Network};
use crate::error::CarpError;
use crate::models::{ServiceCatalog, ServiceKind};
use crate::solver::Solver;

/// Errors raised while reading an instance file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The instance file could not be read.
    #[error("cannot read instance: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A mandatory header never appeared.
    #[error("missing header `{0}`")]
    MissingHeader(&'static str),

    /// The data parsed but describes an invalid network or service.
    #[error(transparent)]
    Invalid(#[from] CarpError),
}

/// A parsed instance: network, services, depot and capacity.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Instance name, empty when the file has no `Name:` header.
    pub name: String,
    /// Vehicle capacity.
    pub capacity: u64,
    /// Depot node, 0-based.
    pub depot: usize,
    /// Road network with every listed edge and arc.
    pub network: Network,
    /// Required nodes, edges and arcs, in file order.
    pub catalog: ServiceCatalog,
}

impl Instance {
    /// Hands the network and catalog to a [`Solver`].
    pub fn into_solver(self, config: SolverConfig) -> Solver {
        Solver::new(self.network, self.catalog).with_config(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    RequiredNodes,
    RequiredEdges,
    RequiredArcs,
    Edges,
    Arcs,
}

impl Section {
    fn from_header(token: &str) -> Option<Self> {
        match token {
            "ReN." => Some(Section::RequiredNodes),
            "ReE." => Some(Section::RequiredEdges),
            "ReA." => Some(Section::RequiredArcs),
            "EDGE" => Some(Section::Edges),
            "ARC" => Some(Section::Arcs),
            _ => None,
        }
    }
}

struct Connection {
    from: usize,
    to: usize,
    cost: Cost,
    directed: bool,
    required: bool,
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Parses an instance from its text.
///
/// # Examples
///
/// ```
/// use u_carp::io::parse_instance;
///
/// let text = "Capacity: 10\nDepot Node: 1\n#Nodes: 2\n\nReE.\tFrom N.\tTo N.\tT. COST\tDEMAND\tS. COST\nE1\t1\t2\t5\t3\t5\n";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.depot, 0);
/// assert_eq!(instance.catalog.len(), 1);
/// assert_eq!(instance.network.num_required(), 2);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, ParseError> {
    let mut name = String::new();
    let mut capacity: Option<u64> = None;
    let mut depot: Option<usize> = None;
    let mut nodes: Option<usize> = None;

    let mut section = Section::None;
    let mut catalog = ServiceCatalog::new();
    let mut connections: Vec<Connection> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        if let Some(next) = Section::from_header(first) {
            section = next;
            continue;
        }

        if section == Section::None {
            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                match key.trim() {
                    "Name" => name = value.to_string(),
                    "Capacity" => capacity = Some(number(value, line_no)?),
                    "Depot Node" => depot = Some(node_id(value, line_no)?),
                    "#Nodes" => nodes = Some(number(value, line_no)?),
                    _ => {}
                }
            }
            continue;
        }

        let fields: Vec<&str> = tokens.collect();
        let next_id = catalog.len() + 1;
        match section {
            Section::RequiredNodes => {
                let node_token = first.strip_prefix('N').unwrap_or(first);
                let node = node_id(node_token, line_no)?;
                let [demand, service_cost] = columns::<2>(&fields, line_no)?;
                catalog.add_service(
                    next_id,
                    ServiceKind::Node,
                    node,
                    node,
                    number(demand, line_no)?,
                    number(service_cost, line_no)?,
                    0,
                );
            }
            Section::RequiredEdges | Section::RequiredArcs => {
                let [from, to, travel, demand, service_cost] = columns::<5>(&fields, line_no)?;
                let (from, to) = (node_id(from, line_no)?, node_id(to, line_no)?);
                let travel = number(travel, line_no)?;
                let directed = section == Section::RequiredArcs;
                let kind = if directed {
                    ServiceKind::Arc
                } else {
                    ServiceKind::Edge
                };
                connections.push(Connection {
                    from,
                    to,
                    cost: travel,
                    directed,
                    required: true,
                });
                catalog.add_service(
                    next_id,
                    kind,
                    from,
                    to,
                    number(demand, line_no)?,
                    number(service_cost, line_no)?,
                    travel,
                );
            }
            Section::Edges | Section::Arcs => {
                let [from, to, cost] = columns::<3>(&fields, line_no)?;
                connections.push(Connection {
                    from: node_id(from, line_no)?,
                    to: node_id(to, line_no)?,
                    cost: number(cost, line_no)?,
                    directed: section == Section::Arcs,
                    required: false,
                });
            }
            Section::None => {}
        }
    }

    let capacity = capacity.ok_or(ParseError::MissingHeader("Capacity"))?;
    let depot = depot.ok_or(ParseError::MissingHeader("Depot Node"))?;
    let nodes = nodes.ok_or(ParseError::MissingHeader("#Nodes"))?;

    let mut network = Network::new(nodes)?;
    for c in &connections {
        network.add_connection(c.from, c.to, c.cost, c.directed, c.required);
    }

    debug!(
        name = %name,
        nodes,
        connections = network.num_connections(),
        services = catalog.len(),
        "instance parsed"
    );

    Ok(Instance {
        name,
        capacity,
        depot,
        network,
        catalog,
    })
}

fn number<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::Syntax {
        line,
        reason: format!("expected a non-negative integer, found `{token}`"),
    })
}

/// Converts a 1-based node id to a 0-based index.
fn node_id(token: &str, line: usize) -> Result<usize, ParseError> {
    let id: usize = number(token, line)?;
    id.checked_sub(1).ok_or_else(|| ParseError::Syntax {
        line,
        reason: "node ids start at 1".into(),
    })
}

/// The last `N` columns of a data row (leading label columns are skipped).
fn columns<'a, const N: usize>(fields: &[&'a str], line: usize) -> Result<[&'a str; N], ParseError> {
    if fields.len() < N {
        return Err(ParseError::Syntax {
            line,
            reason: format!("expected {N} columns after the label, found {}", fields.len()),
        });
    }
    let mut out = [""; N];
    out.copy_from_slice(&fields[fields.len() - N..]);
    Ok(out)
}
