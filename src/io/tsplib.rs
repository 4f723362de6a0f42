//! Reader and writer for the TSPLIB-VRP instance format.
//!
//! Only the subset used by CVRP benchmark sets (Augerat, Christofides) is
//! supported: `DIMENSION` and `CAPACITY` headers, `NODE_COORD_SECTION`,
//! `DEMAND_SECTION` and a single-depot `DEPOT_SECTION`.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{CvrpError, Result};
use crate::models::{Demand, Instance, NodeCoord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    NodeCoords,
    Demands,
    Depots,
    Done,
}

/// Reads an instance from a `.vrp` file.
///
/// Without a `NAME` header, the file stem is used as the instance name.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let instance = parse_instance(&text)?;

    if instance.name().is_none() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            return Ok(instance.with_name(stem));
        }
    }
    Ok(instance)
}

/// Parses an instance from TSPLIB-VRP text.
///
/// Header lines may use `KEY : value` or `KEY value`. Unknown headers such
/// as `TYPE`, `COMMENT` or `EDGE_WEIGHT_TYPE` are ignored.
///
/// # Errors
///
/// [`CvrpError::MalformedInstance`] naming the offending line, or any error
/// from [`Instance::new`].
///
/// # Examples
///
/// ```
/// use u_cvrp::io::tsplib::parse_instance;
///
/// let text = "\
/// NAME : tiny
/// TYPE : CVRP
/// DIMENSION : 3
/// CAPACITY : 10
/// NODE_COORD_SECTION
/// 1 0 0
/// 2 2 0
/// 3 4 0
/// DEMAND_SECTION
/// 1 0
/// 2 5
/// 3 5
/// DEPOT_SECTION
/// 1
/// -1
/// EOF
/// ";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.name(), Some("tiny"));
/// assert_eq!(instance.capacity(), 10);
/// assert_eq!(instance.num_customers(), 2);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut name: Option<String> = None;
    let mut dimension: Option<usize> = None;
    let mut capacity: Option<u32> = None;
    let mut node_coords = Vec::new();
    let mut demands = Vec::new();
    let mut depots = Vec::new();
    let mut section = Section::Header;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "NODE_COORD_SECTION" => {
                section = Section::NodeCoords;
                continue;
            }
            "DEMAND_SECTION" => {
                section = Section::Demands;
                continue;
            }
            "DEPOT_SECTION" => {
                section = Section::Depots;
                continue;
            }
            "EOF" => break,
            _ => {}
        }

        match section {
            Section::Header => {
                let (key, value) = split_header(line);
                match key {
                    "NAME" => name = Some(value.to_string()),
                    "DIMENSION" => dimension = Some(parse_field(value, "DIMENSION", line_no)?),
                    "CAPACITY" => capacity = Some(parse_field(value, "CAPACITY", line_no)?),
                    _ => {}
                }
            }
            Section::NodeCoords => {
                let fields = expect_fields(line, 3, "node coordinate", line_no)?;
                node_coords.push(NodeCoord::new(
                    parse_field(fields[0], "node id", line_no)?,
                    parse_field(fields[1], "x coordinate", line_no)?,
                    parse_field(fields[2], "y coordinate", line_no)?,
                ));
            }
            Section::Demands => {
                let fields = expect_fields(line, 2, "demand", line_no)?;
                demands.push(Demand::new(
                    parse_field(fields[0], "node id", line_no)?,
                    parse_field(fields[1], "demand", line_no)?,
                ));
            }
            Section::Depots => {
                let id: i64 = parse_field(line, "depot id", line_no)?;
                if id == -1 {
                    section = Section::Done;
                } else if id <= 0 {
                    return Err(malformed(line_no, format!("invalid depot id {id}")));
                } else {
                    depots.push(id as usize);
                }
            }
            Section::Done => {
                return Err(malformed(line_no, format!("unexpected content '{line}'")));
            }
        }
    }

    let dimension =
        dimension.ok_or_else(|| CvrpError::MalformedInstance("missing DIMENSION".into()))?;
    let capacity =
        capacity.ok_or_else(|| CvrpError::MalformedInstance("missing CAPACITY".into()))?;
    let depot = match depots.as_slice() {
        [depot] => *depot,
        [] => return Err(CvrpError::MalformedInstance("missing depot".into())),
        _ => {
            return Err(CvrpError::MalformedInstance(format!(
                "{} depots given, only one is supported",
                depots.len()
            )))
        }
    };

    node_coords.sort_by_key(|c| c.id);
    demands.sort_by_key(|d| d.id);

    let instance = Instance::new(dimension, capacity, node_coords, demands, depot)?;
    Ok(match name {
        Some(name) => instance.with_name(name),
        None => instance,
    })
}

/// Renders an instance in the format [`parse_instance`] reads.
pub fn format_instance(instance: &Instance) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    if let Some(name) = instance.name() {
        let _ = writeln!(out, "NAME : {name}");
    }
    let _ = writeln!(out, "TYPE : CVRP");
    let _ = writeln!(out, "DIMENSION : {}", instance.dimension());
    let _ = writeln!(out, "EDGE_WEIGHT_TYPE : EUC_2D");
    let _ = writeln!(out, "CAPACITY : {}", instance.capacity());
    out.push_str("NODE_COORD_SECTION\n");
    for c in instance.node_coords() {
        let _ = writeln!(out, "{} {} {}", c.id, c.x, c.y);
    }
    out.push_str("DEMAND_SECTION\n");
    for d in instance.demands() {
        let _ = writeln!(out, "{} {}", d.id, d.demand);
    }
    out.push_str("DEPOT_SECTION\n");
    let _ = writeln!(out, "{}", instance.depot());
    out.push_str("-1\nEOF\n");
    out
}

fn split_header(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line, ""),
        },
    }
}

fn expect_fields<'l>(line: &'l str, count: usize, what: &str, line_no: usize) -> Result<Vec<&'l str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != count {
        return Err(malformed(
            line_no,
            format!("expected {count} fields for {what}, got '{line}'"),
        ));
    }
    Ok(fields)
}

fn parse_field<T: std::str::FromStr>(value: &str, what: &str, line_no: usize) -> Result<T> {
    value
        .parse()
        .map_err(|_| malformed(line_no, format!("cannot parse {what} from '{value}'")))
}

fn malformed(line_no: usize, message: String) -> CvrpError {
    CvrpError::MalformedInstance(format!("line {line_no}: {message}"))
}
