//! Problem instance: coordinates, demands, capacity and depot.

use serde::{Deserialize, Serialize};

use crate::error::{CvrpError, Result};

/// A node location in the plane.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::NodeCoord;
///
/// let a = NodeCoord::new(1, 0.0, 0.0);
/// let b = NodeCoord::new(2, 3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeCoord {
    /// Node id (1-based).
    pub id: usize,
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl NodeCoord {
    /// Creates a node coordinate.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &NodeCoord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Demand of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    /// Node id (1-based).
    pub id: usize,
    /// Units to deliver.
    pub demand: u32,
}

impl Demand {
    /// Creates a demand entry.
    pub fn new(id: usize, demand: u32) -> Self {
        Self { id, demand }
    }
}

/// A validated CVRP instance.
///
/// Node ids are 1-based and positional: entry `i` of both `node_coords` and
/// `demands` describes node `i + 1`. One node is the depot, every other node
/// is a customer. Construction rejects any customer whose demand alone
/// exceeds the vehicle capacity, so every constructor in this crate can
/// always place every customer.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Demand, Instance, NodeCoord};
///
/// let instance = Instance::new(
///     3,
///     10,
///     vec![
///         NodeCoord::new(1, 0.0, 0.0),
///         NodeCoord::new(2, 2.0, 0.0),
///         NodeCoord::new(3, 4.0, 0.0),
///     ],
///     vec![Demand::new(1, 0), Demand::new(2, 5), Demand::new(3, 5)],
///     1,
/// )
/// .unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.customers().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    name: Option<String>,
    dimension: usize,
    capacity: u32,
    node_coords: Vec<NodeCoord>,
    demands: Vec<Demand>,
    depot: usize,
}

impl Instance {
    /// Creates an instance, validating its structure.
    ///
    /// # Errors
    ///
    /// - [`CvrpError::MalformedInstance`] if sequence lengths disagree with
    ///   `dimension`, ids are not positional, the depot is out of range or
    ///   there are no customers.
    /// - [`CvrpError::InfeasibleDemand`] if some customer's demand exceeds
    ///   `capacity`.
    pub fn new(
        dimension: usize,
        capacity: u32,
        node_coords: Vec<NodeCoord>,
        demands: Vec<Demand>,
        depot: usize,
    ) -> Result<Self> {
        if dimension < 2 {
            return Err(CvrpError::MalformedInstance(format!(
                "dimension {dimension} leaves no customers besides the depot"
            )));
        }
        if node_coords.len() != dimension {
            return Err(CvrpError::MalformedInstance(format!(
                "expected {dimension} node coordinates, got {}",
                node_coords.len()
            )));
        }
        if demands.len() != dimension {
            return Err(CvrpError::MalformedInstance(format!(
                "expected {dimension} demands, got {}",
                demands.len()
            )));
        }
        if depot == 0 || depot > dimension {
            return Err(CvrpError::MalformedInstance(format!(
                "depot id {depot} outside [1, {dimension}]"
            )));
        }

        for (idx, (coord, demand)) in node_coords.iter().zip(&demands).enumerate() {
            let expected = idx + 1;
            if coord.id != expected {
                return Err(CvrpError::MalformedInstance(format!(
                    "node coordinate at position {idx} has id {}, expected {expected}",
                    coord.id
                )));
            }
            if demand.id != expected {
                return Err(CvrpError::MalformedInstance(format!(
                    "demand at position {idx} has id {}, expected {expected}",
                    demand.id
                )));
            }
            if demand.id != depot && demand.demand > capacity {
                return Err(CvrpError::InfeasibleDemand {
                    customer: demand.id,
                    demand: demand.demand,
                    capacity,
                });
            }
        }

        Ok(Self {
            name: None,
            dimension,
            capacity,
            node_coords,
            demands,
            depot,
        })
    }

    /// Attaches a display name (usually the file name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Instance name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of nodes, depot included.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Per-vehicle load limit.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Node coordinates in id order.
    pub fn node_coords(&self) -> &[NodeCoord] {
        &self.node_coords
    }

    /// Demands in id order.
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Demand of the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `[1, dimension]`.
    pub fn demand_of(&self, id: usize) -> u32 {
        self.demands[id - 1].demand
    }

    /// Customer ids in ascending order (every node except the depot).
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.dimension).filter(move |&id| id != self.depot)
    }

    /// Number of customers.
    pub fn num_customers(&self) -> usize {
        self.dimension - 1
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> u64 {
        self.customers().map(|id| u64::from(self.demand_of(id))).sum()
    }
}
