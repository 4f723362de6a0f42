//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::{Instance, Route};

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// A customer is not visited by any route.
    MissingCustomer {
        /// Customer id.
        customer_id: usize,
    },
    /// A customer is visited more than once.
    DuplicateCustomer {
        /// Customer id.
        customer_id: usize,
    },
    /// A node id outside `[1, dimension]`, or the depot in a route interior.
    UnknownNode {
        /// Route index in the solution.
        route_index: usize,
        /// Offending node id.
        node_id: usize,
    },
    /// The route does not start and end at the depot.
    MisplacedDepot {
        /// Route index in the solution.
        route_index: usize,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A CVRP solution: an ordered list of depot-rooted routes.
///
/// Solutions are plain values. Two solutions are equal when they hold the
/// same routes in the same order, which is what tabu search relies on.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, Solution};
///
/// let sol = Solution::from_routes(vec![
///     Route::from_customers(1, &[2, 3]),
///     Route::from_customers(1, &[4]),
/// ]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.giant_tour(), vec![2, 3, 4]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Creates a solution from routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Concatenation of every route's customers in visit order, depots removed.
    pub fn giant_tour(&self) -> Vec<usize> {
        let mut tour = Vec::with_capacity(self.num_served());
        for route in &self.routes {
            tour.extend_from_slice(route.customers());
        }
        tour
    }

    /// Checks the partition and capacity invariants against an instance.
    ///
    /// Returns every violation found; an empty list means the solution is
    /// feasible.
    pub fn check(&self, instance: &Instance) -> Vec<Violation> {
        let depot = instance.depot();
        let dimension = instance.dimension();
        let mut violations = Vec::new();
        let mut seen = vec![0usize; dimension + 1];

        for (route_index, route) in self.routes.iter().enumerate() {
            let nodes = route.nodes();
            if nodes.len() < 2 || nodes[0] != depot || nodes[nodes.len() - 1] != depot {
                violations.push(Violation::new(ViolationType::MisplacedDepot { route_index }));
            }

            let mut load = 0u64;
            for &node_id in route.customers() {
                if node_id == 0 || node_id > dimension || node_id == depot {
                    violations.push(Violation::new(ViolationType::UnknownNode {
                        route_index,
                        node_id,
                    }));
                    continue;
                }
                seen[node_id] += 1;
                load += u64::from(instance.demand_of(node_id));
            }

            if load > u64::from(instance.capacity()) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index,
                    load,
                    capacity: instance.capacity(),
                }));
            }
        }

        for customer_id in instance.customers() {
            match seen[customer_id] {
                0 => violations.push(Violation::new(ViolationType::MissingCustomer {
                    customer_id,
                })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer_id,
                })),
            }
        }

        violations
    }

    /// Returns `true` if [`check`](Self::check) finds no violation.
    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.check(instance).is_empty()
    }
}
