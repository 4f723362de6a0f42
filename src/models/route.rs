//! Depot-to-depot route.

use serde::{Deserialize, Serialize};

/// An ordered visit sequence that starts and ends at the depot.
///
/// The stored node sequence always includes both depot endpoints; customer
/// positions used by [`swap_customers`](Route::swap_customers) are 0-based
/// indices into the interior.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Route;
///
/// let route = Route::from_customers(1, &[3, 2]);
/// assert_eq!(route.nodes(), &[1, 3, 2, 1]);
/// assert_eq!(route.customers(), &[3, 2]);
/// assert_eq!(route.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<usize>,
}

impl Route {
    /// Creates a route visiting `customers` in order from and back to `depot`.
    pub fn from_customers(depot: usize, customers: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(customers.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(customers);
        nodes.push(depot);
        Self { nodes }
    }

    /// Wraps a raw node sequence without checking its endpoints.
    ///
    /// Use [`Solution::check`](super::Solution::check) to validate.
    pub fn from_nodes(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Full node sequence, depot endpoints included.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Interior customer ids in visit order.
    pub fn customers(&self) -> &[usize] {
        if self.nodes.len() < 2 {
            return &[];
        }
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Number of customers on this route.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Swaps the customers at interior positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is `>= self.len()`.
    pub fn swap_customers(&mut self, i: usize, j: usize) {
        let n = self.len();
        assert!(i < n && j < n, "customer position out of range");
        self.nodes.swap(i + 1, j + 1);
    }

    /// Sum of the interior customers' demands.
    pub fn load(&self, demand_of: impl Fn(usize) -> u32) -> u64 {
        self.customers().iter().map(|&c| u64::from(demand_of(c))).sum()
    }
}
