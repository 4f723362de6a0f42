//! Greedy capacity packing of a giant tour into routes.
//!
//! # Algorithm
//!
//! Scans the tour left to right, appending each customer to the current
//! route while its demand fits the remaining capacity. A customer that would
//! overflow closes the current route and opens the next one. The order of
//! customers is never changed, only route boundaries are chosen.
//!
//! # Complexity
//!
//! O(n) where n = number of customers.

use crate::models::{Instance, Route, Solution};

/// Splits a giant tour into capacity-feasible routes.
///
/// Relies on every single customer fitting an empty vehicle, which
/// [`Instance::new`] guarantees.
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::split;
/// use u_cvrp::models::{Demand, Instance, NodeCoord};
///
/// let instance = Instance::new(
///     4,
///     20,
///     (1..=4).map(|id| NodeCoord::new(id, id as f64, 0.0)).collect(),
///     vec![Demand::new(1, 0), Demand::new(2, 10), Demand::new(3, 10), Demand::new(4, 10)],
///     1,
/// )
/// .unwrap();
///
/// let solution = split(&[4, 2, 3], &instance);
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.routes()[0].customers(), &[4, 2]);
/// assert_eq!(solution.routes()[1].customers(), &[3]);
/// ```
pub fn split(tour: &[usize], instance: &Instance) -> Solution {
    let depot = instance.depot();
    let capacity = u64::from(instance.capacity());

    let mut solution = Solution::new();
    if tour.is_empty() {
        return solution;
    }

    let mut current = Vec::new();
    let mut load = 0u64;
    for &customer in tour {
        let demand = u64::from(instance.demand_of(customer));
        if load + demand > capacity {
            solution.add_route(Route::from_customers(depot, &current));
            current.clear();
            load = 0;
        }
        current.push(customer);
        load += demand;
    }
    solution.add_route(Route::from_customers(depot, &current));

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn test_split_empty() {
        let instance = fixtures::two_on_a_line();
        assert_eq!(split(&[], &instance).num_routes(), 0);
    }

    #[test]
    fn test_split_all_fit() {
        let instance = fixtures::two_on_a_line();
        let sol = split(&[3, 2], &instance);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].nodes(), &[1, 3, 2, 1]);
    }

    #[test]
    fn test_split_exact_capacity_boundary() {
        // demand 5 each, capacity 10: exactly two per route
        let instance = fixtures::ring(5, 5, 10);
        let sol = split(&[2, 3, 4, 5, 6], &instance);
        let routes: Vec<_> = sol.routes().iter().map(|r| r.customers().to_vec()).collect();
        assert_eq!(routes, vec![vec![2, 3], vec![4, 5], vec![6]]);
    }

    #[test]
    fn test_split_preserves_order() {
        let instance = fixtures::ring(6, 3, 10);
        let tour = [7, 3, 5, 2, 6, 4];
        let sol = split(&tour, &instance);
        assert_eq!(sol.giant_tour(), tour.to_vec());
        assert!(sol.is_feasible(&instance));
    }
}
