//! Giant tour view of a CVRP solution.
//!
//! A giant tour is the depot-free concatenation of every route's customers
//! in visiting order. Crossover works on this permutation; the
//! [`split`](super::split) step packs it back into capacity-feasible routes.

use rand::Rng;

use super::operators::order_crossover;
use super::split::split;
use crate::models::{Instance, Solution};

/// A permutation of customer ids that encodes a CVRP solution.
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::GiantTour;
/// use u_cvrp::models::{Route, Solution};
///
/// let sol = Solution::from_routes(vec![
///     Route::from_customers(1, &[3, 2]),
///     Route::from_customers(1, &[4]),
/// ]);
/// let tour = GiantTour::from_solution(&sol);
/// assert_eq!(tour.customers(), &[3, 2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiantTour {
    customers: Vec<usize>,
}

impl GiantTour {
    /// Wraps a customer permutation.
    pub fn new(customers: Vec<usize>) -> Self {
        Self { customers }
    }

    /// Flattens a solution's routes, dropping depot visits.
    pub fn from_solution(solution: &Solution) -> Self {
        Self::new(solution.giant_tour())
    }

    /// Customer ids in visiting order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// True if no customer is visited.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Order crossover with `other` as the second parent.
    pub fn crossover<R: Rng>(&self, other: &GiantTour, rng: &mut R) -> GiantTour {
        GiantTour::new(order_crossover(&self.customers, &other.customers, rng))
    }

    /// Packs the tour into capacity-feasible routes for `instance`.
    pub fn into_solution(self, instance: &Instance) -> Solution {
        split(&self.customers, instance)
    }
}
