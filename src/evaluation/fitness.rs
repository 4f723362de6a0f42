//! Weighted distance/vehicle fitness.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::Solution;

/// Objective weights: `fitness = alpha·distance + beta·vehicles`.
///
/// # Examples
///
/// ```
/// use u_cvrp::evaluation::FitnessWeights;
///
/// let w = FitnessWeights::default();
/// assert_eq!(w.alpha, 1.0);
/// assert_eq!(w.beta, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight of total travel distance.
    pub alpha: f64,
    /// Weight per vehicle (route) used.
    pub beta: f64,
}

impl FitnessWeights {
    /// Creates custom objective weights.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 100.0,
        }
    }
}

/// Fitness of a solution with its two components.
///
/// Lower fitness is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessResult {
    /// Weighted objective value.
    pub fitness: f64,
    /// Sum of all route lengths.
    pub total_distance: f64,
    /// Number of routes.
    pub vehicle_count: usize,
}

/// Evaluates a solution against a distance matrix.
///
/// Route distance is the sum over consecutive node pairs, depot legs
/// included. Pure: equal inputs always give equal outputs.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::evaluation::{evaluate, FitnessWeights};
/// use u_cvrp::models::{NodeCoord, Route, Solution};
///
/// let dm = DistanceMatrix::from_coords(&[
///     NodeCoord::new(1, 0.0, 0.0),
///     NodeCoord::new(2, 2.0, 0.0),
///     NodeCoord::new(3, 4.0, 0.0),
/// ]);
/// let sol = Solution::from_routes(vec![Route::from_customers(1, &[2, 3])]);
/// let result = evaluate(&sol, &dm, FitnessWeights::default());
/// assert!((result.total_distance - 8.0).abs() < 1e-10);
/// assert_eq!(result.vehicle_count, 1);
/// assert!((result.fitness - 108.0).abs() < 1e-10);
/// ```
pub fn evaluate(
    solution: &Solution,
    distances: &DistanceMatrix,
    weights: FitnessWeights,
) -> FitnessResult {
    let total_distance: f64 = solution
        .routes()
        .iter()
        .map(|route| {
            route
                .nodes()
                .windows(2)
                .map(|pair| distances.between(pair[0], pair[1]))
                .sum::<f64>()
        })
        .sum();
    let vehicle_count = solution.num_routes();

    FitnessResult {
        fitness: weights.alpha * total_distance + weights.beta * vehicle_count as f64,
        total_distance,
        vehicle_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeCoord, Route};

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_coords(&[
            NodeCoord::new(1, 0.0, 0.0),
            NodeCoord::new(2, 0.0, 3.0),
            NodeCoord::new(3, 4.0, 3.0),
            NodeCoord::new(4, 4.0, 0.0),
        ])
    }

    #[test]
    fn test_single_route() {
        let sol = Solution::from_routes(vec![Route::from_customers(1, &[2, 3, 4])]);
        let r = evaluate(&sol, &square(), FitnessWeights::default());
        // 3 + 4 + 3 + 4
        assert!((r.total_distance - 14.0).abs() < 1e-10);
        assert_eq!(r.vehicle_count, 1);
        assert!((r.fitness - 114.0).abs() < 1e-10);
    }

    #[test]
    fn test_custom_weights() {
        let sol = Solution::from_routes(vec![
            Route::from_customers(1, &[2]),
            Route::from_customers(1, &[4]),
        ]);
        let r = evaluate(&sol, &square(), FitnessWeights::new(2.0, 10.0));
        assert!((r.total_distance - 14.0).abs() < 1e-10);
        assert_eq!(r.vehicle_count, 2);
        assert!((r.fitness - 48.0).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let sol = Solution::from_routes(vec![Route::from_customers(1, &[3, 2, 4])]);
        let dm = square();
        let a = evaluate(&sol, &dm, FitnessWeights::default());
        let b = evaluate(&sol, &dm, FitnessWeights::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_route_order_does_not_matter() {
        let dm = square();
        let r1 = Route::from_customers(1, &[2, 3]);
        let r2 = Route::from_customers(1, &[4]);
        let a = evaluate(
            &Solution::from_routes(vec![r1.clone(), r2.clone()]),
            &dm,
            FitnessWeights::default(),
        );
        let b = evaluate(
            &Solution::from_routes(vec![r2, r1]),
            &dm,
            FitnessWeights::default(),
        );
        assert!((a.total_distance - b.total_distance).abs() < 1e-10);
        assert_eq!(a.vehicle_count, b.vehicle_count);
    }

    #[test]
    fn test_empty_solution() {
        let r = evaluate(&Solution::new(), &square(), FitnessWeights::default());
        assert_eq!(r.total_distance, 0.0);
        assert_eq!(r.vehicle_count, 0);
        assert_eq!(r.fitness, 0.0);
    }
}
