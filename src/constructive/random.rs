//! Uniform random construction.
//!
//! Picks unrouted customers uniformly at random and appends each to the
//! current route while it fits; a customer that would overflow closes the
//! route and opens the next one. Serves as the baseline sampler and as the
//! starting point for tabu search.

use rand::Rng;
use tracing::info;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::{
    ensure_budget, evaluate, FitnessStats, FitnessWeights, RunResult, Termination,
};
use crate::models::{Instance, Route, Solution};

/// Random-insertion sampler for an instance.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::constructive::RandomSearch;
/// use u_cvrp::evaluation::FitnessWeights;
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
///
/// let search = RandomSearch::new(&instance);
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = search.run(&mut rng, 10, FitnessWeights::default()).unwrap();
/// assert_eq!(result.best_vehicle_count, 1);
/// assert!((result.best_total_distance - 8.0).abs() < 1e-10);
/// ```
pub struct RandomSearch<'a> {
    instance: &'a Instance,
    distances: DistanceMatrix,
}

impl<'a> RandomSearch<'a> {
    /// Creates a sampler and precomputes the instance's distance matrix.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            distances: DistanceMatrix::from_instance(instance),
        }
    }

    /// Distance matrix owned by this sampler.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Builds one solution by random capacity-respecting insertion.
    pub fn generate_random_solution<R: Rng>(&self, rng: &mut R) -> Solution {
        let depot = self.instance.depot();
        let capacity = u64::from(self.instance.capacity());
        let mut remaining: Vec<usize> = self.instance.customers().collect();

        let mut solution = Solution::new();
        let mut current = Vec::new();
        let mut load = 0u64;

        while !remaining.is_empty() {
            let customer = remaining.swap_remove(rng.random_range(0..remaining.len()));
            let demand = u64::from(self.instance.demand_of(customer));

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

    /// Samples `iterations` independent solutions and keeps the best.
    ///
    /// Best, worst and average fitness are taken over all samples.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InvalidConfig`](crate::error::CvrpError::InvalidConfig)
    /// if `iterations` is zero.
    pub fn run<R: Rng>(
        &self,
        rng: &mut R,
        iterations: usize,
        weights: FitnessWeights,
    ) -> Result<RunResult> {
        ensure_budget("iterations", iterations)?;
        info!(
            instance = self.instance.name().unwrap_or("<unnamed>"),
            iterations, "random search started"
        );

        let mut stats = FitnessStats::new();
        let mut history = Vec::with_capacity(iterations);

        let mut best_solution = self.generate_random_solution(rng);
        let mut best_fitness = evaluate(&best_solution, &self.distances, weights);
        stats.record(best_fitness.fitness);
        history.push(stats.best());

        for _ in 1..iterations {
            let solution = self.generate_random_solution(rng);
            let fitness = evaluate(&solution, &self.distances, weights);
            stats.record(fitness.fitness);

            if fitness.fitness < best_fitness.fitness {
                best_solution = solution;
                best_fitness = fitness;
            }
            history.push(stats.best());
        }

        info!(
            best = best_fitness.fitness,
            worst = stats.worst(),
            "random search finished"
        );

        Ok(RunResult::from_best(
            best_solution,
            best_fitness,
            &stats,
            iterations,
            Termination::BudgetExhausted,
            history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_two_customers_share_one_route() {
        let instance = fixtures::two_on_a_line();
        let search = RandomSearch::new(&instance);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let sol = search.generate_random_solution(&mut rng);
            assert_eq!(sol.num_routes(), 1);
            let nodes = sol.routes()[0].nodes();
            assert!(nodes == [1, 2, 3, 1] || nodes == [1, 3, 2, 1]);
        }
    }

    #[test]
    fn test_run_scenario() {
        let instance = fixtures::two_on_a_line();
        let search = RandomSearch::new(&instance);
        let mut rng = StdRng::seed_from_u64(1);
        let result = search
            .run(&mut rng, 5, FitnessWeights::default())
            .expect("run");
        assert_eq!(result.best_vehicle_count, 1);
        assert!((result.best_total_distance - 8.0).abs() < 1e-10);
        assert!((result.best_fitness - 108.0).abs() < 1e-10);
        assert!((result.worst_fitness - 108.0).abs() < 1e-10);
        assert!((result.average_fitness - 108.0).abs() < 1e-10);
        assert_eq!(result.iterations, 5);
        assert_eq!(result.fitness_history.len(), 5);
    }

    #[test]
    fn test_tight_capacity_one_customer_per_route() {
        let instance = fixtures::ring(6, 10, 10);
        let search = RandomSearch::new(&instance);
        let mut rng = StdRng::seed_from_u64(3);
        let sol = search.generate_random_solution(&mut rng);
        assert_eq!(sol.num_routes(), 6);
        assert!(sol.routes().iter().all(|r| r.len() == 1));
        assert!(sol.is_feasible(&instance));
    }

    #[test]
    fn test_stats_ordering() {
        let instance = fixtures::ring(8, 3, 10);
        let search = RandomSearch::new(&instance);
        let mut rng = StdRng::seed_from_u64(11);
        let result = search
            .run(&mut rng, 50, FitnessWeights::default())
            .expect("run");
        assert!(result.best_fitness <= result.average_fitness + 1e-9);
        assert!(result.average_fitness <= result.worst_fitness + 1e-9);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let instance = fixtures::ring(8, 3, 10);
        let search = RandomSearch::new(&instance);
        let a = search
            .run(&mut StdRng::seed_from_u64(5), 20, FitnessWeights::default())
            .expect("run");
        let b = search
            .run(&mut StdRng::seed_from_u64(5), 20, FitnessWeights::default())
            .expect("run");
        assert_eq!(a.best_solution, b.best_solution);
        assert_eq!(a.average_fitness, b.average_fitness);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let instance = fixtures::two_on_a_line();
        let search = RandomSearch::new(&instance);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(search.run(&mut rng, 0, FitnessWeights::default()).is_err());
    }

    proptest! {
        #[test]
        fn prop_random_solution_is_feasible(instance in fixtures::arb_instance(), seed in any::<u64>()) {
            let search = RandomSearch::new(&instance);
            let mut rng = StdRng::seed_from_u64(seed);
            let sol = search.generate_random_solution(&mut rng);
            prop_assert!(sol.check(&instance).is_empty());
        }
    }
}
