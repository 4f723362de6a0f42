//! Tabu search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random construction
//! 2. At each iteration:
//!    a. Generate every intra-route pairwise swap of the current solution
//!    b. Select the cheapest neighbor whose `(current, neighbor)` move is not tabu
//!    c. Move to it unconditionally and record the move in the tabu list
//!    d. Update the best solution if improved
//! 3. Terminate after the iteration budget, or early when no neighbor is admissible
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::collections::HashSet;

use rand::Rng;
use tracing::{info, trace, warn};

use super::config::TabuConfig;
use super::tabu_list::TabuList;
use crate::constructive::RandomSearch;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::{evaluate, FitnessResult, FitnessStats, RunResult, Termination};
use crate::models::{Instance, Solution};

/// Tabu search over intra-route swap moves.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::evaluation::Termination;
/// use u_cvrp::models::{Demand, Instance, NodeCoord};
/// use u_cvrp::tabu::{TabuConfig, TabuSearch};
///
/// let instance = Instance::new(
///     2,
///     10,
///     vec![NodeCoord::new(1, 0.0, 0.0), NodeCoord::new(2, 3.0, 4.0)],
///     vec![Demand::new(1, 0), Demand::new(2, 7)],
///     1,
/// )
/// .unwrap();
///
/// let tabu = TabuSearch::new(&instance, TabuConfig::default()).unwrap();
/// let result = tabu.run(&mut StdRng::seed_from_u64(0)).unwrap();
/// assert_eq!(result.termination, Termination::EmptyNeighborhood { iteration: 0 });
/// assert!((result.best_total_distance - 10.0).abs() < 1e-10);
/// ```
pub struct TabuSearch<'a> {
    instance: &'a Instance,
    config: TabuConfig,
    random: RandomSearch<'a>,
}

impl<'a> TabuSearch<'a> {
    /// Validates `config` and prepares the initial constructor.
    pub fn new(instance: &'a Instance, config: TabuConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instance,
            config,
            random: RandomSearch::new(instance),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Distance matrix used for evaluation.
    pub fn distances(&self) -> &DistanceMatrix {
        self.random.distances()
    }

    /// Runs tabu search from a random initial solution.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<RunResult> {
        let weights = self.config.weights;
        info!(
            instance = self.instance.name().unwrap_or("<unnamed>"),
            iterations = self.config.iterations,
            tabu_tenure = self.config.tabu_tenure,
            "tabu search started"
        );

        let mut current = self.random.generate_random_solution(rng);
        let mut best = current.clone();
        let mut best_fitness = evaluate(&best, self.distances(), weights);

        let mut tabu = TabuList::new(self.config.tabu_tenure);
        let mut stats = FitnessStats::new();
        let mut history = Vec::with_capacity(self.config.iterations);
        let mut termination = Termination::BudgetExhausted;

        for iteration in 0..self.config.iterations {
            let Some((next, next_fitness)) = self.best_admissible_neighbor(&current, &tabu) else {
                warn!(iteration, "no admissible neighbor, stopping early");
                termination = Termination::EmptyNeighborhood { iteration };
                break;
            };

            stats.record(next_fitness.fitness);
            if next_fitness.fitness < best_fitness.fitness {
                best = next.clone();
                best_fitness = next_fitness;
            }
            trace!(
                iteration,
                current = next_fitness.fitness,
                best = best_fitness.fitness,
                "tabu step"
            );

            let previous = std::mem::replace(&mut current, next);
            tabu.push(previous, current.clone());
            history.push(best_fitness.fitness);
        }

        info!(
            best = best_fitness.fitness,
            steps = history.len(),
            "tabu search finished"
        );

        Ok(RunResult::from_best(
            best,
            best_fitness,
            &stats,
            history.len(),
            termination,
            history,
        ))
    }

    /// Cheapest non-tabu pairwise swap of `current`; the first generated wins ties.
    fn best_admissible_neighbor(
        &self,
        current: &Solution,
        tabu: &TabuList,
    ) -> Option<(Solution, FitnessResult)> {
        let forbidden: HashSet<&Solution> = tabu.targets_from(current).collect();
        let mut best: Option<(Solution, FitnessResult)> = None;

        for (r, route) in current.routes().iter().enumerate() {
            for i in 0..route.len() {
                for j in (i + 1)..route.len() {
                    let mut neighbor = current.clone();
                    neighbor.routes_mut()[r].swap_customers(i, j);
                    if forbidden.contains(&neighbor) {
                        continue;
                    }

                    let fitness = evaluate(&neighbor, self.distances(), self.config.weights);
                    let improves = best
                        .as_ref()
                        .map_or(true, |(_, b)| fitness.fitness < b.fitness);
                    if improves {
                        best = Some((neighbor, fitness));
                    }
                }
            }
        }

        best
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
    fn test_single_customer_stops_at_iteration_zero() {
        let instance = fixtures::single_customer();
        let tabu = TabuSearch::new(&instance, TabuConfig::default()).expect("valid config");
        let result = tabu.run(&mut StdRng::seed_from_u64(1)).expect("run");

        assert_eq!(
            result.termination,
            Termination::EmptyNeighborhood { iteration: 0 }
        );
        assert_eq!(result.iterations, 0);
        assert!(result.fitness_history.is_empty());
        assert_eq!(result.best_solution.routes()[0].nodes(), &[1, 2, 1]);
        assert_eq!(result.best_fitness, result.worst_fitness);
        assert_eq!(result.best_fitness, result.average_fitness);
    }

    #[test]
    fn test_two_customers_cycle_until_both_moves_tabu() {
        // one route, one swap: A -> B, B -> A, then (A, B) is tabu
        let instance = fixtures::two_on_a_line();
        let tabu = TabuSearch::new(&instance, TabuConfig::default()).expect("valid config");
        let result = tabu.run(&mut StdRng::seed_from_u64(4)).expect("run");

        assert_eq!(
            result.termination,
            Termination::EmptyNeighborhood { iteration: 2 }
        );
        assert_eq!(result.iterations, 2);
        assert_eq!(result.best_vehicle_count, 1);
        assert!((result.best_total_distance - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_tenure_runs_full_budget() {
        let instance = fixtures::two_on_a_line();
        let config = TabuConfig::default().with_iterations(25).with_tabu_tenure(0);
        let tabu = TabuSearch::new(&instance, config).expect("valid config");
        let result = tabu.run(&mut StdRng::seed_from_u64(4)).expect("run");
        assert_eq!(result.termination, Termination::BudgetExhausted);
        assert_eq!(result.iterations, 25);
        assert_eq!(result.fitness_history.len(), 25);
    }

    #[test]
    fn test_accepted_moves_never_repeat_within_tenure() {
        let instance = fixtures::ring(6, 1, 100);
        let tenure = 5;
        let config = TabuConfig::default().with_tabu_tenure(tenure);
        let search = TabuSearch::new(&instance, config).expect("valid config");

        let mut rng = StdRng::seed_from_u64(17);
        let mut current = search.random.generate_random_solution(&mut rng);
        let mut tabu = TabuList::new(tenure);
        let mut accepted: Vec<(Solution, Solution)> = Vec::new();

        for _ in 0..60 {
            let Some((next, _)) = search.best_admissible_neighbor(&current, &tabu) else {
                break;
            };
            let pair = (current.clone(), next.clone());
            let window_start = accepted.len().saturating_sub(tenure);
            assert!(!accepted[window_start..].contains(&pair));
            accepted.push(pair);
            tabu.push(current, next.clone());
            current = next;
        }
        assert!(!accepted.is_empty());
    }

    #[test]
    fn test_best_is_never_worse_than_history() {
        let instance = fixtures::ring(8, 2, 10);
        let config = TabuConfig::default().with_iterations(100);
        let tabu = TabuSearch::new(&instance, config).expect("valid config");
        let result = tabu.run(&mut StdRng::seed_from_u64(2)).expect("run");
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        if let Some(&last) = result.fitness_history.last() {
            assert_eq!(result.best_fitness, last);
        }
        assert!(result.best_solution.is_feasible(&instance));
    }

    #[test]
    fn test_neighbor_tie_break_prefers_first_generated() {
        // on a line every swap of [2, 3] yields the same distance
        let instance = fixtures::two_on_a_line();
        let search = TabuSearch::new(&instance, TabuConfig::default()).expect("valid config");
        let current = Solution::from_routes(vec![crate::models::Route::from_customers(1, &[2, 3])]);
        let (next, _) = search
            .best_admissible_neighbor(&current, &TabuList::new(3))
            .expect("one neighbor");
        assert_eq!(next.routes()[0].customers(), &[3, 2]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_tabu_best_is_feasible(instance in fixtures::arb_instance(), seed in any::<u64>()) {
            let config = TabuConfig::default().with_iterations(20).with_tabu_tenure(4);
            let tabu = TabuSearch::new(&instance, config).expect("valid config");
            let result = tabu.run(&mut StdRng::seed_from_u64(seed)).expect("run");
            prop_assert!(result.best_solution.check(&instance).is_empty());
        }
    }
}
