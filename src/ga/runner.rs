//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates the complete evolutionary process:
//! seeding → evaluation → selection → crossover → mutation → elitist
//! truncation → repeat.

use rand::Rng;
use tracing::{debug, info};

use super::chromosome::GiantTour;
use super::config::GaConfig;
use super::operators::swap_mutation;
use super::selection::tournament;
use crate::constructive::{GreedySearch, RandomSearch};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::{
    evaluate, FitnessResult, FitnessStats, FitnessWeights, RunResult, Termination,
};
use crate::models::{Instance, Solution};

/// Share of the initial population seeded by randomized greedy.
const GREEDY_SEED_RATIO: f64 = 0.8;

/// Genetic algorithm over CVRP solutions.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::ga::{GaConfig, GeneticAlgorithm};
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
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5);
/// let ga = GeneticAlgorithm::new(&instance, config).unwrap();
/// let result = ga.run(&mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(result.best_vehicle_count, 1);
/// assert!((result.best_total_distance - 8.0).abs() < 1e-10);
/// ```
pub struct GeneticAlgorithm<'a> {
    instance: &'a Instance,
    config: GaConfig,
    random: RandomSearch<'a>,
    greedy: GreedySearch<'a>,
}

impl<'a> GeneticAlgorithm<'a> {
    /// Validates `config` and prepares the seeding constructors.
    ///
    /// # Errors
    ///
    /// Any error from [`GaConfig::validate`]; no sampling happens before it.
    pub fn new(instance: &'a Instance, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let greedy = GreedySearch::new(instance).with_params(config.greedy)?;
        Ok(Self {
            instance,
            config,
            random: RandomSearch::new(instance),
            greedy,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Distance matrix used for evaluation.
    pub fn distances(&self) -> &DistanceMatrix {
        self.greedy.distances()
    }

    /// Builds the initial population: 80% randomized greedy, the rest random.
    pub fn generate_initial_population<R: Rng>(&self, rng: &mut R) -> Vec<Solution> {
        let size = self.config.population_size;
        let greedy_count = (size as f64 * GREEDY_SEED_RATIO) as usize;

        let mut population = Vec::with_capacity(size);
        for _ in 0..greedy_count {
            population.push(self.greedy.generate_randomized_greedy_solution(rng));
        }
        for _ in greedy_count..size {
            population.push(self.random.generate_random_solution(rng));
        }
        population
    }

    /// Produces a child by order crossover followed by greedy repacking.
    pub fn crossover<R: Rng>(&self, parent1: &Solution, parent2: &Solution, rng: &mut R) -> Solution {
        GiantTour::from_solution(parent1)
            .crossover(&GiantTour::from_solution(parent2), rng)
            .into_solution(self.instance)
    }

    /// Applies swap mutation with the configured rate.
    pub fn mutate<R: Rng>(&self, individual: &mut Solution, rng: &mut R) {
        swap_mutation(individual, self.config.mutation_rate, rng);
    }

    /// Runs the GA for the configured number of generations.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<RunResult> {
        let size = self.config.population_size;
        let generations = self.config.generations;
        info!(
            instance = self.instance.name().unwrap_or("<unnamed>"),
            population_size = size,
            generations,
            "genetic algorithm started"
        );

        let mut population = self.generate_initial_population(rng);
        let mut stats = FitnessStats::new();
        let mut history = Vec::with_capacity(generations);

        for generation in 0..generations {
            let fitness = self.evaluate_population(&population);

            let mut gen_stats = FitnessStats::new();
            for f in &fitness {
                stats.record(f.fitness);
                gen_stats.record(f.fitness);
            }
            history.push(gen_stats.best());
            debug!(
                generation,
                best = gen_stats.best(),
                worst = gen_stats.worst(),
                overall_best = stats.best(),
                "generation evaluated"
            );

            let scores: Vec<f64> = fitness.iter().map(|f| f.fitness).collect();
            let mut offspring = Vec::with_capacity(size);
            for _ in 0..size {
                let parent1 = &population[tournament(&scores, self.config.tournament_size, rng)];
                let parent2 = &population[tournament(&scores, self.config.tournament_size, rng)];

                let mut child = if rng.random_range(0.0..1.0) < self.config.crossover_rate {
                    self.crossover(parent1, parent2, rng)
                } else if rng.random_bool(0.5) {
                    parent1.clone()
                } else {
                    parent2.clone()
                };
                self.mutate(&mut child, rng);
                offspring.push(child);
            }
            let offspring_fitness = self.evaluate_population(&offspring);

            let mut merged: Vec<(Solution, FitnessResult)> = population
                .into_iter()
                .zip(fitness)
                .chain(offspring.into_iter().zip(offspring_fitness))
                .collect();
            // stable: ties keep parents ahead of offspring
            merged.sort_by(|a, b| a.1.fitness.total_cmp(&b.1.fitness));
            merged.truncate(size);
            population = merged.into_iter().map(|(solution, _)| solution).collect();
        }

        let best_solution = population.swap_remove(0);
        let best = evaluate(&best_solution, self.distances(), self.config.weights);

        info!(
            best = best.fitness,
            worst = stats.worst(),
            vehicles = best.vehicle_count,
            "genetic algorithm finished"
        );

        Ok(RunResult::from_best(
            best_solution,
            best,
            &stats,
            generations,
            Termination::BudgetExhausted,
            history,
        ))
    }

    fn evaluate_population(&self, population: &[Solution]) -> Vec<FitnessResult> {
        evaluate_all(
            population,
            self.distances(),
            self.config.weights,
            self.config.parallel,
        )
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all(
    population: &[Solution],
    distances: &DistanceMatrix,
    weights: FitnessWeights,
    parallel: bool,
) -> Vec<FitnessResult> {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter()
            .map(|s| evaluate(s, distances, weights))
            .collect()
    } else {
        population
            .iter()
            .map(|s| evaluate(s, distances, weights))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    population: &[Solution],
    distances: &DistanceMatrix,
    weights: FitnessWeights,
    _parallel: bool,
) -> Vec<FitnessResult> {
    population
        .iter()
        .map(|s| evaluate(s, distances, weights))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CvrpError;
    use crate::models::fixtures;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(12)
            .with_generations(15)
            .with_tournament_size(3)
    }

    #[test]
    fn test_invalid_tournament_rejected_before_sampling() {
        let instance = fixtures::two_on_a_line();
        let config = GaConfig::default()
            .with_population_size(5)
            .with_tournament_size(6);
        assert!(matches!(
            GeneticAlgorithm::new(&instance, config),
            Err(CvrpError::InvalidTournamentSize {
                tournament_size: 6,
                population_size: 5
            })
        ));
    }

    #[test]
    fn test_initial_population_split() {
        let instance = fixtures::ring(6, 2, 10);
        let ga = GeneticAlgorithm::new(&instance, small_config().with_population_size(10))
            .expect("valid config");
        let population = ga.generate_initial_population(&mut StdRng::seed_from_u64(1));
        assert_eq!(population.len(), 10);
        assert!(population.iter().all(|s| s.is_feasible(&instance)));
    }

    #[test]
    fn test_two_on_a_line_scenario() {
        let instance = fixtures::two_on_a_line();
        let ga = GeneticAlgorithm::new(&instance, small_config()).expect("valid config");
        let result = ga.run(&mut StdRng::seed_from_u64(3)).expect("run");
        assert_eq!(result.best_vehicle_count, 1);
        assert!((result.best_total_distance - 8.0).abs() < 1e-10);
        assert_eq!(result.iterations, 15);
        assert_eq!(result.termination, Termination::BudgetExhausted);
    }

    #[test]
    fn test_history_non_increasing() {
        let instance = fixtures::ring(10, 3, 10);
        let ga = GeneticAlgorithm::new(&instance, small_config().with_generations(30))
            .expect("valid config");
        let result = ga.run(&mut StdRng::seed_from_u64(21)).expect("run");
        assert_eq!(result.fitness_history.len(), 30);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        let last = *result.fitness_history.last().expect("non-empty history");
        assert!(result.best_fitness <= last);
    }

    #[test]
    fn test_aggregates_ordering() {
        let instance = fixtures::ring(8, 4, 10);
        let ga = GeneticAlgorithm::new(&instance, small_config()).expect("valid config");
        let result = ga.run(&mut StdRng::seed_from_u64(8)).expect("run");
        assert!(result.best_fitness <= result.average_fitness + 1e-9);
        assert!(result.average_fitness <= result.worst_fitness + 1e-9);
        assert!(result.best_solution.is_feasible(&instance));
    }

    #[test]
    fn test_same_seed_same_result() {
        let instance = fixtures::ring(8, 4, 10);
        let ga = GeneticAlgorithm::new(&instance, small_config()).expect("valid config");
        let a = ga.run(&mut StdRng::seed_from_u64(99)).expect("run");
        let b = ga.run(&mut StdRng::seed_from_u64(99)).expect("run");
        assert_eq!(a.best_solution, b.best_solution);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_crossover_child_is_feasible() {
        let instance = fixtures::ring(7, 4, 10);
        let ga = GeneticAlgorithm::new(&instance, small_config()).expect("valid config");
        let mut rng = StdRng::seed_from_u64(13);
        let population = ga.generate_initial_population(&mut rng);
        for pair in population.windows(2) {
            let child = ga.crossover(&pair[0], &pair[1], &mut rng);
            assert!(child.check(&instance).is_empty());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_ga_best_is_feasible(instance in fixtures::arb_instance(), seed in any::<u64>()) {
            let config = GaConfig::default()
                .with_population_size(6)
                .with_generations(4)
                .with_tournament_size(2);
            let ga = GeneticAlgorithm::new(&instance, config).expect("valid config");
            let result = ga.run(&mut StdRng::seed_from_u64(seed)).expect("run");
            prop_assert!(result.best_solution.check(&instance).is_empty());
        }
    }
}
