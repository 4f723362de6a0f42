//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use crate::constructive::GreedyParams;
use crate::error::{CvrpError, Result};
use crate::evaluation::FitnessWeights;

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_cvrp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 1000);
/// assert_eq!(config.tournament_size, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_cvrp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generations(200)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals kept after each elitist truncation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Probability of producing a child by order crossover (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of one parent is used.
    pub crossover_rate: f64,

    /// Per-route probability of a swap mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Individuals drawn without replacement per tournament.
    pub tournament_size: usize,

    /// Parameters of the randomized greedy seeding.
    pub greedy: GreedyParams,

    /// Evaluate each population on rayon when the `parallel` feature is on.
    pub parallel: bool,

    /// Objective weights.
    pub weights: FitnessWeights,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            tournament_size: 5,
            greedy: GreedyParams::default(),
            parallel: false,
            weights: FitnessWeights::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the greedy seeding parameters.
    pub fn with_greedy(mut self, greedy: GreedyParams) -> Self {
        self.greedy = greedy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`CvrpError::InvalidTournamentSize`] if the tournament is larger
    ///   than the population.
    /// - [`CvrpError::InvalidConfig`] for any other out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(CvrpError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(CvrpError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(CvrpError::InvalidConfig(format!(
                "crossover_rate {} outside [0, 1]",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(CvrpError::InvalidConfig(format!(
                "mutation_rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        if self.tournament_size == 0 {
            return Err(CvrpError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.tournament_size > self.population_size {
            return Err(CvrpError::InvalidTournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        self.greedy.validate()
    }
}
