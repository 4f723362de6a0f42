//! Tabu search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CvrpError, Result};
use crate::evaluation::FitnessWeights;

/// Configuration parameters for tabu search.
///
/// # Examples
///
/// ```
/// use u_cvrp::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_iterations(500)
///     .with_tabu_tenure(7);
/// assert_eq!(config.iterations, 500);
/// assert_eq!(config.tabu_tenure, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabuConfig {
    /// Maximum number of steps.
    pub iterations: usize,
    /// How many accepted moves stay forbidden.
    pub tabu_tenure: usize,
    /// Objective weights.
    pub weights: FitnessWeights,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            tabu_tenure: 10,
            weights: FitnessWeights::default(),
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of steps.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(CvrpError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
