//! Uniform run outcome shared by all strategies.

use serde::{Deserialize, Serialize};

use super::FitnessResult;
use crate::error::{CvrpError, Result};
use crate::models::Solution;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The full iteration/generation budget was consumed.
    BudgetExhausted,
    /// Tabu search found no admissible neighbor at this iteration.
    EmptyNeighborhood {
        /// Zero-based iteration at which the neighborhood was empty.
        iteration: usize,
    },
}

/// Result of running one strategy on one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Best solution found.
    pub best_solution: Solution,
    /// Fitness of `best_solution`.
    pub best_fitness: f64,
    /// Worst fitness among the sampled population.
    pub worst_fitness: f64,
    /// Mean fitness among the sampled population.
    pub average_fitness: f64,
    /// Total distance of `best_solution`.
    pub best_total_distance: f64,
    /// Route count of `best_solution`.
    pub best_vehicle_count: usize,
    /// Iterations or generations actually executed.
    pub iterations: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Best fitness seen after each iteration or generation.
    pub fitness_history: Vec<f64>,
}

impl RunResult {
    /// Assembles a result around the best solution and its evaluation.
    ///
    /// Worst and average come from `stats`; with no samples recorded both
    /// fall back to the best solution's own fitness.
    pub fn from_best(
        best_solution: Solution,
        best: FitnessResult,
        stats: &FitnessStats,
        iterations: usize,
        termination: Termination,
        fitness_history: Vec<f64>,
    ) -> Self {
        let (worst_fitness, average_fitness) = match stats.average() {
            Some(avg) => (stats.worst(), avg),
            None => (best.fitness, best.fitness),
        };
        Self {
            best_solution,
            best_fitness: best.fitness,
            worst_fitness,
            average_fitness,
            best_total_distance: best.total_distance,
            best_vehicle_count: best.vehicle_count,
            iterations,
            termination,
            fitness_history,
        }
    }
}

/// Running best/worst/sum accumulator over fitness samples.
///
/// # Examples
///
/// ```
/// use u_cvrp::evaluation::FitnessStats;
///
/// let mut stats = FitnessStats::new();
/// for f in [3.0, 1.0, 2.0] {
///     stats.record(f);
/// }
/// assert_eq!(stats.best(), 1.0);
/// assert_eq!(stats.worst(), 3.0);
/// assert_eq!(stats.average(), Some(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    best: f64,
    worst: f64,
    sum: f64,
    count: usize,
}

impl FitnessStats {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            best: f64::INFINITY,
            worst: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }

    /// Adds one sample.
    pub fn record(&mut self, fitness: f64) {
        self.sum += fitness;
        self.count += 1;
        if fitness < self.best {
            self.best = fitness;
        }
        if fitness > self.worst {
            self.worst = fitness;
        }
    }

    /// Lowest sample, `+inf` if empty.
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Highest sample, `-inf` if empty.
    pub fn worst(&self) -> f64 {
        self.worst
    }

    /// Sum of all samples.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of samples.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, `None` if empty.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

impl Default for FitnessStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects a zero iteration/generation budget.
pub(crate) fn ensure_budget(what: &str, budget: usize) -> Result<()> {
    if budget == 0 {
        return Err(CvrpError::InvalidConfig(format!("{what} must be at least 1")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty() {
        let stats = FitnessStats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.best(), f64::INFINITY);
        assert_eq!(stats.worst(), f64::NEG_INFINITY);
        assert!(stats.average().is_none());
    }

    #[test]
    fn test_stats_single_sample() {
        let mut stats = FitnessStats::default();
        stats.record(42.0);
        assert_eq!(stats.best(), 42.0);
        assert_eq!(stats.worst(), 42.0);
        assert_eq!(stats.sum(), 42.0);
        assert_eq!(stats.average(), Some(42.0));
    }

    #[test]
    fn test_ensure_budget() {
        assert!(ensure_budget("iterations", 1).is_ok());
        assert!(matches!(
            ensure_budget("iterations", 0),
            Err(CvrpError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_best_without_samples() {
        let best = FitnessResult {
            fitness: 120.0,
            total_distance: 20.0,
            vehicle_count: 1,
        };
        let result = RunResult::from_best(
            Solution::new(),
            best,
            &FitnessStats::new(),
            0,
            Termination::EmptyNeighborhood { iteration: 0 },
            Vec::new(),
        );
        assert_eq!(result.best_fitness, 120.0);
        assert_eq!(result.worst_fitness, 120.0);
        assert_eq!(result.average_fitness, 120.0);
        assert_eq!(result.best_vehicle_count, 1);
    }

    #[test]
    fn test_from_best_with_samples() {
        let best = FitnessResult {
            fitness: 1.0,
            total_distance: 1.0,
            vehicle_count: 0,
        };
        let mut stats = FitnessStats::new();
        stats.record(2.0);
        stats.record(4.0);
        let result = RunResult::from_best(
            Solution::new(),
            best,
            &stats,
            2,
            Termination::BudgetExhausted,
            vec![2.0, 2.0],
        );
        assert_eq!(result.best_fitness, 1.0);
        assert_eq!(result.worst_fitness, 4.0);
        assert_eq!(result.average_fitness, 3.0);
    }

    #[test]
    fn test_run_result_serializes() {
        let result = RunResult {
            best_solution: Solution::new(),
            best_fitness: 1.0,
            worst_fitness: 2.0,
            average_fitness: 1.5,
            best_total_distance: 0.5,
            best_vehicle_count: 0,
            iterations: 2,
            termination: Termination::EmptyNeighborhood { iteration: 1 },
            fitness_history: vec![1.0, 1.0],
        };
        let json = serde_json::to_string(&result).expect("serializable");
        assert!(json.contains("EmptyNeighborhood"));
    }
}
