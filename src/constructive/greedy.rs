//! Nearest-feasible-neighbor construction.
//!
//! Builds routes greedily: from the last node placed, visit the nearest
//! unrouted customer whose demand still fits. When nothing fits, the route
//! returns to the depot and a new one starts.
//!
//! The randomized variant occasionally picks among the `k` nearest feasible
//! customers instead of the single nearest, which is how the genetic
//! algorithm seeds most of its initial population.
//!
//! # Complexity
//!
//! O(n²) per solution for the deterministic variant, O(n² log n) for the
//! randomized one (candidates are sorted at each step).

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::distance::DistanceMatrix;
use crate::error::{CvrpError, Result};
use crate::evaluation::{
    ensure_budget, evaluate, FitnessStats, FitnessWeights, RunResult, Termination,
};
use crate::models::{Instance, Route, Solution};

/// Parameters of the randomized greedy constructor.
///
/// # Examples
///
/// ```
/// use u_cvrp::constructive::GreedyParams;
///
/// let params = GreedyParams::default().with_random_factor(0.3).with_k(4);
/// assert_eq!(params.k, 4);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreedyParams {
    /// Probability of picking among the top-k instead of the nearest.
    pub random_factor: f64,
    /// Number of nearest candidates eligible for the random pick.
    pub k: usize,
}

impl Default for GreedyParams {
    fn default() -> Self {
        Self {
            random_factor: 0.5,
            k: 3,
        }
    }
}

impl GreedyParams {
    /// Sets the randomization probability.
    pub fn with_random_factor(mut self, p: f64) -> Self {
        self.random_factor = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the candidate list size.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.random_factor) {
            return Err(CvrpError::InvalidConfig(format!(
                "random_factor {} outside [0, 1]",
                self.random_factor
            )));
        }
        if self.k == 0 {
            return Err(CvrpError::InvalidConfig("k must be at least 1".into()));
        }
        Ok(())
    }
}

/// Greedy and randomized-greedy constructor for an instance.
///
/// # Examples
///
/// ```
/// use u_cvrp::constructive::GreedySearch;
/// use u_cvrp::models::{Demand, Instance, NodeCoord};
///
/// let instance = Instance::new(
///     4,
///     30,
///     vec![
///         NodeCoord::new(1, 0.0, 0.0),
///         NodeCoord::new(2, 3.0, 0.0),
///         NodeCoord::new(3, 1.0, 0.0),
///         NodeCoord::new(4, 2.0, 0.0),
///     ],
///     vec![Demand::new(1, 0), Demand::new(2, 10), Demand::new(3, 10), Demand::new(4, 10)],
///     1,
/// )
/// .unwrap();
///
/// let greedy = GreedySearch::new(&instance);
/// let solution = greedy.generate_greedy_solution();
/// assert_eq!(solution.routes()[0].nodes(), &[1, 3, 4, 2, 1]);
/// ```
pub struct GreedySearch<'a> {
    instance: &'a Instance,
    distances: DistanceMatrix,
    params: GreedyParams,
}

impl<'a> GreedySearch<'a> {
    /// Creates a constructor with default randomization parameters.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            distances: DistanceMatrix::from_instance(instance),
            params: GreedyParams::default(),
        }
    }

    /// Replaces the randomization parameters.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InvalidConfig`] if the parameters are out of range.
    pub fn with_params(mut self, params: GreedyParams) -> Result<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    /// Randomization parameters in use.
    pub fn params(&self) -> &GreedyParams {
        &self.params
    }

    /// Distance matrix owned by this constructor.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Deterministic nearest-feasible-neighbor solution.
    ///
    /// Ties go to the lowest customer id.
    pub fn generate_greedy_solution(&self) -> Solution {
        self.construct(|candidates| {
            let mut best = candidates[0];
            for &candidate in &candidates[1..] {
                if candidate.1 < best.1 {
                    best = candidate;
                }
            }
            best.0
        })
    }

    /// Nearest-feasible-neighbor solution with a random top-k pick.
    ///
    /// At each step, when at least `k` customers fit, a Bernoulli trial
    /// with probability `random_factor` decides whether to pick uniformly
    /// among the `k` nearest instead of the nearest.
    pub fn generate_randomized_greedy_solution<R: Rng>(&self, rng: &mut R) -> Solution {
        let GreedyParams { random_factor, k } = self.params;
        self.construct(|candidates| {
            candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
            if k > 0 && candidates.len() >= k && rng.random_bool(random_factor) {
                candidates[rng.random_range(0..k)].0
            } else {
                candidates[0].0
            }
        })
    }

    /// Shared route-building loop.
    ///
    /// `choose` receives the feasible `(customer, distance)` candidates in
    /// ascending id order (never empty) and returns the customer to visit.
    fn construct(&self, mut choose: impl FnMut(&mut Vec<(usize, f64)>) -> usize) -> Solution {
        let depot = self.instance.depot();
        let capacity = u64::from(self.instance.capacity());
        let mut remaining: Vec<usize> = self.instance.customers().collect();
        let mut candidates: Vec<(usize, f64)> = Vec::with_capacity(remaining.len());

        let mut solution = Solution::new();
        while !remaining.is_empty() {
            let mut route_customers = Vec::new();
            let mut current_load = 0u64;
            let mut current = depot;

            loop {
                candidates.clear();
                candidates.extend(
                    remaining
                        .iter()
                        .copied()
                        .filter(|&c| current_load + u64::from(self.instance.demand_of(c)) <= capacity)
                        .map(|c| (c, self.distances.between(current, c))),
                );
                if candidates.is_empty() {
                    break;
                }

                let next = choose(&mut candidates);
                if let Some(pos) = remaining.iter().position(|&c| c == next) {
                    remaining.remove(pos);
                }
                route_customers.push(next);
                current_load += u64::from(self.instance.demand_of(next));
                current = next;
            }

            solution.add_route(Route::from_customers(depot, &route_customers));
        }

        solution
    }

    /// Runs the deterministic constructor once, then samples `iterations`
    /// randomized solutions.
    ///
    /// The deterministic solution only seeds the best; worst and average are
    /// taken over the randomized samples.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InvalidConfig`] if `iterations` is zero.
    pub fn run<R: Rng>(
        &self,
        rng: &mut R,
        iterations: usize,
        weights: FitnessWeights,
    ) -> Result<RunResult> {
        ensure_budget("iterations", iterations)?;
        info!(
            instance = self.instance.name().unwrap_or("<unnamed>"),
            iterations,
            random_factor = self.params.random_factor,
            k = self.params.k,
            "greedy search started"
        );

        let mut best_solution = self.generate_greedy_solution();
        let mut best_fitness = evaluate(&best_solution, &self.distances, weights);
        let mut stats = FitnessStats::new();
        let mut history = Vec::with_capacity(iterations);

        for _ in 0..iterations {
            let solution = self.generate_randomized_greedy_solution(rng);
            let fitness = evaluate(&solution, &self.distances, weights);
            stats.record(fitness.fitness);

            if fitness.fitness < best_fitness.fitness {
                best_solution = solution;
                best_fitness = fitness;
            }
            history.push(best_fitness.fitness);
        }

        info!(
            best = best_fitness.fitness,
            worst = stats.worst(),
            "greedy search finished"
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
