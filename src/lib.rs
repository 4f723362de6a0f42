//! # u-cvrp
//!
//! Metaheuristics for the Capacitated Vehicle Routing Problem: a random
//! baseline, greedy construction, a genetic algorithm and tabu search, all
//! sharing one solution model and one weighted objective.
//!
//! ## Modules
//!
//! - [`models`] — Instance, Route and Solution types with feasibility checks
//! - [`distance`] — Euclidean distance matrix keyed by node id
//! - [`evaluation`] — Weighted fitness, run statistics and [`RunResult`](evaluation::RunResult)
//! - [`constructive`] — Random and (randomized) greedy construction
//! - [`ga`] — Genetic algorithm with OX crossover and truncation elitism
//! - [`tabu`] — Tabu search over intra-route swaps
//! - [`io`] — TSPLIB-VRP reading, CSV result logs, instance discovery
//! - [`error`] — Crate error type
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use u_cvrp::constructive::GreedySearch;
//! use u_cvrp::evaluation::{evaluate, FitnessWeights};
//! use u_cvrp::io::parse_instance;
//!
//! let instance = parse_instance(
//!     "DIMENSION : 3\nCAPACITY : 10\nNODE_COORD_SECTION\n1 0 0\n2 2 0\n3 4 0\n\
//!      DEMAND_SECTION\n1 0\n2 5\n3 5\nDEPOT_SECTION\n1\n-1\nEOF\n",
//! )
//! .unwrap();
//!
//! let greedy = GreedySearch::new(&instance);
//! let solution = greedy.generate_greedy_solution();
//! let fitness = evaluate(&solution, greedy.distances(), FitnessWeights::default());
//! assert_eq!(fitness.vehicle_count, 1);
//! assert!((fitness.total_distance - 8.0).abs() < 1e-10);
//!
//! let result = greedy.run(&mut StdRng::seed_from_u64(7), 10, FitnessWeights::default()).unwrap();
//! assert!(result.best_fitness <= fitness.fitness);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod io;
pub mod models;
pub mod tabu;
