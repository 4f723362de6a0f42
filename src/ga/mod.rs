//! Genetic algorithm for the CVRP.
//!
//! - [`GiantTour`] — depot-free customer permutation that crossover works on
//! - [`split`] — greedy capacity packing of a giant tour back into routes
//! - [`order_crossover`], [`swap_mutation`] — variation operators
//! - [`tournament`] — selection without replacement
//! - [`GeneticAlgorithm`] — seeded population loop with truncation elitism

mod chromosome;
mod config;
mod operators;
mod runner;
mod selection;
pub mod split;

pub use chromosome::GiantTour;
pub use config::GaConfig;
pub use operators::{order_crossover, swap_mutation};
pub use runner::GeneticAlgorithm;
pub use selection::tournament;
pub use split::split;
