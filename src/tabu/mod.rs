//! Tabu search for the CVRP.
//!
//! Explores intra-route pairwise swaps, always moving to the cheapest
//! admissible neighbor. Recently taken `(from, to)` moves are forbidden for
//! `tabu_tenure` steps.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

mod config;
mod runner;
mod tabu_list;

pub use config::TabuConfig;
pub use runner::TabuSearch;
pub use tabu_list::TabuList;
