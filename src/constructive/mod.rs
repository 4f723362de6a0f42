//! Constructive heuristics for building CVRP solutions.
//!
//! - [`RandomSearch`] — uniform random insertion, the baseline sampler
//! - [`GreedySearch`] — nearest-feasible-neighbor with a randomized top-k variant

mod greedy;
mod random;

pub use greedy::{GreedyParams, GreedySearch};
pub use random::RandomSearch;
