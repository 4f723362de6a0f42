//! Fitness evaluation and run statistics.
//!
//! - [`evaluate`] — pure `Solution` → [`FitnessResult`] mapping
//! - [`FitnessStats`] — best/worst/average accumulator
//! - [`RunResult`] — the outcome every strategy's `run` returns

mod fitness;
mod result;

pub use fitness::{evaluate, FitnessResult, FitnessWeights};
pub(crate) use result::ensure_budget;
pub use result::{FitnessStats, RunResult, Termination};
