//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the validated problem [`Instance`], depot-rooted [`Route`]s, and
//! the [`Solution`] value shared by every search strategy.

#[cfg(test)]
pub(crate) mod fixtures;
mod instance;
mod route;
mod solution;

pub use instance::{Demand, Instance, NodeCoord};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
