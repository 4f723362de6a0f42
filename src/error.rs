//! Error types for u-cvrp.

use thiserror::Error;

/// Result type alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, CvrpError>;

/// Errors raised while loading instances, configuring algorithms or logging results.
///
/// An empty tabu neighborhood is deliberately absent: tabu search stops early
/// and reports it through [`Termination`](crate::evaluation::Termination).
#[derive(Error, Debug)]
pub enum CvrpError {
    /// The instance text or structure is invalid.
    #[error("malformed instance: {0}")]
    MalformedInstance(String),

    /// A single customer's demand can never fit in one vehicle.
    #[error("customer {customer} has demand {demand} exceeding vehicle capacity {capacity}")]
    InfeasibleDemand {
        /// Customer node id.
        customer: usize,
        /// Demand of that customer.
        demand: u32,
        /// Vehicle capacity.
        capacity: u32,
    },

    /// Tournament is larger than the population it samples from.
    #[error("tournament size {tournament_size} exceeds population size {population_size}")]
    InvalidTournamentSize {
        /// Requested tournament size.
        tournament_size: usize,
        /// Configured population size.
        population_size: usize,
    },

    /// Any other out-of-range configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
