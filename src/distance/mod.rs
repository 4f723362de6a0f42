//! Pairwise distances between instance nodes.
//!
//! Provides a dense, symmetric Euclidean distance matrix.

mod matrix;

pub use matrix::DistanceMatrix;
