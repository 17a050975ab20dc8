//! Distance matrices.
//!
//! Provides a dense haversine distance matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;
