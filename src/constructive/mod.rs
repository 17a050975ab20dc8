//! Constructive heuristics for building a first VRP solution.
//!
//! - [`path_cheapest_arc`] — Route-by-route cheapest-arc extension under the distance cap, O(n²)
//! - [`repair_unassigned`] — Cheapest feasible insertion of leftover destinations

mod insertion;
mod path_cheapest_arc;

pub use insertion::repair_unassigned;
pub use path_cheapest_arc::{path_cheapest_arc, FirstSolution};
