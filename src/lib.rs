//! # vroutes
//!
//! Capacitated vehicle routing (CVRP) over GPS coordinates. Builds a haversine
//! distance matrix from an origin and its destinations, hands the problem to a
//! [`SolverAdapter`](solver::SolverAdapter), and assembles the per-vehicle
//! stop sequences and distances.
//!
//! ## Modules
//!
//! - [`models`] — Coordinates, location sets, the routing problem and result types
//! - [`distance`] — Haversine distance matrix
//! - [`evaluation`] — Route distance, distance-dimension checks, response assembly
//! - [`constructive`] — Path-cheapest-arc first solution
//! - [`local_search`] — 2-opt and relocate refinement
//! - [`solver`] — Solver trait, configuration, production and exhaustive solvers
//! - [`planner`] — Public entry point
//!
//! ## Example
//!
//! ```
//! use vroutes::models::{Coordinate, LocationSet};
//!
//! let locations = LocationSet::new(
//!     Coordinate::new(-6.2173207, 106.8315268),
//!     vec![
//!         Coordinate::new(-6.1826708, 106.8679899),
//!         Coordinate::new(-6.3627638, 106.8270482),
//!         Coordinate::new(-6.239025, 106.990927),
//!         Coordinate::new(-6.265075, 106.782857),
//!     ],
//! );
//!
//! let outcome = vroutes::calculate(&locations, 2).unwrap();
//! let routes = outcome.routes().expect("feasible");
//! assert_eq!(routes.len(), 2);
//! for route in routes {
//!     assert_eq!(route.sequence.first(), Some(&0));
//!     assert_eq!(route.sequence.last(), Some(&0));
//! }
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod planner;
pub mod solver;

pub use error::{Result, RoutingError};
pub use planner::{calculate, RoutePlanner};
