//! Domain model types for geographic vehicle routing.
//!
//! Provides coordinates and location sets, the immutable routing problem
//! handed to solvers, the raw solver output, and the per-vehicle route results
//! returned to callers.

mod coordinate;
mod problem;
mod route;
mod solution;

pub use coordinate::{haversine_km, Coordinate, LocationSet, EARTH_RADIUS_KM};
pub use problem::{RoutingProblem, DEPOT};
pub use route::RouteResult;
pub use solution::{CalculationOutcome, RawRoute, RawSolution, SolverOutput};
