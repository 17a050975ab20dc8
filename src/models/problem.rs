//! Routing problem definition.

use tracing::debug;

use super::LocationSet;
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Node index of the depot. Every route starts and ends here.
pub const DEPOT: usize = 0;

/// An immutable CVRP instance: distance matrix, fleet size, and depot.
///
/// Solvers borrow it read-only; it is built once per calculation.
///
/// # Examples
///
/// ```
/// use vroutes::models::{Coordinate, LocationSet, RoutingProblem};
///
/// let locations = LocationSet::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
/// );
/// let problem = RoutingProblem::new(&locations, 2).unwrap();
/// assert_eq!(problem.num_nodes(), 3);
/// assert_eq!(problem.num_destinations(), 2);
/// assert_eq!(problem.vehicle_count(), 2);
/// assert_eq!(problem.depot(), 0);
///
/// let empty = LocationSet::new(Coordinate::new(0.0, 0.0), vec![]);
/// assert!(RoutingProblem::new(&empty, 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    distances: DistanceMatrix,
    vehicle_count: usize,
    depot: usize,
}

impl RoutingProblem {
    /// Builds a problem from geographic locations.
    ///
    /// Fails with [`RoutingError::InvalidInput`] when there are no
    /// destinations, no vehicles, or a coordinate is not a finite number.
    /// Coordinate ranges are not checked.
    pub fn new(locations: &LocationSet, vehicle_count: usize) -> Result<Self> {
        if locations.destinations.is_empty() {
            return Err(RoutingError::InvalidInput(
                "at least one destination is required".into(),
            ));
        }
        check_vehicle_count(vehicle_count)?;
        if let Some(node) = locations.coordinates().position(|c| !c.is_finite()) {
            return Err(RoutingError::InvalidInput(format!(
                "coordinate of node {node} is not a finite number"
            )));
        }

        let distances = DistanceMatrix::from_locations(locations);
        debug!(
            nodes = distances.size(),
            vehicles = vehicle_count,
            "built routing problem"
        );

        Ok(Self {
            distances,
            vehicle_count,
            depot: DEPOT,
        })
    }

    /// Builds a problem from an explicit distance matrix (node 0 = depot).
    ///
    /// Fails with [`RoutingError::InvalidInput`] when the matrix has no
    /// destination node or there are no vehicles.
    pub fn from_matrix(distances: DistanceMatrix, vehicle_count: usize) -> Result<Self> {
        if distances.size() < 2 {
            return Err(RoutingError::InvalidInput(
                "distance matrix must contain the depot and at least one destination".into(),
            ));
        }
        check_vehicle_count(vehicle_count)?;
        Ok(Self {
            distances,
            vehicle_count,
            depot: DEPOT,
        })
    }

    /// The pairwise distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of vehicles in the homogeneous fleet.
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Depot node index (always 0).
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of destinations (excluding the depot).
    pub fn num_destinations(&self) -> usize {
        self.distances.size() - 1
    }

    /// Destination node indices, `1..=N`.
    pub fn destinations(&self) -> impl Iterator<Item = usize> {
        1..self.distances.size()
    }

    /// Cost of travelling from node `from` to node `to`, identical for every
    /// vehicle.
    pub fn arc_cost(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Arc costs as a callback; route distances in the assembled response
    /// are summed through it.
    pub fn arc_cost_evaluator(&self) -> impl Fn(usize, usize) -> f64 + '_ {
        move |from, to| self.arc_cost(from, to)
    }
}

fn check_vehicle_count(vehicle_count: usize) -> Result<()> {
    if vehicle_count == 0 {
        return Err(RoutingError::InvalidInput(
            "vehicle count must be at least 1".into(),
        ));
    }
    Ok(())
}
