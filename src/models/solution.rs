//! Raw solver output and calculation outcome types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{RouteResult, DEPOT};

/// One vehicle's route as reported by a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRoute {
    /// Vehicle index in `0..vehicle_count`.
    pub vehicle_id: usize,
    /// Visited nodes, starting and ending at the depot.
    pub nodes: Vec<usize>,
}

impl RawRoute {
    /// Wraps destination `stops` with the depot at both ends.
    pub fn from_stops(vehicle_id: usize, stops: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(stops.len() + 2);
        nodes.push(DEPOT);
        nodes.extend_from_slice(stops);
        nodes.push(DEPOT);
        Self { vehicle_id, nodes }
    }
}

/// A complete assignment of destinations to vehicles.
///
/// Vehicles missing from `routes` are treated as idle.
///
/// # Examples
///
/// ```
/// use vroutes::models::{RawRoute, RawSolution};
///
/// let raw = RawSolution::from_stops(vec![vec![2, 1], vec![]]);
/// assert_eq!(raw.routes.len(), 2);
/// assert_eq!(raw.routes[0], RawRoute { vehicle_id: 0, nodes: vec![0, 2, 1, 0] });
/// assert_eq!(raw.routes[1].nodes, vec![0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSolution {
    /// Routes keyed by their `vehicle_id`.
    pub routes: Vec<RawRoute>,
}

impl RawSolution {
    /// Builds a solution from per-vehicle destination lists, where the
    /// position in `stops` is the vehicle id.
    pub fn from_stops(stops: Vec<Vec<usize>>) -> Self {
        Self {
            routes: stops
                .iter()
                .enumerate()
                .map(|(vehicle_id, s)| RawRoute::from_stops(vehicle_id, s))
                .collect(),
        }
    }
}

/// What a solver returns: a solution, or proof that none was found.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverOutput {
    /// Every destination was assigned within the constraints.
    Solved(RawSolution),
    /// No assignment satisfies the constraints.
    Infeasible,
}

/// Result of a calculation: one route per vehicle, or infeasibility.
///
/// An infeasible outcome is never represented as an empty or zero-distance
/// route list. Serializes as the list of routes, or `null` when infeasible.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationOutcome {
    /// One route per vehicle, ordered by vehicle id.
    Routes(Vec<RouteResult>),
    /// The constraints cannot be satisfied.
    Infeasible,
}

impl CalculationOutcome {
    /// The routes, or `None` if infeasible.
    pub fn routes(&self) -> Option<&[RouteResult]> {
        match self {
            Self::Routes(routes) => Some(routes),
            Self::Infeasible => None,
        }
    }

    /// Consumes the outcome, returning the routes if feasible.
    pub fn into_routes(self) -> Option<Vec<RouteResult>> {
        match self {
            Self::Routes(routes) => Some(routes),
            Self::Infeasible => None,
        }
    }

    /// Returns `true` if no solution was found.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible)
    }

    /// Sum of all route distances, or `None` if infeasible.
    pub fn total_distance(&self) -> Option<f64> {
        self.routes()
            .map(|routes| routes.iter().map(|r| r.total_distance).sum())
    }
}

impl Serialize for CalculationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.routes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CalculationOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Vec<RouteResult>>::deserialize(deserializer)? {
            Some(routes) => Self::Routes(routes),
            None => Self::Infeasible,
        })
    }
}
