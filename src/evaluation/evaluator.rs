//! Route evaluator for the distance dimension and the routing objective.

use serde::{Deserialize, Serialize};

use crate::models::RoutingProblem;

/// Tolerance used when comparing route distances against the cap.
const EPS: f64 = 1e-9;

/// The cumulative distance tracked along every route.
///
/// Cumulative distance starts at zero at the depot and must not exceed
/// `max_route_distance` when the vehicle returns. The global span of the
/// dimension (largest end value minus smallest start value, i.e. the longest
/// route) is added to the objective with weight `global_span_coefficient`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceDimension {
    /// Upper bound on a single vehicle's travelled distance.
    pub max_route_distance: f64,
    /// Objective weight of the dimension's global span.
    pub global_span_coefficient: f64,
}

impl Default for DistanceDimension {
    fn default() -> Self {
        Self {
            max_route_distance: 3000.0,
            global_span_coefficient: 100.0,
        }
    }
}

/// A constraint violation found while evaluating routes.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Route distance exceeds the dimension's maximum.
    MaxDistanceExceeded {
        /// Vehicle driving the route.
        vehicle_id: usize,
        /// Actual distance.
        distance: f64,
        /// Maximum allowed distance.
        max_distance: f64,
    },
    /// A destination is not visited by any route.
    Unassigned {
        /// Node index.
        node: usize,
    },
    /// A destination is visited more than once.
    Duplicated {
        /// Node index.
        node: usize,
    },
}

/// Aggregate metrics of a full assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Per-vehicle route distances, indexed by vehicle id.
    pub route_distances: Vec<f64>,
    /// Sum of all route distances.
    pub total_distance: f64,
    /// Global span of the distance dimension.
    pub span: f64,
    /// `total_distance + global_span_coefficient * span`.
    pub objective: f64,
    /// Constraint violations; empty for a feasible assignment.
    pub violations: Vec<Violation>,
}

impl Evaluation {
    /// Returns `true` if no constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Evaluates routes given as destination lists (depot excluded) against a
/// problem's arc costs and a distance dimension.
///
/// # Examples
///
/// ```
/// use vroutes::distance::DistanceMatrix;
/// use vroutes::evaluation::{DistanceDimension, RouteEvaluator};
/// use vroutes::models::RoutingProblem;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 5.0, 8.0,
///     5.0, 0.0, 3.0,
///     8.0, 3.0, 0.0,
/// ]).unwrap();
/// let problem = RoutingProblem::from_matrix(dm, 2).unwrap();
/// let dimension = DistanceDimension { max_route_distance: 20.0, global_span_coefficient: 1.0 };
///
/// let evaluator = RouteEvaluator::new(&problem, &dimension);
/// assert_eq!(evaluator.route_distance(&[1, 2]), 16.0);
///
/// let eval = evaluator.evaluate(&[vec![1, 2], vec![]]);
/// assert!(eval.is_feasible());
/// assert_eq!(eval.objective, 16.0 + 16.0);
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a RoutingProblem,
    dimension: &'a DistanceDimension,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem and dimension.
    pub fn new(problem: &'a RoutingProblem, dimension: &'a DistanceDimension) -> Self {
        Self { problem, dimension }
    }

    /// The problem being evaluated.
    pub fn problem(&self) -> &'a RoutingProblem {
        self.problem
    }

    /// The distance dimension in force.
    pub fn dimension(&self) -> &'a DistanceDimension {
        self.dimension
    }

    /// Arc cost between two nodes.
    pub fn arc(&self, from: usize, to: usize) -> f64 {
        self.problem.arc_cost(from, to)
    }

    /// Total distance of `depot → stops[0] → ... → stops[n-1] → depot`.
    ///
    /// Zero for an empty route.
    pub fn route_distance(&self, stops: &[usize]) -> f64 {
        let depot = self.problem.depot();
        let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
            return 0.0;
        };
        let inner: f64 = stops.windows(2).map(|w| self.arc(w[0], w[1])).sum();
        self.arc(depot, first) + inner + self.arc(last, depot)
    }

    /// Returns `true` if a route of this length respects the dimension cap.
    pub fn within_limit(&self, distance: f64) -> bool {
        distance <= self.dimension.max_route_distance + EPS
    }

    /// Objective value for a set of route distances.
    pub fn objective(&self, route_distances: &[f64]) -> f64 {
        let total: f64 = route_distances.iter().sum();
        total + self.dimension.global_span_coefficient * span(route_distances)
    }

    /// Evaluates an assignment where `routes[v]` lists vehicle `v`'s stops.
    ///
    /// Checks the distance cap per route and that every destination is
    /// visited exactly once.
    pub fn evaluate(&self, routes: &[Vec<usize>]) -> Evaluation {
        let route_distances: Vec<f64> = routes.iter().map(|r| self.route_distance(r)).collect();
        let mut violations = Vec::new();

        for (vehicle_id, &distance) in route_distances.iter().enumerate() {
            if !self.within_limit(distance) {
                violations.push(Violation::MaxDistanceExceeded {
                    vehicle_id,
                    distance,
                    max_distance: self.dimension.max_route_distance,
                });
            }
        }

        let mut visits = vec![0usize; self.problem.num_nodes()];
        for &node in routes.iter().flatten() {
            if let Some(count) = visits.get_mut(node) {
                *count += 1;
            }
        }
        for node in self.problem.destinations() {
            match visits[node] {
                0 => violations.push(Violation::Unassigned { node }),
                1 => {}
                _ => violations.push(Violation::Duplicated { node }),
            }
        }

        let total_distance = route_distances.iter().sum();
        let span = span(&route_distances);
        Evaluation {
            objective: total_distance + self.dimension.global_span_coefficient * span,
            route_distances,
            total_distance,
            span,
            violations,
        }
    }
}

/// Global span of the distance dimension: every route starts at zero, so the
/// span is the longest route.
fn span(route_distances: &[f64]) -> f64 {
    route_distances.iter().copied().fold(0.0, f64::max)
}
