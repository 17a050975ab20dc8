//! Path-cheapest-arc first-solution heuristic.
//!
//! Builds routes one vehicle at a time: starting from the depot, always
//! extend the route with the unvisited node reached by the cheapest arc from
//! the current route end. A node is only eligible if the route, closed back
//! to the depot, stays within the distance dimension. When no node is
//! eligible the route is closed and the next vehicle starts.
//!
//! # Complexity
//!
//! O(n²) where n = number of destinations.

use tracing::{debug, warn};

use crate::evaluation::RouteEvaluator;

/// Routes produced by a constructive heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstSolution {
    /// Stops per vehicle (depot excluded); one entry per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// Destinations no vehicle could take.
    pub unassigned: Vec<usize>,
}

impl FirstSolution {
    /// Returns `true` if every destination is on some route.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// Constructs a first solution with the path-cheapest-arc heuristic.
///
/// Vehicles are filled in id order. Ties between equally cheap arcs go to the
/// lowest node index, so the result is deterministic.
///
/// # Examples
///
/// ```
/// use vroutes::constructive::path_cheapest_arc;
/// use vroutes::distance::DistanceMatrix;
/// use vroutes::evaluation::{DistanceDimension, RouteEvaluator};
/// use vroutes::models::RoutingProblem;
///
/// // depot and three stops on a line, unit spacing
/// let mut dm = DistanceMatrix::new(4);
/// for i in 0..4 {
///     for j in 0..4 {
///         dm.set(i, j, (i as f64 - j as f64).abs());
///     }
/// }
/// let problem = RoutingProblem::from_matrix(dm, 2).unwrap();
/// let dimension = DistanceDimension::default();
///
/// let first = path_cheapest_arc(&RouteEvaluator::new(&problem, &dimension));
/// assert!(first.is_complete());
/// assert_eq!(first.routes, vec![vec![1, 2, 3], vec![]]);
/// ```
pub fn path_cheapest_arc(evaluator: &RouteEvaluator<'_>) -> FirstSolution {
    let problem = evaluator.problem();
    let depot = problem.depot();
    let n = problem.num_nodes();

    let mut visited = vec![false; n];
    visited[depot] = true;
    let mut remaining = problem.num_destinations();
    let mut routes = Vec::with_capacity(problem.vehicle_count());

    for vehicle_id in 0..problem.vehicle_count() {
        let mut route = Vec::new();
        let mut current = depot;
        let mut travelled = 0.0;

        while remaining > 0 {
            let mut best: Option<(usize, f64)> = None;
            for next in 0..n {
                if visited[next] {
                    continue;
                }
                let arc = evaluator.arc(current, next);
                let closed = travelled + arc + evaluator.arc(next, depot);
                if !evaluator.within_limit(closed) {
                    continue;
                }
                if best.map_or(true, |(_, b)| arc < b) {
                    best = Some((next, arc));
                }
            }

            match best {
                Some((next, arc)) => {
                    visited[next] = true;
                    remaining -= 1;
                    route.push(next);
                    travelled += arc;
                    current = next;
                }
                None => break,
            }
        }

        debug!(vehicle_id, stops = route.len(), "closed first-solution route");
        routes.push(route);
    }

    let unassigned: Vec<usize> = (0..n).filter(|&i| !visited[i]).collect();
    if !unassigned.is_empty() {
        warn!(
            count = unassigned.len(),
            "first solution left destinations unassigned"
        );
    }

    FirstSolution { routes, unassigned }
}
