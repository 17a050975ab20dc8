//! Insertion repair for incomplete first solutions.
//!
//! # Algorithm
//!
//! 1. Among all unassigned destinations, insert the one with the cheapest
//!    feasible insertion (route length increase) at its best position.
//! 2. When no destination fits anywhere, make room: move one stop from a
//!    route to any other route where it fits, then insert the destination
//!    into the shortened route. The cheapest such pair of moves wins.
//! 3. Repeat until every destination is placed or neither step applies.
//!
//! Every route stays within the distance cap throughout.
//!
//! # Reference
//!
//! Ropke, S. & Pisinger, D. (2006). "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows",
//! *Transportation Science* 40(4), 455-472.

use tracing::{debug, trace};

use super::FirstSolution;
use crate::evaluation::RouteEvaluator;

/// Best feasible position for `node` in `route`, as `(position, new_length)`.
///
/// Ties go to the earliest position.
fn best_insertion(
    route: &[usize],
    length: f64,
    node: usize,
    evaluator: &RouteEvaluator<'_>,
) -> Option<(usize, f64)> {
    let depot = evaluator.problem().depot();
    let mut best: Option<(usize, f64)> = None;

    for pos in 0..=route.len() {
        let prev = if pos == 0 { depot } else { route[pos - 1] };
        let next = if pos == route.len() {
            depot
        } else {
            route[pos]
        };
        let new_length = length + evaluator.arc(prev, node) + evaluator.arc(node, next)
            - evaluator.arc(prev, next);

        if evaluator.within_limit(new_length) && best.map_or(true, |(_, b)| new_length < b) {
            best = Some((pos, new_length));
        }
    }

    best
}

/// A displacement that frees room for an unassigned destination.
#[derive(Debug, Clone)]
struct MakeRoom {
    /// Route that receives the unassigned destination.
    route: usize,
    /// Position of the stop moved out of `route`.
    removed: usize,
    /// Insertion position of the destination in the shortened route.
    insert_at: usize,
    /// Route receiving the moved stop, and its position there.
    target: usize,
    target_pos: usize,
    cost: f64,
}

fn find_make_room(
    routes: &[Vec<usize>],
    lengths: &[f64],
    node: usize,
    evaluator: &RouteEvaluator<'_>,
) -> Option<MakeRoom> {
    let mut best: Option<MakeRoom> = None;

    for (r, route) in routes.iter().enumerate() {
        for removed in 0..route.len() {
            let mut shortened = route.clone();
            let stop = shortened.remove(removed);
            let shortened_len = evaluator.route_distance(&shortened);

            let Some((insert_at, filled_len)) =
                best_insertion(&shortened, shortened_len, node, evaluator)
            else {
                continue;
            };

            for (t, target) in routes.iter().enumerate() {
                if t == r {
                    continue;
                }
                let Some((target_pos, target_len)) =
                    best_insertion(target, lengths[t], stop, evaluator)
                else {
                    continue;
                };

                let cost = (filled_len - lengths[r]) + (target_len - lengths[t]);
                if best.as_ref().map_or(true, |b| cost < b.cost) {
                    best = Some(MakeRoom {
                        route: r,
                        removed,
                        insert_at,
                        target: t,
                        target_pos,
                        cost,
                    });
                }
            }
        }
    }

    best
}

/// Places the unassigned destinations of `solution` into its routes.
///
/// Returns `true` when the solution is complete afterwards. Destinations that
/// cannot be placed stay in `solution.unassigned`.
///
/// # Examples
///
/// ```
/// use vroutes::constructive::{path_cheapest_arc, repair_unassigned};
/// use vroutes::distance::DistanceMatrix;
/// use vroutes::evaluation::{DistanceDimension, RouteEvaluator};
/// use vroutes::models::RoutingProblem;
///
/// // depot at 0, stops at +1, -1, +5, -5 on a line
/// let positions = [0.0_f64, 1.0, -1.0, 5.0, -5.0];
/// let mut dm = DistanceMatrix::new(5);
/// for i in 0..5 {
///     for j in 0..5 {
///         dm.set(i, j, (positions[i] - positions[j]).abs());
///     }
/// }
/// let problem = RoutingProblem::from_matrix(dm, 2).unwrap();
/// let dimension = DistanceDimension { max_route_distance: 10.0, global_span_coefficient: 100.0 };
/// let evaluator = RouteEvaluator::new(&problem, &dimension);
///
/// let mut first = path_cheapest_arc(&evaluator);
/// assert_eq!(first.unassigned, vec![4]);
///
/// assert!(repair_unassigned(&mut first, &evaluator));
/// assert!(evaluator.evaluate(&first.routes).is_feasible());
/// ```
pub fn repair_unassigned(solution: &mut FirstSolution, evaluator: &RouteEvaluator<'_>) -> bool {
    let mut lengths: Vec<f64> = solution
        .routes
        .iter()
        .map(|r| evaluator.route_distance(r))
        .collect();

    while !solution.unassigned.is_empty() {
        let mut best: Option<(usize, usize, usize, f64)> = None;
        for (ui, &node) in solution.unassigned.iter().enumerate() {
            for (r, route) in solution.routes.iter().enumerate() {
                if let Some((pos, new_length)) = best_insertion(route, lengths[r], node, evaluator)
                {
                    let cost = new_length - lengths[r];
                    if best.map_or(true, |(.., b)| cost < b) {
                        best = Some((ui, r, pos, cost));
                    }
                }
            }
        }

        if let Some((ui, r, pos, _)) = best {
            let node = solution.unassigned.remove(ui);
            solution.routes[r].insert(pos, node);
            lengths[r] = evaluator.route_distance(&solution.routes[r]);
            trace!(node, route = r, "inserted unassigned destination");
            continue;
        }

        let mut room: Option<(usize, MakeRoom)> = None;
        for (ui, &node) in solution.unassigned.iter().enumerate() {
            if let Some(m) = find_make_room(&solution.routes, &lengths, node, evaluator) {
                if room.as_ref().map_or(true, |(_, b)| m.cost < b.cost) {
                    room = Some((ui, m));
                }
            }
        }

        let Some((ui, room)) = room else {
            debug!(
                remaining = solution.unassigned.len(),
                "no feasible insertion left"
            );
            return false;
        };

        let node = solution.unassigned.remove(ui);
        let stop = solution.routes[room.route].remove(room.removed);
        solution.routes[room.route].insert(room.insert_at, node);
        solution.routes[room.target].insert(room.target_pos, stop);
        lengths[room.route] = evaluator.route_distance(&solution.routes[room.route]);
        lengths[room.target] = evaluator.route_distance(&solution.routes[room.target]);
        trace!(
            node,
            moved = stop,
            route = room.route,
            target = room.target,
            "made room for unassigned destination"
        );
    }

    true
}
