//! Inter-route relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each destination from its current route to every insertion
//! position in every other route, idle vehicles included. The best move that
//! keeps both routes within the distance cap and strictly lowers the
//! objective (total distance plus weighted global span) is applied. Repeats
//! until no improving move remains.
//!
//! # Complexity
//!
//! O(n² × R) per pass where n = destinations, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use tracing::trace;

use crate::evaluation::RouteEvaluator;

/// A relocate move: move a destination from one route to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies inter-route relocate improvement to per-vehicle stop lists.
///
/// Returns the number of moves applied, at most `max_moves`. Routes are
/// modified in place; vehicle positions are preserved.
///
/// # Examples
///
/// ```
/// use vroutes::distance::DistanceMatrix;
/// use vroutes::evaluation::{DistanceDimension, RouteEvaluator};
/// use vroutes::local_search::relocate_improve;
/// use vroutes::models::RoutingProblem;
///
/// // 1 and 2 on opposite sides of the depot
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 2.0, 2.0,
///     2.0, 0.0, 4.0,
///     2.0, 4.0, 0.0,
/// ]).unwrap();
/// let problem = RoutingProblem::from_matrix(dm, 2).unwrap();
/// let dimension = DistanceDimension::default();
/// let evaluator = RouteEvaluator::new(&problem, &dimension);
///
/// // One vehicle does everything; the span penalty favours sharing.
/// let mut routes = vec![vec![1, 2], vec![]];
/// let moves = relocate_improve(&mut routes, &evaluator, 100);
/// assert_eq!(moves, 1);
/// assert_eq!(routes, vec![vec![2], vec![1]]);
/// ```
pub fn relocate_improve(
    routes: &mut [Vec<usize>],
    evaluator: &RouteEvaluator<'_>,
    max_moves: usize,
) -> usize {
    if routes.len() < 2 {
        return 0;
    }

    let mut lengths: Vec<f64> = routes.iter().map(|r| evaluator.route_distance(r)).collect();
    let mut moves = 0;

    while moves < max_moves {
        let Some(mv) = find_best_relocate(routes, &lengths, evaluator) else {
            break;
        };

        let node = routes[mv.from_route].remove(mv.from_pos);
        routes[mv.to_route].insert(mv.to_pos, node);
        lengths[mv.from_route] = evaluator.route_distance(&routes[mv.from_route]);
        lengths[mv.to_route] = evaluator.route_distance(&routes[mv.to_route]);
        moves += 1;

        trace!(
            node,
            from = mv.from_route,
            to = mv.to_route,
            delta = mv.delta,
            "relocated destination"
        );
    }

    moves
}

/// Finds the best improving relocate move across all route pairs.
fn find_best_relocate(
    routes: &[Vec<usize>],
    lengths: &[f64],
    evaluator: &RouteEvaluator<'_>,
) -> Option<RelocateMove> {
    let current = evaluator.objective(lengths);
    let mut trial = lengths.to_vec();
    let mut best: Option<RelocateMove> = None;

    for from_r in 0..routes.len() {
        for from_pos in 0..routes[from_r].len() {
            let node = routes[from_r][from_pos];
            let from_len = lengths[from_r] + removal_cost(&routes[from_r], from_pos, evaluator);
            // without the triangle inequality a shortcut can be longer
            if !evaluator.within_limit(from_len) {
                continue;
            }

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r {
                    continue;
                }

                for to_pos in 0..=to_route.len() {
                    let to_len = lengths[to_r] + insertion_cost(to_route, to_pos, node, evaluator);
                    if !evaluator.within_limit(to_len) {
                        continue;
                    }

                    trial[from_r] = from_len;
                    trial[to_r] = to_len;
                    let delta = evaluator.objective(&trial) - current;
                    trial[from_r] = lengths[from_r];
                    trial[to_r] = lengths[to_r];

                    if delta < -1e-9 && best.as_ref().map_or(true, |b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_route: from_r,
                            from_pos,
                            to_route: to_r,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Change in route length from removing the stop at `pos`.
fn removal_cost(route: &[usize], pos: usize, evaluator: &RouteEvaluator<'_>) -> f64 {
    let depot = evaluator.problem().depot();
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        depot
    } else {
        route[pos + 1]
    };
    let node = route[pos];

    // Old: prev → node → next
    // New: prev → next
    evaluator.arc(prev, next) - evaluator.arc(prev, node) - evaluator.arc(node, next)
}

/// Change in route length from inserting `node` at `pos`.
fn insertion_cost(route: &[usize], pos: usize, node: usize, evaluator: &RouteEvaluator<'_>) -> f64 {
    let depot = evaluator.problem().depot();
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() {
        depot
    } else {
        route[pos]
    };

    // Old: prev → next
    // New: prev → node → next
    evaluator.arc(prev, node) + evaluator.arc(node, next) - evaluator.arc(prev, next)
}
