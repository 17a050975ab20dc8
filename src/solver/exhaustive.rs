//! Brute-force solver for small instances.
//!
//! # Algorithm
//!
//! 1. Held-Karp dynamic programming gives the shortest depot-to-depot tour
//!    for every subset of destinations, O(2ⁿ n²).
//! 2. Every assignment of destinations to vehicles is enumerated, O(vⁿ);
//!    each vehicle drives the optimal tour of its subset.
//! 3. The feasible assignment with the lowest objective wins; the first one
//!    found wins ties.
//!
//! Vehicles are interchangeable, so at most `n` vehicles are enumerated.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A Dynamic Programming Approach to
//! Sequencing Problems", *Journal of SIAM* 10(1), 196-210.

use tracing::{debug, instrument};

use super::{SolverAdapter, SolverConfig};
use crate::error::{Result, RoutingError};
use crate::evaluation::RouteEvaluator;
use crate::models::{RawSolution, RoutingProblem, SolverOutput};

/// Optimal solver that enumerates every assignment.
///
/// Only usable for a handful of destinations; larger problems are refused
/// with [`RoutingError::SolverUnavailable`].
///
/// # Examples
///
/// ```
/// use vroutes::distance::DistanceMatrix;
/// use vroutes::models::{RawSolution, RoutingProblem, SolverOutput};
/// use vroutes::solver::{ExhaustiveSolver, SolverAdapter, SolverConfig};
///
/// // 1 and 2 on opposite sides of the depot
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 2.0, 2.0,
///     2.0, 0.0, 4.0,
///     2.0, 4.0, 0.0,
/// ]).unwrap();
/// let problem = RoutingProblem::from_matrix(dm, 2).unwrap();
///
/// let output = ExhaustiveSolver::new(SolverConfig::default()).solve(&problem).unwrap();
/// assert_eq!(output, SolverOutput::Solved(RawSolution::from_stops(vec![vec![2], vec![1]])));
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver {
    config: SolverConfig,
    max_destinations: usize,
    max_assignments: u64,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl ExhaustiveSolver {
    /// Creates a solver using the dimension of `config`.
    ///
    /// Defaults: at most 8 destinations and 2 000 000 assignments.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            max_destinations: 8,
            max_assignments: 2_000_000,
        }
    }

    /// Sets the largest number of destinations accepted.
    pub fn with_max_destinations(mut self, max: usize) -> Self {
        self.max_destinations = max;
        self
    }

    /// Sets the largest number of vehicle assignments enumerated.
    pub fn with_max_assignments(mut self, max: u64) -> Self {
        self.max_assignments = max;
        self
    }

    /// Returns `true` if `problem` is small enough to enumerate.
    pub fn supports(&self, problem: &RoutingProblem) -> bool {
        let n = problem.num_destinations();
        self.check_size(n, problem.vehicle_count().min(n)).is_ok()
    }

    fn check_size(&self, destinations: usize, vehicles: usize) -> Result<()> {
        if destinations > self.max_destinations {
            return Err(RoutingError::SolverUnavailable(format!(
                "exhaustive search supports at most {} destinations, got {destinations}",
                self.max_destinations
            )));
        }
        let assignments = u32::try_from(destinations)
            .ok()
            .and_then(|n| (vehicles as u64).checked_pow(n));
        match assignments {
            Some(count) if count <= self.max_assignments => Ok(()),
            _ => Err(RoutingError::SolverUnavailable(format!(
                "{vehicles} vehicles and {destinations} destinations exceed {} assignments",
                self.max_assignments
            ))),
        }
    }
}

impl SolverAdapter for ExhaustiveSolver {
    #[instrument(skip_all, fields(nodes = problem.num_nodes(), vehicles = problem.vehicle_count()))]
    fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput> {
        self.config.validate()?;
        let n = problem.num_destinations();
        let vehicles = problem.vehicle_count().min(n);
        self.check_size(n, vehicles)?;

        let dimension = self.config.dimension();
        let evaluator = RouteEvaluator::new(problem, &dimension);
        let tours = optimal_tours(&evaluator, n);

        let mut assignment = vec![0usize; n];
        let mut masks = vec![0usize; vehicles];
        let mut lengths = vec![0.0; vehicles];
        let mut best: Option<(f64, Vec<usize>)> = None;

        loop {
            masks.iter_mut().for_each(|m| *m = 0);
            for (k, &v) in assignment.iter().enumerate() {
                masks[v] |= 1 << k;
            }
            for (len, &mask) in lengths.iter_mut().zip(&masks) {
                *len = tours[mask].length;
            }

            if lengths.iter().all(|&l| evaluator.within_limit(l)) {
                let objective = evaluator.objective(&lengths);
                if best.as_ref().map_or(true, |(b, _)| objective < b - 1e-9) {
                    best = Some((objective, masks.clone()));
                }
            }

            if !next_assignment(&mut assignment, vehicles) {
                break;
            }
        }

        let Some((objective, masks)) = best else {
            debug!("no assignment satisfies the distance cap");
            return Ok(SolverOutput::Infeasible);
        };
        debug!(objective, "exhaustive search finished");

        let mut routes: Vec<Vec<usize>> = masks
            .iter()
            .map(|&mask| tours[mask].stops.clone())
            .collect();
        routes.resize(problem.vehicle_count(), Vec::new());
        Ok(SolverOutput::Solved(RawSolution::from_stops(routes)))
    }
}

/// Shortest depot-to-depot tour over a subset of destinations.
#[derive(Debug, Clone)]
struct Tour {
    length: f64,
    stops: Vec<usize>,
}

/// Held-Karp over destinations `1..=n`; bit `k` of a mask is node `k + 1`.
fn optimal_tours(evaluator: &RouteEvaluator<'_>, n: usize) -> Vec<Tour> {
    let depot = evaluator.problem().depot();
    let subsets = 1usize << n;
    let mut cost = vec![vec![f64::INFINITY; n]; subsets];
    let mut parent = vec![vec![usize::MAX; n]; subsets];

    for k in 0..n {
        cost[1 << k][k] = evaluator.arc(depot, k + 1);
    }
    for mask in 1..subsets {
        for last in 0..n {
            if mask & (1 << last) == 0 || cost[mask][last].is_infinite() {
                continue;
            }
            for next in 0..n {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let extended = mask | (1 << next);
                let c = cost[mask][last] + evaluator.arc(last + 1, next + 1);
                if c < cost[extended][next] {
                    cost[extended][next] = c;
                    parent[extended][next] = last;
                }
            }
        }
    }

    let mut tours = Vec::with_capacity(subsets);
    tours.push(Tour {
        length: 0.0,
        stops: Vec::new(),
    });
    for mask in 1..subsets {
        let mut best_last = usize::MAX;
        let mut length = f64::INFINITY;
        for last in 0..n {
            if mask & (1 << last) == 0 {
                continue;
            }
            let c = cost[mask][last] + evaluator.arc(last + 1, depot);
            if c < length {
                length = c;
                best_last = last;
            }
        }

        let mut stops = Vec::with_capacity(mask.count_ones() as usize);
        let (mut m, mut last) = (mask, best_last);
        while last != usize::MAX {
            stops.push(last + 1);
            let prev = parent[m][last];
            m &= !(1 << last);
            last = prev;
        }
        stops.reverse();
        tours.push(Tour { length, stops });
    }
    tours
}

/// Advances a base-`vehicles` counter; returns `false` after the last value.
fn next_assignment(assignment: &mut [usize], vehicles: usize) -> bool {
    for digit in assignment.iter_mut() {
        *digit += 1;
        if *digit < vehicles {
            return true;
        }
        *digit = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::DistanceDimension;
    use crate::models::{Coordinate, LocationSet};

    fn line_problem(vehicles: usize) -> RoutingProblem {
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                dm.set(i, j, (i as f64 - j as f64).abs());
            }
        }
        RoutingProblem::from_matrix(dm, vehicles).expect("valid")
    }

    fn stops(output: SolverOutput) -> Vec<Vec<usize>> {
        match output {
            SolverOutput::Solved(raw) => raw
                .routes
                .into_iter()
                .map(|r| r.nodes[1..r.nodes.len() - 1].to_vec())
                .collect(),
            SolverOutput::Infeasible => panic!("expected a solution"),
        }
    }

    #[test]
    fn test_optimal_tours() {
        let problem = line_problem(1);
        let dim = DistanceDimension::default();
        let eval = RouteEvaluator::new(&problem, &dim);
        let tours = optimal_tours(&eval, 3);
        assert_eq!(tours.len(), 8);
        assert_eq!(tours[0].length, 0.0);
        assert_eq!(tours[0b001].stops, vec![1]);
        assert_eq!(tours[0b001].length, 2.0);
        assert_eq!(tours[0b111].length, 6.0);
        assert_eq!(tours[0b111].stops.len(), 3);
        assert_eq!(tours[0b101].length, 6.0);
    }

    #[test]
    fn test_next_assignment() {
        let mut a = vec![0, 0];
        let mut seen = vec![a.clone()];
        while next_assignment(&mut a, 2) {
            seen.push(a.clone());
        }
        assert_eq!(seen, vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);
    }

    #[test]
    fn test_single_vehicle_takes_everything() {
        let problem = line_problem(1);
        let routes = stops(ExhaustiveSolver::default().solve(&problem).expect("solved"));
        assert_eq!(routes.len(), 1);
        let mut visited = routes[0].clone();
        visited.sort_unstable();
        assert_eq!(visited, vec![1, 2, 3]);
    }

    #[test]
    fn test_idle_vehicles_are_padded() {
        let locations = LocationSet::new(
            Coordinate::new(0.0, 0.0),
            vec![Coordinate::new(0.0, 0.1)],
        );
        let problem = RoutingProblem::new(&locations, 3).expect("valid");
        let routes = stops(ExhaustiveSolver::default().solve(&problem).expect("solved"));
        assert_eq!(routes, vec![vec![1], vec![], vec![]]);
    }

    #[test]
    fn test_infeasible_when_cap_too_small() {
        let problem = line_problem(3);
        let solver = ExhaustiveSolver::new(SolverConfig::default().with_max_route_distance(1.0));
        assert_eq!(
            solver.solve(&problem).expect("ran"),
            SolverOutput::Infeasible
        );
    }

    #[test]
    fn test_cap_forces_split() {
        // 1 and 2 on opposite sides of the depot
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, 2.0, 2.0, 2.0, 0.0, 4.0, 2.0, 4.0, 0.0],
        )
        .expect("valid");
        let problem = RoutingProblem::from_matrix(dm, 2).expect("valid");
        // without the cap one route of 8 ties with two routes of 4
        let config = SolverConfig::default()
            .with_max_route_distance(4.0)
            .with_global_span_coefficient(0.0);
        let routes = stops(ExhaustiveSolver::new(config).solve(&problem).expect("solved"));
        assert!(routes.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_refuses_large_problems() {
        let problem = line_problem(3);
        let solver = ExhaustiveSolver::default().with_max_destinations(2);
        assert!(matches!(
            solver.solve(&problem),
            Err(RoutingError::SolverUnavailable(_))
        ));

        let solver = ExhaustiveSolver::default().with_max_assignments(26);
        assert!(!solver.supports(&problem));
        assert!(matches!(
            solver.solve(&problem),
            Err(RoutingError::SolverUnavailable(_))
        ));
        assert!(ExhaustiveSolver::default().supports(&problem));
    }
}
