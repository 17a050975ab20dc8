//! Production solver: cheapest-arc construction plus local search.

use tracing::{debug, instrument};

use super::{ExhaustiveSolver, FirstSolutionStrategy, SolverAdapter, SolverConfig};
use crate::constructive::{path_cheapest_arc, repair_unassigned, FirstSolution};
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{relocate_improve, two_opt_improve};
use crate::models::{RawSolution, RoutingProblem, SolverOutput};

/// Deterministic heuristic solver.
///
/// Builds a first solution with the configured strategy, places any
/// leftover destinations by cheapest feasible insertion and, unless local
/// search is disabled, alternates intra-route 2-opt with inter-route
/// relocation until no move improves the objective or the move budget is
/// spent.
///
/// When some destination still cannot be placed within the distance cap, a
/// problem small enough for [`ExhaustiveSolver`] is handed to it (unless
/// `exact_fallback` is off), so small instances are only reported
/// [`SolverOutput::Infeasible`] when no feasible assignment exists. Larger
/// ones are reported infeasible directly.
///
/// # Examples
///
/// ```
/// use vroutes::models::{Coordinate, LocationSet, RoutingProblem, SolverOutput};
/// use vroutes::solver::{CheapestArcSolver, SolverAdapter, SolverConfig};
///
/// let locations = LocationSet::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
/// );
/// let problem = RoutingProblem::new(&locations, 1).unwrap();
///
/// let solver = CheapestArcSolver::new(SolverConfig::default());
/// assert!(matches!(solver.solve(&problem).unwrap(), SolverOutput::Solved(_)));
///
/// // No destination is reachable within 100 km and back.
/// let tight = CheapestArcSolver::new(SolverConfig::default().with_max_route_distance(100.0));
/// assert_eq!(tight.solve(&problem).unwrap(), SolverOutput::Infeasible);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheapestArcSolver {
    config: SolverConfig,
}

impl CheapestArcSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn first_solution(&self, evaluator: &RouteEvaluator<'_>) -> FirstSolution {
        match self.config.first_solution_strategy {
            FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(evaluator),
        }
    }

    fn improve(&self, routes: &mut [Vec<usize>], evaluator: &RouteEvaluator<'_>) {
        let mut budget = self.config.max_local_search_iterations;

        loop {
            for route in routes.iter_mut() {
                let (improved, _) = two_opt_improve(route, evaluator);
                *route = improved;
            }

            let moves = relocate_improve(routes, evaluator, budget);
            budget -= moves;
            if moves == 0 || budget == 0 {
                break;
            }
        }

        for route in routes.iter_mut() {
            let (improved, _) = two_opt_improve(route, evaluator);
            *route = improved;
        }
    }
}

impl SolverAdapter for CheapestArcSolver {
    #[instrument(skip_all, fields(nodes = problem.num_nodes(), vehicles = problem.vehicle_count()))]
    fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput> {
        self.config.validate()?;
        let dimension = self.config.dimension();
        let evaluator = RouteEvaluator::new(problem, &dimension);

        let mut first = self.first_solution(&evaluator);
        if !first.is_complete() {
            debug!(
                unassigned = first.unassigned.len(),
                "first solution incomplete, repairing"
            );
            if !repair_unassigned(&mut first, &evaluator) {
                let exact = ExhaustiveSolver::new(self.config.clone());
                if self.config.exact_fallback && exact.supports(problem) {
                    debug!("falling back to exhaustive search");
                    return exact.solve(problem);
                }
                debug!(
                    unassigned = first.unassigned.len(),
                    "no feasible solution found"
                );
                return Ok(SolverOutput::Infeasible);
            }
        }

        let mut routes = first.routes;
        if self.config.local_search {
            let before = evaluator.evaluate(&routes).objective;
            self.improve(&mut routes, &evaluator);
            let after = evaluator.evaluate(&routes).objective;
            debug!(before, after, "local search finished");
        }

        Ok(SolverOutput::Solved(RawSolution::from_stops(routes)))
    }
}
