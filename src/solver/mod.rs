//! Solvers for routing problems.
//!
//! [`SolverAdapter`] is the boundary between problem construction and the
//! combinatorial search. Two implementations are provided:
//!
//! - [`CheapestArcSolver`] — Path-cheapest-arc first solution refined by
//!   2-opt and relocate; the default for [`calculate`](crate::calculate)
//! - [`ExhaustiveSolver`] — Optimal brute force for small instances

mod cheapest_arc;
mod config;
mod exhaustive;

pub use cheapest_arc::CheapestArcSolver;
pub use config::{FirstSolutionStrategy, SolverConfig};
pub use exhaustive::ExhaustiveSolver;

use crate::error::Result;
use crate::models::{RoutingProblem, SolverOutput};

/// A routing solver.
///
/// Given a problem, returns one depot-to-depot node list per vehicle such
/// that every destination is visited exactly once, the arc cost between `i`
/// and `j` is `problem.arc_cost(i, j)`, and every route respects the
/// solver's distance dimension. Returns [`SolverOutput::Infeasible`] when no
/// such assignment is found. Identical input must yield identical output.
///
/// # Examples
///
/// ```
/// use vroutes::models::{RawSolution, RoutingProblem, SolverOutput};
/// use vroutes::solver::SolverAdapter;
/// use vroutes::Result;
///
/// /// Sends every destination with vehicle 0, in index order.
/// struct InOrder;
///
/// impl SolverAdapter for InOrder {
///     fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput> {
///         let stops: Vec<usize> = problem.destinations().collect();
///         Ok(SolverOutput::Solved(RawSolution::from_stops(vec![stops])))
///     }
/// }
/// ```
pub trait SolverAdapter {
    /// Solves `problem`.
    fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput>;
}

impl<S: SolverAdapter + ?Sized> SolverAdapter for &S {
    fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput> {
        (**self).solve(problem)
    }
}

impl<S: SolverAdapter + ?Sized> SolverAdapter for Box<S> {
    fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput> {
        (**self).solve(problem)
    }
}
