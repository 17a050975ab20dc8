//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::evaluation::DistanceDimension;

/// Heuristic used to build the first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Extend each route with the node reached by the cheapest arc.
    #[default]
    PathCheapestArc,
}

/// Parameters of the distance dimension and the search.
///
/// # Examples
///
/// ```
/// use vroutes::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_route_distance(500.0)
///     .with_global_span_coefficient(10.0)
///     .without_local_search();
/// assert_eq!(config.max_route_distance, 500.0);
/// assert!(!config.local_search);
/// assert!(config.validate().is_ok());
///
/// assert!(SolverConfig::default().with_max_route_distance(-1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on a single vehicle's travelled distance (kilometers).
    pub max_route_distance: f64,
    /// Objective weight of the longest route.
    pub global_span_coefficient: f64,
    /// First-solution heuristic.
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Refine the first solution with local search.
    pub local_search: bool,
    /// Upper bound on improving moves applied during local search.
    pub max_local_search_iterations: usize,
    /// Hand small problems the heuristic cannot place to the exhaustive
    /// solver before reporting infeasibility.
    pub exact_fallback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let dimension = DistanceDimension::default();
        Self {
            max_route_distance: dimension.max_route_distance,
            global_span_coefficient: dimension.global_span_coefficient,
            first_solution_strategy: FirstSolutionStrategy::default(),
            local_search: true,
            max_local_search_iterations: 1000,
            exact_fallback: true,
        }
    }
}

impl SolverConfig {
    /// Sets the maximum route distance.
    pub fn with_max_route_distance(mut self, max: f64) -> Self {
        self.max_route_distance = max;
        self
    }

    /// Sets the global span coefficient.
    pub fn with_global_span_coefficient(mut self, coefficient: f64) -> Self {
        self.global_span_coefficient = coefficient;
        self
    }

    /// Sets the first-solution strategy.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Sets the local search move budget.
    pub fn with_max_local_search_iterations(mut self, iterations: usize) -> Self {
        self.max_local_search_iterations = iterations;
        self
    }

    /// Disables local search; the first solution is returned as is.
    pub fn without_local_search(mut self) -> Self {
        self.local_search = false;
        self
    }

    /// Disables the exhaustive fallback; the heuristic alone decides
    /// feasibility.
    pub fn without_exact_fallback(mut self) -> Self {
        self.exact_fallback = false;
        self
    }

    /// The distance dimension described by this configuration.
    pub fn dimension(&self) -> DistanceDimension {
        DistanceDimension {
            max_route_distance: self.max_route_distance,
            global_span_coefficient: self.global_span_coefficient,
        }
    }

    /// Checks that the dimension parameters are usable.
    ///
    /// Fails with [`RoutingError::SolverUnavailable`] for negative or
    /// non-finite values.
    pub fn validate(&self) -> Result<()> {
        if !self.max_route_distance.is_finite() || self.max_route_distance < 0.0 {
            return Err(RoutingError::SolverUnavailable(format!(
                "max route distance must be a non-negative number, got {}",
                self.max_route_distance
            )));
        }
        if !self.global_span_coefficient.is_finite() || self.global_span_coefficient < 0.0 {
            return Err(RoutingError::SolverUnavailable(format!(
                "global span coefficient must be a non-negative number, got {}",
                self.global_span_coefficient
            )));
        }
        Ok(())
    }
}
