//! Public entry point: locations in, per-vehicle routes out.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::evaluation::assemble;
use crate::models::{CalculationOutcome, LocationSet, RoutingProblem};
use crate::solver::{CheapestArcSolver, SolverAdapter, SolverConfig};

/// Plans routes for `vehicle_count` vehicles leaving from and returning to
/// `locations.origin` with the default [`CheapestArcSolver`].
///
/// Returns [`CalculationOutcome::Infeasible`] when the solver finds no
/// assignment that keeps every route within the distance cap.
///
/// # Errors
///
/// [`RoutingError::InvalidInput`](crate::RoutingError::InvalidInput) for an
/// empty destination list, zero vehicles or non-finite coordinates; any error
/// the solver reports is passed through.
///
/// # Examples
///
/// ```
/// use vroutes::models::{Coordinate, LocationSet};
///
/// let locations = LocationSet::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
/// );
/// let outcome = vroutes::calculate(&locations, 1).unwrap();
/// let routes = outcome.routes().unwrap();
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].len(), 2);
/// ```
pub fn calculate(locations: &LocationSet, vehicle_count: usize) -> Result<CalculationOutcome> {
    RoutePlanner::new(locations, vehicle_count).calculate()
}

/// Route calculation with a custom configuration or solver.
///
/// # Examples
///
/// ```
/// use vroutes::models::{Coordinate, LocationSet};
/// use vroutes::solver::{ExhaustiveSolver, SolverConfig};
/// use vroutes::RoutePlanner;
///
/// let locations = LocationSet::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
/// );
///
/// let tight = RoutePlanner::new(&locations, 2)
///     .with_config(SolverConfig::default().with_max_route_distance(50.0))
///     .calculate()
///     .unwrap();
/// assert!(tight.is_infeasible());
///
/// let optimal = RoutePlanner::new(&locations, 2)
///     .with_solver(ExhaustiveSolver::default())
///     .calculate()
///     .unwrap();
/// assert_eq!(optimal.routes().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<'a, S = CheapestArcSolver> {
    locations: &'a LocationSet,
    vehicle_count: usize,
    solver: S,
}

impl<'a> RoutePlanner<'a> {
    /// Creates a planner using [`CheapestArcSolver`] with default settings.
    pub fn new(locations: &'a LocationSet, vehicle_count: usize) -> Self {
        Self {
            locations,
            vehicle_count,
            solver: CheapestArcSolver::default(),
        }
    }

    /// Replaces the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver = CheapestArcSolver::new(config);
        self
    }
}

impl<'a, S: SolverAdapter> RoutePlanner<'a, S> {
    /// Replaces the solver.
    pub fn with_solver<T: SolverAdapter>(self, solver: T) -> RoutePlanner<'a, T> {
        RoutePlanner {
            locations: self.locations,
            vehicle_count: self.vehicle_count,
            solver,
        }
    }

    /// The solver in use.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Builds the problem, solves it and assembles one route per vehicle.
    ///
    /// Input is validated before the solver is invoked.
    #[instrument(skip_all, fields(destinations = self.locations.num_destinations(), vehicles = self.vehicle_count))]
    pub fn calculate(&self) -> Result<CalculationOutcome> {
        let problem = RoutingProblem::new(self.locations, self.vehicle_count)?;
        let output = self.solver.solve(&problem)?;
        let outcome = assemble(&problem, &output)?;
        debug!(
            infeasible = outcome.is_infeasible(),
            total_distance = outcome.total_distance(),
            "calculation finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;
    use crate::error::RoutingError;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Coordinate, RouteResult, SolverOutput};
    use crate::solver::ExhaustiveSolver;

    fn jakarta() -> LocationSet {
        LocationSet::new(
            Coordinate::new(-6.2173207, 106.8315268),
            vec![
                Coordinate::new(-6.1826708, 106.8679899),
                Coordinate::new(-6.3627638, 106.8270482),
                Coordinate::new(-6.239025, 106.990927),
                Coordinate::new(-6.265075, 106.782857),
            ],
        )
    }

    /// Counts calls and delegates to the default solver.
    #[derive(Default)]
    struct CountingSolver {
        calls: Cell<usize>,
    }

    impl SolverAdapter for CountingSolver {
        fn solve(&self, problem: &RoutingProblem) -> Result<SolverOutput> {
            self.calls.set(self.calls.get() + 1);
            CheapestArcSolver::default().solve(problem)
        }
    }

    fn assert_partition(routes: &[RouteResult], destinations: usize) {
        let mut visited: Vec<usize> = routes.iter().flat_map(|r| r.stops().to_vec()).collect();
        visited.sort_unstable();
        assert_eq!(visited, (1..=destinations).collect::<Vec<_>>());
    }

    fn stops(routes: &[RouteResult]) -> Vec<Vec<usize>> {
        routes.iter().map(|r| r.stops().to_vec()).collect()
    }

    #[test]
    fn test_jakarta_two_vehicles() {
        let locations = jakarta();
        let routes = calculate(&locations, 2)
            .expect("valid")
            .into_routes()
            .expect("feasible");

        assert_eq!(routes.len(), 2);
        for (id, route) in routes.iter().enumerate() {
            assert_eq!(route.vehicle_id, id);
            assert_eq!(route.sequence.first(), Some(&0));
            assert_eq!(route.sequence.last(), Some(&0));
            assert!(route.total_distance >= 0.0);
        }
        assert_partition(&routes, 4);
    }

    #[test]
    fn test_two_destinations_one_vehicle() {
        let locations = LocationSet::new(
            Coordinate::new(0.0, 0.0),
            vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
        );
        let routes = calculate(&locations, 1)
            .expect("valid")
            .into_routes()
            .expect("feasible");

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].len(), 2);
        assert_partition(&routes, 2);

        // 1° of arc each way plus the diagonal between them
        let leg = Coordinate::new(0.0, 0.0).haversine_km(&Coordinate::new(0.0, 1.0));
        let diagonal = Coordinate::new(0.0, 1.0).haversine_km(&Coordinate::new(1.0, 0.0));
        assert!((routes[0].total_distance - (2.0 * leg + diagonal)).abs() < 1e-6);
    }

    #[test]
    fn test_empty_destinations_never_reach_solver() {
        let locations = LocationSet::new(Coordinate::new(0.0, 0.0), Vec::new());
        let solver = CountingSolver::default();
        let result = RoutePlanner::new(&locations, 2)
            .with_solver(&solver)
            .calculate();

        assert!(matches!(result, Err(RoutingError::InvalidInput(_))));
        assert_eq!(solver.calls.get(), 0);
    }

    #[test]
    fn test_zero_vehicles_rejected() {
        let solver = CountingSolver::default();
        let locations = jakarta();
        let result = RoutePlanner::new(&locations, 0)
            .with_solver(&solver)
            .calculate();

        assert!(matches!(result, Err(RoutingError::InvalidInput(_))));
        assert_eq!(solver.calls.get(), 0);
    }

    #[test]
    fn test_valid_input_reaches_solver_once() {
        let solver = CountingSolver::default();
        let locations = jakarta();
        RoutePlanner::new(&locations, 2)
            .with_solver(&solver)
            .calculate()
            .expect("valid");
        assert_eq!(solver.calls.get(), 1);
    }

    #[test]
    fn test_more_vehicles_than_destinations() {
        let locations = jakarta();
        let routes = calculate(&locations, 6)
            .expect("valid")
            .into_routes()
            .expect("feasible");

        assert_eq!(routes.len(), 6);
        let idle: Vec<&RouteResult> = routes.iter().filter(|r| r.is_empty()).collect();
        assert!(idle.len() >= 2);
        for route in idle {
            assert_eq!(route.sequence, vec![0, 0]);
            assert_eq!(route.total_distance, 0.0);
        }
        assert_partition(&routes, 4);
    }

    #[test]
    fn test_cap_below_nearest_round_trip() {
        let locations = jakarta();
        let nearest = locations
            .destinations
            .iter()
            .map(|d| locations.origin.haversine_km(d))
            .fold(f64::INFINITY, f64::min);

        let outcome = RoutePlanner::new(&locations, 4)
            .with_config(SolverConfig::default().with_max_route_distance(2.0 * nearest - 0.1))
            .calculate()
            .expect("valid");
        assert_eq!(outcome, CalculationOutcome::Infeasible);
        assert!(outcome.routes().is_none());
    }

    #[test]
    fn test_exhaustive_solver_through_planner() {
        let locations = jakarta();
        let routes = RoutePlanner::new(&locations, 2)
            .with_solver(ExhaustiveSolver::default())
            .calculate()
            .expect("valid")
            .into_routes()
            .expect("feasible");
        assert_eq!(routes.len(), 2);
        assert_partition(&routes, 4);
    }

    #[test]
    fn test_boxed_solver() {
        let locations = jakarta();
        let solver: Box<dyn SolverAdapter> = Box::new(ExhaustiveSolver::default());
        let outcome = RoutePlanner::new(&locations, 2)
            .with_solver(solver)
            .calculate()
            .expect("valid");
        assert!(!outcome.is_infeasible());
    }

    #[test]
    fn test_exhaustive_refusal_is_propagated() {
        let locations = jakarta();
        let result = RoutePlanner::new(&locations, 2)
            .with_solver(ExhaustiveSolver::default().with_max_destinations(3))
            .calculate();
        assert!(matches!(result, Err(RoutingError::SolverUnavailable(_))));
    }

    #[test]
    fn test_output_wire_shape() {
        let locations: LocationSet = serde_json::from_str(
            r#"{
                "origin": {"lat": 0.0, "lng": 0.0},
                "destinations": [{"lat": 0.0, "lng": 1.0}, {"lat": 1.0, "lng": 0.0}]
            }"#,
        )
        .expect("valid json");

        let outcome = calculate(&locations, 2).expect("valid");
        let json = serde_json::to_value(&outcome).expect("serializable");
        let routes = json.as_array().expect("route list");
        assert_eq!(routes.len(), 2);
        for route in routes {
            assert!(route["vehicle_id"].is_u64());
            assert!(route["sequence"].is_array());
            assert!(route["total_distance"].is_f64());
        }

        let infeasible = RoutePlanner::new(&locations, 2)
            .with_config(SolverConfig::default().with_max_route_distance(1.0))
            .calculate()
            .expect("valid");
        assert_eq!(serde_json::to_value(&infeasible).expect("serializable"), serde_json::Value::Null);
    }

    fn small_location_set() -> impl Strategy<Value = LocationSet> {
        let coordinate = (-1.0f64..1.0, -1.0f64..1.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng));
        (coordinate.clone(), prop::collection::vec(coordinate, 1..=6))
            .prop_map(|(origin, destinations)| LocationSet::new(origin, destinations))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_solvers_partition_destinations(
            locations in small_location_set(),
            vehicles in 1usize..=3,
        ) {
            let n = locations.num_destinations();
            for outcome in [
                calculate(&locations, vehicles),
                RoutePlanner::new(&locations, vehicles)
                    .with_solver(ExhaustiveSolver::default())
                    .calculate(),
            ] {
                let routes = outcome.expect("valid").into_routes().expect("feasible");
                prop_assert_eq!(routes.len(), vehicles);
                for (id, route) in routes.iter().enumerate() {
                    prop_assert_eq!(route.vehicle_id, id);
                    prop_assert_eq!(route.sequence.first(), Some(&0));
                    prop_assert_eq!(route.sequence.last(), Some(&0));
                }
                let mut visited: Vec<usize> = routes.iter().flat_map(|r| r.stops().to_vec()).collect();
                visited.sort_unstable();
                prop_assert_eq!(visited, (1..=n).collect::<Vec<_>>());
            }
        }

        #[test]
        fn prop_heuristic_never_beats_exhaustive(
            locations in small_location_set(),
            vehicles in 1usize..=3,
        ) {
            let problem = RoutingProblem::new(&locations, vehicles).expect("valid");
            let dimension = SolverConfig::default().dimension();
            let evaluator = RouteEvaluator::new(&problem, &dimension);

            let heuristic = calculate(&locations, vehicles)
                .expect("valid")
                .into_routes()
                .expect("feasible");
            let optimal = RoutePlanner::new(&locations, vehicles)
                .with_solver(ExhaustiveSolver::default())
                .calculate()
                .expect("valid")
                .into_routes()
                .expect("feasible");

            let heuristic = evaluator.evaluate(&stops(&heuristic)).objective;
            let optimal = evaluator.evaluate(&stops(&optimal)).objective;
            prop_assert!(heuristic >= optimal - 1e-6);
        }

        #[test]
        fn prop_infeasible_only_without_any_plan(
            locations in small_location_set(),
            vehicles in 1usize..=3,
            cap in 100.0f64..600.0,
        ) {
            let config = SolverConfig::default().with_max_route_distance(cap);
            let heuristic = RoutePlanner::new(&locations, vehicles)
                .with_config(config.clone())
                .calculate()
                .expect("valid");
            let exact = RoutePlanner::new(&locations, vehicles)
                .with_solver(ExhaustiveSolver::new(config.clone()))
                .calculate()
                .expect("valid");
            prop_assert_eq!(heuristic.is_infeasible(), exact.is_infeasible());

            if let Some(routes) = heuristic.routes() {
                for route in routes {
                    prop_assert!(route.total_distance <= cap + 1e-6);
                }
            }
        }
    }
}
