//! Conversion of raw solver output into per-vehicle route results.

use tracing::debug;

use crate::error::{Result, RoutingError};
use crate::models::{CalculationOutcome, RawRoute, RouteResult, RoutingProblem, SolverOutput};

/// Turns a solver's output into the public outcome.
///
/// Emits exactly one [`RouteResult`] per vehicle in increasing id order.
/// A vehicle absent from the raw solution gets an idle `[0, 0]` route.
/// `total_distance` is the sum of arc costs over consecutive nodes.
/// [`SolverOutput::Infeasible`] becomes [`CalculationOutcome::Infeasible`].
///
/// Raw routes that do not start and end at the depot, reference unknown nodes
/// or vehicles, or repeat a vehicle id are rejected with
/// [`RoutingError::InvalidSolution`].
///
/// # Examples
///
/// ```
/// use vroutes::distance::DistanceMatrix;
/// use vroutes::evaluation::assemble;
/// use vroutes::models::{RawSolution, RoutingProblem, SolverOutput};
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 5.0, 8.0,
///     5.0, 0.0, 3.0,
///     8.0, 3.0, 0.0,
/// ]).unwrap();
/// let problem = RoutingProblem::from_matrix(dm, 2).unwrap();
/// let raw = SolverOutput::Solved(RawSolution::from_stops(vec![vec![1, 2]]));
///
/// let outcome = assemble(&problem, &raw).unwrap();
/// let routes = outcome.routes().unwrap();
/// assert_eq!(routes[0].sequence, vec![0, 1, 2, 0]);
/// assert_eq!(routes[0].total_distance, 16.0);
/// assert_eq!(routes[1].sequence, vec![0, 0]);
/// assert_eq!(routes[1].total_distance, 0.0);
/// ```
pub fn assemble(problem: &RoutingProblem, output: &SolverOutput) -> Result<CalculationOutcome> {
    let raw = match output {
        SolverOutput::Solved(raw) => raw,
        SolverOutput::Infeasible => {
            debug!("solver reported no feasible solution");
            return Ok(CalculationOutcome::Infeasible);
        }
    };

    let mut by_vehicle: Vec<Option<&RawRoute>> = vec![None; problem.vehicle_count()];
    for route in &raw.routes {
        let slot = by_vehicle.get_mut(route.vehicle_id).ok_or_else(|| {
            RoutingError::InvalidSolution(format!(
                "vehicle {} is outside the fleet of {}",
                route.vehicle_id,
                problem.vehicle_count()
            ))
        })?;
        if slot.replace(route).is_some() {
            return Err(RoutingError::InvalidSolution(format!(
                "vehicle {} has more than one route",
                route.vehicle_id
            )));
        }
    }

    let routes = by_vehicle
        .into_iter()
        .enumerate()
        .map(|(vehicle_id, route)| match route {
            Some(route) => assemble_route(problem, route),
            None => Ok(RouteResult::idle(vehicle_id)),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CalculationOutcome::Routes(routes))
}

fn assemble_route(problem: &RoutingProblem, route: &RawRoute) -> Result<RouteResult> {
    let depot = problem.depot();
    let nodes = &route.nodes;
    if nodes.len() < 2 || nodes[0] != depot || nodes[nodes.len() - 1] != depot {
        return Err(RoutingError::InvalidSolution(format!(
            "route of vehicle {} must start and end at the depot",
            route.vehicle_id
        )));
    }
    if let Some(&node) = nodes.iter().find(|&&n| n >= problem.num_nodes()) {
        return Err(RoutingError::InvalidSolution(format!(
            "route of vehicle {} visits unknown node {node}",
            route.vehicle_id
        )));
    }

    let arc_cost = problem.arc_cost_evaluator();
    let total_distance = nodes.windows(2).map(|w| arc_cost(w[0], w[1])).sum();

    Ok(RouteResult {
        vehicle_id: route.vehicle_id,
        sequence: nodes.clone(),
        total_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Coordinate, LocationSet, RawSolution};

    fn matrix_problem(vehicles: usize) -> RoutingProblem {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0.0, 5.0, 8.0, 12.0, 5.0, 0.0, 3.0, 7.0, 8.0, 3.0, 0.0, 4.0, 12.0, 7.0, 4.0, 0.0,
            ],
        )
        .expect("valid");
        RoutingProblem::from_matrix(dm, vehicles).expect("valid")
    }

    #[test]
    fn test_assemble_one_route_per_vehicle() {
        let problem = matrix_problem(3);
        let raw = SolverOutput::Solved(RawSolution::from_stops(vec![vec![1], vec![3, 2]]));
        let routes = assemble(&problem, &raw)
            .expect("valid")
            .into_routes()
            .expect("feasible");

        assert_eq!(routes.len(), 3);
        assert_eq!(
            routes.iter().map(|r| r.vehicle_id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(routes[0].sequence, vec![0, 1, 0]);
        assert_eq!(routes[0].total_distance, 10.0);
        assert_eq!(routes[1].sequence, vec![0, 3, 2, 0]);
        assert_eq!(routes[1].total_distance, 12.0 + 4.0 + 8.0);
        assert_eq!(routes[2], RouteResult::idle(2));
    }

    #[test]
    fn test_assemble_orders_by_vehicle_id() {
        let problem = matrix_problem(2);
        let raw = SolverOutput::Solved(RawSolution {
            routes: vec![
                RawRoute::from_stops(1, &[2]),
                RawRoute::from_stops(0, &[1, 3]),
            ],
        });
        let routes = assemble(&problem, &raw)
            .expect("valid")
            .into_routes()
            .expect("feasible");
        assert_eq!(routes[0].vehicle_id, 0);
        assert_eq!(routes[0].sequence, vec![0, 1, 3, 0]);
        assert_eq!(routes[1].vehicle_id, 1);
    }

    #[test]
    fn test_assemble_infeasible() {
        let problem = matrix_problem(2);
        let outcome = assemble(&problem, &SolverOutput::Infeasible).expect("valid");
        assert_eq!(outcome, CalculationOutcome::Infeasible);
    }

    #[test]
    fn test_assemble_idempotent() {
        let problem = matrix_problem(2);
        let raw = SolverOutput::Solved(RawSolution::from_stops(vec![vec![2, 1], vec![3]]));
        let first = assemble(&problem, &raw).expect("valid");
        let second = assemble(&problem, &raw).expect("valid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_rejects_unknown_vehicle() {
        let problem = matrix_problem(1);
        let raw = SolverOutput::Solved(RawSolution {
            routes: vec![RawRoute::from_stops(1, &[1, 2, 3])],
        });
        assert!(matches!(
            assemble(&problem, &raw),
            Err(RoutingError::InvalidSolution(_))
        ));
    }

    #[test]
    fn test_assemble_rejects_duplicate_vehicle() {
        let problem = matrix_problem(2);
        let raw = SolverOutput::Solved(RawSolution {
            routes: vec![RawRoute::from_stops(0, &[1]), RawRoute::from_stops(0, &[2])],
        });
        assert!(matches!(
            assemble(&problem, &raw),
            Err(RoutingError::InvalidSolution(_))
        ));
    }

    #[test]
    fn test_assemble_rejects_missing_depot_end() {
        let problem = matrix_problem(1);
        let raw = SolverOutput::Solved(RawSolution {
            routes: vec![RawRoute {
                vehicle_id: 0,
                nodes: vec![0, 1, 2, 3],
            }],
        });
        assert!(matches!(
            assemble(&problem, &raw),
            Err(RoutingError::InvalidSolution(_))
        ));
    }

    #[test]
    fn test_assemble_rejects_unknown_node() {
        let problem = matrix_problem(1);
        let raw = SolverOutput::Solved(RawSolution::from_stops(vec![vec![1, 9]]));
        assert!(matches!(
            assemble(&problem, &raw),
            Err(RoutingError::InvalidSolution(_))
        ));
    }

    #[test]
    fn test_assemble_directed_distances() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 5.0, 2.0, 0.0, 1.0, 3.0, 7.0, 0.0])
            .expect("valid");
        let problem = RoutingProblem::from_matrix(dm, 1).expect("valid");
        let raw = SolverOutput::Solved(RawSolution::from_stops(vec![vec![2, 1]]));
        let routes = assemble(&problem, &raw)
            .expect("valid")
            .into_routes()
            .expect("feasible");
        // 0→2→1→0 = 5 + 7 + 2
        assert_eq!(routes[0].total_distance, 14.0);
    }

    #[test]
    fn test_assemble_haversine_distances() {
        let locations = LocationSet::new(
            Coordinate::new(0.0, 0.0),
            vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
        );
        let problem = RoutingProblem::new(&locations, 1).expect("valid");
        let raw = SolverOutput::Solved(RawSolution::from_stops(vec![vec![1, 2]]));
        let routes = assemble(&problem, &raw)
            .expect("valid")
            .into_routes()
            .expect("feasible");
        let dm = problem.distances();
        let expected = dm.get(0, 1) + dm.get(1, 2) + dm.get(2, 0);
        assert!((routes[0].total_distance - expected).abs() < 1e-9);
    }
}
