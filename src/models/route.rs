//! Per-vehicle route result.

use serde::{Deserialize, Serialize};

use super::DEPOT;

/// The route driven by a single vehicle.
///
/// `sequence` holds node indices into `[origin] + destinations`, starting and
/// ending at the depot. A vehicle without destinations has `[0, 0]` and zero
/// distance.
///
/// # Examples
///
/// ```
/// use vroutes::models::RouteResult;
///
/// let idle = RouteResult::idle(3);
/// assert_eq!(idle.vehicle_id, 3);
/// assert_eq!(idle.sequence, vec![0, 0]);
/// assert!(idle.is_empty());
///
/// let route = RouteResult {
///     vehicle_id: 0,
///     sequence: vec![0, 2, 1, 0],
///     total_distance: 12.5,
/// };
/// assert_eq!(route.stops(), &[2, 1]);
/// assert_eq!(route.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Vehicle index in `0..vehicle_count`.
    pub vehicle_id: usize,
    /// Visited nodes in order, depot first and last.
    pub sequence: Vec<usize>,
    /// Sum of arc costs along `sequence`.
    pub total_distance: f64,
}

impl RouteResult {
    /// A depot-to-depot route for a vehicle with nothing to do.
    pub fn idle(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            sequence: vec![DEPOT, DEPOT],
            total_distance: 0.0,
        }
    }

    /// Destination nodes visited, without the depot ends.
    pub fn stops(&self) -> &[usize] {
        match self.sequence.len() {
            0..=2 => &[],
            n => &self.sequence[1..n - 1],
        }
    }

    /// Number of destinations visited.
    pub fn len(&self) -> usize {
        self.stops().len()
    }

    /// Returns `true` if the vehicle visits no destination.
    pub fn is_empty(&self) -> bool {
        self.stops().is_empty()
    }
}
