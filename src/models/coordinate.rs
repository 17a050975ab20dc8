//! Geographic coordinates and location sets.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in decimal
/// degrees.
///
/// Latitudes are expected in [-90, 90] and longitudes in [-180, 180]. Values
/// outside those ranges are not rejected and produce an unspecified distance.
///
/// # Examples
///
/// ```
/// use vroutes::models::haversine_km;
///
/// // One degree of longitude along the equator.
/// let d = haversine_km(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.19).abs() < 0.01);
/// assert_eq!(haversine_km(10.0, 20.0, 10.0, 20.0), 0.0);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = lon2.to_radians() - lon1.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1 for near-antipodal points
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();
    c * EARTH_RADIUS_KM
}

/// A point on the Earth's surface in decimal degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`.
///
/// # Examples
///
/// ```
/// use vroutes::models::Coordinate;
///
/// let jakarta = Coordinate::new(-6.2173207, 106.8315268);
/// let bekasi = Coordinate::new(-6.239025, 106.990927);
/// let d = jakarta.haversine_km(&bekasi);
/// assert!(d > 17.0 && d < 18.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Returns `true` if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// An origin (the depot) and the ordered destinations to visit.
///
/// The origin is node 0; destination `i` in the list is node `i + 1`.
///
/// # Examples
///
/// ```
/// use vroutes::models::{Coordinate, LocationSet};
///
/// let set = LocationSet::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
/// );
/// assert_eq!(set.num_nodes(), 3);
/// assert_eq!(set.coordinates().nth(2), Some(Coordinate::new(1.0, 0.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSet {
    /// Start and end point of every route.
    pub origin: Coordinate,
    /// Destinations in node order.
    pub destinations: Vec<Coordinate>,
}

impl LocationSet {
    /// Creates a location set.
    pub fn new(origin: Coordinate, destinations: Vec<Coordinate>) -> Self {
        Self {
            origin,
            destinations,
        }
    }

    /// Number of destinations (excluding the origin).
    pub fn num_destinations(&self) -> usize {
        self.destinations.len()
    }

    /// Number of nodes including the origin.
    pub fn num_nodes(&self) -> usize {
        self.destinations.len() + 1
    }

    /// Iterates over all nodes in index order, origin first.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.origin).chain(self.destinations.iter().copied())
    }
}
