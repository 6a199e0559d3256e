use crate::error::SunmapError;
use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Converts to a `geo_types::Point` (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub fn to_coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

/// Trait for types that can provide a latitude/longitude pair.
///
/// Implemented for [`LatLon`], `(f64, f64)` tuples read as `(latitude, longitude)`,
/// and `geo_types::Point<f64>` read as `(x = longitude, y = latitude)`.
pub trait Coordinate {
    /// Returns the latitude in degrees.
    fn latitude(&self) -> f64;
    /// Returns the longitude in degrees.
    fn longitude(&self) -> f64;

    fn to_lat_lon(&self) -> LatLon {
        LatLon::new(self.latitude(), self.longitude())
    }
}

impl Coordinate for LatLon {
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Coordinate for (f64, f64) {
    fn latitude(&self) -> f64 {
        self.0
    }
    fn longitude(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn latitude(&self) -> f64 {
        self.y()
    }
    fn longitude(&self) -> f64 {
        self.x()
    }
}

/// Checks that a coordinate is finite and within [-90, 90] / [-180, 180].
pub fn check_coordinate<C: Coordinate>(coord: &C) -> Result<(), SunmapError> {
    let lat = coord.latitude();
    let lon = coord.longitude();

    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        warn!(lat, "rejected latitude");
        return Err(SunmapError::InvalidLatitude(lat));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        warn!(lon, "rejected longitude");
        return Err(SunmapError::InvalidLongitude(lon));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (28.6, 77.2);
        assert_eq!(tuple.latitude(), 28.6);
        assert_eq!(tuple.longitude(), 77.2);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(77.2, 28.6);
        assert_eq!(point.latitude(), 28.6);
        assert_eq!(point.longitude(), 77.2);
    }

    #[test]
    fn test_lat_lon_to_point() {
        let p = LatLon::new(28.6, 77.2).to_point();
        assert_eq!(p.x(), 77.2);
        assert_eq!(p.y(), 28.6);
    }

    #[test]
    fn test_check_coordinate() {
        assert!(check_coordinate(&(28.6, 77.2)).is_ok());
        assert!(check_coordinate(&(-90.0, 180.0)).is_ok());
        assert_eq!(
            check_coordinate(&(91.0, 0.0)),
            Err(SunmapError::InvalidLatitude(91.0))
        );
        assert_eq!(
            check_coordinate(&(0.0, -180.5)),
            Err(SunmapError::InvalidLongitude(-180.5))
        );
        assert!(matches!(
            check_coordinate(&(f64::NAN, 0.0)),
            Err(SunmapError::InvalidLatitude(_))
        ));
        assert!(check_coordinate(&(0.0, f64::INFINITY)).is_err());
    }
}
