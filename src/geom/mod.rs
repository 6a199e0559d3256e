use crate::coord::LatLon;
use geo_types::{Coord, LineString, Polygon};

/// Builds a closed polygon ring from four corners (x = longitude, y = latitude).
pub fn create_rectangle(corners: &[LatLon; 4]) -> Polygon<f64> {
    let mut coords: Vec<Coord<f64>> = corners.iter().map(LatLon::to_coord).collect();
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

/// Builds an open polyline through `points` in order.
pub fn create_polyline(points: &[LatLon]) -> LineString<f64> {
    LineString::from(points.iter().map(LatLon::to_coord).collect::<Vec<_>>())
}
