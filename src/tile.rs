use crate::coord::{Coordinate, LatLon};
use crate::error::SunmapError;
use crate::geom::create_rectangle;
use crate::heat::color::Rgba;
use crate::io::arrow::HeatTilesToArrow;
use crate::io::parquet::HeatTilesToGeoParquet;
use arrow_array::RecordBatch;
use geo::Intersects;
use geo_types::Polygon;
use geoarrow_array::array::{PointArray, PolygonArray};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One visible cell of a solar-potential heat grid.
///
/// Tiles are produced by [`crate::HeatGrid`] / [`crate::generate_heat_grid`]
/// and never mutated afterwards.
///
/// # Example
///
/// ```
/// use sunmap_rs::{GeoRegion, generate_heat_grid};
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
/// let tiles = generate_heat_grid(&GeoRegion::default(), &date, 14);
/// let tile = &tiles[0];
/// println!("{} at ({}, {}) -> {}", tile.score, tile.row, tile.col, tile.fill);
///
/// // Closed ring for GIS tooling
/// let polygon = tile.to_polygon();
/// assert_eq!(polygon.exterior().coords().count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatTile {
    /// Row index, counted from the southern edge
    pub row: u32,
    /// Column index, counted from the western edge
    pub col: u32,
    /// Corners ordered south-west, south-east, north-east, north-west
    pub corners: [LatLon; 4],
    /// Heuristic solar-exposure score in [0, 1]
    pub score: f64,
    pub fill: Rgba,
}

impl HeatTile {
    pub(crate) fn new(row: u32, col: u32, corners: [LatLon; 4], score: f64, fill: Rgba) -> Self {
        Self {
            row,
            col,
            corners,
            score,
            fill,
        }
    }

    pub fn south(&self) -> f64 {
        self.corners[0].latitude
    }

    pub fn north(&self) -> f64 {
        self.corners[2].latitude
    }

    pub fn west(&self) -> f64 {
        self.corners[0].longitude
    }

    pub fn east(&self) -> f64 {
        self.corners[2].longitude
    }

    /// Midpoint of the tile, the point its score was evaluated at.
    pub fn center(&self) -> LatLon {
        let lat_step = self.north() - self.south();
        let lon_step = self.east() - self.west();
        LatLon::new(self.south() + lat_step / 2.0, self.west() + lon_step / 2.0)
    }

    /// Converts this tile to a closed rectangular polygon (x = longitude, y = latitude).
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_rectangle(&self.corners)
    }

    /// True if the point lies inside or on the boundary of the tile.
    pub fn contains(&self, point: &impl Coordinate) -> bool {
        self.to_polygon().intersects(&point.to_lat_lon().to_point())
    }

    /// Converts this tile's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this tile to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this tile to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, SunmapError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this tile to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), SunmapError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heat::color::interpolate_color;

    fn sample_tile() -> HeatTile {
        HeatTile::new(
            2,
            3,
            [
                LatLon::new(10.0, 20.0),
                LatLon::new(10.0, 20.5),
                LatLon::new(10.25, 20.5),
                LatLon::new(10.25, 20.0),
            ],
            0.6,
            interpolate_color(0.6),
        )
    }

    #[test]
    fn test_bounds_and_center() {
        let tile = sample_tile();
        assert_eq!(tile.south(), 10.0);
        assert_eq!(tile.north(), 10.25);
        assert_eq!(tile.west(), 20.0);
        assert_eq!(tile.east(), 20.5);
        assert_eq!(tile.center(), LatLon::new(10.125, 20.25));
    }

    #[test]
    fn test_to_polygon() {
        let polygon = sample_tile().to_polygon();
        assert_eq!(polygon.exterior().coords().count(), 5);
        assert_eq!(polygon.exterior().0[0], polygon.exterior().0[4]);
    }

    #[test]
    fn test_contains() {
        let tile = sample_tile();
        assert!(tile.contains(&(10.1, 20.1)));
        assert!(tile.contains(&tile.center()));
        assert!(tile.contains(&(10.0, 20.0)));
        assert!(!tile.contains(&(10.3, 20.1)));
        assert!(!tile.contains(&geo_types::Point::new(10.1, 20.1)));
    }

    #[test]
    fn test_single_tile_to_arrow() -> Result<(), SunmapError> {
        use geoarrow_array::GeoArrowArray;

        let tile = sample_tile();
        assert_eq!(tile.to_arrow_points().len(), 1);
        assert_eq!(tile.to_arrow_polygons().len(), 1);
        assert_eq!(tile.to_record_batch()?.num_rows(), 1);
        Ok(())
    }
}
