use crate::error::SunmapError;
use crate::sun::path::SunPath;
use crate::tile::HeatTile;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`HeatTile`]s to Arrow arrays.
///
/// Implemented for `[HeatTile]` and `Vec<HeatTile>`.
pub trait HeatTilesToArrow {
    /// Converts tile centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts tiles to an Arrow PolygonArray of rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts tiles to a RecordBatch with row, col, score, fill, center_lat, center_lon, and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, SunmapError>;
}

impl HeatTilesToArrow for [HeatTile] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for tile in self {
            builder.push_point(Some(&tile.center().to_point()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|t: &HeatTile| t.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, SunmapError> {
        let polygon_array = self.to_arrow_polygons();
        let rows: UInt32Array = self.iter().map(|t| Some(t.row)).collect();
        let cols: UInt32Array = self.iter().map(|t| Some(t.col)).collect();
        let scores: Float64Array = self.iter().map(|t| Some(t.score)).collect();
        let fills: StringArray = self.iter().map(|t| Some(t.fill.to_string())).collect();
        let center_lats: Float64Array = self.iter().map(|t| Some(t.center().latitude)).collect();
        let center_lons: Float64Array = self.iter().map(|t| Some(t.center().longitude)).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("row", DataType::UInt32, false),
            Field::new("col", DataType::UInt32, false),
            Field::new("score", DataType::Float64, false),
            Field::new("fill", DataType::Utf8, false),
            Field::new("center_lat", DataType::Float64, false),
            Field::new("center_lon", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(rows),
                Arc::new(cols),
                Arc::new(scores),
                Arc::new(fills),
                Arc::new(center_lats),
                Arc::new(center_lons),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| SunmapError::IoError(e.to_string()))
    }
}

impl HeatTilesToArrow for Vec<HeatTile> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, SunmapError> {
        self.as_slice().to_record_batch()
    }
}

impl SunPath {
    /// Shadow tips as an Arrow PointArray (x = longitude, y = latitude).
    pub fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for p in &self.points {
            builder.push_point(Some(&p.tip.to_point()));
        }
        builder.finish()
    }

    /// One row per sampled hour with hour, elevation_deg, bearing_deg and the tip as geometry.
    pub fn to_record_batch(&self) -> Result<RecordBatch, SunmapError> {
        let point_array = self.to_arrow_points();
        let hours: UInt32Array = self.points.iter().map(|p| Some(p.hour)).collect();
        let elevations: Float64Array =
            self.points.iter().map(|p| Some(p.elevation_degrees)).collect();
        let bearings: Float64Array = self.points.iter().map(|p| Some(p.bearing_degrees)).collect();

        let geometry_field = point_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("hour", DataType::UInt32, false),
            Field::new("elevation_deg", DataType::Float64, false),
            Field::new("bearing_deg", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(hours),
                Arc::new(elevations),
                Arc::new(bearings),
                Arc::new(point_array.into_arrow()),
            ],
        )
        .map_err(|e| SunmapError::IoError(e.to_string()))
    }
}
