use crate::error::SunmapError;
use crate::sun::path::SunPath;
use crate::tile::HeatTile;
use geo_types::Polygon;
use std::fs::File;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Writes heat tiles to a CSV file, one row per tile.
///
/// Columns are `row,col,score,fill,center_lat,center_lon`, followed by a
/// `geometry` column when `geometry_format` is set.
///
/// # Example
///
/// ```no_run
/// use sunmap_rs::{GeoRegion, GeometryFormat, generate_heat_grid, write_tiles_csv};
/// use chrono::Utc;
///
/// let tiles = generate_heat_grid(&GeoRegion::default(), &Utc::now(), 14);
/// write_tiles_csv(&tiles, "heat.csv", Some(GeometryFormat::Wkt)).unwrap();
/// ```
pub fn write_tiles_csv(
    tiles: &[HeatTile],
    output_path: impl AsRef<Path>,
    geometry_format: Option<GeometryFormat>,
) -> Result<(), SunmapError> {
    let out_file = File::create(output_path.as_ref()).map_err(|e| SunmapError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row = vec!["row", "col", "score", "fill", "center_lat", "center_lon"];
    if geometry_format.is_some() {
        header_row.push("geometry");
    }
    writer
        .write_record(&header_row)
        .map_err(|e| SunmapError::CsvError(e.to_string()))?;

    for tile in tiles {
        let center = tile.center();
        let mut row = vec![
            tile.row.to_string(),
            tile.col.to_string(),
            tile.score.to_string(),
            tile.fill.to_string(),
            center.latitude.to_string(),
            center.longitude.to_string(),
        ];

        if let Some(format) = geometry_format {
            let polygon = tile.to_polygon();
            let geom_str = match format {
                GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
            };
            row.push(geom_str);
        }

        writer
            .write_record(&row)
            .map_err(|e| SunmapError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| SunmapError::CsvError(e.to_string()))?;

    debug!(tiles = tiles.len(), path = %output_path.as_ref().display(), "wrote tiles csv");
    Ok(())
}

/// Writes the shadow-tip samples of a sun path to a CSV file.
pub fn write_sun_path_csv(
    output_path: impl AsRef<Path>,
    sun_path: &SunPath,
) -> Result<(), SunmapError> {
    let out_file = File::create(output_path.as_ref()).map_err(|e| SunmapError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    writer
        .write_record(["hour", "latitude", "longitude", "elevation_deg", "bearing_deg"])
        .map_err(|e| SunmapError::CsvError(e.to_string()))?;

    for point in &sun_path.points {
        writer
            .write_record([
                point.hour.to_string(),
                point.tip.latitude.to_string(),
                point.tip.longitude.to_string(),
                point.elevation_degrees.to_string(),
                point.bearing_degrees.to_string(),
            ])
            .map_err(|e| SunmapError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| SunmapError::CsvError(e.to_string()))?;

    Ok(())
}
