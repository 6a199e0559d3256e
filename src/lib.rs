//! # sunmap-rs
//!
//! Solar-exposure overlays for a map view. There are currently three main
//! entry points.
//!
//! ### 1. `HeatGrid` - Solar-Potential Heat Grid
//!
//! ```
//! use sunmap_rs::{GeoRegion, HeatGrid};
//! use chrono::{TimeZone, Utc};
//!
//! let grid = HeatGrid::builder()
//!     .region(GeoRegion::new(28.6139, 77.209, 0.4, 0.4))
//!     .date(&Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap())
//!     .grid_size(14)
//!     .build();
//!
//! if let Some(tile) = grid.get_tile_at(&(28.62, 77.22)) {
//!     println!("({}, {}) {:.2} {}", tile.row, tile.col, tile.score, tile.fill);
//! }
//! ```
//!
//! ### 2. `project_shadow` / `compute_sun_path` - Sun Path and Shadows
//!
//! ```
//! use sunmap_rs::{Spa, compute_sun_path, local_offset, project_shadow, DEFAULT_SUN_PATH_HOURS};
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> Result<(), sunmap_rs::SunmapError> {
//! let noon = Utc.with_ymd_and_hms(2024, 6, 21, 6, 50, 0).unwrap();
//! let shadow = project_shadow(&Spa, &(28.6139, 77.209), &noon)?;
//! println!("{:.2} m", shadow.length);
//!
//! let local = noon.with_timezone(&local_offset(77.209));
//! let path = compute_sun_path(&Spa, &(28.6139, 77.209), &local, DEFAULT_SUN_PATH_HOURS)?;
//! let line = path.to_line_string();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `SolarView` - Presentation Controller
//!
//! ```
//! use sunmap_rs::{SolarView, Spa, ViewConfig, HeatTilesToGeoJson};
//!
//! # fn main() -> Result<(), sunmap_rs::SunmapError> {
//! let config = ViewConfig::from_json_str(r#"{ "grid_size": 10 }"#)?;
//! let mut view = SolarView::new(config, Spa);
//! view.set_viewport(28.8, 28.4, 77.4, 77.0)?;
//!
//! let features = view.heat_grid().into_tiles().to_feature_collection();
//! let shadow = view.shadow()?.to_geojson();
//! # Ok(())
//! # }
//! ```
//!
//! Tiles can also be written to CSV (WKT or GeoJSON geometry), Arrow and GeoParquet.
//! Grid and sun-path GeoParquet files record what they were computed for:
//!
//! ```no_run
//! use sunmap_rs::{GeoRegion, GeometryFormat, HeatGrid, OverlayMetadata, write_tiles_csv};
//! use chrono::Utc;
//!
//! let grid = HeatGrid::from_region(&GeoRegion::default(), &Utc::now(), 14);
//! write_tiles_csv(grid.tiles(), "heat.csv", Some(GeometryFormat::GeoJson)).unwrap();
//! grid.to_geoparquet("heat.parquet").unwrap();
//!
//! let meta = OverlayMetadata::read_from("heat.parquet").unwrap();
//! ```
//!

pub mod config;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod heat;
pub mod io;
pub mod region;
pub mod sun;
pub mod tile;
pub mod view;

pub use config::ViewConfig;
pub use coord::{Coordinate, LatLon, check_coordinate};
pub use error::SunmapError;
pub use geom::{create_polyline, create_rectangle};
pub use grid::{HeatGrid, HeatGridBuilder, generate_heat_grid, iter_heat_tiles};
pub use heat::{
    APPROXIMATE_LOCATION_SPAN, ColorRamp, ColorStop, DEFAULT_GRID_SIZE, DEFAULT_LEGEND_STEPS,
    MAX_GRID_SIZE, MIN_SPAN, MIN_VIEWPORT_SPAN, Rgba, VISIBILITY_THRESHOLD, interpolate_color,
    solar_potential,
};
pub use io::{
    GeometryFormat, HeatTilesToArrow, HeatTilesToGeoJson, HeatTilesToGeoParquet,
    OVERLAY_METADATA_KEY, OverlayMetadata, write_geoparquet, write_sun_path_csv, write_tiles_csv,
};
pub use region::GeoRegion;
pub use sun::{
    DEFAULT_SUN_PATH_HOURS, EXTENDED_SUN_PATH_HOURS, Ephemeris, METERS_PER_DEGREE,
    REFERENCE_HEIGHT, ShadowProjection, SolarSnapshot, SolarTimes, Spa, SunPath, SunPathPoint,
    SunPosition, compute_sun_path, local_offset, project_shadow, solar_snapshot,
};
pub use tile::HeatTile;
pub use view::SolarView;

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geojson;
pub use geoparquet;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use geo::Area;
    use geo_types::{Rect, coord};

    #[test]
    fn test_end_to_end_workflow() -> Result<(), SunmapError> {
        let date = Utc.with_ymd_and_hms(2024, 6, 21, 6, 50, 0).unwrap();
        let region = GeoRegion::new(28.6139, 77.209, 0.4, 0.4);
        let tiles = generate_heat_grid(&region, &date, 14);

        assert!(!tiles.is_empty());
        assert!(tiles.len() <= 196);
        for tile in &tiles {
            assert!(tile.score > VISIBILITY_THRESHOLD && tile.score <= 1.0);
            assert!(tile.row < 14 && tile.col < 14);
            assert!(region.contains(&tile.center()));
        }

        let snap = solar_snapshot(&Spa, &region.center(), &date)?;
        assert!(snap.elevation_degrees > 0.0);

        let local = date.with_timezone(&local_offset(region.center_longitude));
        let path = compute_sun_path(&Spa, &region.center(), &local, DEFAULT_SUN_PATH_HOURS)?;
        assert!(path.is_drawable());
        assert!(path.len() <= 13);
        Ok(())
    }

    #[test]
    fn test_equator_shadow_due_south() {
        let shadow = ShadowProjection::from_angles(&(0.0, 0.0), 45.0, 180.0);
        assert!((shadow.length - REFERENCE_HEIGHT).abs() < 1e-9);
        assert!((shadow.tip.latitude + 10.0 / 111_111.0).abs() < 1e-12);
        assert!(shadow.tip.longitude.abs() < 1e-15);
    }

    #[test]
    fn test_region_rect_round_trip() {
        let rect = Rect::new(coord! { x: 77.0, y: 28.4 }, coord! { x: 77.4, y: 28.8 });
        let region = GeoRegion::from_rect(&rect);
        let back = region.to_rect();

        assert!((back.min().x - 77.0).abs() < 1e-12);
        assert!((back.max().y - 28.8).abs() < 1e-12);
        assert!((rect.unsigned_area() - back.unsigned_area()).abs() < 1e-12);
    }

    #[test]
    fn test_grid_iteration_matches_parallel() {
        let date = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let region = GeoRegion::default();
        let grid = HeatGrid::from_region(&region, &date, 9);

        let sequential: Vec<HeatTile> =
            iter_heat_tiles(region, &date, 9, ColorRamp::default()).collect();
        assert_eq!(grid.tiles(), sequential.as_slice());
    }

    #[test]
    fn test_view_exports() -> Result<(), SunmapError> {
        let mut view = SolarView::new(ViewConfig::default().grid_size(4), Spa);
        view.set_date(Utc.with_ymd_and_hms(2024, 6, 21, 6, 50, 0).unwrap());
        view.locate(&(28.6139, 77.209))?;

        let tiles = view.heat_grid().into_tiles();
        let fc = tiles.to_feature_collection();
        assert_eq!(fc.features.len(), tiles.len());

        let batch = tiles.to_record_batch()?;
        assert_eq!(batch.num_rows(), tiles.len());

        assert!(view.sun_path()?.to_geojson().geometry.is_some());
        assert_eq!(view.legend().len(), DEFAULT_LEGEND_STEPS);
        Ok(())
    }

    #[test]
    fn test_colors_on_tiles_match_ramp() {
        let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let ramp = ColorRamp::default();
        for tile in generate_heat_grid(&GeoRegion::default(), &date, 6) {
            assert_eq!(tile.fill, ramp.interpolate(tile.score));
            assert_eq!(tile.fill, interpolate_color(tile.score));
        }
    }
}
