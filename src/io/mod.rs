pub mod arrow;
pub mod csv;
pub mod geojson;
pub mod parquet;

pub use self::arrow::HeatTilesToArrow;
pub use self::csv::{GeometryFormat, write_sun_path_csv, write_tiles_csv};
pub use self::geojson::HeatTilesToGeoJson;
pub use self::parquet::{
    HeatTilesToGeoParquet, OVERLAY_METADATA_KEY, OverlayMetadata, write_geoparquet,
};
