use crate::coord::LatLon;
use crate::error::SunmapError;
use crate::grid::HeatGrid;
use crate::io::arrow::HeatTilesToArrow;
use crate::region::GeoRegion;
use crate::sun::path::SunPath;
use crate::tile::HeatTile;
use arrow_array::RecordBatch;
use chrono::NaiveDate;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use parquet::file::metadata::KeyValue;
use parquet::file::reader::{FileReader, SerializedFileReader};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Footer key holding the JSON-encoded [`OverlayMetadata`]
pub const OVERLAY_METADATA_KEY: &str = "sunmap";

/// What an overlay file holds, stored next to the `geo` footer entry.
///
/// A bare tile or tip table cannot be rescored or resampled without the
/// region, day and clock it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum OverlayMetadata {
    HeatGrid {
        region: GeoRegion,
        grid_size: u32,
        day_of_year: u32,
    },
    SunPath {
        origin: LatLon,
        date: NaiveDate,
        utc_offset: i32,
    },
}

impl OverlayMetadata {
    fn to_key_value(&self) -> Result<KeyValue, SunmapError> {
        let value =
            serde_json::to_string(self).map_err(|e| SunmapError::IoError(e.to_string()))?;
        Ok(KeyValue {
            key: OVERLAY_METADATA_KEY.to_string(),
            value: Some(value),
        })
    }

    /// Reads the overlay entry from a GeoParquet footer.
    ///
    /// Returns `None` for files written without one, e.g. plain tile exports.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Option<Self>, SunmapError> {
        let file = File::open(path.as_ref()).map_err(|e| SunmapError::IoError(e.to_string()))?;
        let reader =
            SerializedFileReader::new(file).map_err(|e| SunmapError::IoError(e.to_string()))?;

        let Some(entries) = reader.metadata().file_metadata().key_value_metadata() else {
            return Ok(None);
        };
        entries
            .iter()
            .find(|kv| kv.key == OVERLAY_METADATA_KEY)
            .and_then(|kv| kv.value.as_deref())
            .map(|json| serde_json::from_str(json).map_err(|e| SunmapError::IoError(e.to_string())))
            .transpose()
    }
}

/// Writes a RecordBatch with a GeoArrow geometry column to a GeoParquet file (WKB encoded).
///
/// `overlay`, when given, is added to the footer under [`OVERLAY_METADATA_KEY`].
pub fn write_geoparquet(
    batch: &RecordBatch,
    path: impl AsRef<Path>,
    overlay: Option<&OverlayMetadata>,
) -> Result<(), SunmapError> {
    let schema = batch.schema();

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();

    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options)
        .map_err(|e| SunmapError::IoError(e.to_string()))?;

    let file = File::create(path.as_ref()).map_err(|e| SunmapError::IoError(e.to_string()))?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None)
        .map_err(|e| SunmapError::IoError(e.to_string()))?;

    let encoded_batch = encoder
        .encode_record_batch(batch)
        .map_err(|e| SunmapError::IoError(e.to_string()))?;
    writer
        .write(&encoded_batch)
        .map_err(|e| SunmapError::IoError(e.to_string()))?;

    let geo_metadata = encoder
        .into_keyvalue()
        .map_err(|e| SunmapError::IoError(e.to_string()))?;
    writer.append_key_value_metadata(geo_metadata);
    if let Some(overlay) = overlay {
        writer.append_key_value_metadata(overlay.to_key_value()?);
    }

    writer
        .finish()
        .map_err(|e| SunmapError::IoError(e.to_string()))?;

    debug!(
        rows = batch.num_rows(),
        overlay = overlay.is_some(),
        path = %path.as_ref().display(),
        "wrote geoparquet"
    );
    Ok(())
}

/// Plain tile tables; the file carries no [`OverlayMetadata`].
/// Use [`HeatGrid::to_geoparquet`] to keep the region and day.
pub trait HeatTilesToGeoParquet: HeatTilesToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), SunmapError>;
}

impl HeatTilesToGeoParquet for [HeatTile] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), SunmapError> {
        write_geoparquet(&self.to_record_batch()?, path, None)
    }
}

impl HeatTilesToGeoParquet for Vec<HeatTile> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), SunmapError> {
        self.as_slice().to_geoparquet(path)
    }
}

impl HeatGrid {
    pub fn overlay_metadata(&self) -> OverlayMetadata {
        OverlayMetadata::HeatGrid {
            region: *self.region(),
            grid_size: self.grid_size(),
            day_of_year: self.day_of_year(),
        }
    }

    /// Writes the visible tiles together with the region, grid size and day.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), SunmapError> {
        let batch = self.tiles().to_record_batch()?;
        write_geoparquet(&batch, path, Some(&self.overlay_metadata()))
    }
}

impl SunPath {
    pub fn overlay_metadata(&self) -> OverlayMetadata {
        OverlayMetadata::SunPath {
            origin: self.origin,
            date: self.date,
            utc_offset: self.utc_offset,
        }
    }

    /// Writes one point row per sampled hour, tagged with the origin and local day.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), SunmapError> {
        write_geoparquet(&self.to_record_batch()?, path, Some(&self.overlay_metadata()))
    }
}
