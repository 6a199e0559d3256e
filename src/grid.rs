use crate::coord::{Coordinate, LatLon};
use crate::heat::color::ColorRamp;
use crate::heat::constants::{DEFAULT_GRID_SIZE, VISIBILITY_THRESHOLD};
use crate::heat::potential::{day_of_year, potential_for_day};
use crate::region::GeoRegion;
use crate::tile::HeatTile;
use chrono::{DateTime, TimeZone, Utc};
use geo::BoundingRect;
use geo_types::{MultiPolygon, Polygon, Rect};
use rayon::prelude::*;
use tracing::debug;

/// Partition of a region into `grid_size × grid_size` equal-angle cells.
///
/// Shared cell edges are computed from the same expression so neighbouring
/// tiles meet exactly.
#[derive(Debug, Clone, Copy)]
struct CellLayout {
    lat_start: f64,
    lon_start: f64,
    lat_step: f64,
    lon_step: f64,
}

impl CellLayout {
    /// `region` must already be normalized.
    fn new(region: &GeoRegion, grid_size: u32) -> Self {
        Self {
            lat_start: region.south(),
            lon_start: region.west(),
            lat_step: region.latitude_span / grid_size as f64,
            lon_step: region.longitude_span / grid_size as f64,
        }
    }

    fn tile(
        &self,
        row: u32,
        col: u32,
        day: u32,
        region: &GeoRegion,
        ramp: &ColorRamp,
    ) -> Option<HeatTile> {
        let lat_bottom = self.lat_start + row as f64 * self.lat_step;
        let lat_top = self.lat_start + (row + 1) as f64 * self.lat_step;
        let lon_left = self.lon_start + col as f64 * self.lon_step;
        let lon_right = self.lon_start + (col + 1) as f64 * self.lon_step;

        let center_lat = lat_bottom + self.lat_step / 2.0;
        let center_lon = lon_left + self.lon_step / 2.0;
        let score = potential_for_day(center_lat, center_lon, day, region);

        if score <= VISIBILITY_THRESHOLD {
            return None;
        }

        let corners = [
            LatLon::new(lat_bottom, lon_left),
            LatLon::new(lat_bottom, lon_right),
            LatLon::new(lat_top, lon_right),
            LatLon::new(lat_top, lon_left),
        ];
        Some(HeatTile::new(row, col, corners, score, ramp.interpolate(score)))
    }
}

/// Lazily yields the visible tiles of a region in row-major order (south to north, west to east).
///
/// `grid_size` is clamped to at least 1. Only the UTC day of the year of `date` is used.
pub fn iter_heat_tiles<Tz: TimeZone>(
    region: GeoRegion,
    date: &DateTime<Tz>,
    grid_size: u32,
    ramp: ColorRamp,
) -> impl Iterator<Item = HeatTile> {
    let grid_size = grid_size.max(1);
    let day = day_of_year(date);
    let region = region.normalized();
    let layout = CellLayout::new(&region, grid_size);

    (0..grid_size).flat_map(move |row| {
        let ramp = ramp.clone();
        (0..grid_size).filter_map(move |col| layout.tile(row, col, day, &region, &ramp))
    })
}

/// Generates the visible heat tiles for `region` on the default color ramp.
///
/// The result is sparse: cells scoring at or below [`VISIBILITY_THRESHOLD`]
/// are left out, so callers must not expect `grid_size²` entries.
///
/// # Example
/// ```
/// use sunmap_rs::{GeoRegion, generate_heat_grid};
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
/// let tiles = generate_heat_grid(&GeoRegion::default(), &date, 14);
/// assert!(tiles.iter().any(|t| t.score > 0.5));
/// ```
pub fn generate_heat_grid<Tz: TimeZone>(
    region: &GeoRegion,
    date: &DateTime<Tz>,
    grid_size: u32,
) -> Vec<HeatTile> {
    HeatGrid::from_region(region, date, grid_size).tiles
}

#[derive(Debug, Clone)]
pub struct HeatGrid {
    tiles: Vec<HeatTile>,
    region: GeoRegion,
    grid_size: u32,
    day: u32,
}

impl HeatGrid {
    pub fn builder() -> HeatGridBuilder {
        HeatGridBuilder::new()
    }

    pub fn from_region<Tz: TimeZone>(region: &GeoRegion, date: &DateTime<Tz>, grid_size: u32) -> Self {
        Self::with_ramp(region, date, grid_size, &ColorRamp::default())
    }

    /// Generates the grid with rows evaluated in parallel.
    ///
    /// Output order matches [`iter_heat_tiles`].
    pub fn with_ramp<Tz: TimeZone>(
        region: &GeoRegion,
        date: &DateTime<Tz>,
        grid_size: u32,
        ramp: &ColorRamp,
    ) -> Self {
        let grid_size = grid_size.max(1);
        let day = day_of_year(date);
        let region = region.normalized();
        let layout = CellLayout::new(&region, grid_size);

        let rows: Vec<Vec<HeatTile>> = (0..grid_size)
            .into_par_iter()
            .map(|row| {
                (0..grid_size)
                    .filter_map(|col| layout.tile(row, col, day, &region, ramp))
                    .collect()
            })
            .collect();
        let tiles: Vec<HeatTile> = rows.into_iter().flatten().collect();

        debug!(
            grid_size,
            day,
            visible = tiles.len(),
            "generated heat grid"
        );

        Self {
            tiles,
            region,
            grid_size,
            day,
        }
    }

    pub fn region(&self) -> &GeoRegion {
        &self.region
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// UTC day of the year the scores were computed for.
    pub fn day_of_year(&self) -> u32 {
        self.day
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[HeatTile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<HeatTile> {
        self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeatTile> {
        self.tiles.iter()
    }

    /// The visible tile containing `point`, if any.
    pub fn get_tile_at(&self, point: &impl Coordinate) -> Option<&HeatTile> {
        if !self.region.contains(point) {
            return None;
        }
        let lat_step = self.region.latitude_span / self.grid_size as f64;
        let lon_step = self.region.longitude_span / self.grid_size as f64;
        let last = self.grid_size - 1;
        let row = (((point.latitude() - self.region.south()) / lat_step).floor() as u32).min(last);
        let col = (((point.longitude() - self.region.west()) / lon_step).floor() as u32).min(last);

        self.tiles
            .iter()
            .find(|tile| tile.row == row && tile.col == col)
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&HeatTile>
    where
        F: Fn(&HeatTile) -> bool,
    {
        self.tiles.iter().filter(|tile| predicate(tile)).collect()
    }

    pub fn max_score(&self) -> Option<f64> {
        self.tiles.iter().map(|t| t.score).reduce(f64::max)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.tiles.iter().map(|tile| tile.to_polygon()).collect()
    }

    /// Extent of the visible tiles (x = longitude, y = latitude).
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        MultiPolygon::new(self.to_polygons()).bounding_rect()
    }
}

#[derive(Debug, Default)]
pub struct HeatGridBuilder {
    region: Option<GeoRegion>,
    date: Option<DateTime<Utc>>,
    grid_size: Option<u32>,
    ramp: Option<ColorRamp>,
}

impl HeatGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: GeoRegion) -> Self {
        self.region = Some(region);
        self
    }

    pub fn date<Tz: TimeZone>(mut self, date: &DateTime<Tz>) -> Self {
        self.date = Some(date.with_timezone(&Utc));
        self
    }

    pub fn grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = Some(grid_size);
        self
    }

    pub fn color_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = Some(ramp);
        self
    }

    /// Unset fields fall back to the default region, the current date,
    /// [`DEFAULT_GRID_SIZE`] and the default ramp.
    pub fn build(self) -> HeatGrid {
        let region = self.region.unwrap_or_default();
        let date = self.date.unwrap_or_else(Utc::now);
        let grid_size = self.grid_size.unwrap_or(DEFAULT_GRID_SIZE);
        let ramp = self.ramp.unwrap_or_default();

        HeatGrid::with_ramp(&region, &date, grid_size, &ramp)
    }
}
