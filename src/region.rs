use crate::coord::{Coordinate, LatLon};
use crate::heat::constants::{
    APPROXIMATE_LOCATION_SPAN, DEFAULT_CENTER, DEFAULT_SPAN, MIN_SPAN, MIN_VIEWPORT_SPAN,
};
use geo_types::{Rect, coord};
use serde::{Deserialize, Serialize};

/// A rectangular map view described by its center and angular spans.
///
/// Spans are at least [`MIN_SPAN`] degrees so that per-cell steps and edge
/// offsets never divide by zero. Constructors and deserialization enforce
/// this; a region assembled from its public fields is clamped again by
/// [`GeoRegion::normalized`] wherever spans are divided by.
///
/// # Example
///
/// ```
/// use sunmap_rs::GeoRegion;
///
/// let region = GeoRegion::new(28.6139, 77.209, 0.4, 0.4);
/// let rect = region.to_rect();
/// let back = GeoRegion::from_rect(&rect);
/// assert!((back.center_latitude - 28.6139).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegionFields")]
pub struct GeoRegion {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

/// Raw serialized form, routed through [`GeoRegion::new`] on load.
#[derive(Deserialize)]
struct RegionFields {
    center_latitude: f64,
    center_longitude: f64,
    latitude_span: f64,
    longitude_span: f64,
}

impl From<RegionFields> for GeoRegion {
    fn from(f: RegionFields) -> Self {
        Self::new(
            f.center_latitude,
            f.center_longitude,
            f.latitude_span,
            f.longitude_span,
        )
    }
}

impl Default for GeoRegion {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1, DEFAULT_SPAN, DEFAULT_SPAN)
    }
}

impl GeoRegion {
    pub fn new(
        center_latitude: f64,
        center_longitude: f64,
        latitude_span: f64,
        longitude_span: f64,
    ) -> Self {
        Self {
            center_latitude,
            center_longitude,
            latitude_span: latitude_span.abs().max(MIN_SPAN),
            longitude_span: longitude_span.abs().max(MIN_SPAN),
        }
    }

    /// Copy with spans re-clamped to at least [`MIN_SPAN`].
    ///
    /// NaN spans also become [`MIN_SPAN`].
    pub fn normalized(&self) -> Self {
        Self::new(
            self.center_latitude,
            self.center_longitude,
            self.latitude_span,
            self.longitude_span,
        )
    }

    /// Region of [`APPROXIMATE_LOCATION_SPAN`] degrees around an approximate fix.
    pub fn around(center: &impl Coordinate) -> Self {
        Self::new(
            center.latitude(),
            center.longitude(),
            APPROXIMATE_LOCATION_SPAN,
            APPROXIMATE_LOCATION_SPAN,
        )
    }

    /// Builds a region from viewport bounds.
    ///
    /// Spans below [`MIN_VIEWPORT_SPAN`] are widened to it.
    pub fn from_bounds(north: f64, south: f64, east: f64, west: f64) -> Self {
        let latitude_span = (north - south).abs().max(MIN_VIEWPORT_SPAN);
        let longitude_span = (east - west).abs().max(MIN_VIEWPORT_SPAN);
        Self::new(
            (north + south) / 2.0,
            (east + west) / 2.0,
            latitude_span,
            longitude_span,
        )
    }

    /// Inverse of [`GeoRegion::to_rect`].
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        let center = rect.center();
        Self::new(center.y, center.x, rect.height(), rect.width())
    }

    pub fn center(&self) -> LatLon {
        LatLon::new(self.center_latitude, self.center_longitude)
    }

    /// Same spans, new center.
    pub fn recentered(&self, center: &impl Coordinate) -> Self {
        Self::new(
            center.latitude(),
            center.longitude(),
            self.latitude_span,
            self.longitude_span,
        )
    }

    pub fn south(&self) -> f64 {
        self.center_latitude - self.latitude_span / 2.0
    }

    pub fn north(&self) -> f64 {
        self.center_latitude + self.latitude_span / 2.0
    }

    pub fn west(&self) -> f64 {
        self.center_longitude - self.longitude_span / 2.0
    }

    pub fn east(&self) -> f64 {
        self.center_longitude + self.longitude_span / 2.0
    }

    /// Corner points ordered south-west, south-east, north-east, north-west.
    pub fn corners(&self) -> [LatLon; 4] {
        [
            LatLon::new(self.south(), self.west()),
            LatLon::new(self.south(), self.east()),
            LatLon::new(self.north(), self.east()),
            LatLon::new(self.north(), self.west()),
        ]
    }

    /// Converts to a `geo_types::Rect` with x = longitude and y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west(), y: self.south() },
            coord! { x: self.east(), y: self.north() },
        )
    }

    pub fn contains(&self, point: &impl Coordinate) -> bool {
        let (lat, lon) = (point.latitude(), point.longitude());
        lat >= self.south() && lat <= self.north() && lon >= self.west() && lon <= self.east()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_are_clamped() {
        let region = GeoRegion::new(10.0, 10.0, 0.0, -0.2);
        assert_eq!(region.latitude_span, MIN_SPAN);
        assert!((region.longitude_span - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_clamps_spans() -> Result<(), serde_json::Error> {
        let region: GeoRegion = serde_json::from_str(
            r#"{ "center_latitude": 1.0, "center_longitude": 2.0,
                 "latitude_span": 0.0, "longitude_span": -0.3 }"#,
        )?;
        assert_eq!(region.latitude_span, MIN_SPAN);
        assert!((region.longitude_span - 0.3).abs() < 1e-12);
        assert!(region.south() < region.north());
        assert!(region.west() < region.east());
        Ok(())
    }

    #[test]
    fn test_normalized_fixes_literal_spans() {
        let raw = GeoRegion {
            center_latitude: 0.0,
            center_longitude: 0.0,
            latitude_span: -2.0,
            longitude_span: 0.0,
        };
        let fixed = raw.normalized();
        assert_eq!(fixed.latitude_span, 2.0);
        assert_eq!(fixed.longitude_span, MIN_SPAN);
        assert_eq!(fixed.center(), raw.center());
        assert_eq!(fixed.normalized(), fixed);
    }

    #[test]
    fn test_default_region() {
        let region = GeoRegion::default();
        assert_eq!(region.center_latitude, 28.6139);
        assert_eq!(region.center_longitude, 77.209);
        assert_eq!(region.latitude_span, 0.4);
    }

    #[test]
    fn test_from_bounds() {
        let region = GeoRegion::from_bounds(29.0, 28.0, 78.0, 77.0);
        assert!((region.center_latitude - 28.5).abs() < 1e-12);
        assert!((region.center_longitude - 77.5).abs() < 1e-12);
        assert!((region.latitude_span - 1.0).abs() < 1e-12);

        let tiny = GeoRegion::from_bounds(28.0, 28.0, 77.0, 77.0);
        assert_eq!(tiny.latitude_span, MIN_VIEWPORT_SPAN);
        assert_eq!(tiny.longitude_span, MIN_VIEWPORT_SPAN);
    }

    #[test]
    fn test_rect_round_trip() {
        let region = GeoRegion::new(-33.8688, 151.2093, 0.37, 0.52);
        let back = GeoRegion::from_rect(&region.to_rect());

        assert!((back.center_latitude - region.center_latitude).abs() < 1e-9);
        assert!((back.center_longitude - region.center_longitude).abs() < 1e-9);
        assert!((back.latitude_span - region.latitude_span).abs() < 1e-9);
        assert!((back.longitude_span - region.longitude_span).abs() < 1e-9);
    }

    #[test]
    fn test_corners_and_contains() {
        let region = GeoRegion::new(0.0, 0.0, 2.0, 4.0);
        let corners = region.corners();
        assert_eq!(corners[0], LatLon::new(-1.0, -2.0));
        assert_eq!(corners[2], LatLon::new(1.0, 2.0));

        assert!(region.contains(&(0.5, 1.5)));
        assert!(!region.contains(&(1.5, 0.0)));
    }

    #[test]
    fn test_around_and_recentered() {
        let region = GeoRegion::around(&(51.5, -0.12));
        assert_eq!(region.latitude_span, 0.6);

        let moved = region.recentered(&(48.85, 2.35));
        assert_eq!(moved.center_latitude, 48.85);
        assert_eq!(moved.longitude_span, 0.6);
    }
}
