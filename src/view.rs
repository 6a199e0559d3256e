use crate::config::ViewConfig;
use crate::coord::{Coordinate, check_coordinate};
use crate::error::SunmapError;
use crate::grid::HeatGrid;
use crate::heat::color::Rgba;
use crate::region::GeoRegion;
use crate::sun::ephemeris::{Ephemeris, Spa};
use crate::sun::path::{SunPath, compute_sun_path, local_offset};
use crate::sun::shadow::{ShadowProjection, SolarSnapshot, project_shadow, solar_snapshot};
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

/// Current map view: region, date, settings and the sun model used to
/// derive every overlay.
///
/// Repositioning operations validate the new center and leave the view
/// untouched on error.
///
/// # Example
///
/// ```
/// use sunmap_rs::{SolarView, Spa, ViewConfig};
/// use chrono::{TimeZone, Utc};
///
/// # fn main() -> Result<(), sunmap_rs::SunmapError> {
/// let mut view = SolarView::new(ViewConfig::default(), Spa);
/// view.set_date(Utc.with_ymd_and_hms(2024, 6, 21, 6, 30, 0).unwrap());
/// view.locate(&(51.5074, -0.1278))?;
///
/// let grid = view.heat_grid();
/// assert!(!grid.is_empty());
/// println!("{}", view.snapshot()?);
/// assert!(view.sun_path()?.is_drawable());
/// assert_eq!(view.legend().len(), 12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SolarView<E = Spa> {
    region: GeoRegion,
    date: DateTime<Utc>,
    config: ViewConfig,
    ephemeris: E,
}

impl Default for SolarView<Spa> {
    fn default() -> Self {
        Self::new(ViewConfig::default(), Spa)
    }
}

impl<E: Ephemeris> SolarView<E> {
    /// Starts on the default region at the current instant.
    pub fn new(config: ViewConfig, ephemeris: E) -> Self {
        Self {
            region: GeoRegion::default(),
            date: Utc::now(),
            config,
            ephemeris,
        }
    }

    pub fn region(&self) -> &GeoRegion {
        &self.region
    }

    pub fn date(&self) -> &DateTime<Utc> {
        &self.date
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn set_region(&mut self, region: GeoRegion) -> Result<(), SunmapError> {
        check_coordinate(&region.center())?;
        debug!(
            lat = region.center_latitude,
            lon = region.center_longitude,
            lat_span = region.latitude_span,
            lon_span = region.longitude_span,
            "region changed"
        );
        self.region = region;
        Ok(())
    }

    /// Adopts the bounds of the visible map.
    pub fn set_viewport(
        &mut self,
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    ) -> Result<(), SunmapError> {
        self.set_region(GeoRegion::from_bounds(north, south, east, west))
    }

    /// Moves the center, keeping the current spans.
    pub fn recenter(&mut self, center: &impl Coordinate) -> Result<(), SunmapError> {
        self.set_region(self.region.recentered(center))
    }

    /// Centers on an approximate fix with the wider location span.
    pub fn locate(&mut self, center: &impl Coordinate) -> Result<(), SunmapError> {
        self.set_region(GeoRegion::around(center))
    }

    pub fn set_date<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.date = date.with_timezone(&Utc);
    }

    /// Replaces the settings; an invalid config leaves the view untouched.
    pub fn set_config(&mut self, config: ViewConfig) -> Result<(), SunmapError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn heat_grid(&self) -> HeatGrid {
        HeatGrid::with_ramp(
            &self.region,
            &self.date,
            self.config.grid_size,
            &self.config.color_ramp,
        )
    }

    /// Sun elevation, bearing and solar times at the region center.
    pub fn snapshot(&self) -> Result<SolarSnapshot, SunmapError> {
        solar_snapshot(&self.ephemeris, &self.region.center(), &self.date)
    }

    pub fn shadow(&self) -> Result<ShadowProjection, SunmapError> {
        project_shadow(&self.ephemeris, &self.region.center(), &self.date)
    }

    /// Shadow tips over the configured hours of the region center's local day.
    ///
    /// The local clock is the nominal offset of the center's longitude, see
    /// [`local_offset`].
    pub fn sun_path(&self) -> Result<SunPath, SunmapError> {
        let center = self.region.center();
        let local = self.date.with_timezone(&local_offset(center.longitude));
        compute_sun_path(&self.ephemeris, &center, &local, self.config.hours())
    }

    pub fn legend(&self) -> Vec<Rgba> {
        self.config
            .color_ramp
            .legend_gradient(self.config.legend_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heat::constants::{APPROXIMATE_LOCATION_SPAN, DEFAULT_SPAN};
    use crate::sun::ephemeris::{SolarTimes, SunPosition};

    fn solstice_view() -> SolarView {
        let mut view = SolarView::default();
        view.set_date(Utc.with_ymd_and_hms(2024, 6, 21, 6, 50, 0).unwrap());
        view
    }

    #[test]
    fn test_starts_on_default_region() {
        let view: SolarView = SolarView::default();
        assert_eq!(*view.region(), GeoRegion::default());
        assert_eq!(view.region().latitude_span, DEFAULT_SPAN);
    }

    #[test]
    fn test_set_viewport() -> Result<(), SunmapError> {
        let mut view = solstice_view();
        view.set_viewport(29.0, 28.0, 78.0, 77.0)?;
        assert!((view.region().center_latitude - 28.5).abs() < 1e-12);
        assert!((view.region().longitude_span - 1.0).abs() < 1e-12);

        // Collapsed viewport widened to the minimum span
        view.set_viewport(10.0, 10.0, 20.0, 20.0)?;
        assert!((view.region().latitude_span - 5e-4).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_invalid_reposition_leaves_view_unchanged() {
        let mut view = solstice_view();
        let before = *view.region();

        assert_eq!(
            view.recenter(&(95.0, 10.0)),
            Err(SunmapError::InvalidLatitude(95.0))
        );
        assert!(matches!(
            view.locate(&(0.0, f64::NAN)),
            Err(SunmapError::InvalidLongitude(_))
        ));
        assert_eq!(*view.region(), before);
    }

    #[test]
    fn test_recenter_keeps_spans() -> Result<(), SunmapError> {
        let mut view = solstice_view();
        view.set_region(GeoRegion::new(0.0, 0.0, 0.2, 0.3))?;
        view.recenter(&(10.0, 20.0))?;
        assert_eq!(view.region().center_latitude, 10.0);
        assert_eq!(view.region().latitude_span, 0.2);
        assert_eq!(view.region().longitude_span, 0.3);
        Ok(())
    }

    #[test]
    fn test_locate_uses_approximate_span() -> Result<(), SunmapError> {
        let mut view = solstice_view();
        view.locate(&(51.5, -0.12))?;
        assert_eq!(view.region().latitude_span, APPROXIMATE_LOCATION_SPAN);
        assert_eq!(view.region().longitude_span, APPROXIMATE_LOCATION_SPAN);
        Ok(())
    }

    #[test]
    fn test_overlays_follow_config() -> Result<(), SunmapError> {
        let config = ViewConfig::default()
            .grid_size(6)
            .legend_steps(4)
            .sun_path_hours(0, 23);
        let mut view = SolarView::new(config, Spa);
        view.set_date(Utc.with_ymd_and_hms(2024, 6, 21, 6, 50, 0).unwrap());

        assert_eq!(view.heat_grid().grid_size(), 6);
        assert_eq!(view.legend().len(), 4);
        let path = view.sun_path()?;
        assert!(path.len() <= 24);
        assert!(path.is_drawable());
        Ok(())
    }

    #[test]
    fn test_set_config_validates() -> Result<(), SunmapError> {
        let mut view = solstice_view();
        assert!(view.set_config(ViewConfig::default().grid_size(u32::MAX)).is_err());
        assert_eq!(view.config().grid_size, 14);

        view.set_config(ViewConfig::default().grid_size(3))?;
        assert_eq!(view.heat_grid().grid_size(), 3);
        Ok(())
    }

    #[test]
    fn test_shadow_and_snapshot_at_center() -> Result<(), SunmapError> {
        let view = solstice_view();
        let snap = view.snapshot()?;
        let shadow = view.shadow()?;
        assert!(snap.elevation_degrees > 0.0);
        assert!(shadow.has_shadow());
        assert_eq!(shadow.origin, view.region().center());
        Ok(())
    }

    #[test]
    fn test_sun_path_uses_local_day() -> Result<(), SunmapError> {
        // 02:00 UTC is midday in Sydney; the UTC day's 06..=18 would be night there
        let mut view = SolarView::new(ViewConfig::default(), Spa);
        view.set_date(Utc.with_ymd_and_hms(2024, 6, 21, 2, 0, 0).unwrap());
        view.locate(&(-33.87, 151.21))?;

        let path = view.sun_path()?;
        let hours: Vec<u32> = path.points.iter().map(|p| p.hour).collect();
        assert!(path.is_drawable());
        assert!(hours.len() >= 8, "hours {:?}", hours);
        assert!(hours.iter().all(|h| (7..=17).contains(h)), "hours {:?}", hours);
        assert!(hours.contains(&8) && hours.contains(&16));
        Ok(())
    }

    #[test]
    fn test_sun_path_local_day_west_of_greenwich() -> Result<(), SunmapError> {
        // 23:00 UTC on the 20th is still the afternoon of the 20th in New York
        let mut view = SolarView::new(ViewConfig::default(), Spa);
        view.set_date(Utc.with_ymd_and_hms(2024, 6, 20, 23, 0, 0).unwrap());
        view.locate(&(40.71, -74.0))?;

        let path = view.sun_path()?;
        assert_eq!(path.len(), 13);
        assert!(path.points.iter().all(|p| p.elevation_degrees > 0.0));
        Ok(())
    }

    struct Overhead;

    impl Ephemeris for Overhead {
        fn position(
            &self,
            _: &DateTime<Utc>,
            _: f64,
            _: f64,
        ) -> Result<SunPosition, SunmapError> {
            Ok(SunPosition {
                altitude: 60f64.to_radians(),
                azimuth: 0.0,
            })
        }
        fn times(
            &self,
            instant: &DateTime<Utc>,
            _: f64,
            _: f64,
        ) -> Result<SolarTimes, SunmapError> {
            Ok(SolarTimes {
                sunrise: None,
                solar_noon: *instant,
                sunset: None,
            })
        }
    }

    #[test]
    fn test_custom_ephemeris() -> Result<(), SunmapError> {
        let view = SolarView::new(ViewConfig::default(), Overhead);
        let path = view.sun_path()?;
        assert_eq!(path.len(), 13);
        assert!(path.points.iter().all(|p| (p.elevation_degrees - 60.0).abs() < 1e-9));
        Ok(())
    }
}
