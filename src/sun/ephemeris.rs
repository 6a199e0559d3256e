use crate::error::SunmapError;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, SunriseResult, spa};

/// Sun position in radians.
///
/// `azimuth` is measured from south, positive toward west; convert to a
/// compass bearing with [`crate::sun::compass_bearing`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

impl SunPosition {
    /// Builds a position from degrees, with azimuth measured clockwise from north.
    pub fn from_compass_degrees(elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            altitude: elevation_deg.to_radians(),
            azimuth: (azimuth_deg - 180.0).to_radians(),
        }
    }
}

/// Sunrise, solar noon and sunset for one calendar day.
///
/// Sunrise and sunset are `None` when the sun never crosses the horizon
/// (polar day or night).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarTimes {
    pub sunrise: Option<DateTime<Utc>>,
    pub solar_noon: DateTime<Utc>,
    pub sunset: Option<DateTime<Utc>>,
}

/// Source of sun positions and daily solar times.
///
/// Implementations must be pure: the same inputs always give the same output.
pub trait Ephemeris {
    fn position(
        &self,
        instant: &DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> Result<SunPosition, SunmapError>;

    /// Solar times of the UTC calendar day containing `instant`.
    fn times(&self, instant: &DateTime<Utc>, lat: f64, lon: f64)
    -> Result<SolarTimes, SunmapError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn position(
        &self,
        instant: &DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> Result<SunPosition, SunmapError> {
        (**self).position(instant, lat, lon)
    }

    fn times(
        &self,
        instant: &DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> Result<SolarTimes, SunmapError> {
        (**self).times(instant, lat, lon)
    }
}

/// Standard atmosphere used for the refraction correction, in millibars
const STANDARD_PRESSURE: f64 = 1013.25;
/// Standard temperature used for the refraction correction, in °C
const STANDARD_TEMPERATURE: f64 = 15.0;

/// NREL Solar Position Algorithm via the `solar_positioning` crate.
///
/// Observer at sea level under a standard atmosphere; ΔT is estimated from
/// the year and month of each instant.
///
/// # Example
///
/// ```
/// use sunmap_rs::{Ephemeris, Spa};
/// use chrono::{TimeZone, Utc};
///
/// let noon = Utc.with_ymd_and_hms(2024, 6, 21, 6, 50, 0).unwrap();
/// let pos = Spa.position(&noon, 28.6139, 77.209).unwrap();
/// assert!(pos.altitude.to_degrees() > 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spa;

fn delta_t(instant: &DateTime<Utc>) -> Result<f64, SunmapError> {
    DeltaT::estimate_from_date(instant.year(), instant.month())
        .map_err(|e| SunmapError::EphemerisError(e.to_string()))
}

impl Ephemeris for Spa {
    fn position(
        &self,
        instant: &DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> Result<SunPosition, SunmapError> {
        let position = spa::solar_position(
            *instant,
            lat,
            lon,
            0.0,
            delta_t(instant)?,
            STANDARD_PRESSURE,
            STANDARD_TEMPERATURE,
        )
        .map_err(|e| SunmapError::EphemerisError(e.to_string()))?;

        Ok(SunPosition::from_compass_degrees(
            position.elevation_angle(),
            position.azimuth(),
        ))
    }

    fn times(
        &self,
        instant: &DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> Result<SolarTimes, SunmapError> {
        let result =
            spa::sunrise_sunset_for_horizon(*instant, lat, lon, delta_t(instant)?, Horizon::SunriseSunset)
                .map_err(|e| SunmapError::EphemerisError(e.to_string()))?;

        let times = match result {
            SunriseResult::RegularDay {
                sunrise,
                transit,
                sunset,
            } => SolarTimes {
                sunrise: Some(sunrise),
                solar_noon: transit,
                sunset: Some(sunset),
            },
            SunriseResult::AllDay { transit } | SunriseResult::AllNight { transit } => {
                SolarTimes {
                    sunrise: None,
                    solar_noon: transit,
                    sunset: None,
                }
            }
        };
        Ok(times)
    }
}
