use crate::coord::{Coordinate, LatLon};
use crate::error::SunmapError;
use crate::sun::ephemeris::Ephemeris;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Height of the reference object casting the shadow, in meters
pub const REFERENCE_HEIGHT: f64 = 10.0;

/// Approximate meridian arc length of one degree of latitude, in meters
pub const METERS_PER_DEGREE: f64 = 111_111.0;

/// Converts a south-based azimuth in radians to a compass bearing in degrees [0, 360).
pub fn compass_bearing(azimuth: f64) -> f64 {
    normalize_degrees(azimuth.to_degrees() + 180.0)
}

/// Wraps an angle into [0, 360).
///
/// `rem_euclid` rounds tiny negative angles up to exactly 360.
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shadow length of the reference object for a sun elevation in degrees.
///
/// Zero when the sun is on or below the horizon.
pub fn shadow_length(elevation_deg: f64) -> f64 {
    if elevation_deg > 0.0 {
        REFERENCE_HEIGHT / elevation_deg.to_radians().tan()
    } else {
        0.0
    }
}

/// Moves `origin` by `length` meters along `bearing_deg`.
///
/// Equirectangular approximation: only valid for short distances away from
/// the poles.
pub fn project_tip(origin: &impl Coordinate, length: f64, bearing_deg: f64) -> LatLon {
    let bearing = bearing_deg.to_radians();
    let lat = origin.latitude();
    let d_lat = (length / METERS_PER_DEGREE) * bearing.cos();
    let d_lon = (length / (METERS_PER_DEGREE * lat.to_radians().cos())) * bearing.sin();
    LatLon::new(lat + d_lat, origin.longitude() + d_lon)
}

/// Shadow of the reference object at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowProjection {
    pub origin: LatLon,
    pub tip: LatLon,
    /// Shadow length in meters; 0 means the tip sits on the origin
    pub length: f64,
}

impl ShadowProjection {
    /// Builds the projection for a sun elevation and compass bearing, both in degrees.
    pub fn from_angles(origin: &impl Coordinate, elevation_deg: f64, bearing_deg: f64) -> Self {
        let origin = origin.to_lat_lon();
        let length = shadow_length(elevation_deg);
        let tip = if length > 0.0 {
            project_tip(&origin, length, bearing_deg)
        } else {
            origin
        };
        Self {
            origin,
            tip,
            length,
        }
    }

    pub fn has_shadow(&self) -> bool {
        self.length > 0.0
    }
}

/// Projects the reference shadow at `instant` using `ephemeris`.
pub fn project_shadow<E, Tz>(
    ephemeris: &E,
    origin: &impl Coordinate,
    instant: &DateTime<Tz>,
) -> Result<ShadowProjection, SunmapError>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    let instant = instant.with_timezone(&Utc);
    let pos = ephemeris.position(&instant, origin.latitude(), origin.longitude())?;
    Ok(ShadowProjection::from_angles(
        origin,
        pos.altitude.to_degrees(),
        compass_bearing(pos.azimuth),
    ))
}

/// Sun elevation/bearing and the day's solar times at one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarSnapshot {
    pub elevation_degrees: f64,
    /// Compass bearing, 0 = north
    pub azimuth_degrees: f64,
    pub sunrise: Option<DateTime<Utc>>,
    pub solar_noon: DateTime<Utc>,
    pub sunset: Option<DateTime<Utc>>,
}

impl fmt::Display for SolarSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}° elevation | {:.1}° azimuth",
            self.elevation_degrees, self.azimuth_degrees
        )
    }
}

pub fn solar_snapshot<E, Tz>(
    ephemeris: &E,
    origin: &impl Coordinate,
    instant: &DateTime<Tz>,
) -> Result<SolarSnapshot, SunmapError>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    let instant = instant.with_timezone(&Utc);
    let (lat, lon) = (origin.latitude(), origin.longitude());
    let pos = ephemeris.position(&instant, lat, lon)?;
    let times = ephemeris.times(&instant, lat, lon)?;

    Ok(SolarSnapshot {
        elevation_degrees: pos.altitude.to_degrees(),
        azimuth_degrees: compass_bearing(pos.azimuth),
        sunrise: times.sunrise,
        solar_noon: times.solar_noon,
        sunset: times.sunset,
    })
}
