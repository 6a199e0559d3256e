use crate::heat::constants::{
    AXIAL_TILT_DEG, DISTANCE_FALLOFF, DISTANCE_FLOOR, HASH_COEFFS, HAZE_BASE, HAZE_WEIGHT,
    RELIEF_BASE, RELIEF_MAX, RELIEF_SCALE, RELIEF_WEIGHT,
};
use crate::region::GeoRegion;
use chrono::{DateTime, Datelike, TimeZone, Utc};

pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// 1-based day of the year of `date`'s UTC calendar day.
pub fn day_of_year<Tz: TimeZone>(date: &DateTime<Tz>) -> u32 {
    date.with_timezone(&Utc).ordinal()
}

/// Solar declination in degrees for a 1-based day of the year.
///
/// Uses `23.44 * sin(360/365 * (284 + day))` with no refraction or
/// equation-of-time correction.
pub fn solar_declination(day: u32) -> f64 {
    let angle = ((360.0 / 365.0) * (284.0 + day as f64)) % 360.0;
    AXIAL_TILT_DEG * angle.to_radians().sin()
}

/// Fixed hash of a coordinate pair into `[0, 1)`.
///
/// `frac(sin(lat * 12.9898 + lon * 78.233) * 43758.5453)`. Not a noise
/// model; identical inputs always give identical output.
pub fn pseudo_random(lat: f64, lon: f64) -> f64 {
    let x = (lat * HASH_COEFFS[0] + lon * HASH_COEFFS[1]).sin() * HASH_COEFFS[2];
    x - x.floor()
}

/// `sin` of the noon-style solar altitude at `lat` for a declination, clamped to [0, 1].
pub fn altitude_factor(lat: f64, declination: f64) -> f64 {
    let lat_rad = lat.to_radians();
    let dec_rad = declination.to_radians();
    let arg = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos();
    let altitude = clamp(arg, -1.0, 1.0).asin();
    clamp(altitude.sin(), 0.0, 1.0)
}

pub fn haze_factor(lat: f64, lon: f64) -> f64 {
    HAZE_BASE + HAZE_WEIGHT * pseudo_random(lat, lon)
}

pub fn relief_factor(lat: f64, lon: f64) -> f64 {
    let noise = pseudo_random(lat * RELIEF_SCALE, lon * RELIEF_SCALE) - 0.5;
    clamp(RELIEF_BASE + RELIEF_WEIGHT * noise, 0.0, RELIEF_MAX)
}

/// Falloff from the region center; offsets are measured in half-spans so 1 is the edge.
pub fn distance_factor(lat: f64, lon: f64, region: &GeoRegion) -> f64 {
    let region = region.normalized();
    let lat_offset = (lat - region.center_latitude).abs() / (region.latitude_span / 2.0);
    let lon_offset = (lon - region.center_longitude).abs() / (region.longitude_span / 2.0);
    let offset = (lat_offset * lat_offset + lon_offset * lon_offset).sqrt();
    clamp(1.0 - offset * DISTANCE_FALLOFF, DISTANCE_FLOOR, 1.0)
}

/// Heuristic solar-exposure score in [0, 1] for a point inside `region`.
///
/// The product of the altitude, haze, relief and distance factors. Only the
/// day of the year of `date` matters.
pub fn solar_potential<Tz: TimeZone>(
    lat: f64,
    lon: f64,
    date: &DateTime<Tz>,
    region: &GeoRegion,
) -> f64 {
    potential_for_day(lat, lon, day_of_year(date), region)
}

pub(crate) fn potential_for_day(lat: f64, lon: f64, day: u32, region: &GeoRegion) -> f64 {
    let declination = solar_declination(day);
    let score = altitude_factor(lat, declination)
        * haze_factor(lat, lon)
        * relief_factor(lat, lon)
        * distance_factor(lat, lon, region);
    clamp(score, 0.0, 1.0)
}
