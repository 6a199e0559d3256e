use crate::coord::{Coordinate, LatLon};
use crate::error::SunmapError;
use crate::geom::create_polyline;
use crate::sun::ephemeris::Ephemeris;
use crate::sun::shadow::{compass_bearing, project_tip, shadow_length};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use geo_types::LineString;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, trace};

/// Hours sampled for the sun path by default (inclusive, local time)
pub const DEFAULT_SUN_PATH_HOURS: RangeInclusive<u32> = 6..=18;

/// Wider sampling window covering early sunrise / late sunset
pub const EXTENDED_SUN_PATH_HOURS: RangeInclusive<u32> = 5..=19;

/// One projected shadow tip of the sun path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPathPoint {
    /// Local hour the tip was sampled at
    pub hour: u32,
    pub tip: LatLon,
    pub elevation_degrees: f64,
    pub bearing_degrees: f64,
}

/// Shadow-tip positions of the reference object across daylight hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunPath {
    pub origin: LatLon,
    /// Calendar day sampled, in the clock of `utc_offset`
    pub date: NaiveDate,
    /// Seconds east of UTC of the clock the hours are read on
    pub utc_offset: i32,
    /// Ordered by increasing hour; only hours with the sun above the horizon
    pub points: Vec<SunPathPoint>,
}

impl SunPath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A path needs at least two points to be drawn as a line.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn tips(&self) -> Vec<LatLon> {
        self.points.iter().map(|p| p.tip).collect()
    }

    /// The tips as a polyline (x = longitude, y = latitude).
    pub fn to_line_string(&self) -> LineString<f64> {
        create_polyline(&self.tips())
    }
}

/// Nominal offset of the time zone containing `longitude`: one hour per 15°.
///
/// Approximates the civil clock; zone borders and DST are ignored.
pub fn local_offset(longitude: f64) -> FixedOffset {
    let hours = (longitude / 15.0).round().clamp(-12.0, 12.0) as i32;
    FixedOffset::east_opt(hours * 3600).unwrap_or(Utc.fix())
}

/// Samples the shadow tip at each whole hour of `hours` on `date`'s calendar day.
///
/// Instants are built at `hh:00:00` in `date`'s own time zone. Hours that do
/// not exist on that day (past 23 or inside a DST gap) and hours with the
/// sun at or below the horizon are skipped.
///
/// # Example
/// ```
/// use sunmap_rs::{Spa, compute_sun_path, DEFAULT_SUN_PATH_HOURS};
/// use chrono::{FixedOffset, TimeZone};
///
/// let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
/// let date = ist.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
/// let path = compute_sun_path(&Spa, &(28.6139, 77.209), &date, DEFAULT_SUN_PATH_HOURS).unwrap();
/// assert!(path.is_drawable());
/// ```
pub fn compute_sun_path<E, Tz>(
    ephemeris: &E,
    origin: &impl Coordinate,
    date: &DateTime<Tz>,
    hours: RangeInclusive<u32>,
) -> Result<SunPath, SunmapError>
where
    E: Ephemeris + ?Sized,
    Tz: TimeZone,
{
    let (lat, lon) = (origin.latitude(), origin.longitude());
    let tz = date.timezone();
    let mut points = Vec::new();

    for hour in hours.clone() {
        let Some(local) = tz
            .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
            .earliest()
        else {
            trace!(hour, "hour does not exist on this day");
            continue;
        };
        let instant = local.with_timezone(&Utc);
        let pos = ephemeris.position(&instant, lat, lon)?;
        let elevation = pos.altitude.to_degrees();

        if elevation <= 0.0 {
            trace!(hour, elevation, "sun below horizon");
            continue;
        }

        let bearing = compass_bearing(pos.azimuth);
        points.push(SunPathPoint {
            hour,
            tip: project_tip(origin, shadow_length(elevation), bearing),
            elevation_degrees: elevation,
            bearing_degrees: bearing,
        });
    }

    debug!(
        start = hours.start(),
        end = hours.end(),
        points = points.len(),
        "computed sun path"
    );

    Ok(SunPath {
        origin: origin.to_lat_lon(),
        date: date.date_naive(),
        utc_offset: date.offset().fix().local_minus_utc(),
        points,
    })
}
