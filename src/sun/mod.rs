pub mod ephemeris;
pub mod path;
pub mod shadow;

pub use ephemeris::{Ephemeris, SolarTimes, Spa, SunPosition};
pub use path::{
    DEFAULT_SUN_PATH_HOURS, EXTENDED_SUN_PATH_HOURS, SunPath, SunPathPoint, compute_sun_path,
    local_offset,
};
pub use shadow::{
    METERS_PER_DEGREE, REFERENCE_HEIGHT, ShadowProjection, SolarSnapshot, compass_bearing,
    project_shadow, project_tip, shadow_length, solar_snapshot,
};
