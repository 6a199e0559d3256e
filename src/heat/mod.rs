pub mod color;
pub mod constants;
pub mod potential;

pub use color::{ColorRamp, ColorStop, Rgba, interpolate_color};
pub use constants::{
    APPROXIMATE_LOCATION_SPAN, DEFAULT_GRID_SIZE, DEFAULT_LEGEND_STEPS, MAX_GRID_SIZE, MIN_SPAN,
    MIN_VIEWPORT_SPAN, VISIBILITY_THRESHOLD,
};
pub use potential::{
    altitude_factor, day_of_year, distance_factor, haze_factor, pseudo_random, relief_factor,
    solar_declination, solar_potential,
};
