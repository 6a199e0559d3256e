/// Default number of cells along each side of the heat grid
pub const DEFAULT_GRID_SIZE: u32 = 14;

/// Largest grid size a view config accepts (one million cells)
pub const MAX_GRID_SIZE: u32 = 1000;

/// Tiles scoring at or below this value are omitted
pub const VISIBILITY_THRESHOLD: f64 = 0.02;

/// Smallest region span in degrees
pub const MIN_SPAN: f64 = 1e-4;

/// Smallest span accepted from a viewport
pub const MIN_VIEWPORT_SPAN: f64 = 5e-4;

/// Fallback view center (New Delhi) as (latitude, longitude)
pub const DEFAULT_CENTER: (f64, f64) = (28.6139, 77.209);

/// Fallback view span in degrees
pub const DEFAULT_SPAN: f64 = 0.4;

/// Span used around an approximate (IP-derived) location
pub const APPROXIMATE_LOCATION_SPAN: f64 = 0.6;

/// Number of swatches in the legend gradient
pub const DEFAULT_LEGEND_STEPS: usize = 12;

/// Axial tilt used by the declination approximation, degrees
pub const AXIAL_TILT_DEG: f64 = 23.44;

/// Hash multipliers [lat, lon, scale]
pub(crate) const HASH_COEFFS: [f64; 3] = [12.9898, 78.233, 43758.5453];

/// Haze factor = base + weight * hash
pub(crate) const HAZE_BASE: f64 = 0.75;
pub(crate) const HAZE_WEIGHT: f64 = 0.25;

/// Relief factor = clamp(base + weight * (hash - 0.5), 0, max), hash taken at scaled coordinates
pub(crate) const RELIEF_BASE: f64 = 0.85;
pub(crate) const RELIEF_WEIGHT: f64 = 0.25;
pub(crate) const RELIEF_SCALE: f64 = 0.7;
pub(crate) const RELIEF_MAX: f64 = 1.1;

/// Distance factor = clamp(1 - falloff * offset, floor, 1)
pub(crate) const DISTANCE_FALLOFF: f64 = 0.45;
pub(crate) const DISTANCE_FLOOR: f64 = 0.55;

/// Tile alpha = base + weight * score
pub(crate) const ALPHA_BASE: f64 = 0.18;
pub(crate) const ALPHA_WEIGHT: f64 = 0.55;

/// Default ramp: deep blue through teal and yellow to red
pub const DEFAULT_COLOR_STOPS: [(f64, [u8; 3]); 5] = [
    (0.0, [37, 52, 148]),
    (0.35, [68, 130, 195]),
    (0.55, [123, 204, 196]),
    (0.75, [254, 224, 139]),
    (1.0, [215, 48, 39]),
];
