use crate::error::SunmapError;
use crate::heat::constants::{ALPHA_BASE, ALPHA_WEIGHT, DEFAULT_COLOR_STOPS};
use crate::heat::potential::clamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calibration point of the color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub score: f64,
    pub rgb: [u8; 3],
}

impl ColorStop {
    pub const fn new(score: f64, rgb: [u8; 3]) -> Self {
        Self { score, rgb }
    }
}

/// An RGB color with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// CSS `rgba(...)` form with alpha at two decimals.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

/// Piecewise-linear color ramp over scores in [0, 1].
///
/// Stops are strictly increasing, starting at 0 and ending at 1.
///
/// # Example
///
/// ```
/// use sunmap_rs::ColorRamp;
///
/// let ramp = ColorRamp::default();
/// let color = ramp.interpolate(1.0);
/// assert_eq!(color.to_string(), "rgba(215, 48, 39, 0.73)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            stops: DEFAULT_COLOR_STOPS
                .iter()
                .map(|&(score, rgb)| ColorStop::new(score, rgb))
                .collect(),
        }
    }
}

impl TryFrom<Vec<ColorStop>> for ColorRamp {
    type Error = SunmapError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<ColorRamp> for Vec<ColorStop> {
    fn from(ramp: ColorRamp) -> Self {
        ramp.stops
    }
}

impl ColorRamp {
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, SunmapError> {
        if stops.len() < 2 {
            return Err(SunmapError::InvalidColorRamp(
                "At least two stops are required".to_string(),
            ));
        }
        if stops[0].score != 0.0 || stops[stops.len() - 1].score != 1.0 {
            return Err(SunmapError::InvalidColorRamp(
                "Stops must start at 0 and end at 1".to_string(),
            ));
        }
        if stops.windows(2).any(|w| !(w[0].score < w[1].score)) {
            return Err(SunmapError::InvalidColorRamp(
                "Stop scores must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Maps a score to a color. The score is clamped to [0, 1] first.
    ///
    /// A score sitting exactly on a stop uses the first segment (scanning
    /// upward) that contains it.
    pub fn interpolate(&self, score: f64) -> Rgba {
        let v = clamp(score, 0.0, 1.0);
        let (lower, upper) = self
            .stops
            .windows(2)
            .find(|w| v >= w[0].score && v <= w[1].score)
            .map(|w| (w[0], w[1]))
            .unwrap_or((self.stops[0], self.stops[self.stops.len() - 1]));

        let range = upper.score - lower.score;
        let range = if range == 0.0 { 1.0 } else { range };
        let t = clamp((v - lower.score) / range, 0.0, 1.0);

        let channel = |i: usize| {
            let lo = lower.rgb[i] as f64;
            let hi = upper.rgb[i] as f64;
            (lo + (hi - lo) * t).round() as u8
        };

        Rgba {
            r: channel(0),
            g: channel(1),
            b: channel(2),
            a: ALPHA_BASE + v * ALPHA_WEIGHT,
        }
    }

    /// Evenly spaced swatches from 0 to 1 for a legend.
    pub fn legend_gradient(&self, steps: usize) -> Vec<Rgba> {
        match steps {
            0 => Vec::new(),
            1 => vec![self.interpolate(0.0)],
            n => (0..n)
                .map(|i| self.interpolate(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

/// Interpolates on the default ramp.
pub fn interpolate_color(score: f64) -> Rgba {
    ColorRamp::default().interpolate(score)
}
