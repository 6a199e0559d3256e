/// Error type for sunmap-rs operations.
#[derive(Debug, PartialEq)]
pub enum SunmapError {
    /// Latitude is not finite or outside -90..=90.
    InvalidLatitude(f64),
    /// Longitude is not finite or outside -180..=180.
    InvalidLongitude(f64),
    /// Color stops are not strictly increasing from 0 to 1.
    InvalidColorRamp(String),
    /// Configuration could not be parsed or is inconsistent.
    ConfigError(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV writing error.
    CsvError(String),
    /// The sun-position provider rejected the input or failed.
    EphemerisError(String),
}

impl std::fmt::Display for SunmapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SunmapError::InvalidLatitude(v) => write!(f, "Invalid latitude: {}", v),
            SunmapError::InvalidLongitude(v) => write!(f, "Invalid longitude: {}", v),
            SunmapError::InvalidColorRamp(msg) => write!(f, "Invalid color ramp: {}", msg),
            SunmapError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            SunmapError::IoError(msg) => write!(f, "IO error: {}", msg),
            SunmapError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            SunmapError::EphemerisError(msg) => write!(f, "Ephemeris error: {}", msg),
        }
    }
}

impl std::error::Error for SunmapError {}
