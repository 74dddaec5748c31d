//! Crate-level error types.

use std::fmt;

/// Errors produced by the sortviz crate.
///
/// Requests that arrive while a run is active are not errors; they come back
/// as [`Admission::Ignored`](crate::engine::Admission::Ignored) instead.
#[derive(Debug)]
pub enum SortError {
    /// Speed factor is non-finite or not strictly positive.
    InvalidSpeed(f64),
    /// Requested array length exceeds the supported maximum.
    InvalidLength {
        /// Requested length.
        len: usize,
        /// Largest accepted length.
        max: usize,
    },
    /// A loaded bar value is not a positive integer.
    InvalidValue {
        /// Index of the offending value.
        index: usize,
    },
    /// Height range for generated arrays is empty or starts at zero.
    InvalidHeightRange {
        /// Lower bound (inclusive).
        min: u32,
        /// Upper bound (inclusive).
        max: u32,
    },
    /// Algorithm id does not name one of the known engines.
    UnknownAlgorithm(String),
    /// Preset name has no matching TOML file in the preset directory.
    UnknownPreset {
        /// Requested name.
        name: String,
        /// Names that do exist.
        available: Vec<String>,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// JSON trace parsing/serialization failure.
    TraceParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed(speed) => {
                write!(f, "speed must be finite and positive, got {speed}")
            }
            Self::InvalidLength { len, max } => {
                write!(f, "array length {len} exceeds maximum of {max}")
            }
            Self::InvalidValue { index } => {
                write!(f, "bar value at index {index} must be positive")
            }
            Self::InvalidHeightRange { min, max } => {
                write!(f, "invalid height range {min}..={max}")
            }
            Self::UnknownAlgorithm(id) => {
                write!(f, "unknown algorithm '{id}'")
            }
            Self::UnknownPreset { name, available } => {
                write!(f, "unknown preset '{name}'")?;
                if !available.is_empty() {
                    write!(f, " (available: {})", available.join(", "))?;
                }
                Ok(())
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TraceParse(msg) => write!(f, "trace parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SortError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
