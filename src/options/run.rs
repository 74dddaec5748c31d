use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::animation::delay_for_speed;
use crate::error::SortError;

/// Largest array the engines accept.
pub const MAX_LEN: usize = 1024;

/// Settings that shape a run: which engine, how fast, and what array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Run", inline)]
#[serde(default)]
pub struct RunOptions {
    /// Engine started by the next sort.
    #[schemars(title = "Algorithm")]
    pub algorithm: Algorithm,
    /// Speed factor; each step waits `250 / speed` milliseconds.
    #[schemars(title = "Speed", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub speed: f64,
    /// Number of bars generated.
    #[schemars(title = "Array Size", range(min = 1, max = 1024))]
    pub array_len: usize,
    /// Smallest generated bar height.
    #[schemars(skip)]
    pub min_height: u32,
    /// Largest generated bar height.
    #[schemars(skip)]
    pub max_height: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            speed: 50.0,
            array_len: 50,
            min_height: 10,
            max_height: 390,
        }
    }
}

impl RunOptions {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), SortError> {
        let _ = delay_for_speed(self.speed)?;
        validate_len(self.array_len)?;
        if self.min_height == 0 || self.min_height > self.max_height {
            return Err(SortError::InvalidHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        Ok(())
    }
}

/// Reject lengths above [`MAX_LEN`].
pub fn validate_len(len: usize) -> Result<(), SortError> {
    if len > MAX_LEN {
        return Err(SortError::InvalidLength { len, max: MAX_LEN });
    }
    Ok(())
}
