//! Session configuration.
//!
//! JS may pass a partial object (camelCase keys); missing fields fall back to
//! the defaults below, which reproduce the stock widget.

use serde::{Deserialize, Serialize};

use crate::error::RandomizerError;

/// Pre-selected values consulted before any random draw.
pub const DEFAULT_POOL: [i64; 20] = [
    7, 42, 15, 23, 56, 89, 10, 3, 77, 100, 33, 66, 12, 45, 78, 5, 18, 91, 24, 37,
];

pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = 100;
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const MAX_HISTORY_CAPACITY: usize = 1000;
pub const MAX_BATCH_SIZE: usize = 100;

/// Optional clamp bounds for one numeric input, like the HTML `min`/`max`
/// attributes of the input element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl InputBounds {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into whichever bounds are set.
    pub fn clamp(&self, value: i64) -> i64 {
        let mut value = value;
        if let Some(lo) = self.min {
            if value < lo {
                value = lo;
            }
        }
        if let Some(hi) = self.max {
            if value > hi {
                value = hi;
            }
        }
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomizerConfig {
    /// Value used when the min input is unparsable, and restored on reset.
    pub default_min: i64,
    /// Value used when the max input is unparsable, and restored on reset.
    pub default_max: i64,
    pub min_bounds: InputBounds,
    pub max_bounds: InputBounds,
    pub pool: Vec<i64>,
    pub history_capacity: usize,
    pub batch_size: usize,
    /// Seed for the fallback RNG. `None` uses browser/OS entropy.
    pub seed: Option<u64>,
}

impl Default for RandomizerConfig {
    fn default() -> Self {
        Self {
            default_min: DEFAULT_MIN,
            default_max: DEFAULT_MAX,
            min_bounds: InputBounds::default(),
            max_bounds: InputBounds::default(),
            pool: DEFAULT_POOL.to_vec(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
        }
    }
}

impl RandomizerConfig {
    pub fn validate(&self) -> Result<(), RandomizerError> {
        if self.default_min > self.default_max {
            return Err(RandomizerError::ConfigInvalid(format!(
                "default range {} - {} is inverted",
                self.default_min, self.default_max
            )));
        }
        if !(1..=MAX_HISTORY_CAPACITY).contains(&self.history_capacity) {
            return Err(RandomizerError::ConfigInvalid(format!(
                "history capacity must be between 1 and {}, got {}",
                MAX_HISTORY_CAPACITY, self.history_capacity
            )));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(RandomizerError::ConfigInvalid(format!(
                "batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        Ok(())
    }
}
