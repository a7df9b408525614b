//! Core value types for the randomizer.

use chrono::NaiveTime;
use serde::Serialize;

/// Which range input a control refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Min,
    Max,
}

impl Field {
    /// Parse the JS field name (`"min"` / `"max"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Field::Min),
            "max" => Some(Field::Max),
            _ => None,
        }
    }
}

/// Outcome of one selection, tagged by where the value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Taken from the candidate pool.
    Pooled(i64),
    /// Uniform random draw after the pool scan came up empty.
    Random(i64),
    /// `min == max`: the only possible value, pool not consulted.
    Single(i64),
}

impl Selection {
    #[inline(always)]
    pub fn value(&self) -> i64 {
        match *self {
            Selection::Pooled(v) | Selection::Random(v) | Selection::Single(v) => v,
        }
    }

    #[inline(always)]
    pub fn is_pooled(&self) -> bool {
        matches!(self, Selection::Pooled(_))
    }
}

/// A single generated number, before it is recorded anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub number: i64,
    pub min: i64,
    pub max: i64,
    pub is_pooled: bool,
    pub timestamp: NaiveTime,
}

impl GenerationResult {
    pub fn new(selection: Selection, min: i64, max: i64, timestamp: NaiveTime) -> Self {
        Self {
            number: selection.value(),
            min,
            max,
            is_pooled: selection.is_pooled(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub number: i64,
    pub min: i64,
    pub max: i64,
    pub timestamp: NaiveTime,
    pub id: u64,
}

impl HistoryEntry {
    pub fn from_result(result: &GenerationResult, id: u64) -> Self {
        Self {
            number: result.number,
            min: result.min,
            max: result.max,
            timestamp: result.timestamp,
            id,
        }
    }
}

/// Count and sum of every number generated this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningTotals {
    pub count: u64,
    pub sum: i128,
}

impl RunningTotals {
    pub fn add(&mut self, number: i64) {
        self.count += 1;
        self.sum += number as i128;
    }

    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
