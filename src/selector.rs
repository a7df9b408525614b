//! Number selection: pool-first with a random fallback.
//!
//! A fixed pool of candidate values is walked round-robin by a cursor that
//! persists across calls. Each request scans forward from the cursor for a
//! value inside `[min, max]`; the cursor moves one step per value inspected,
//! whether or not it matched. Only when the scan gives up does a uniform
//! random draw happen.
//!
//! The scan budget is `2 * pool.len()` steps. This is a termination cap, not
//! an exhaustiveness argument.

use crate::error::RandomizerError;
use crate::rng::WasmRng;
use crate::types::Selection;

/// Result of scanning the pool from a given cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolScan {
    /// First in-range pool value, if any was found within budget.
    pub hit: Option<i64>,
    /// Number of pool values inspected (cursor steps taken).
    pub attempts: usize,
    /// Cursor position after the scan.
    pub cursor: usize,
}

/// Scan `pool` for a value in `[min, max]` starting at `cursor`.
///
/// Pure: the caller decides whether to commit the returned cursor.
pub fn scan_pool(pool: &[i64], cursor: usize, min: i64, max: i64) -> PoolScan {
    let len = pool.len();
    if len == 0 {
        return PoolScan { hit: None, attempts: 0, cursor: 0 };
    }

    let budget = len * 2;
    let mut cursor = cursor % len;
    let mut attempts = 0;

    while attempts < budget {
        let value = pool[cursor];
        cursor = (cursor + 1) % len;
        attempts += 1;

        if value >= min && value <= max {
            return PoolScan { hit: Some(value), attempts, cursor };
        }
    }

    PoolScan { hit: None, attempts, cursor }
}

/// Decide a value for `[min, max]` given the pool and cursor state.
///
/// Returns the tagged selection and the new cursor. The random source is only
/// touched on the fallback path, and the cursor is returned unchanged for an
/// invalid or single-value range.
pub fn select(
    pool: &[i64],
    cursor: usize,
    min: i64,
    max: i64,
    rng: &mut WasmRng,
) -> Result<(Selection, usize), RandomizerError> {
    if min > max {
        return Err(RandomizerError::RangeInvalid { min, max });
    }
    if min == max {
        return Ok((Selection::Single(min), cursor));
    }

    let scan = scan_pool(pool, cursor, min, max);
    let selection = match scan.hit {
        Some(value) => Selection::Pooled(value),
        None => Selection::Random(rng.gen_inclusive(min, max)),
    };
    Ok((selection, scan.cursor))
}

/// Owns the candidate pool and the rotating cursor.
pub struct Selector {
    pool: Vec<i64>,
    cursor: usize,
}

impl Selector {
    pub fn new(pool: Vec<i64>) -> Self {
        Self { pool, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pick a value for `[min, max]`, committing the cursor advance.
    pub fn select(
        &mut self,
        min: i64,
        max: i64,
        rng: &mut WasmRng,
    ) -> Result<Selection, RandomizerError> {
        let (selection, cursor) = select(&self.pool, self.cursor, min, max, rng)?;
        log::debug!(
            "select [{}, {}]: {:?}, cursor {} -> {}",
            min, max, selection, self.cursor, cursor
        );
        self.cursor = cursor;
        Ok(selection)
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
