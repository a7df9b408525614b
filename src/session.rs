//! Session state and command handling.
//!
//! A `Session` holds everything the widget mutates: the selector cursor, the
//! history ledger, running totals, the raw text of both range inputs and the
//! current result display. Commands are handled one at a time.

use chrono::NaiveTime;

use crate::command::{Command, Notice};
use crate::config::RandomizerConfig;
use crate::error::RandomizerError;
use crate::ledger::HistoryLedger;
use crate::rng::WasmRng;
use crate::selector::Selector;
use crate::types::{Field, GenerationResult, HistoryEntry, RunningTotals};
use crate::view::{ResultDisplay, View};

/// Source of entry timestamps.
pub type Clock = fn() -> NaiveTime;

/// Wall-clock local time of day.
pub fn local_clock() -> NaiveTime {
    chrono::Local::now().time()
}

/// Parse range input text leniently.
///
/// Accepts leading whitespace, an optional sign and a run of digits; anything
/// after the digits is ignored (`"12px"` is 12, `"3.9"` is 3). Input with no
/// leading digits, or that overflows, yields `default`.
///
/// `"0"` parses as 0. The stock page's `parseInt(v) || default` treated zero
/// as missing and substituted the default.
pub fn parse_bound(text: &str, default: i64) -> i64 {
    parse_leading_int(text).unwrap_or(default)
}

/// Convert a JS number to an integer, rejecting fractions, non-finite values
/// and anything outside the safe-integer range (±(2^53 - 1)).
pub fn integer_from_f64(value: f64) -> Option<i64> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let t = text.trim_start();
    let sign_len = match t.as_bytes().first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };
    let digits = t[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    t[..sign_len + digits].parse().ok()
}

pub struct Session {
    config: RandomizerConfig,
    selector: Selector,
    ledger: HistoryLedger,
    totals: RunningTotals,
    rng: WasmRng,
    min_input: String,
    max_input: String,
    display: ResultDisplay,
    clock: Clock,
    next_id: u64,
}

impl Session {
    pub fn new(config: RandomizerConfig) -> Result<Self, RandomizerError> {
        config.validate()?;

        log::info!(
            "session started: pool of {}, history capacity {}, default range {} - {}",
            config.pool.len(),
            config.history_capacity,
            config.default_min,
            config.default_max
        );

        Ok(Self {
            selector: Selector::new(config.pool.clone()),
            ledger: HistoryLedger::new(config.history_capacity),
            totals: RunningTotals::default(),
            rng: WasmRng::from_optional_seed(config.seed),
            min_input: config.default_min.to_string(),
            max_input: config.default_max.to_string(),
            display: ResultDisplay::Empty,
            clock: local_clock,
            next_id: 0,
            config,
        })
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn input(&self, field: Field) -> &str {
        match field {
            Field::Min => &self.min_input,
            Field::Max => &self.max_input,
        }
    }

    /// Current range, with unparsable inputs replaced by the defaults.
    pub fn range(&self) -> (i64, i64) {
        (
            parse_bound(&self.min_input, self.config.default_min),
            parse_bound(&self.max_input, self.config.default_max),
        )
    }

    pub fn cursor(&self) -> usize {
        self.selector.cursor()
    }

    pub fn totals(&self) -> RunningTotals {
        self.totals
    }

    pub fn display(&self) -> &ResultDisplay {
        &self.display
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.ledger.snapshot()
    }

    pub fn view(&self) -> View {
        let (min, max) = self.range();
        View::render(&self.display, min, max, self.ledger.iter())
    }

    /// Run one command. `confirm` is asked before destructive commands; a
    /// declined confirmation leaves the session untouched.
    pub fn dispatch<F>(&mut self, command: Command, confirm: F) -> Result<Option<Notice>, RandomizerError>
    where
        F: FnOnce(&str) -> bool,
    {
        if let Some(prompt) = command.confirmation() {
            if !confirm(prompt) {
                log::debug!("{:?} declined", command);
                return Ok(None);
            }
        }

        match command {
            Command::Generate => {
                self.generate()?;
                Ok(None)
            }
            Command::GenerateBatch => {
                let results = self.generate_batch()?;
                Ok(Some(Notice::BatchGenerated(results.iter().map(|r| r.number).collect())))
            }
            Command::ClearHistory => {
                self.clear_history();
                Ok(Some(Notice::HistoryCleared))
            }
            Command::ResetAll => {
                self.reset_all();
                Ok(Some(Notice::ResetDone))
            }
            Command::Adjust { field, delta } => {
                self.adjust(field, delta);
                Ok(None)
            }
            Command::SetRange { min, max } => {
                self.set_range(min, max);
                Ok(Some(Notice::RangeSet { min, max }))
            }
            Command::SetInput { field, text } => {
                self.set_input(field, text);
                Ok(None)
            }
        }
    }

    /// Generate one number for the current range and record it.
    pub fn generate(&mut self) -> Result<GenerationResult, RandomizerError> {
        let (min, max) = self.range();
        let result = self.select(min, max)?;
        self.record(&result);
        self.display = ResultDisplay::Single(result.number);
        Ok(result)
    }

    /// Generate `batch_size` numbers for the current range, recording each.
    ///
    /// The range is validated once up front; an inverted range records nothing.
    pub fn generate_batch(&mut self) -> Result<Vec<GenerationResult>, RandomizerError> {
        let (min, max) = self.range();
        if min > max {
            return Err(RandomizerError::RangeInvalid { min, max });
        }

        let mut results = Vec::with_capacity(self.config.batch_size);
        for _ in 0..self.config.batch_size {
            let result = self.select(min, max)?;
            self.record(&result);
            results.push(result);
        }

        self.display = ResultDisplay::Batch(results.iter().map(|r| r.number).collect());
        log::info!("generated batch of {} in [{}, {}]", results.len(), min, max);
        Ok(results)
    }

    pub fn clear_history(&mut self) {
        self.ledger.clear();
        log::info!("history cleared");
    }

    /// Restore the initial state: cursor, history, totals, inputs and display.
    pub fn reset_all(&mut self) {
        self.min_input = self.config.default_min.to_string();
        self.max_input = self.config.default_max.to_string();
        self.display = ResultDisplay::Empty;
        self.ledger.clear();
        self.totals.reset();
        self.selector.reset();
        log::info!("session reset");
    }

    /// Step an input by `delta`, clamped to that input's bounds.
    ///
    /// Unparsable input counts as 0. Returns the value written back.
    pub fn adjust(&mut self, field: Field, delta: i64) -> i64 {
        let bounds = match field {
            Field::Min => self.config.min_bounds,
            Field::Max => self.config.max_bounds,
        };
        let current = parse_bound(self.input(field), 0);
        let value = bounds.clamp(current.saturating_add(delta));
        self.set_input(field, value.to_string());
        value
    }

    pub fn set_range(&mut self, min: i64, max: i64) {
        self.min_input = min.to_string();
        self.max_input = max.to_string();
        log::debug!("range set to {} - {}", min, max);
    }

    pub fn set_input(&mut self, field: Field, text: impl Into<String>) {
        let text = text.into();
        match field {
            Field::Min => self.min_input = text,
            Field::Max => self.max_input = text,
        }
    }

    fn select(&mut self, min: i64, max: i64) -> Result<GenerationResult, RandomizerError> {
        let selection = self
            .selector
            .select(min, max, &mut self.rng)
            .inspect_err(|e| log::warn!("{}", e))?;
        Ok(GenerationResult::new(selection, min, max, (self.clock)()))
    }

    fn record(&mut self, result: &GenerationResult) {
        self.totals.add(result.number);
        self.ledger.record(HistoryEntry::from_result(result, self.next_id));
        self.next_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputBounds;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn session() -> Session {
        let config = RandomizerConfig {
            seed: Some(42),
            ..Default::default()
        };
        Session::new(config).unwrap().with_clock(noon)
    }

    fn accept(_: &str) -> bool {
        true
    }

    fn decline(_: &str) -> bool {
        false
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound("42", 1), 42);
        assert_eq!(parse_bound("  -7", 1), -7);
        assert_eq!(parse_bound("+8", 1), 8);
        assert_eq!(parse_bound("12px", 1), 12);
        assert_eq!(parse_bound("3.9", 1), 3);
        assert_eq!(parse_bound("0", 1), 0);
        assert_eq!(parse_bound("", 100), 100);
        assert_eq!(parse_bound("abc", 100), 100);
        assert_eq!(parse_bound("-", 100), 100);
        assert_eq!(parse_bound("99999999999999999999", 5), 5);
    }

    #[test]
    fn test_integer_from_f64() {
        assert_eq!(integer_from_f64(42.0), Some(42));
        assert_eq!(integer_from_f64(-3_000_000_000.0), Some(-3_000_000_000));
        assert_eq!(integer_from_f64(9_007_199_254_740_991.0), Some(9_007_199_254_740_991));
        assert_eq!(integer_from_f64(2.5), None);
        assert_eq!(integer_from_f64(f64::NAN), None);
        assert_eq!(integer_from_f64(f64::INFINITY), None);
        assert_eq!(integer_from_f64(1e300), None);
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.range(), (1, 100));
        assert_eq!(s.cursor(), 0);
        assert!(s.history().is_empty());
        let view = s.view();
        assert_eq!(view.result, "—");
        assert_eq!(view.range_label, "1 - 100");
        assert!(view.history_empty);
    }

    #[test]
    fn test_generate_records_result() {
        let mut s = session();
        s.set_range(1, 10);
        let result = s.generate().unwrap();
        assert_eq!(result.number, 7);
        assert!(result.is_pooled);
        assert_eq!(result.timestamp, noon());
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.totals().count, 1);
        assert_eq!(s.totals().sum, 7);

        let view = s.view();
        assert_eq!(view.result, "7");
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.history[0].range, "1 - 10");
        assert_eq!(view.history[0].time, "12:00:00");
    }

    #[test]
    fn test_inverted_range_mutates_nothing() {
        let mut s = session();
        s.generate().unwrap();
        s.set_range(50, 10);
        let err = s.generate().unwrap_err();
        assert_eq!(err, RandomizerError::RangeInvalid { min: 50, max: 10 });
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.totals().count, 1);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.display(), &ResultDisplay::Single(7));

        assert!(s.generate_batch().is_err());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_unparsable_inputs_use_defaults() {
        let mut s = session();
        s.set_input(Field::Min, "");
        s.set_input(Field::Max, "lots");
        assert_eq!(s.range(), (1, 100));
        assert_eq!(s.view().range_label, "1 - 100");
        let n = s.generate().unwrap().number;
        assert!((1..=100).contains(&n));
    }

    #[test]
    fn test_batch_records_each() {
        let mut s = session();
        s.set_range(1, 10);
        let results = s.generate_batch().unwrap();
        let numbers: Vec<i64> = results.iter().map(|r| r.number).collect();
        // 7 @0, 10 @6, 3 @7, 5 @15, then wraps to 7 @0.
        assert_eq!(numbers, vec![7, 10, 3, 5, 7]);
        assert_eq!(s.totals().count, 5);
        assert_eq!(s.totals().sum, 32);
        assert_eq!(s.view().result, "7, 10, 3, 5, 7");

        let history = s.history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].number, 7);
        assert_eq!(history[4].number, 7);
        let mut ids: Vec<u64> = history.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_history_capped_through_session() {
        let mut s = session();
        for _ in 0..30 {
            s.generate().unwrap();
        }
        assert_eq!(s.history().len(), 20);
        assert_eq!(s.totals().count, 30);
    }

    #[test]
    fn test_adjust_clamps_to_bounds() {
        let config = RandomizerConfig {
            min_bounds: InputBounds::new(Some(0), Some(10)),
            seed: Some(1),
            ..Default::default()
        };
        let mut s = Session::new(config).unwrap();
        assert_eq!(s.adjust(Field::Min, 1), 2);
        assert_eq!(s.adjust(Field::Min, 100), 10);
        assert_eq!(s.adjust(Field::Min, -50), 0);
        assert_eq!(s.input(Field::Min), "0");

        // max has no bounds configured
        assert_eq!(s.adjust(Field::Max, 1000), 1100);

        s.set_input(Field::Max, "junk");
        assert_eq!(s.adjust(Field::Max, -1), -1);
    }

    #[test]
    fn test_reset_all_restores_everything() {
        let mut s = session();
        s.set_range(1, 10);
        s.generate_batch().unwrap();
        s.set_range(-5, 5);
        s.generate().unwrap();
        assert_ne!(s.cursor(), 0);

        let notice = s.dispatch(Command::ResetAll, accept).unwrap();
        assert_eq!(notice, Some(Notice::ResetDone));
        assert_eq!(s.cursor(), 0);
        assert!(s.history().is_empty());
        assert_eq!(s.totals(), RunningTotals::default());
        assert_eq!(s.range(), (1, 100));
        assert_eq!(s.input(Field::Min), "1");
        assert_eq!(s.view().result, "—");
    }

    #[test]
    fn test_declined_confirmation_keeps_state() {
        let mut s = session();
        s.generate().unwrap();
        assert_eq!(s.dispatch(Command::ClearHistory, decline).unwrap(), None);
        assert_eq!(s.dispatch(Command::ResetAll, decline).unwrap(), None);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_clear_history_keeps_totals() {
        let mut s = session();
        s.generate().unwrap();
        s.generate().unwrap();
        let notice = s.dispatch(Command::ClearHistory, accept).unwrap();
        assert_eq!(notice, Some(Notice::HistoryCleared));
        assert!(s.history().is_empty());
        assert!(s.view().history_empty);
        assert_eq!(s.totals().count, 2);
    }

    #[test]
    fn test_dispatch_notices() {
        let mut s = session();
        let mut asked = false;
        let notice = s
            .dispatch(Command::SetRange { min: 5, max: 5 }, |_| {
                asked = true;
                true
            })
            .unwrap();
        assert!(!asked);
        assert_eq!(notice, Some(Notice::RangeSet { min: 5, max: 5 }));

        assert_eq!(s.dispatch(Command::Generate, accept).unwrap(), None);
        assert_eq!(s.display(), &ResultDisplay::Single(5));
        assert_eq!(s.cursor(), 0);

        let notice = s.dispatch(Command::GenerateBatch, accept).unwrap();
        assert_eq!(notice, Some(Notice::BatchGenerated(vec![5; 5])));

        s.dispatch(Command::Adjust { field: Field::Max, delta: 3 }, accept).unwrap();
        assert_eq!(s.range(), (5, 8));

        s.dispatch(Command::SetInput { field: Field::Min, text: "6".into() }, accept)
            .unwrap();
        assert_eq!(s.view().range_label, "6 - 8");
    }

    #[test]
    fn test_dispatch_propagates_range_error() {
        let mut s = session();
        s.set_range(9, 1);
        assert!(matches!(
            s.dispatch(Command::Generate, accept),
            Err(RandomizerError::RangeInvalid { min: 9, max: 1 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RandomizerConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_oversized_config_rejected_before_allocating() {
        let config = RandomizerConfig {
            history_capacity: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(Session::new(config), Err(RandomizerError::ConfigInvalid(_))));

        let config = RandomizerConfig {
            batch_size: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(Session::new(config), Err(RandomizerError::ConfigInvalid(_))));
    }

    #[test]
    fn test_zero_input_is_not_defaulted() {
        let mut s = session();
        s.set_range(0, 0);
        assert_eq!(s.range(), (0, 0));
        assert_eq!(s.generate().unwrap().number, 0);
    }
}
