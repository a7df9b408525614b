//! Ready-to-render text for the page.
//!
//! The page only copies these strings into the DOM; no formatting decisions
//! are left to JS.

use serde::Serialize;

use crate::command::join_numbers;
use crate::types::HistoryEntry;

/// Placeholder shown before the first generation and after a reset.
pub const EMPTY_RESULT: &str = "—";

/// What the result area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultDisplay {
    #[default]
    Empty,
    Single(i64),
    Batch(Vec<i64>),
}

impl ResultDisplay {
    pub fn text(&self) -> String {
        match self {
            ResultDisplay::Empty => EMPTY_RESULT.to_string(),
            ResultDisplay::Single(n) => n.to_string(),
            ResultDisplay::Batch(numbers) => join_numbers(numbers),
        }
    }
}

pub fn range_label(min: i64, max: i64) -> String {
    format!("{} - {}", min, max)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub id: u64,
    pub number: String,
    pub range: String,
    pub time: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            number: entry.number.to_string(),
            range: range_label(entry.min, entry.max),
            time: entry.timestamp.format("%H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub result: String,
    pub range_label: String,
    pub history: Vec<HistoryRow>,
    /// True when the empty-state indicator should be shown instead of rows.
    pub history_empty: bool,
}

impl View {
    pub fn render<'a>(
        display: &ResultDisplay,
        min: i64,
        max: i64,
        history: impl Iterator<Item = &'a HistoryEntry>,
    ) -> Self {
        let history: Vec<HistoryRow> = history.map(HistoryRow::from).collect();
        Self {
            result: display.text(),
            range_label: range_label(min, max),
            history_empty: history.is_empty(),
            history,
        }
    }
}
