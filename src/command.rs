//! User actions, the notices they produce, and keyboard shortcuts.

use std::fmt;

use crate::types::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate,
    GenerateBatch,
    ClearHistory,
    ResetAll,
    /// Increment/decrement helper on one of the inputs.
    Adjust { field: Field, delta: i64 },
    SetRange { min: i64, max: i64 },
    /// Raw text typed into an input.
    SetInput { field: Field, text: String },
}

impl Command {
    /// Prompt the user must accept before a destructive command runs.
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            Command::ClearHistory => Some("Are you sure you want to clear the entire history?"),
            Command::ResetAll => Some("Reset all settings and history?"),
            _ => None,
        }
    }
}

/// Informational messages shown to the user after a command completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BatchGenerated(Vec<i64>),
    HistoryCleared,
    ResetDone,
    RangeSet { min: i64, max: i64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::BatchGenerated(numbers) => {
                write!(f, "Generated {} numbers: {}", numbers.len(), join_numbers(numbers))
            }
            Notice::HistoryCleared => write!(f, "History cleared!"),
            Notice::ResetDone => write!(f, "All settings have been reset!"),
            Notice::RangeSet { min, max } => write!(f, "Range set: {} - {}", min, max),
        }
    }
}

/// Comma-joined list, as shown for a batch.
pub fn join_numbers(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map a key event to a command.
///
/// `code` is the DOM `KeyboardEvent.code`/`key` value. Enter generates while
/// typing in a range input; Space generates anywhere else; Ctrl+R resets.
pub fn shortcut(code: &str, ctrl: bool, in_input: bool) -> Option<Command> {
    match code {
        "Enter" | "NumpadEnter" if in_input => Some(Command::Generate),
        "Space" if !in_input => Some(Command::Generate),
        "KeyR" if ctrl => Some(Command::ResetAll),
        _ => None,
    }
}
