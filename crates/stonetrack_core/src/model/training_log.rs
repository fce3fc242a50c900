//! Per-day training log model.
//!
//! # Responsibility
//! - Record which stones were completed on one calendar date.
//! - Provide the set-toggle primitive used by the domain store.
//!
//! # Invariants
//! - `completed_stones` has set semantics: no duplicates, order irrelevant.
//! - A log with an empty completed set is still a valid, retained record.
//! - Uniqueness of `date` across logs is enforced by the store, not here.

use crate::model::stone::StoneId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// ISO 8601 calendar date format used for log keys.
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Training record for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingLog {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub completed_stones: BTreeSet<StoneId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TrainingLog {
    /// Creates an empty log for `date` with no note.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            completed_stones: BTreeSet::new(),
            note: None,
        }
    }

    /// Creates a log whose completed set is exactly `stone_ids`.
    pub fn with_stones<I, S>(date: NaiveDate, stone_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StoneId>,
    {
        Self {
            date,
            completed_stones: stone_ids.into_iter().map(Into::into).collect(),
            note: None,
        }
    }

    /// Flips membership of `stone_id`.
    ///
    /// Returns `true` when the stone is completed after the call.
    pub fn toggle_stone(&mut self, stone_id: &str) -> bool {
        if self.completed_stones.remove(stone_id) {
            false
        } else {
            self.completed_stones.insert(stone_id.to_string());
            true
        }
    }

    pub fn is_completed(&self, stone_id: &str) -> bool {
        self.completed_stones.contains(stone_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_stones.len()
    }

    /// Returns the note when present and not blank.
    pub fn note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Error returned when date text is not an ISO `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid log date `{}`; expected YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for DateParseError {}

/// Parses an ISO calendar date such as `2024-03-01`.
///
/// Surrounding whitespace is ignored.
pub fn parse_log_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, LOG_DATE_FORMAT).map_err(|_| DateParseError {
        input: trimmed.to_string(),
    })
}
