//! Quest goal model.
//!
//! # Responsibility
//! - Define progress-tracked goals linked to catalog stones.
//! - Own the single completion rule for quests.
//!
//! # Invariants
//! - Completion is derived: a quest is complete iff `progress >= 100`.
//! - There is no independently settable completion flag. The `completed`
//!   field on the wire is output-only and ignored on input.
//! - `progress` is stored as given; callers keep it within 0..=100.

use crate::model::stone::StoneId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier of a quest (for example `"quest1"`).
pub type QuestId = String;

/// Progress value at and above which a quest counts as complete.
pub const QUEST_COMPLETE_PROGRESS: i32 = 100;

/// Long-term goal with percentage progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "QuestWire", from = "QuestWire")]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub description: String,
    pub target_date: Option<NaiveDate>,
    progress: i32,
    /// Ordered as authored; used for display only.
    pub related_stones: Vec<StoneId>,
}

impl Quest {
    pub fn new(
        id: impl Into<QuestId>,
        name: impl Into<String>,
        description: impl Into<String>,
        progress: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            target_date: None,
            progress,
            related_stones: Vec::new(),
        }
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    pub fn with_related_stones<I, S>(mut self, stone_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StoneId>,
    {
        self.related_stones = stone_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Replaces progress; completion follows automatically.
    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress;
    }

    pub fn is_completed(&self) -> bool {
        self.progress >= QUEST_COMPLETE_PROGRESS
    }

    /// Whether progress lies in the conventional 0..=100 range.
    pub fn is_progress_in_range(&self) -> bool {
        (0..=QUEST_COMPLETE_PROGRESS).contains(&self.progress)
    }
}

#[derive(Serialize, Deserialize)]
struct QuestWire {
    id: QuestId,
    name: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_date: Option<NaiveDate>,
    #[serde(default)]
    completed: bool,
    progress: i32,
    #[serde(default)]
    related_stones: Vec<StoneId>,
}

impl From<Quest> for QuestWire {
    fn from(value: Quest) -> Self {
        Self {
            completed: value.is_completed(),
            id: value.id,
            name: value.name,
            description: value.description,
            target_date: value.target_date,
            progress: value.progress,
            related_stones: value.related_stones,
        }
    }
}

impl From<QuestWire> for Quest {
    fn from(value: QuestWire) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            target_date: value.target_date,
            progress: value.progress,
            related_stones: value.related_stones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Quest;

    #[test]
    fn completion_tracks_progress_threshold() {
        let mut quest = Quest::new("q", "Split", "Full side split", 60);
        assert!(!quest.is_completed());

        quest.set_progress(100);
        assert!(quest.is_completed());

        quest.set_progress(99);
        assert!(!quest.is_completed());
    }

    #[test]
    fn out_of_range_progress_is_kept_verbatim() {
        let mut quest = Quest::new("q", "Split", "Full side split", 0);
        quest.set_progress(140);
        assert_eq!(quest.progress(), 140);
        assert!(quest.is_completed());
        assert!(!quest.is_progress_in_range());

        quest.set_progress(-5);
        assert_eq!(quest.progress(), -5);
        assert!(!quest.is_progress_in_range());
    }
}
