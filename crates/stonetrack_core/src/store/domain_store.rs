//! Domain store contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide read accessors over stones, logs, user and quests.
//! - Provide the four mutation primitives with deterministic merge rules.
//!
//! # Invariants
//! - Stone toggle creates a log lazily and only ever touches one log.
//! - Quest operations on unknown ids leave state unchanged.
//! - Day notes attach to existing logs only; they never create one.
//! - Identifiers are not checked against catalogs on write. Unknown stone
//!   ids and out-of-range progress are stored and logged at `warn`.

use crate::clock::{Clock, SystemClock};
use crate::model::quest::Quest;
use crate::model::stone::Stone;
use crate::model::training_log::TrainingLog;
use crate::model::user::User;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Collections injected into a new store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    pub stones: Vec<Stone>,
    pub training_logs: Vec<TrainingLog>,
    pub user: User,
    pub quests: Vec<Quest>,
}

/// Read/mutate contract of the domain store.
pub trait TrainingStore {
    /// Current calendar date according to the store's clock.
    fn today(&self) -> NaiveDate;
    fn stones(&self) -> &[Stone];
    fn training_logs(&self) -> &[TrainingLog];
    fn user(&self) -> &User;
    fn quests(&self) -> &[Quest];

    /// Toggles `stone_id` on the log for `date` (today when `None`).
    ///
    /// Returns the post-mutation log.
    fn toggle_stone_completion(&mut self, stone_id: &str, date: Option<NaiveDate>)
        -> TrainingLog;

    /// Sets quest progress; completion follows `progress >= 100`.
    ///
    /// Returns the updated quest, or `None` when `quest_id` is unknown.
    fn update_quest_progress(&mut self, quest_id: &str, progress: i32) -> Option<Quest>;

    /// Flips `quest_id` in the user's active set. Returns the new state.
    fn toggle_quest_activation(&mut self, quest_id: &str) -> bool;

    /// Overwrites the note on the existing log for `date`.
    ///
    /// Returns the updated log, or `None` when no log exists for `date`.
    fn set_day_note(&mut self, date: NaiveDate, note: &str) -> Option<TrainingLog>;

    fn stone(&self, stone_id: &str) -> Option<&Stone> {
        self.stones().iter().find(|stone| stone.id == stone_id)
    }

    fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.quests().iter().find(|quest| quest.id == quest_id)
    }

    fn log_for(&self, date: NaiveDate) -> Option<&TrainingLog> {
        self.training_logs().iter().find(|log| log.date == date)
    }
}

/// In-memory domain store with an injected clock.
pub struct DomainStore {
    clock: Box<dyn Clock>,
    stones: Vec<Stone>,
    training_logs: Vec<TrainingLog>,
    user: User,
    quests: Vec<Quest>,
}

impl DomainStore {
    /// Creates a store reading "today" from the local system clock.
    pub fn new(initial: InitialState) -> Self {
        Self::with_clock(initial, SystemClock)
    }

    /// Creates a store with a caller-provided clock.
    ///
    /// Duplicate dates in `initial.training_logs` are collapsed, the first
    /// occurrence wins.
    pub fn with_clock(initial: InitialState, clock: impl Clock + 'static) -> Self {
        let InitialState {
            stones,
            training_logs,
            user,
            quests,
        } = initial;

        let before = training_logs.len();
        let mut unique_logs: Vec<TrainingLog> = Vec::with_capacity(before);
        for log in training_logs {
            if unique_logs.iter().all(|existing| existing.date != log.date) {
                unique_logs.push(log);
            }
        }
        if unique_logs.len() != before {
            warn!(
                "event=store_init module=store status=warn duplicate_logs_dropped={}",
                before - unique_logs.len()
            );
        }

        info!(
            "event=store_init module=store status=ok stones={} logs={} quests={}",
            stones.len(),
            unique_logs.len(),
            quests.len()
        );

        Self {
            clock: Box::new(clock),
            stones,
            training_logs: unique_logs,
            user,
            quests,
        }
    }

    /// Consumes the store and returns its current collections.
    pub fn into_state(self) -> InitialState {
        InitialState {
            stones: self.stones,
            training_logs: self.training_logs,
            user: self.user,
            quests: self.quests,
        }
    }
}

impl TrainingStore for DomainStore {
    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn stones(&self) -> &[Stone] {
        &self.stones
    }

    fn training_logs(&self) -> &[TrainingLog] {
        &self.training_logs
    }

    fn user(&self) -> &User {
        &self.user
    }

    fn quests(&self) -> &[Quest] {
        &self.quests
    }

    fn toggle_stone_completion(
        &mut self,
        stone_id: &str,
        date: Option<NaiveDate>,
    ) -> TrainingLog {
        let date = date.unwrap_or_else(|| self.clock.today());
        if self.stone(stone_id).is_none() {
            warn!(
                "event=stone_toggle module=store status=warn reason=unknown_stone stone={} date={}",
                stone_id, date
            );
        }

        let (log, created) = match self.training_logs.iter_mut().find(|log| log.date == date) {
            Some(log) => {
                log.toggle_stone(stone_id);
                (log.clone(), false)
            }
            None => {
                let log = TrainingLog::with_stones(date, [stone_id]);
                self.training_logs.push(log.clone());
                (log, true)
            }
        };

        info!(
            "event=stone_toggle module=store status=ok date={} stone={} completed={} created={}",
            date,
            stone_id,
            log.is_completed(stone_id),
            created
        );
        log
    }

    fn update_quest_progress(&mut self, quest_id: &str, progress: i32) -> Option<Quest> {
        let Some(quest) = self.quests.iter_mut().find(|quest| quest.id == quest_id) else {
            debug!(
                "event=quest_progress module=store status=noop reason=unknown_quest quest={}",
                quest_id
            );
            return None;
        };

        quest.set_progress(progress);
        if !quest.is_progress_in_range() {
            warn!(
                "event=quest_progress module=store status=warn reason=progress_out_of_range quest={} progress={}",
                quest_id, progress
            );
        }
        info!(
            "event=quest_progress module=store status=ok quest={} progress={} completed={}",
            quest_id,
            progress,
            quest.is_completed()
        );
        Some(quest.clone())
    }

    fn toggle_quest_activation(&mut self, quest_id: &str) -> bool {
        let active = self.user.toggle_active_quest(quest_id);
        info!(
            "event=quest_activation module=store status=ok quest={} active={}",
            quest_id, active
        );
        active
    }

    fn set_day_note(&mut self, date: NaiveDate, note: &str) -> Option<TrainingLog> {
        let Some(log) = self.training_logs.iter_mut().find(|log| log.date == date) else {
            debug!(
                "event=day_note module=store status=noop reason=no_log date={}",
                date
            );
            return None;
        };

        log.note = Some(note.to_string());
        info!(
            "event=day_note module=store status=ok date={} note_chars={}",
            date,
            note.chars().count()
        );
        Some(log.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainStore, InitialState, TrainingStore};
    use crate::clock::FixedClock;
    use crate::model::training_log::TrainingLog;
    use crate::seed::{default_quests, default_stones, default_user};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn construction_collapses_duplicate_dates() {
        let day = date(2024, 3, 1);
        let initial = InitialState {
            stones: default_stones(),
            training_logs: vec![
                TrainingLog::with_stones(day, ["core"]),
                TrainingLog::with_stones(day, ["rhythm"]),
            ],
            user: default_user(),
            quests: default_quests(),
        };
        let store = DomainStore::with_clock(initial, FixedClock(day));

        assert_eq!(store.training_logs().len(), 1);
        assert!(store.log_for(day).unwrap().is_completed("core"));
    }

    #[test]
    fn into_state_returns_mutated_collections() {
        let day = date(2024, 3, 1);
        let initial = InitialState {
            stones: default_stones(),
            training_logs: Vec::new(),
            user: default_user(),
            quests: default_quests(),
        };
        let mut store = DomainStore::with_clock(initial, FixedClock(day));
        store.toggle_stone_completion("core", None);

        let state = store.into_state();
        assert_eq!(state.training_logs.len(), 1);
        assert_eq!(state.training_logs[0].date, day);
    }
}
