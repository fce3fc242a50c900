//! Observable projection of a training store for views.
//!
//! # Responsibility
//! - Delegate every mutation to the wrapped `TrainingStore`.
//! - Keep a snapshot of the collections plus the derived "today's log".
//! - Notify subscribers synchronously after each successful mutation.
//!
//! # Invariants
//! - The snapshot is refreshed before any subscriber runs and before the
//!   mutating call returns, so every later read observes the mutation.
//! - A synthesized today's log is never written back to the store.
//! - No toggle/merge logic lives here; the store is the single writer.

use crate::model::quest::Quest;
use crate::model::stone::Stone;
use crate::model::training_log::TrainingLog;
use crate::model::user::User;
use crate::store::{DomainStore, TrainingStore};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// Read-only view state handed to subscribers and readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementSnapshot {
    pub stones: Vec<Stone>,
    pub training_logs: Vec<TrainingLog>,
    pub current_user: User,
    pub quests: Vec<Quest>,
    /// Stored log for today, or an unsaved empty one.
    pub today_log: TrainingLog,
}

impl MovementSnapshot {
    fn capture<S: TrainingStore>(store: &S) -> Self {
        Self {
            stones: store.stones().to_vec(),
            training_logs: store.training_logs().to_vec(),
            current_user: store.user().clone(),
            quests: store.quests().to_vec(),
            today_log: derive_today_log(store),
        }
    }
}

/// Today's stored log, or a synthesized empty log for today.
pub fn derive_today_log<S: TrainingStore + ?Sized>(store: &S) -> TrainingLog {
    let today = store.today();
    store
        .log_for(today)
        .cloned()
        .unwrap_or_else(|| TrainingLog::new(today))
}

/// Mutation that triggered a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum MovementChange {
    StoneToggled { log: TrainingLog },
    QuestProgressUpdated { quest: Quest },
    QuestActivationToggled { quest_id: String, active: bool },
    DayNoteSet { log: TrainingLog },
}

/// Handle returned by `MovementBinder::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&MovementChange, &MovementSnapshot)>;

/// Observable wrapper that owns a store and its view snapshot.
pub struct MovementBinder<S: TrainingStore = DomainStore> {
    store: S,
    snapshot: MovementSnapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: TrainingStore> MovementBinder<S> {
    /// Wraps `store` and derives the initial snapshot.
    pub fn new(store: S) -> Self {
        let snapshot = MovementSnapshot::capture(&store);
        Self {
            store,
            snapshot,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn snapshot(&self) -> &MovementSnapshot {
        &self.snapshot
    }

    pub fn stones(&self) -> &[Stone] {
        &self.snapshot.stones
    }

    pub fn training_logs(&self) -> &[TrainingLog] {
        &self.snapshot.training_logs
    }

    pub fn current_user(&self) -> &User {
        &self.snapshot.current_user
    }

    pub fn quests(&self) -> &[Quest] {
        &self.snapshot.quests
    }

    pub fn today_log(&self) -> &TrainingLog {
        &self.snapshot.today_log
    }

    /// Read-only access to the wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers a listener called after every successful mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&MovementChange, &MovementSnapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Toggles a stone on `date` (today when `None`).
    pub fn toggle_stone(&mut self, stone_id: &str, date: Option<NaiveDate>) -> TrainingLog {
        let log = self.store.toggle_stone_completion(stone_id, date);
        self.publish(MovementChange::StoneToggled { log: log.clone() });
        log
    }

    /// Updates quest progress. Unknown quests change nothing and notify nobody.
    pub fn update_quest_progress(&mut self, quest_id: &str, progress: i32) -> Option<Quest> {
        let quest = self.store.update_quest_progress(quest_id, progress)?;
        self.publish(MovementChange::QuestProgressUpdated {
            quest: quest.clone(),
        });
        Some(quest)
    }

    /// Flips a quest's activation. Returns `true` when now active.
    pub fn toggle_active_quest(&mut self, quest_id: &str) -> bool {
        let active = self.store.toggle_quest_activation(quest_id);
        self.publish(MovementChange::QuestActivationToggled {
            quest_id: quest_id.to_string(),
            active,
        });
        active
    }

    /// Attaches a note to an existing day. Days without a log are skipped.
    pub fn add_training_note(&mut self, date: NaiveDate, note: &str) -> Option<TrainingLog> {
        let log = self.store.set_day_note(date, note)?;
        self.publish(MovementChange::DayNoteSet { log: log.clone() });
        Some(log)
    }

    /// Re-derives the snapshot without a mutation, e.g. after midnight.
    pub fn refresh(&mut self) {
        self.snapshot = MovementSnapshot::capture(&self.store);
    }

    fn publish(&mut self, change: MovementChange) {
        self.refresh();
        debug!(
            "event=binder_publish module=service status=ok subscribers={} today={} today_completed={}",
            self.listeners.len(),
            self.snapshot.today_log.date,
            self.snapshot.today_log.completed_count()
        );
        for (_, listener) in &mut self.listeners {
            listener(&change, &self.snapshot);
        }
    }
}
