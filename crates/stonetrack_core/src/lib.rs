//! Core state manager for the Stonetrack movement-training tracker.
//! This crate is the single source of truth for training-log invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError, SeedConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quest::{Quest, QuestId, QUEST_COMPLETE_PROGRESS};
pub use model::stone::{Category, Stone, StoneId};
pub use model::training_log::{parse_log_date, DateParseError, TrainingLog};
pub use model::user::{Skill, SkillValidationError, User, SKILL_LEVEL_MAX, SKILL_LEVEL_MIN};
pub use seed::{default_quests, default_stones, default_user, generate_history, seeded_state};
pub use service::calendar::{month_grid, month_view, CalendarDay};
pub use service::movement_binder::{
    derive_today_log, MovementBinder, MovementChange, MovementSnapshot, SubscriptionId,
};
pub use service::provider::{has_movement_provider, provide, use_movement};
pub use service::stats::{DayCompletion, ProfileStats, QuestBoard, StoneFrequency};
pub use store::{DomainStore, InitialState, TrainingStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
