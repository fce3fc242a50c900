//! Domain model for movement training data.
//!
//! # Responsibility
//! - Define canonical data structures owned by the domain store.
//! - Keep per-record invariants (set semantics, derived completion, skill
//!   level bounds) next to the data they constrain.
//!
//! # Invariants
//! - Stones are identified by a stable `StoneId`, quests by a `QuestId`.
//! - Logs are keyed by calendar date; uniqueness is a store invariant.

pub mod quest;
pub mod stone;
pub mod training_log;
pub mod user;
