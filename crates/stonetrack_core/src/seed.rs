//! Initial data for a fresh store.
//!
//! # Responsibility
//! - Provide the fixed stone catalog, the seeded user and quest list.
//! - Generate a plausible training history from an injected random source.
//!
//! # Invariants
//! - The catalog has exactly eight stones with unique ids.
//! - Generated history holds at most one log per date, ordered oldest first,
//!   and always contains a log for `today`.
//! - The same `SeedConfig`, `today` and RNG state produce the same history.

use crate::config::SeedConfig;
use crate::model::quest::Quest;
use crate::model::stone::{Category, Stone};
use crate::model::training_log::TrainingLog;
use crate::model::user::{Skill, User};
use crate::store::InitialState;
use chrono::{Days, NaiveDate};
use log::debug;
use rand::Rng;
use std::collections::BTreeSet;

/// The fixed eight-stone catalog.
pub fn default_stones() -> Vec<Stone> {
    vec![
        Stone::new(
            "mobility",
            "Mobility",
            "Joint range of motion, tissue elasticity, and freedom of movement.",
            "🔄",
            Category::Mobility,
        ),
        Stone::new(
            "strength",
            "Strength",
            "Force production, static and isometric holds, and resistance.",
            "💪",
            Category::Strength,
        ),
        Stone::new(
            "rhythm",
            "Rhythm",
            "Timing, coordination with music, and cyclical movements.",
            "🎵",
            Category::Rhythm,
        ),
        Stone::new(
            "coordination",
            "Coordination",
            "Inter-limb timing, proprioception, and spatial awareness.",
            "🤹",
            Category::Coordination,
        ),
        Stone::new(
            "core",
            "Core",
            "Trunk stability, rotation power, and spinal alignment.",
            "⚙️",
            Category::Core,
        ),
        Stone::new(
            "sprint",
            "Sprint",
            "Explosive acceleration, top speed mechanics, and running form.",
            "⚡",
            Category::Power,
        ),
        Stone::new(
            "handstand",
            "Handstand",
            "Inverted balance, shoulder stability, and body alignment.",
            "🙌",
            Category::Balance,
        ),
        Stone::new(
            "gymnastics",
            "Gymnastics",
            "Bodyweight skills, apparatus work, and acrobatic movements.",
            "🤸",
            Category::Gymnastics,
        ),
    ]
}

/// The seeded profile with two active quests.
pub fn default_user() -> User {
    let skills = [
        ("skill1", "Handstand", Category::Balance, "Freestanding handstand with control", 3),
        ("skill2", "Cossack Squat", Category::Mobility, "Deep lateral squat with full range of motion", 4),
        ("skill3", "Muscle Up", Category::Strength, "Transition from hang to support on rings", 2),
        ("skill4", "Breakdance Footwork", Category::Rhythm, "Basic 6-step and variations", 3),
        ("skill5", "Sprint Start", Category::Power, "Explosive acceleration from blocks", 3),
    ]
    .into_iter()
    .map(|(id, name, category, description, level)| {
        Skill::new(id, name, category, description, level)
            .expect("seed skill levels are within 1..=5")
    })
    .collect();

    User {
        id: "user1".to_string(),
        name: "Alex".to_string(),
        bio: "Martial artist, dancer, and movement explorer. Balancing power with gymnastics."
            .to_string(),
        join_date: ymd(2024, 1, 15),
        skills,
        active_quests: ["quest1", "quest3"].into_iter().map(String::from).collect(),
        focus_categories: vec![Category::Balance, Category::Power, Category::Gymnastics],
    }
}

/// The seeded quest list; `quest4` starts complete.
pub fn default_quests() -> Vec<Quest> {
    vec![
        Quest::new(
            "quest1",
            "10s Handstand Hold",
            "Achieve a consistent 10-second freestanding handstand",
            70,
        )
        .with_target_date(ymd(2024, 6, 15))
        .with_related_stones(["handstand", "core", "strength"]),
        Quest::new(
            "quest2",
            "Full Side Split",
            "Achieve a full flat side split with proper alignment",
            60,
        )
        .with_target_date(ymd(2024, 5, 30))
        .with_related_stones(["mobility"]),
        // "power" is a category, not a stone id; kept as authored.
        Quest::new(
            "quest3",
            "5s Sprint Start",
            "Perfect a 5-second explosive sprint start sequence",
            40,
        )
        .with_target_date(ymd(2024, 7, 1))
        .with_related_stones(["sprint", "power", "coordination"]),
        Quest::new(
            "quest4",
            "Gymnastics Sequence",
            "Create a 60-second original gymnastics sequence",
            100,
        )
        .with_related_stones(["gymnastics", "coordination", "mobility"]),
    ]
}

/// Generates history for `today` and the `config.history_days` days before.
///
/// Day offsets are walked from oldest to newest. A past day is kept with
/// `day_inclusion_probability`; each stone of `stones` is completed with
/// `stone_completion_probability`; offsets divisible by `note_every_nth_day`
/// get `note_text`.
pub fn generate_history<R: Rng + ?Sized>(
    stones: &[Stone],
    today: NaiveDate,
    config: &SeedConfig,
    rng: &mut R,
) -> Vec<TrainingLog> {
    let (day_probability, stone_probability) = config.clamped();
    let mut logs = Vec::with_capacity(config.history_days as usize + 1);

    for offset in (0..=config.history_days).rev() {
        let Some(date) = today.checked_sub_days(Days::new(u64::from(offset))) else {
            continue;
        };
        if offset > 0 && !rng.gen_bool(day_probability) {
            continue;
        }

        let completed_stones: BTreeSet<String> = stones
            .iter()
            .filter(|_| rng.gen_bool(stone_probability))
            .map(|stone| stone.id.clone())
            .collect();
        let note = (config.note_every_nth_day > 0 && offset % config.note_every_nth_day == 0)
            .then(|| config.note_text.clone());

        logs.push(TrainingLog {
            date,
            completed_stones,
            note,
        });
    }

    debug!(
        "event=seed_history module=seed status=ok today={} days={} logs={}",
        today,
        config.history_days + 1,
        logs.len()
    );
    logs
}

/// Builds the full initial state: default catalog, user, quests and a
/// generated history.
pub fn seeded_state<R: Rng + ?Sized>(
    today: NaiveDate,
    config: &SeedConfig,
    rng: &mut R,
) -> InitialState {
    let stones = default_stones();
    let training_logs = generate_history(&stones, today, config, rng);
    InitialState {
        stones,
        training_logs,
        user: default_user(),
        quests: default_quests(),
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid calendar dates")
}

#[cfg(test)]
mod tests {
    use super::{default_quests, default_stones, default_user};
    use std::collections::HashSet;

    #[test]
    fn catalog_has_eight_unique_stones() {
        let stones = default_stones();
        assert_eq!(stones.len(), 8);
        let ids: HashSet<_> = stones.iter().map(|stone| stone.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn seeded_user_and_quests_agree() {
        let user = default_user();
        let quests = default_quests();
        assert_eq!(user.skills.len(), 5);
        assert!(user.is_quest_active("quest1"));
        assert!(user.is_quest_active("quest3"));

        let completed: Vec<_> = quests
            .iter()
            .filter(|quest| quest.is_completed())
            .map(|quest| quest.id.as_str())
            .collect();
        assert_eq!(completed, vec!["quest4"]);
    }
}
