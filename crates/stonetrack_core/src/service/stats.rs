//! Aggregate statistics derived from store collections.
//!
//! # Responsibility
//! - Compute day completion, stone and category frequencies, streaks and
//!   quest partitions for profile/skill-map style views.
//!
//! # Invariants
//! - Pure functions over borrowed data; nothing here mutates state.
//! - Only ids that resolve to a catalog stone count toward completion and
//!   category totals. Unknown ids stored by a toggle are ignored.
//! - Sorting is stable: ties keep catalog order.

use crate::model::quest::Quest;
use crate::model::stone::{Category, Stone};
use crate::model::training_log::TrainingLog;
use crate::model::user::User;
use crate::service::movement_binder::MovementSnapshot;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Completed-versus-total stones for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCompletion {
    pub completed: usize,
    pub total: usize,
    /// Rounded `completed / total * 100`; `0` for an empty catalog.
    pub percent: u32,
}

pub fn day_completion(log: &TrainingLog, stones: &[Stone]) -> DayCompletion {
    let completed = stones
        .iter()
        .filter(|stone| log.is_completed(&stone.id))
        .count();
    DayCompletion {
        completed,
        total: stones.len(),
        percent: rounded_percent(completed, stones.len()),
    }
}

/// How often one stone appears across all logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoneFrequency {
    pub stone_id: String,
    pub name: String,
    pub category: Category,
    pub count: usize,
    /// Rounded share of all logs containing this stone.
    pub percent: u32,
}

/// Frequency per catalog stone, most frequent first.
pub fn stone_frequency(stones: &[Stone], logs: &[TrainingLog]) -> Vec<StoneFrequency> {
    let mut frequencies: Vec<StoneFrequency> = stones
        .iter()
        .map(|stone| {
            let count = logs
                .iter()
                .filter(|log| log.is_completed(&stone.id))
                .count();
            StoneFrequency {
                stone_id: stone.id.clone(),
                name: stone.name.clone(),
                category: stone.category,
                count,
                percent: rounded_percent(count, logs.len()),
            }
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}

/// The `limit` most practiced stones.
pub fn top_stones(stones: &[Stone], logs: &[TrainingLog], limit: usize) -> Vec<StoneFrequency> {
    let mut frequencies = stone_frequency(stones, logs);
    frequencies.truncate(limit);
    frequencies
}

/// Completed-stone count per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFrequency {
    pub category: Category,
    /// Completions across all logs of stones in this category.
    pub count: usize,
    /// Number of catalog stones in this category.
    pub stone_count: usize,
    /// `count / stone_count * 100`, unrounded and unbounded.
    pub percent: f64,
}

/// Category totals for every category present in the catalog, highest
/// count first.
pub fn category_breakdown(stones: &[Stone], logs: &[TrainingLog]) -> Vec<CategoryFrequency> {
    let mut breakdown: Vec<CategoryFrequency> = Vec::new();
    for stone in stones {
        match breakdown
            .iter_mut()
            .find(|entry| entry.category == stone.category)
        {
            Some(entry) => entry.stone_count += 1,
            None => breakdown.push(CategoryFrequency {
                category: stone.category,
                count: 0,
                stone_count: 1,
                percent: 0.0,
            }),
        }
    }

    for log in logs {
        for stone_id in &log.completed_stones {
            let Some(stone) = stones.iter().find(|stone| &stone.id == stone_id) else {
                continue;
            };
            if let Some(entry) = breakdown
                .iter_mut()
                .find(|entry| entry.category == stone.category)
            {
                entry.count += 1;
            }
        }
    }

    for entry in &mut breakdown {
        entry.percent = entry.count as f64 / entry.stone_count as f64 * 100.0;
    }
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));
    breakdown
}

/// Consecutive logged days ending today.
///
/// `0` unless the latest log is dated today, so a log planned for a future
/// day also resets the streak.
pub fn current_streak(logs: &[TrainingLog], today: NaiveDate) -> u32 {
    if most_recent_session(logs).map(|log| log.date) != Some(today) {
        return 0;
    }
    let logged: HashSet<NaiveDate> = logs.iter().map(|log| log.date).collect();
    let mut streak = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        if !logged.contains(&current) {
            break;
        }
        streak += 1;
        day = current.checked_sub_days(Days::new(1));
    }
    streak
}

/// The log with the latest date.
pub fn most_recent_session(logs: &[TrainingLog]) -> Option<&TrainingLog> {
    logs.iter().max_by_key(|log| log.date)
}

/// Quests split the way the quest page lists them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestBoard<'a> {
    /// In the user's active set and not yet complete.
    pub active: Vec<&'a Quest>,
    /// Neither active nor complete.
    pub other: Vec<&'a Quest>,
    /// Complete, whether active or not.
    pub completed: Vec<&'a Quest>,
}

impl<'a> QuestBoard<'a> {
    pub fn partition(quests: &'a [Quest], user: &User) -> Self {
        let mut board = Self::default();
        for quest in quests {
            if quest.is_completed() {
                board.completed.push(quest);
            } else if user.is_quest_active(&quest.id) {
                board.active.push(quest);
            } else {
                board.other.push(quest);
            }
        }
        board
    }
}

/// Number of top stones listed on the profile.
pub const PROFILE_TOP_STONES: usize = 5;

/// Profile summary over one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub total_sessions: usize,
    pub current_streak: u32,
    pub most_recent_session: Option<NaiveDate>,
    pub today: DayCompletion,
    pub top_stones: Vec<StoneFrequency>,
    pub categories: Vec<CategoryFrequency>,
}

impl ProfileStats {
    /// Summarizes `snapshot`, using its today's log date as "today".
    pub fn from_snapshot(snapshot: &MovementSnapshot) -> Self {
        let logs = &snapshot.training_logs;
        let stones = &snapshot.stones;
        Self {
            total_sessions: logs.len(),
            current_streak: current_streak(logs, snapshot.today_log.date),
            most_recent_session: most_recent_session(logs).map(|log| log.date),
            today: day_completion(&snapshot.today_log, stones),
            top_stones: top_stones(stones, logs, PROFILE_TOP_STONES),
            categories: category_breakdown(stones, logs),
        }
    }
}

fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::{
        category_breakdown, current_streak, day_completion, most_recent_session,
        stone_frequency, top_stones, QuestBoard,
    };
    use crate::model::quest::Quest;
    use crate::model::stone::Category;
    use crate::model::training_log::TrainingLog;
    use crate::seed::{default_quests, default_stones, default_user};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn day_completion_ignores_unknown_ids_and_rounds() {
        let stones = default_stones();
        let log = TrainingLog::with_stones(date(2024, 3, 1), ["core", "rhythm", "made-up"]);

        let completion = day_completion(&log, &stones);
        assert_eq!(completion.completed, 2);
        assert_eq!(completion.total, 8);
        assert_eq!(completion.percent, 25);

        assert_eq!(day_completion(&log, &[]).percent, 0);
    }

    #[test]
    fn stone_frequency_sorts_by_count_with_catalog_order_on_ties() {
        let stones = default_stones();
        let logs = vec![
            TrainingLog::with_stones(date(2024, 3, 1), ["core", "sprint"]),
            TrainingLog::with_stones(date(2024, 3, 2), ["core"]),
            TrainingLog::with_stones(date(2024, 3, 3), ["rhythm"]),
        ];

        let frequency = stone_frequency(&stones, &logs);
        assert_eq!(frequency[0].stone_id, "core");
        assert_eq!(frequency[0].count, 2);
        assert_eq!(frequency[0].percent, 67);
        // rhythm precedes sprint in the catalog.
        assert_eq!(frequency[1].stone_id, "rhythm");
        assert_eq!(frequency[2].stone_id, "sprint");
        assert_eq!(frequency.len(), 8);

        assert_eq!(top_stones(&stones, &logs, 2).len(), 2);
        assert!(stone_frequency(&stones, &[]).iter().all(|f| f.percent == 0));
    }

    #[test]
    fn category_breakdown_counts_completions_per_category() {
        let stones = default_stones();
        let logs = vec![
            TrainingLog::with_stones(date(2024, 3, 1), ["sprint", "handstand", "ghost"]),
            TrainingLog::with_stones(date(2024, 3, 2), ["sprint"]),
        ];

        let breakdown = category_breakdown(&stones, &logs);
        assert_eq!(breakdown.len(), 8);
        assert_eq!(breakdown[0].category, Category::Power);
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[0].stone_count, 1);
        assert!((breakdown[0].percent - 200.0).abs() < f64::EPSILON);
        assert_eq!(breakdown[1].category, Category::Balance);
        assert_eq!(breakdown.iter().map(|entry| entry.count).sum::<usize>(), 3);
    }

    #[test]
    fn streak_requires_a_log_today_and_stops_at_first_gap() {
        let today = date(2024, 3, 10);
        let logs = vec![
            TrainingLog::new(date(2024, 3, 10)),
            TrainingLog::new(date(2024, 3, 9)),
            TrainingLog::new(date(2024, 3, 8)),
            TrainingLog::new(date(2024, 3, 6)),
        ];
        assert_eq!(current_streak(&logs, today), 3);
        assert_eq!(current_streak(&logs[1..], today), 0);
        assert_eq!(current_streak(&[], today), 0);
    }

    #[test]
    fn streak_is_zero_when_a_later_day_is_already_logged() {
        let today = date(2024, 3, 10);
        let mut logs = vec![
            TrainingLog::new(date(2024, 3, 10)),
            TrainingLog::new(date(2024, 3, 9)),
        ];
        assert_eq!(current_streak(&logs, today), 2);

        logs.push(TrainingLog::new(date(2024, 3, 20)));
        assert_eq!(current_streak(&logs, today), 0);
    }

    #[test]
    fn most_recent_session_picks_latest_date() {
        let logs = vec![
            TrainingLog::new(date(2024, 3, 2)),
            TrainingLog::new(date(2024, 3, 9)),
            TrainingLog::new(date(2024, 3, 4)),
        ];
        assert_eq!(most_recent_session(&logs).unwrap().date, date(2024, 3, 9));
        assert!(most_recent_session(&[]).is_none());
    }

    #[test]
    fn quest_board_partitions_seeded_quests() {
        let quests = default_quests();
        let user = default_user();

        fn ids(list: &[&Quest]) -> Vec<String> {
            list.iter().map(|quest| quest.id.clone()).collect()
        }

        let board = QuestBoard::partition(&quests, &user);
        assert_eq!(ids(&board.active), vec!["quest1", "quest3"]);
        assert_eq!(ids(&board.other), vec!["quest2"]);
        assert_eq!(ids(&board.completed), vec!["quest4"]);
    }
}
