use chrono::NaiveDate;
use stonetrack_core::{
    default_quests, default_stones, default_user, DomainStore, FixedClock, InitialState,
    TrainingLog, TrainingStore,
};
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_with_logs(today: NaiveDate, training_logs: Vec<TrainingLog>) -> DomainStore {
    let initial = InitialState {
        stones: default_stones(),
        training_logs,
        user: default_user(),
        quests: default_quests(),
    };
    DomainStore::with_clock(initial, FixedClock(today))
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn toggle_follows_set_semantics_on_a_fresh_date() {
    let day = date(2024, 3, 1);
    let mut store = store_with_logs(date(2024, 3, 10), Vec::new());

    let log = store.toggle_stone_completion("mobility", Some(day));
    assert_eq!(log.date, day);
    assert_eq!(log.completed_stones, set(&["mobility"]));

    let log = store.toggle_stone_completion("strength", Some(day));
    assert_eq!(log.completed_stones, set(&["mobility", "strength"]));

    let log = store.toggle_stone_completion("mobility", Some(day));
    assert_eq!(log.completed_stones, set(&["strength"]));

    assert_eq!(store.training_logs().len(), 1);
    assert_eq!(store.log_for(day), Some(&log));
}

#[test]
fn double_toggle_restores_the_original_set() {
    let day = date(2024, 3, 1);
    let mut store = store_with_logs(
        date(2024, 3, 10),
        vec![TrainingLog::with_stones(day, ["core", "rhythm"])],
    );

    for stone_id in ["core", "sprint"] {
        store.toggle_stone_completion(stone_id, Some(day));
        let log = store.toggle_stone_completion(stone_id, Some(day));
        assert_eq!(log.completed_stones, set(&["core", "rhythm"]));
    }
}

#[test]
fn toggle_without_date_targets_today() {
    let today = date(2024, 3, 10);
    let mut store = store_with_logs(today, Vec::new());

    let log = store.toggle_stone_completion("handstand", None);
    assert_eq!(log.date, today);
    assert!(store.log_for(today).unwrap().is_completed("handstand"));
}

#[test]
fn toggle_touches_only_the_target_log_and_keeps_emptied_logs() {
    let first = date(2024, 3, 1);
    let second = date(2024, 3, 2);
    let mut store = store_with_logs(
        date(2024, 3, 10),
        vec![
            TrainingLog::with_stones(first, ["core"]),
            TrainingLog::with_stones(second, ["core"]),
        ],
    );

    let log = store.toggle_stone_completion("core", Some(first));
    assert!(log.completed_stones.is_empty());
    assert_eq!(store.training_logs().len(), 2);
    assert_eq!(store.log_for(first).unwrap().completed_count(), 0);
    assert_eq!(store.log_for(second).unwrap().completed_stones, set(&["core"]));
}

#[test]
fn toggle_preserves_an_existing_note() {
    let day = date(2024, 3, 1);
    let mut seeded = TrainingLog::with_stones(day, ["core"]);
    seeded.note = Some("shoulders tight".to_string());
    let mut store = store_with_logs(date(2024, 3, 10), vec![seeded]);

    let log = store.toggle_stone_completion("sprint", Some(day));
    assert_eq!(log.note.as_deref(), Some("shoulders tight"));
}

#[test]
fn unknown_stone_ids_are_stored_without_validation() {
    let day = date(2024, 3, 1);
    let mut store = store_with_logs(date(2024, 3, 10), Vec::new());

    let log = store.toggle_stone_completion("juggling", Some(day));
    assert_eq!(log.completed_stones, set(&["juggling"]));
    assert!(store.stone("juggling").is_none());
}
