//! Month grid projection for calendar views.
//!
//! Weeks start on Sunday. The grid starts with one empty slot per weekday
//! before the 1st, then lists every day of the month; trailing slots are
//! left to the renderer.

use crate::model::stone::Stone;
use crate::model::training_log::TrainingLog;
use crate::service::stats::{day_completion, DayCompletion};
use chrono::{Datelike, NaiveDate};

/// One populated calendar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub log: Option<&'a TrainingLog>,
    pub completion: DayCompletion,
}

/// Dates of `year`/`month` preceded by Sunday-first alignment slots.
///
/// Returns `None` when `month` is not within `1..=12` or the year is out of
/// range.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<Option<NaiveDate>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_sunday() as usize;

    let mut grid: Vec<Option<NaiveDate>> = vec![None; offset];
    grid.extend(
        first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(Some),
    );
    Some(grid)
}

/// Month grid with each day's log and completion attached.
pub fn month_view<'a>(
    year: i32,
    month: u32,
    logs: &'a [TrainingLog],
    stones: &[Stone],
) -> Option<Vec<Option<CalendarDay<'a>>>> {
    let grid = month_grid(year, month)?;
    Some(
        grid.into_iter()
            .map(|slot| {
                slot.map(|date| {
                    let log = logs.iter().find(|log| log.date == date);
                    let completion = match log {
                        Some(log) => day_completion(log, stones),
                        None => day_completion(&TrainingLog::new(date), stones),
                    };
                    CalendarDay {
                        date,
                        log,
                        completion,
                    }
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::{month_grid, month_view};
    use crate::model::training_log::TrainingLog;
    use crate::seed::default_stones;
    use chrono::NaiveDate;

    #[test]
    fn grid_aligns_first_day_to_weekday() {
        // 2024-03-01 is a Friday.
        let grid = month_grid(2024, 3).unwrap();
        assert_eq!(grid.iter().take_while(|slot| slot.is_none()).count(), 5);
        assert_eq!(grid.iter().flatten().count(), 31);
        assert_eq!(grid[5], NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn grid_handles_leap_february_and_rejects_bad_month() {
        let grid = month_grid(2024, 2).unwrap();
        assert_eq!(grid.iter().flatten().count(), 29);
        assert!(month_grid(2024, 13).is_none());
    }

    #[test]
    fn month_view_attaches_logs_and_completion() {
        let stones = default_stones();
        let day = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        let logs = vec![TrainingLog::with_stones(day, ["core", "sprint"])];

        let view = month_view(2024, 9, &logs, &stones).unwrap();
        let cells: Vec<_> = view.iter().flatten().collect();
        let cell = cells.iter().find(|cell| cell.date == day).unwrap();
        assert_eq!(cell.log, Some(&logs[0]));
        assert_eq!(cell.completion.completed, 2);
        assert!(cells
            .iter()
            .filter(|cell| cell.date != day)
            .all(|cell| cell.log.is_none() && cell.completion.completed == 0));
    }
}
