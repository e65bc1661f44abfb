use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::trace;

use crate::task::{Priority, Status, Task};

/// Tasks whose anchor reads as exactly `(year, month0, day)` on a wall
/// clock in `tz`. Tasks with an absent or unparseable anchor never match.
pub fn bucket_for_day<'a>(
    tasks: &'a [Task],
    tz: Tz,
    year: i32,
    month0: u32,
    day: u32,
) -> Vec<&'a Task> {
    let Some(target) = NaiveDate::from_ymd_opt(year, month0 + 1, day) else {
        return Vec::new();
    };
    let hits: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.start_date_in(tz) == Some(target))
        .collect();
    trace!(%target, hits = hits.len(), "day bucket");
    hits
}

/// One bucket per supplied week day. Both this and the month path compare
/// through the same named-timezone normalization, so the views cannot
/// disagree about a border-of-day timestamp.
pub fn bucket_for_week<'a>(
    tasks: &'a [Task],
    tz: Tz,
    week_days: &[NaiveDate; 7],
) -> [Vec<&'a Task>; 7] {
    std::array::from_fn(|i| {
        tasks
            .iter()
            .filter(|task| task.start_date_in(tz) == Some(week_days[i]))
            .collect()
    })
}

/// Anchor-date index built once per render. Month rendering over it is
/// O(tasks + days) instead of O(days x tasks).
#[derive(Debug)]
pub struct DayIndex<'a> {
    by_date: BTreeMap<NaiveDate, Vec<&'a Task>>,
}

impl<'a> DayIndex<'a> {
    #[tracing::instrument(skip(tasks))]
    pub fn build(tasks: &'a [Task], tz: Tz) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
        for task in tasks {
            let Some(date) = task.start_date_in(tz) else {
                continue;
            };
            by_date.entry(date).or_default().push(task);
        }
        trace!(dates = by_date.len(), "built day index");
        Self { by_date }
    }

    pub fn for_date(&self, date: NaiveDate) -> &[&'a Task] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Per-cell indicator flags, derived by existence checks over an already
/// bucketed (and filtered) set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub has_high_priority: bool,
    pub has_overdue: bool,
    pub has_in_progress: bool,
}

impl CellFlags {
    pub fn scan(tasks: &[&Task], tz: Tz, now: DateTime<Utc>) -> Self {
        Self {
            has_high_priority: tasks.iter().any(|task| task.priority == Priority::High),
            has_overdue: tasks.iter().any(|task| task.is_overdue(tz, now)),
            has_in_progress: tasks.iter().any(|task| task.status == Status::InProgress),
        }
    }
}
