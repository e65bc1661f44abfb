use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::bucket::{CellFlags, DayIndex};
use crate::datetime;
use crate::filter::ViewFilter;
use crate::grid::MonthGrid;
use crate::task::Task;
use crate::view::CalendarViewState;

/// One day cell of the month grid, annotated with its bucketed and
/// filtered tasks.
#[derive(Debug)]
pub struct DayCell<'a> {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub tasks: Vec<&'a Task>,
    pub flags: CellFlags,
}

#[derive(Debug)]
pub struct MonthViewModel<'a> {
    pub grid: MonthGrid,
    pub title: String,
    pub cells: Vec<DayCell<'a>>,
}

#[derive(Debug)]
pub struct WeekCell<'a> {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub is_today: bool,
    pub tasks: Vec<&'a Task>,
    pub flags: CellFlags,
}

#[derive(Debug)]
pub struct WeekViewModel<'a> {
    pub title: String,
    pub days: Vec<WeekCell<'a>>,
}

/// Tasks sharing one time-of-day label in the day agenda.
#[derive(Debug)]
pub struct TimeSlot<'a> {
    pub time: String,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug)]
pub struct DayAgenda<'a> {
    pub date: NaiveDate,
    pub title: String,
    pub total: usize,
    pub slots: Vec<TimeSlot<'a>>,
    pub unscheduled: Vec<&'a Task>,
}

/// Month grid with every day cell bucketed through a single index build,
/// filtered, and flagged.
#[tracing::instrument(skip(state, tasks, filter))]
pub fn month_view<'a>(
    state: &CalendarViewState,
    tasks: &'a [Task],
    filter: &ViewFilter,
    tz: Tz,
    now: DateTime<Utc>,
) -> MonthViewModel<'a> {
    let grid = MonthGrid::for_date(state.cursor);
    let index = DayIndex::build(tasks, tz);
    let today = datetime::today_in(tz, now);

    let cells = (1..=grid.days_in_month)
        .filter_map(|day| {
            let date = grid.date_of(day)?;
            let bucketed = filter.apply(index.for_date(date));
            let flags = CellFlags::scan(&bucketed, tz, now);
            Some(DayCell {
                day,
                date,
                is_today: date == today,
                is_selected: state.selected == Some(date),
                tasks: bucketed,
                flags,
            })
        })
        .collect::<Vec<_>>();

    debug!(
        year = grid.year,
        month0 = grid.month0,
        cells = cells.len(),
        "assembled month view"
    );

    MonthViewModel {
        grid,
        title: datetime::format_month_display(state.cursor),
        cells,
    }
}

/// Seven cells, Sunday through Saturday, around the state's anchor.
#[tracing::instrument(skip(state, tasks, filter))]
pub fn week_view<'a>(
    state: &CalendarViewState,
    tasks: &'a [Task],
    filter: &ViewFilter,
    tz: Tz,
    now: DateTime<Utc>,
) -> WeekViewModel<'a> {
    let week = state.week_days();
    let index = DayIndex::build(tasks, tz);
    let today = datetime::today_in(tz, now);

    let days = week
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let bucketed = filter.apply(index.for_date(date));
            let flags = CellFlags::scan(&bucketed, tz, now);
            WeekCell {
                date,
                weekday: datetime::SHORT_WEEKDAYS[i],
                is_today: date == today,
                tasks: bucketed,
                flags,
            }
        })
        .collect();

    WeekViewModel {
        title: datetime::week_range_text(&week),
        days,
    }
}

/// Flat agenda for the anchor day, grouped by the free-form time label.
/// Slots with a readable clock time come first in clock order; the rest
/// follow alphabetically; timeless tasks land in `unscheduled`.
#[tracing::instrument(skip(state, tasks, filter))]
pub fn day_agenda<'a>(
    state: &CalendarViewState,
    tasks: &'a [Task],
    filter: &ViewFilter,
    tz: Tz,
    now: DateTime<Utc>,
) -> DayAgenda<'a> {
    let date = state.anchor();
    let index = DayIndex::build(tasks, tz);
    let bucketed = filter.apply(index.for_date(date));
    let total = bucketed.len();

    let mut by_time: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
    let mut unscheduled: Vec<&Task> = Vec::new();
    for task in bucketed {
        match task.time.as_deref().map(str::trim) {
            Some(time) if !time.is_empty() => {
                by_time.entry(time.to_string()).or_default().push(task);
            }
            _ => unscheduled.push(task),
        }
    }

    let mut slots: Vec<TimeSlot<'a>> = by_time
        .into_iter()
        .map(|(time, tasks)| TimeSlot { time, tasks })
        .collect();
    slots.sort_by_key(|slot| match datetime::parse_clock_time(&slot.time) {
        Some((hour, minute)) => (0u8, hour * 60 + minute),
        None => (1u8, 0),
    });

    debug!(%date, total, slots = slots.len(), "assembled day agenda");

    DayAgenda {
        date,
        title: datetime::format_english_date(date),
        total,
        slots,
        unscheduled,
    }
}
