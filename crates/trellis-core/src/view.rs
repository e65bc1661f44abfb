use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

/// Calendar cursor and selection as a plain value. Every transition is a
/// pure function returning the next state; the host UI owns storage and
/// reactivity, and re-derives view models from whichever state it keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarViewState {
    pub mode: ViewMode,
    pub cursor: NaiveDate,
    pub selected: Option<NaiveDate>,
}

impl CalendarViewState {
    /// Initial state: month view, cursor on today as read in `tz`.
    pub fn at_today(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            mode: ViewMode::Month,
            cursor: datetime::today_in(tz, now),
            selected: None,
        }
    }

    /// The date the week and day views pivot on.
    pub fn anchor(&self) -> NaiveDate {
        self.selected.unwrap_or(self.cursor)
    }

    pub fn year(&self) -> i32 {
        self.cursor.year()
    }

    pub fn month0(&self) -> u32 {
        self.cursor.month0()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whole-month shift, clamped to day 1 so a Jan 31 cursor can never
    /// land on an impossible Feb 31. Month moves drop the selection.
    #[must_use]
    pub fn next_month(self) -> Self {
        self.shift_months(1)
    }

    #[must_use]
    pub fn prev_month(self) -> Self {
        self.shift_months(-1)
    }

    fn shift_months(mut self, delta: i32) -> Self {
        let months = self.cursor.year() * 12 + self.cursor.month0() as i32 + delta;
        let year = months.div_euclid(12);
        let month0 = months.rem_euclid(12) as u32;
        self.cursor = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(self.cursor);
        self.selected = None;
        debug!(cursor = %self.cursor, "month shift");
        self
    }

    #[must_use]
    pub fn next_week(self) -> Self {
        self.shift_days(7, false)
    }

    #[must_use]
    pub fn prev_week(self) -> Self {
        self.shift_days(-7, false)
    }

    /// Day steps also move the selection so the day view tracks the
    /// cursor.
    #[must_use]
    pub fn next_day(self) -> Self {
        self.shift_days(1, true)
    }

    #[must_use]
    pub fn prev_day(self) -> Self {
        self.shift_days(-1, true)
    }

    fn shift_days(mut self, delta: i64, track_selection: bool) -> Self {
        self.cursor = self
            .cursor
            .checked_add_signed(Duration::days(delta))
            .unwrap_or(self.cursor);
        if track_selection {
            self.selected = Some(self.cursor);
        }
        self
    }

    /// Cursor and selection both jump to today as read in `tz`, so
    /// "today" stays timezone-consistent rather than host-clock-local.
    #[must_use]
    pub fn go_to_today(mut self, now: DateTime<Utc>, tz: Tz) -> Self {
        let today = datetime::today_in(tz, now);
        self.cursor = today;
        self.selected = Some(today);
        self
    }

    /// A click on a day cell of the cursor month: selects that date and
    /// drops into the day view. Out-of-range day numbers leave the state
    /// untouched.
    #[must_use]
    pub fn select_day(mut self, day: u32) -> Self {
        let Some(date) = NaiveDate::from_ymd_opt(self.year(), self.month0() + 1, day) else {
            return self;
        };
        self.selected = Some(date);
        self.mode = ViewMode::Day;
        self
    }

    /// The seven consecutive dates, Sunday through Saturday, around the
    /// anchor.
    pub fn week_days(&self) -> [NaiveDate; 7] {
        let anchor = self.anchor();
        let back = anchor.weekday().num_days_from_sunday() as i64;
        let sunday = anchor
            .checked_sub_signed(Duration::days(back))
            .unwrap_or(anchor);
        std::array::from_fn(|i| {
            sunday
                .checked_add_signed(Duration::days(i as i64))
                .unwrap_or(sunday)
        })
    }
}
