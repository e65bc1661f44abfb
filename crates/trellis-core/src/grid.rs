use chrono::{Datelike, NaiveDate};

/// Month-grid metadata for a renderer: where day 1 falls and how many day
/// cells to draw. Weekday indices are Sunday-based (0=Sun..6=Sat).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month0: u32,
    pub first_day_of_week: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    /// `month0` is 0-based (0=January). Returns `None` for an impossible
    /// year/month pair.
    pub fn compute(year: i32, month0: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
        Some(Self::for_date(first))
    }

    /// Grid for the month containing `date`. Infallible: the month of an
    /// existing date always has a first and a last day.
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        let month0 = date.month0();
        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(date);

        let (next_year, next_month0) = if month0 == 11 {
            (year + 1, 0)
        } else {
            (year, month0 + 1)
        };
        let days_in_month = NaiveDate::from_ymd_opt(next_year, next_month0 + 1, 1)
            .and_then(|next_first| next_first.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31);

        Self {
            year,
            month0,
            first_day_of_week: first.weekday().num_days_from_sunday(),
            days_in_month,
        }
    }

    /// Empty cells before day 1 when rows start on Sunday.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day_of_week
    }

    /// Calendar date of a day number in this month.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    /// Row-major week layout: `None` for leading/trailing blanks, day
    /// numbers elsewhere. Always whole rows of seven.
    pub fn weeks(&self) -> Vec<Vec<Option<u32>>> {
        let mut cells: Vec<Option<u32>> = Vec::new();
        cells.resize(self.leading_blanks() as usize, None);
        cells.extend((1..=self.days_in_month).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|row| row.to_vec()).collect()
    }
}
