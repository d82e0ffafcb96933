//! Validated proleptic Gregorian date.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::gregorian;

/// A date in the proleptic Gregorian calendar, on or after 0001-01-01.
///
/// Ordering follows the calendar, which is the same as ordering by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// Creates a new `Date` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the triple is not a valid
    /// date or lies beyond [`MAX_ORDINAL`](crate::MAX_ORDINAL).
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        gregorian::to_ordinal(year, i32::from(month), i32::from(day))?;
        Ok(Self { year, month, day })
    }

    /// Creates a `Date` from its ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOrdinal`] if `ordinal < 1`.
    pub fn from_ordinal(ordinal: i32) -> Result<Self, CalendarError> {
        let (year, month, day) = gregorian::from_ordinal(ordinal)?;
        Ok(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the ordinal (0001-01-01 is 1).
    pub fn ordinal(self) -> i32 {
        let days = gregorian::days_before_year(self.year)
            + i64::from(self.day_of_year_unchecked());
        // Constructors guarantee the ordinal fits.
        days as i32
    }

    /// Returns the day of the week, 0 = Monday through 6 = Sunday.
    pub fn weekday(self) -> u8 {
        gregorian::day_of_week(self.ordinal())
    }

    /// Returns the day of the year (1..=366).
    pub fn day_of_year(self) -> u16 {
        self.day_of_year_unchecked()
    }

    fn day_of_year_unchecked(self) -> u16 {
        let leap_shift = u16::from(self.month > 2 && gregorian::is_leap_year(self.year));
        gregorian::DAYS_BEFORE_MONTH[self.month as usize] + leap_shift + u16::from(self.day)
    }

    /// Returns `true` if this is the last day of its month.
    pub fn is_end_of_month(self) -> bool {
        self.day == gregorian::days_in_month(self.year, self.month)
    }

    /// Returns the next calendar date, or `None` past [`MAX_ORDINAL`](crate::MAX_ORDINAL).
    pub fn next(self) -> Option<Self> {
        self.ordinal()
            .checked_add(1)
            .and_then(|o| Self::from_ordinal(o).ok())
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = CalendarError;

    /// Converts a chrono date; years before 1 are rejected.
    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let month = value.month() as u8;
        let day = value.day() as u8;
        Self::new(value.year(), month, day)
    }
}

impl TryFrom<Date> for NaiveDate {
    type Error = CalendarError;

    /// chrono stops at year 262_142; later dates are rejected.
    fn try_from(value: Date) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(value.year, u32::from(value.month), u32::from(value.day))
            .ok_or_else(|| CalendarError::invalid_date(value.year, value.month, value.day))
    }
}
