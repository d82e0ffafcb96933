//! Signed period arithmetic on ordinals.
//!
//! Day and week periods are exact ordinal shifts. Month and year periods
//! move the (year, month) pair and clamp the day of month to the end of the
//! target month, so 2020-03-31 minus one month is 2020-02-29.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::gregorian::{self, MAX_ORDINAL};

/// Unit of a period. A batch of periods always shares one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    /// One calendar day.
    #[default]
    Day,
    /// Seven calendar days.
    Week,
    /// One calendar month, clamped to month end.
    Month,
    /// Twelve calendar months, clamped to month end.
    Year,
}

impl PeriodUnit {
    /// All units, shortest first.
    pub const ALL: [PeriodUnit; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Lowercase name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`PeriodUnit`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period unit: {0:?} (expected day, week, month or year)")]
pub struct ParsePeriodUnitError(pub String);

impl FromStr for PeriodUnit {
    type Err = ParsePeriodUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "days" | "d" => Ok(Self::Day),
            "week" | "weeks" | "w" => Ok(Self::Week),
            "month" | "months" | "m" => Ok(Self::Month),
            "year" | "years" | "y" => Ok(Self::Year),
            _ => Err(ParsePeriodUnitError(s.to_string())),
        }
    }
}

fn checked_ordinal(ordinal: i64) -> Result<i32, CalendarError> {
    if !(1..=i64::from(MAX_ORDINAL)).contains(&ordinal) {
        return Err(CalendarError::InvalidOrdinal { ordinal });
    }
    Ok(ordinal as i32)
}

/// Shifts `(year, month, day)` by `months`, clamping the day to the end of
/// the target month. Returns the resulting ordinal.
fn shift_months(year: i32, month: u8, day: u8, months: i64) -> Result<i32, CalendarError> {
    let month_index = i64::from(month) - 1 + months;
    let target_year = i64::from(year) + month_index.div_euclid(12);
    let target_month = (month_index.rem_euclid(12) + 1) as u8;

    let target_year = match i32::try_from(target_year) {
        Ok(y) if y >= 1 => y,
        _ => {
            return Err(CalendarError::InvalidOrdinal {
                ordinal: gregorian::days_before_year_wide(target_year) + 1,
            });
        }
    };

    let target_day = day.min(gregorian::days_in_month(target_year, target_month));
    let ordinal = gregorian::days_before_year(target_year)
        + gregorian::days_before_month(target_year, target_month)
        + i64::from(target_day);
    checked_ordinal(ordinal)
}

/// Applies `quantity` periods of `unit` to `ordinal`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidOrdinal`] if `ordinal` is not a valid
/// ordinal, or if the result would fall before 0001-01-01 or beyond
/// [`MAX_ORDINAL`].
///
/// # Example
///
/// ```
/// use tenor_calendar::gregorian::to_ordinal;
/// use tenor_calendar::{PeriodUnit, add_period};
///
/// let mar31 = to_ordinal(2020, 3, 31).unwrap();
/// let shifted = add_period(mar31, PeriodUnit::Month, -1).unwrap();
/// assert_eq!(shifted, to_ordinal(2020, 2, 29).unwrap());
/// ```
pub fn add_period(ordinal: i32, unit: PeriodUnit, quantity: i32) -> Result<i32, CalendarError> {
    let quantity = i64::from(quantity);
    match unit {
        PeriodUnit::Day => {
            checked_ordinal(i64::from(ordinal))?;
            checked_ordinal(i64::from(ordinal) + quantity)
        }
        PeriodUnit::Week => {
            checked_ordinal(i64::from(ordinal))?;
            checked_ordinal(i64::from(ordinal) + 7 * quantity)
        }
        PeriodUnit::Month => {
            let (year, month, day) = gregorian::from_ordinal(ordinal)?;
            shift_months(year, month, day, quantity)
        }
        PeriodUnit::Year => {
            let (year, month, day) = gregorian::from_ordinal(ordinal)?;
            shift_months(year, month, day, 12 * quantity)
        }
    }
}

/// Subtracts `quantity` periods of `unit` from `ordinal`.
///
/// Equivalent to [`add_period`] with the quantity negated; `i32::MIN` is
/// handled without overflow.
///
/// # Errors
///
/// Same as [`add_period`].
pub fn sub_period(ordinal: i32, unit: PeriodUnit, quantity: i32) -> Result<i32, CalendarError> {
    match quantity.checked_neg() {
        Some(negated) => add_period(ordinal, unit, negated),
        // |i32::MIN| periods of any unit leaves the ordinal range.
        None => Err(CalendarError::InvalidOrdinal {
            ordinal: i64::from(ordinal) + i64::from(i32::MAX) + 1,
        }),
    }
}

/// Number of days spanned by `quantity` periods of `unit` starting at `ordinal`.
///
/// # Errors
///
/// Same as [`add_period`].
pub fn period_length_in_days(
    ordinal: i32,
    unit: PeriodUnit,
    quantity: i32,
) -> Result<i32, CalendarError> {
    let end = add_period(ordinal, unit, quantity)?;
    Ok(end - ordinal)
}
