//! Proleptic Gregorian ordinal conversions.
//!
//! Ordinal 1 is 0001-01-01 and every following day adds one. This matches
//! the "days from the common era" numbering used by most date libraries.

use crate::error::CalendarError;

/// Largest ordinal that can be stored (`i32::MAX`, in the year 5,879,611).
pub const MAX_ORDINAL: i32 = i32::MAX;

/// Number of days in each month of a common year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in a common year preceding the first of each month (index 0 unused).
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const DAYS_PER_400_YEARS: i64 = 146_097;
const DAYS_PER_100_YEARS: i64 = 36_524;
const DAYS_PER_4_YEARS: i64 = 1_461;

/// Returns `true` if `year` is a leap year in the proleptic Gregorian calendar.
///
/// Years divisible by 4 are leap years, except centuries that are not
/// divisible by 400.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`.
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in the given month.
///
/// # Panics
///
/// Panics if `month` is not in 1..=12.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_PER_MONTH[month as usize]
    }
}

/// Number of days in all years strictly before `year`.
///
/// `days_before_year(1)` is 0.
pub fn days_before_year(year: i32) -> i64 {
    days_before_year_wide(i64::from(year))
}

pub(crate) fn days_before_year_wide(year: i64) -> i64 {
    let y = year - 1;
    y * 365 + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

pub(crate) fn days_before_month(year: i32, month: u8) -> i64 {
    let leap_shift = i64::from(month > 2 && is_leap_year(year));
    i64::from(DAYS_BEFORE_MONTH[month as usize]) + leap_shift
}

/// Checks that `(year, month, day)` is a date on or after 0001-01-01.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the year is below 1, the month
/// is not in 1..=12, or the day is not in 1..=`days_in_month(year, month)`.
pub fn validate(year: i32, month: i32, day: i32) -> Result<(), CalendarError> {
    if year < 1 || !(1..=12).contains(&month) {
        return Err(CalendarError::invalid_date(year, month, day));
    }
    let max_day = i32::from(days_in_month(year, month as u8));
    if !(1..=max_day).contains(&day) {
        return Err(CalendarError::invalid_date(year, month, day));
    }
    Ok(())
}

/// Converts a calendar date to its ordinal.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the triple fails [`validate`]
/// or the resulting ordinal would exceed [`MAX_ORDINAL`].
///
/// # Example
///
/// ```
/// use tenor_calendar::gregorian::to_ordinal;
///
/// assert_eq!(to_ordinal(1, 1, 1).unwrap(), 1);
/// assert_eq!(to_ordinal(2020, 2, 29).unwrap(), 737_484);
/// ```
pub fn to_ordinal(year: i32, month: i32, day: i32) -> Result<i32, CalendarError> {
    validate(year, month, day)?;
    let ordinal = days_before_year(year) + days_before_month(year, month as u8) + i64::from(day);
    i32::try_from(ordinal).map_err(|_| CalendarError::invalid_date(year, month, day))
}

/// Converts an ordinal back to `(year, month, day)`.
///
/// Exact inverse of [`to_ordinal`] over `1..=MAX_ORDINAL`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidOrdinal`] if `ordinal < 1`.
pub fn from_ordinal(ordinal: i32) -> Result<(i32, u8, u8), CalendarError> {
    if ordinal < 1 {
        return Err(CalendarError::InvalidOrdinal {
            ordinal: i64::from(ordinal),
        });
    }

    // Peel off whole 400-, 100-, 4- and 1-year cycles from the zero-based day.
    let n = i64::from(ordinal) - 1;
    let (n400, n) = (n / DAYS_PER_400_YEARS, n % DAYS_PER_400_YEARS);
    let (n100, n) = (n / DAYS_PER_100_YEARS, n % DAYS_PER_100_YEARS);
    let (n4, n) = (n / DAYS_PER_4_YEARS, n % DAYS_PER_4_YEARS);
    let (n1, n) = (n / 365, n % 365);

    let year = n400 * 400 + n100 * 100 + n4 * 4 + n1 + 1;
    // Last day of a leap year (or of a 400-year cycle) lands one cycle too far.
    if n1 == 4 || n100 == 4 {
        return Ok(((year - 1) as i32, 12, 31));
    }
    let year = year as i32;

    let day_index = n as u16;
    let leap = is_leap_year(year);
    let mut month = 12u8;
    while month > 1 {
        let start = DAYS_BEFORE_MONTH[month as usize] + u16::from(month > 2 && leap);
        if start <= day_index {
            return Ok((year, month, (day_index - start + 1) as u8));
        }
        month -= 1;
    }
    Ok((year, 1, (day_index + 1) as u8))
}

/// Day of the week for an ordinal: 0 = Monday through 6 = Sunday.
///
/// 0001-01-01 (ordinal 1) is a Monday in the proleptic Gregorian calendar.
pub fn day_of_week(ordinal: i32) -> u8 {
    (i64::from(ordinal) - 1).rem_euclid(7) as u8
}

/// Day of the year (1..=366) for an ordinal.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidOrdinal`] if `ordinal < 1`.
pub fn day_of_year(ordinal: i32) -> Result<u16, CalendarError> {
    let (year, _, _) = from_ordinal(ordinal)?;
    Ok((i64::from(ordinal) - days_before_year(year)) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2020));
        assert!(is_leap_year(4));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2021));
        assert!(!is_leap_year(1));
    }

    #[test]
    fn days_in_month_february() {
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(2021, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn days_in_month_sums_to_year_length() {
        for year in [1, 4, 100, 400, 1900, 2000, 2019, 2020] {
            let total: u16 = (1..=12).map(|m| u16::from(days_in_month(year, m))).sum();
            assert_eq!(total, days_in_year(year), "year {year}");
        }
    }

    #[test]
    fn days_before_year_cycles() {
        assert_eq!(days_before_year(1), 0);
        assert_eq!(days_before_year(2), 365);
        assert_eq!(days_before_year(401), DAYS_PER_400_YEARS);
        assert_eq!(days_before_year(101), DAYS_PER_100_YEARS);
        assert_eq!(days_before_year(5), DAYS_PER_4_YEARS);
    }

    #[test]
    fn known_ordinals() {
        assert_eq!(to_ordinal(1, 1, 1).unwrap(), 1);
        assert_eq!(to_ordinal(1, 12, 31).unwrap(), 365);
        assert_eq!(to_ordinal(2, 1, 1).unwrap(), 366);
        assert_eq!(to_ordinal(1970, 1, 1).unwrap(), 719_163);
        assert_eq!(to_ordinal(2000, 1, 1).unwrap(), 730_120);
        assert_eq!(to_ordinal(2020, 1, 15).unwrap(), 737_439);
    }

    #[test]
    fn from_ordinal_known() {
        assert_eq!(from_ordinal(1).unwrap(), (1, 1, 1));
        assert_eq!(from_ordinal(365).unwrap(), (1, 12, 31));
        assert_eq!(from_ordinal(719_163).unwrap(), (1970, 1, 1));
        assert_eq!(from_ordinal(737_484).unwrap(), (2020, 2, 29));
    }

    #[test]
    fn from_ordinal_cycle_ends() {
        // Dec 31 of a leap year and of the 400th year of a cycle.
        assert_eq!(from_ordinal(to_ordinal(4, 12, 31).unwrap()).unwrap(), (4, 12, 31));
        assert_eq!(from_ordinal(to_ordinal(400, 12, 31).unwrap()).unwrap(), (400, 12, 31));
        assert_eq!(from_ordinal(to_ordinal(2000, 12, 31).unwrap()).unwrap(), (2000, 12, 31));
        assert_eq!(from_ordinal(to_ordinal(1900, 12, 31).unwrap()).unwrap(), (1900, 12, 31));
    }

    #[test]
    fn max_ordinal_round_trip() {
        let (y, m, d) = from_ordinal(MAX_ORDINAL).unwrap();
        assert_eq!(to_ordinal(y, i32::from(m), i32::from(d)).unwrap(), MAX_ORDINAL);
        // One day later no longer fits.
        let (ny, nm, nd) = if d < days_in_month(y, m) {
            (y, m, d + 1)
        } else if m < 12 {
            (y, m + 1, 1)
        } else {
            (y + 1, 1, 1)
        };
        assert!(matches!(
            to_ordinal(ny, i32::from(nm), i32::from(nd)),
            Err(CalendarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn validate_rejects() {
        for (y, m, d) in [
            (2021, 2, 29),
            (2020, 2, 30),
            (2020, 13, 1),
            (2020, 0, 1),
            (2020, 1, 0),
            (2020, 4, 31),
            (0, 1, 1),
            (-4, 1, 1),
        ] {
            assert_eq!(
                validate(y, m, d).unwrap_err(),
                CalendarError::invalid_date(y, m, d),
                "({y}, {m}, {d}) should be rejected"
            );
        }
    }

    #[test]
    fn from_ordinal_rejects_non_positive() {
        assert_eq!(
            from_ordinal(0).unwrap_err(),
            CalendarError::InvalidOrdinal { ordinal: 0 }
        );
        assert_eq!(
            from_ordinal(-5).unwrap_err(),
            CalendarError::InvalidOrdinal { ordinal: -5 }
        );
    }

    #[test]
    fn day_of_week_epoch_is_monday() {
        assert_eq!(day_of_week(1), 0);
        assert_eq!(day_of_week(7), 6);
        assert_eq!(day_of_week(8), 0);
        // 2020-03-15 was a Sunday.
        assert_eq!(day_of_week(to_ordinal(2020, 3, 15).unwrap()), 6);
    }

    #[test]
    fn day_of_year_bounds() {
        assert_eq!(day_of_year(to_ordinal(2020, 1, 1).unwrap()).unwrap(), 1);
        assert_eq!(day_of_year(to_ordinal(2020, 12, 31).unwrap()).unwrap(), 366);
        assert_eq!(day_of_year(to_ordinal(2021, 12, 31).unwrap()).unwrap(), 365);
        assert_eq!(day_of_year(to_ordinal(2021, 3, 1).unwrap()).unwrap(), 60);
    }
}
