//! Error types for the tenor-calendar crate.

/// Error type for all fallible operations in the tenor-calendar crate.
///
/// Field values are reported as supplied by the caller, widened to 64 bits
/// so that out-of-range inputs are never truncated in the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a (year, month, day) triple is not a date in the
    /// proleptic Gregorian calendar, or lies outside the representable
    /// ordinal range.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// The year that was provided.
        year: i64,
        /// The month that was provided.
        month: i64,
        /// The day that was provided.
        day: i64,
    },

    /// Returned when an ordinal is below 1 (before 0001-01-01) or above
    /// [`MAX_ORDINAL`](crate::MAX_ORDINAL).
    #[error("invalid ordinal: {ordinal} (must be 1..={max})", max = crate::MAX_ORDINAL)]
    InvalidOrdinal {
        /// The ordinal that was provided or produced.
        ordinal: i64,
    },
}

impl CalendarError {
    pub(crate) fn invalid_date(
        year: impl Into<i64>,
        month: impl Into<i64>,
        day: impl Into<i64>,
    ) -> Self {
        Self::InvalidDate {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }
}
