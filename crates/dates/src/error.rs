//! Error types for the tenor-dates crate.

use tenor_batch::ShapeError;
use tenor_calendar::{CalendarError, PeriodUnit};

/// Error type for all fallible operations on date and period batches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Returned when a (year, month, day) element is not a valid date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// The year that was provided.
        year: i64,
        /// The month that was provided.
        month: i64,
        /// The day that was provided.
        day: i64,
    },

    /// Returned when an ordinal element is out of range, either as input or
    /// as the result of period arithmetic.
    #[error(
        "invalid ordinal: {ordinal} (must be 1..={max})",
        max = tenor_calendar::MAX_ORDINAL
    )]
    InvalidOrdinal {
        /// The offending ordinal.
        ordinal: i64,
    },

    /// Returned when operand shapes are incompatible.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Returned when combining period quantities overflows `i32`.
    #[error("period quantity overflow: {quantity}")]
    QuantityOverflow {
        /// The exact result that does not fit.
        quantity: i64,
    },

    /// Returned when combining period batches of different units.
    #[error("period unit mismatch: {left} vs {right}")]
    UnitMismatch {
        /// Unit of the left operand.
        left: PeriodUnit,
        /// Unit of the right operand.
        right: PeriodUnit,
    },
}

impl From<CalendarError> for DateError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidDate { year, month, day } => {
                Self::InvalidDate { year, month, day }
            }
            CalendarError::InvalidOrdinal { ordinal } => Self::InvalidOrdinal { ordinal },
        }
    }
}
