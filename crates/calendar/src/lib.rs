//! # tenor-calendar
//!
//! Pure proleptic Gregorian date arithmetic on day ordinals.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["(year, month, day)"] -->|"to_ordinal()"| B["ordinal (0001-01-01 = 1)"]
//!     B -->|"from_ordinal()"| A
//!     B -->|"day_of_week()"| C["0 = Mon .. 6 = Sun"]
//!     B -->|"add_period(unit, n)"| B
//!     A -->|"Date::new()"| D["Date"]
//!     D -->|".ordinal()"| B
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tenor_calendar::{Date, PeriodUnit, add_period, gregorian};
//!
//! let mar31 = Date::new(2020, 3, 31).unwrap();
//! assert_eq!(mar31.weekday(), 1); // Tuesday
//!
//! // Month arithmetic clamps to the end of the target month.
//! let feb = add_period(mar31.ordinal(), PeriodUnit::Month, -1).unwrap();
//! assert_eq!(gregorian::from_ordinal(feb).unwrap(), (2020, 2, 29));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `gregorian` | Leap rules, month lengths, ordinal conversions |
//! | `date` | Validated date value type |
//! | `period` | Period units and period arithmetic |
//! | `error` | Error types |

mod date;
mod error;
pub mod gregorian;
pub mod period;

pub use date::Date;
pub use error::CalendarError;
pub use gregorian::{MAX_ORDINAL, day_of_week, from_ordinal, to_ordinal};
pub use period::{ParsePeriodUnitError, PeriodUnit, add_period, period_length_in_days, sub_period};
