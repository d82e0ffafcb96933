//! # tenor-dates
//!
//! Vectorized calendar arithmetic over N-dimensional batches.
//!
//! A [`DateBatch`] stores one proleptic Gregorian day ordinal per element; a
//! [`PeriodBatch`] stores signed quantities of a single [`PeriodUnit`].
//! Arithmetic, comparisons and shape operations broadcast their operands
//! and act on whole batches at once.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A[triples / ordinals / NaiveDate / epoch days] --> B[tenor_calendar::gregorian]
//!     B --> C[DateBatch]
//!     D[PeriodBatch] --> E[tenor_calendar::period]
//!     C --> E
//!     E --> F[DateBatch]
//!     C --> G[tenor_batch::Batch]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date_batch` | Date batches: construction, accessors, arithmetic, comparisons |
//! | `period` | Period batches of a single unit |
//! | `error` | Error types |
//!
//! Every fallible operation is batch-atomic: if any element fails, the
//! whole call fails with the error of the first failing element in
//! row-major order.

mod date_batch;
mod error;
mod period;

pub use date_batch::DateBatch;
pub use error::DateError;
pub use period::PeriodBatch;

pub use tenor_batch::{AxisIndex, Batch, Comparison, ShapeError};
pub use tenor_calendar::{Date, PeriodUnit};
