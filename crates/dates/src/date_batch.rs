//! Batches of calendar dates stored as proleptic Gregorian ordinals.

use std::ops::{Add, Sub};

use chrono::NaiveDate;
use tenor_batch::{AxisIndex, Batch, Comparison};
use tenor_calendar::{Date, MAX_ORDINAL, gregorian};
use tracing::debug;

use crate::error::DateError;
use crate::period::PeriodBatch;

/// Ordinal of 1970-01-01.
const UNIX_EPOCH_ORDINAL: i64 = 719_163;

/// A batch of valid calendar dates of arbitrary shape.
///
/// Every element is a day ordinal in `1..=MAX_ORDINAL` (ordinal 1 is
/// 0001-01-01). Construction validates eagerly, so every accessor on an
/// existing batch is infallible.
///
/// # Example
///
/// ```
/// use tenor_dates::{DateBatch, PeriodBatch};
///
/// let dates = DateBatch::from_tuples(&[(2020, 3, 15), (2020, 3, 31)]).unwrap();
/// let shifted = (&dates - &PeriodBatch::months(vec![2, 1])).unwrap();
/// assert_eq!(shifted.months().to_vec(), vec![1, 2]);
/// assert_eq!(shifted.days().to_vec(), vec![15, 29]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBatch {
    ordinals: Batch<i32>,
}

/// Splits a stored ordinal into (year, month, day).
fn decompose(ordinal: i32) -> (i32, u8, u8) {
    gregorian::from_ordinal(ordinal).expect("date batches hold only valid ordinals")
}

fn checked_ordinal(ordinal: i64) -> Result<i32, DateError> {
    i32::try_from(ordinal)
        .ok()
        .filter(|o| (1..=MAX_ORDINAL).contains(o))
        .ok_or(DateError::InvalidOrdinal { ordinal })
}

impl DateBatch {
    fn constructed(ordinals: Batch<i32>, source: &'static str) -> Self {
        debug!(source, shape = ?ordinals.shape(), "constructed date batch");
        Self { ordinals }
    }

    /// Wraps ordinals already known to be valid.
    fn wrap(ordinals: Batch<i32>) -> Self {
        Self { ordinals }
    }

    /// Builds a one-dimensional batch from chrono dates.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] for dates before 0001-01-01.
    #[tracing::instrument(skip_all, fields(n = dates.len()))]
    pub fn from_native(dates: &[NaiveDate]) -> Result<Self, DateError> {
        let ordinals = Batch::from(dates).try_map(|d| {
            Date::try_from(d)
                .map(Date::ordinal)
                .map_err(DateError::from)
        })?;
        Ok(Self::constructed(ordinals, "native"))
    }

    /// Builds a one-dimensional batch from already validated [`Date`] values.
    pub fn from_dates(dates: &[Date]) -> Self {
        Self::constructed(Batch::from(dates).map(Date::ordinal), "dates")
    }

    /// Builds a one-dimensional batch from (year, month, day) triples.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] for the first triple, in input
    /// order, that is not a valid date.
    #[tracing::instrument(skip_all, fields(n = tuples.len()))]
    pub fn from_tuples(tuples: &[(i32, u32, u32)]) -> Result<Self, DateError> {
        let ordinals = Batch::from(tuples).try_map(|(year, month, day)| {
            let invalid = || DateError::InvalidDate {
                year: year.into(),
                month: month.into(),
                day: day.into(),
            };
            let month = i32::try_from(month).map_err(|_| invalid())?;
            let day = i32::try_from(day).map_err(|_| invalid())?;
            gregorian::to_ordinal(year, month, day).map_err(DateError::from)
        })?;
        Ok(Self::constructed(ordinals, "tuples"))
    }

    /// Builds a batch from parallel year, month and day batches.
    ///
    /// The three components are broadcast together; the result has the
    /// broadcast shape.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the components do not broadcast and
    /// [`DateError::InvalidDate`] for the first invalid element in
    /// row-major order.
    #[tracing::instrument(
        skip_all,
        fields(years = ?years.shape(), months = ?months.shape(), days = ?days.shape())
    )]
    pub fn from_year_month_day(
        years: &Batch<i32>,
        months: &Batch<i32>,
        days: &Batch<i32>,
    ) -> Result<Self, DateError> {
        let year_month = years.zip_with(months, |y, m| (y, m))?;
        let ordinals = year_month.try_zip_with(days, |(y, m), d| {
            gregorian::to_ordinal(y, m, d).map_err(DateError::from)
        })?;
        Ok(Self::constructed(ordinals, "year_month_day"))
    }

    /// Builds a batch from day ordinals (1 = 0001-01-01).
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidOrdinal`] for the first ordinal below 1.
    #[tracing::instrument(skip_all, fields(shape = ?ordinals.shape()))]
    pub fn from_ordinals(ordinals: Batch<i32>) -> Result<Self, DateError> {
        let ordinals = ordinals.try_map(|o| checked_ordinal(o.into()))?;
        Ok(Self::constructed(ordinals, "ordinals"))
    }

    /// Builds a batch from day counts relative to 1970-01-01.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidOrdinal`] if a date falls before
    /// 0001-01-01 or beyond [`MAX_ORDINAL`].
    #[tracing::instrument(skip_all, fields(shape = ?days.shape()))]
    pub fn from_epoch_days(days: Batch<i32>) -> Result<Self, DateError> {
        let ordinals = days.try_map(|d| checked_ordinal(i64::from(d) + UNIX_EPOCH_ORDINAL))?;
        Ok(Self::constructed(ordinals, "epoch_days"))
    }

    /// Shape of the batch.
    pub fn shape(&self) -> &[usize] {
        self.ordinals.shape()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.ordinals.ndim()
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    /// Returns `true` if the batch holds no dates.
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// The underlying day ordinals.
    pub fn ordinals(&self) -> &Batch<i32> {
        &self.ordinals
    }

    /// Calendar years.
    pub fn years(&self) -> Batch<i32> {
        self.ordinals.map(|o| decompose(o).0)
    }

    /// Months, 1 through 12.
    pub fn months(&self) -> Batch<i32> {
        self.ordinals.map(|o| i32::from(decompose(o).1))
    }

    /// Days of the month, starting at 1.
    pub fn days(&self) -> Batch<i32> {
        self.ordinals.map(|o| i32::from(decompose(o).2))
    }

    /// Days of the week, 0 = Monday through 6 = Sunday.
    pub fn days_of_week(&self) -> Batch<i32> {
        self.ordinals.map(|o| i32::from(gregorian::day_of_week(o)))
    }

    /// Days of the year, 1 through 366.
    pub fn day_of_year(&self) -> Batch<i32> {
        self.ordinals.map(|o| {
            let (year, _, _) = decompose(o);
            (i64::from(o) - gregorian::days_before_year(year)) as i32
        })
    }

    /// Whether each date is the last day of its month.
    pub fn is_end_of_month(&self) -> Batch<bool> {
        self.ordinals.map(|o| {
            let (year, month, day) = decompose(o);
            day == gregorian::days_in_month(year, month)
        })
    }

    /// Moves every date to the last day of its month.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidOrdinal`] if a month end lies beyond
    /// [`MAX_ORDINAL`].
    pub fn to_end_of_month(&self) -> Result<DateBatch, DateError> {
        let ordinals = self.ordinals.try_map(|o| {
            let (year, month, day) = decompose(o);
            let remaining = gregorian::days_in_month(year, month) - day;
            checked_ordinal(i64::from(o) + i64::from(remaining))
        })?;
        Ok(Self::wrap(ordinals))
    }

    /// Years, months and days stacked along a new trailing axis of length 3.
    pub fn to_triples(&self) -> Batch<i32> {
        Batch::stack(&[self.years(), self.months(), self.days()], -1)
            .expect("date components share one shape")
    }

    /// Converts to chrono dates in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] for dates beyond chrono's range.
    pub fn to_native(&self) -> Result<Vec<NaiveDate>, DateError> {
        let native = self.ordinals.try_map(|o| {
            let date = Date::from_ordinal(o)?;
            NaiveDate::try_from(date).map_err(DateError::from)
        })?;
        Ok(native.to_vec())
    }

    /// Adds `period` element-wise after broadcasting.
    ///
    /// Months and years clamp to the end of the target month; days and
    /// weeks never clamp.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the shapes do not broadcast and
    /// [`DateError::InvalidOrdinal`] for the first result, in row-major
    /// order, that leaves the representable range.
    #[tracing::instrument(
        skip_all,
        fields(unit = %period.unit(), dates = self.len(), periods = period.len())
    )]
    pub fn add_period(&self, period: &PeriodBatch) -> Result<DateBatch, DateError> {
        let unit = period.unit();
        let ordinals = self.ordinals.try_zip_with(period.quantities(), move |o, q| {
            tenor_calendar::add_period(o, unit, q).map_err(DateError::from)
        })?;
        debug!(shape = ?ordinals.shape(), "added periods");
        Ok(Self::wrap(ordinals))
    }

    /// Subtracts `period` element-wise after broadcasting.
    ///
    /// # Errors
    ///
    /// Same as [`add_period`](Self::add_period).
    #[tracing::instrument(
        skip_all,
        fields(unit = %period.unit(), dates = self.len(), periods = period.len())
    )]
    pub fn sub_period(&self, period: &PeriodBatch) -> Result<DateBatch, DateError> {
        let unit = period.unit();
        let ordinals = self.ordinals.try_zip_with(period.quantities(), move |o, q| {
            tenor_calendar::sub_period(o, unit, q).map_err(DateError::from)
        })?;
        debug!(shape = ?ordinals.shape(), "subtracted periods");
        Ok(Self::wrap(ordinals))
    }

    /// Number of days spanned by `period` starting at each date.
    ///
    /// # Errors
    ///
    /// Same as [`add_period`](Self::add_period).
    pub fn period_length_in_days(&self, period: &PeriodBatch) -> Result<Batch<i32>, DateError> {
        let unit = period.unit();
        self.ordinals.try_zip_with(period.quantities(), move |o, q| {
            tenor_calendar::period_length_in_days(o, unit, q).map_err(DateError::from)
        })
    }

    /// Days from each date in `self` to the matching date in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the shapes do not broadcast.
    pub fn days_until(&self, other: &DateBatch) -> Result<Batch<i32>, DateError> {
        Ok(other.ordinals.try_sub(&self.ordinals)?)
    }

    /// Element-wise comparison in calendar order after broadcasting.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the shapes do not broadcast.
    pub fn compare(&self, other: &DateBatch, op: Comparison) -> Result<Batch<bool>, DateError> {
        Ok(self.ordinals.compare(&other.ordinals, op)?)
    }

    /// Element-wise `==`.
    pub fn equal(&self, other: &DateBatch) -> Result<Batch<bool>, DateError> {
        self.compare(other, Comparison::Eq)
    }

    /// Element-wise `!=`.
    pub fn not_equal(&self, other: &DateBatch) -> Result<Batch<bool>, DateError> {
        self.compare(other, Comparison::Ne)
    }

    /// Element-wise `<`.
    pub fn less(&self, other: &DateBatch) -> Result<Batch<bool>, DateError> {
        self.compare(other, Comparison::Lt)
    }

    /// Element-wise `<=`.
    pub fn less_equal(&self, other: &DateBatch) -> Result<Batch<bool>, DateError> {
        self.compare(other, Comparison::Le)
    }

    /// Element-wise `>`.
    pub fn greater(&self, other: &DateBatch) -> Result<Batch<bool>, DateError> {
        self.compare(other, Comparison::Gt)
    }

    /// Element-wise `>=`.
    pub fn greater_equal(&self, other: &DateBatch) -> Result<Batch<bool>, DateError> {
        self.compare(other, Comparison::Ge)
    }

    /// Selects a sub-batch; see [`Batch::get`].
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] for malformed indices.
    pub fn get(&self, indices: &[AxisIndex]) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.get(indices)?))
    }

    /// Joins equally shaped date batches along a new axis.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] for an empty list, disagreeing shapes or
    /// a bad axis.
    pub fn stack(batches: &[DateBatch], axis: isize) -> Result<DateBatch, DateError> {
        let parts: Vec<Batch<i32>> = batches.iter().map(|b| b.ordinals.clone()).collect();
        Ok(Self::wrap(Batch::stack(&parts, axis)?))
    }

    /// Joins date batches along an existing axis.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] for an empty list, disagreeing shapes or
    /// a bad axis.
    pub fn concat(batches: &[DateBatch], axis: isize) -> Result<DateBatch, DateError> {
        let parts: Vec<Batch<i32>> = batches.iter().map(|b| b.ordinals.clone()).collect();
        Ok(Self::wrap(Batch::concat(&parts, axis)?))
    }

    /// Inserts a length-1 axis.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if `axis` is out of range.
    pub fn expand_dims(&self, axis: isize) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.expand_dims(axis)?))
    }

    /// Broadcasts the batch to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the shape cannot be broadcast.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.broadcast_to(target)?))
    }

    /// Reinterprets the dates with a new shape of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the element counts differ.
    pub fn reshape(&self, shape: &[usize]) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.reshape(shape)?))
    }

    /// Permutes the axes; `None` reverses them.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] for an invalid permutation.
    pub fn transpose(&self, axes: Option<&[usize]>) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.transpose(axes)?))
    }

    /// Removes length-1 axes.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the given axis is out of range or not
    /// of length 1.
    pub fn squeeze(&self, axis: Option<isize>) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.squeeze(axis)?))
    }

    /// Keeps the dates where `mask` is set.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the mask does not match the leading
    /// dimensions.
    pub fn boolean_mask(&self, mask: &Batch<bool>) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(self.ordinals.boolean_mask(mask)?))
    }

    /// Element-wise choice between two date batches.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the three shapes do not broadcast.
    pub fn select(
        mask: &Batch<bool>,
        on_true: &DateBatch,
        on_false: &DateBatch,
    ) -> Result<DateBatch, DateError> {
        Ok(Self::wrap(Batch::select(mask, &on_true.ordinals, &on_false.ordinals)?))
    }
}

impl Add<&PeriodBatch> for &DateBatch {
    type Output = Result<DateBatch, DateError>;

    fn add(self, period: &PeriodBatch) -> Self::Output {
        self.add_period(period)
    }
}

impl Sub<&PeriodBatch> for &DateBatch {
    type Output = Result<DateBatch, DateError>;

    fn sub(self, period: &PeriodBatch) -> Self::Output {
        self.sub_period(period)
    }
}
