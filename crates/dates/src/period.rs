//! Batches of time periods sharing a single unit.

use tenor_batch::{AxisIndex, Batch};
use tenor_calendar::PeriodUnit;

use crate::error::DateError;

/// A batch of period quantities, all expressed in one [`PeriodUnit`].
///
/// Quantities may be negative. Combining two period batches requires their
/// units to agree; nothing is converted between units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBatch {
    quantities: Batch<i32>,
    unit: PeriodUnit,
}

impl PeriodBatch {
    /// Creates a period batch from quantities and a unit.
    pub fn new(quantities: impl Into<Batch<i32>>, unit: PeriodUnit) -> Self {
        Self {
            quantities: quantities.into(),
            unit,
        }
    }

    /// Periods of whole days.
    pub fn days(quantities: impl Into<Batch<i32>>) -> Self {
        Self::new(quantities, PeriodUnit::Day)
    }

    /// Periods of whole weeks.
    pub fn weeks(quantities: impl Into<Batch<i32>>) -> Self {
        Self::new(quantities, PeriodUnit::Week)
    }

    /// Periods of calendar months.
    pub fn months(quantities: impl Into<Batch<i32>>) -> Self {
        Self::new(quantities, PeriodUnit::Month)
    }

    /// Periods of calendar years.
    pub fn years(quantities: impl Into<Batch<i32>>) -> Self {
        Self::new(quantities, PeriodUnit::Year)
    }

    /// The per-element quantities.
    pub fn quantities(&self) -> &Batch<i32> {
        &self.quantities
    }

    /// The unit shared by every element.
    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// Shape of the batch.
    pub fn shape(&self) -> &[usize] {
        self.quantities.shape()
    }

    /// Number of periods in the batch.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Returns `true` if the batch holds no periods.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Negates every quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::QuantityOverflow`] if a quantity is `i32::MIN`.
    pub fn neg(&self) -> Result<PeriodBatch, DateError> {
        let quantities = self.quantities.try_map(|q| {
            q.checked_neg().ok_or(DateError::QuantityOverflow {
                quantity: -i64::from(q),
            })
        })?;
        Ok(self.with_quantities(quantities))
    }

    /// Element-wise sum of two same-unit period batches, broadcast together.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::UnitMismatch`] if the units differ,
    /// [`DateError::Shape`] if the shapes do not broadcast, and
    /// [`DateError::QuantityOverflow`] if a sum leaves the `i32` range.
    pub fn try_add(&self, other: &PeriodBatch) -> Result<PeriodBatch, DateError> {
        self.combine(other, |a, b| i64::from(a) + i64::from(b))
    }

    /// Element-wise difference of two same-unit period batches.
    ///
    /// # Errors
    ///
    /// Same as [`try_add`](Self::try_add).
    pub fn try_sub(&self, other: &PeriodBatch) -> Result<PeriodBatch, DateError> {
        self.combine(other, |a, b| i64::from(a) - i64::from(b))
    }

    fn combine<F>(&self, other: &PeriodBatch, f: F) -> Result<PeriodBatch, DateError>
    where
        F: Fn(i32, i32) -> i64 + Send + Sync,
    {
        if self.unit != other.unit {
            return Err(DateError::UnitMismatch {
                left: self.unit,
                right: other.unit,
            });
        }
        let quantities = self.quantities.try_zip_with(&other.quantities, |a, b| {
            let exact = f(a, b);
            i32::try_from(exact).map_err(|_| DateError::QuantityOverflow { quantity: exact })
        })?;
        Ok(self.with_quantities(quantities))
    }

    /// Selects a sub-batch; see [`Batch::get`].
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] for malformed indices.
    pub fn get(&self, indices: &[AxisIndex]) -> Result<PeriodBatch, DateError> {
        Ok(self.with_quantities(self.quantities.get(indices)?))
    }

    /// Stacks same-unit period batches along a new axis.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::UnitMismatch`] if the units differ and
    /// [`DateError::Shape`] if the list is empty or the shapes disagree.
    pub fn stack(batches: &[PeriodBatch], axis: isize) -> Result<PeriodBatch, DateError> {
        let unit = batches.first().map_or(PeriodUnit::default(), |b| b.unit);
        if let Some(other) = batches.iter().find(|b| b.unit != unit) {
            return Err(DateError::UnitMismatch {
                left: unit,
                right: other.unit,
            });
        }
        let parts: Vec<Batch<i32>> = batches.iter().map(|b| b.quantities.clone()).collect();
        Ok(PeriodBatch::new(Batch::stack(&parts, axis)?, unit))
    }

    /// Inserts a length-1 axis at `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if `axis` is out of range.
    pub fn expand_dims(&self, axis: isize) -> Result<PeriodBatch, DateError> {
        Ok(self.with_quantities(self.quantities.expand_dims(axis)?))
    }

    /// Broadcasts the quantities to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Shape`] if the shape cannot be broadcast.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<PeriodBatch, DateError> {
        Ok(self.with_quantities(self.quantities.broadcast_to(target)?))
    }

    fn with_quantities(&self, quantities: Batch<i32>) -> PeriodBatch {
        PeriodBatch {
            quantities,
            unit: self.unit,
        }
    }
}
