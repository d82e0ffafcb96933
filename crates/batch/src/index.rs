//! Multi-dimensional indexing with numpy-style semantics.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use ndarray::SliceInfoElem;

use crate::batch::{Batch, Element};
use crate::error::ShapeError;

/// One entry of a multi-dimensional index.
///
/// Axes not covered by an index list are taken whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisIndex {
    /// Selects a single position and removes the axis. Negative values count
    /// from the end.
    Index(isize),
    /// Selects a strided range and keeps the axis. Bounds are clamped to the
    /// axis as in numpy; `None` means "from the start" / "to the end" in the
    /// direction of `step`.
    Slice {
        /// Inclusive start.
        start: Option<isize>,
        /// Exclusive end.
        end: Option<isize>,
        /// Non-zero stride; negative walks backwards.
        step: isize,
    },
    /// Inserts a new axis of length 1.
    NewAxis,
}

impl AxisIndex {
    /// The whole axis.
    pub const FULL: AxisIndex = AxisIndex::Slice {
        start: None,
        end: None,
        step: 1,
    };

    /// A strided slice.
    pub fn stepped(start: Option<isize>, end: Option<isize>, step: isize) -> Self {
        Self::Slice { start, end, step }
    }
}

impl From<isize> for AxisIndex {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<Range<isize>> for AxisIndex {
    fn from(r: Range<isize>) -> Self {
        Self::stepped(Some(r.start), Some(r.end), 1)
    }
}

impl From<RangeFrom<isize>> for AxisIndex {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::stepped(Some(r.start), None, 1)
    }
}

impl From<RangeTo<isize>> for AxisIndex {
    fn from(r: RangeTo<isize>) -> Self {
        Self::stepped(None, Some(r.end), 1)
    }
}

impl From<RangeFull> for AxisIndex {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

/// Clamps a slice bound the way numpy does for the given step direction.
fn clamp_bound(bound: isize, len: isize, forward: bool) -> isize {
    let b = if bound < 0 { bound + len } else { bound };
    if forward {
        b.clamp(0, len)
    } else {
        b.clamp(-1, len - 1)
    }
}

/// Translates a numpy-style index list into ndarray slice elements covering
/// every axis of `shape`.
pub(crate) fn resolve(
    indices: &[AxisIndex],
    shape: &[usize],
) -> Result<Vec<SliceInfoElem>, ShapeError> {
    let consumed = indices
        .iter()
        .filter(|i| !matches!(i, AxisIndex::NewAxis))
        .count();
    if consumed > shape.len() {
        return Err(ShapeError::TooManyIndices {
            given: consumed,
            ndim: shape.len(),
        });
    }

    let mut elems = Vec::with_capacity(indices.len() + shape.len() - consumed);
    let mut axis = 0usize;
    for index in indices {
        match *index {
            AxisIndex::NewAxis => elems.push(SliceInfoElem::NewAxis),
            AxisIndex::Index(i) => {
                let len = shape[axis] as isize;
                let pos = if i < 0 { i + len } else { i };
                if !(0..len).contains(&pos) {
                    return Err(ShapeError::IndexOutOfRange {
                        index: i,
                        axis,
                        len: shape[axis],
                    });
                }
                elems.push(SliceInfoElem::Index(pos));
                axis += 1;
            }
            AxisIndex::Slice { start, end, step } => {
                if step == 0 {
                    return Err(ShapeError::ZeroStep { axis });
                }
                let len = shape[axis] as isize;
                let elem = if step > 0 {
                    let lo = start.map_or(0, |s| clamp_bound(s, len, true));
                    let hi = end.map_or(len, |e| clamp_bound(e, len, true));
                    SliceInfoElem::Slice {
                        start: lo,
                        end: Some(hi.max(lo)),
                        step,
                    }
                } else {
                    // ndarray walks a negative-step range from its end, so
                    // numpy's `first..stop` maps to `stop + 1..first + 1`.
                    let first = start.map_or(len - 1, |s| clamp_bound(s, len, false));
                    let stop = end.map_or(-1, |e| clamp_bound(e, len, false));
                    let lo = stop + 1;
                    SliceInfoElem::Slice {
                        start: lo,
                        end: Some((first + 1).max(lo)),
                        step,
                    }
                };
                elems.push(elem);
                axis += 1;
            }
        }
    }
    elems.extend((axis..shape.len()).map(|_| SliceInfoElem::Slice {
        start: 0,
        end: None,
        step: 1,
    }));
    Ok(elems)
}

impl<T: Element> Batch<T> {
    /// Selects a sub-batch.
    ///
    /// Single indices drop their axis, slices keep it, and `NewAxis` adds a
    /// length-1 axis. Trailing axes not mentioned are kept whole.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::TooManyIndices`], [`ShapeError::IndexOutOfRange`]
    /// or [`ShapeError::ZeroStep`] for malformed indices.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor_batch::{AxisIndex, Batch};
    ///
    /// let b = Batch::from_vec(&[3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(b.get(&[AxisIndex::from(0)]).unwrap().shape(), &[2]);
    /// assert_eq!(b.get(&[AxisIndex::from(1..)]).unwrap().shape(), &[2, 2]);
    /// assert_eq!(
    ///     b.get(&[AxisIndex::from(1..), AxisIndex::from(..-1)]).unwrap().to_vec(),
    ///     vec![3, 5]
    /// );
    /// ```
    pub fn get(&self, indices: &[AxisIndex]) -> Result<Batch<T>, ShapeError> {
        let elems = resolve(indices, self.shape())?;
        let view = self.as_array().slice(elems.as_slice());
        Ok(Batch::from_array(view.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Batch<i32> {
        // [[0, 1, 2, 3],
        //  [4, 5, 6, 7],
        //  [8, 9, 10, 11]]
        Batch::from_vec(&[3, 4], (0..12).collect()).unwrap()
    }

    #[test]
    fn single_index_reduces_rank() {
        let row = grid().get(&[AxisIndex::from(1)]).unwrap();
        assert_eq!(row.shape(), &[4]);
        assert_eq!(row.to_vec(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn negative_index_counts_from_end() {
        let row = grid().get(&[AxisIndex::from(-1)]).unwrap();
        assert_eq!(row.to_vec(), vec![8, 9, 10, 11]);
        let v = grid().get(&[AxisIndex::from(-1), AxisIndex::from(-2)]).unwrap();
        assert_eq!(v.ndim(), 0);
        assert_eq!(v.to_vec(), vec![10]);
    }

    #[test]
    fn range_preserves_rank() {
        let sub = grid().get(&[AxisIndex::from(1..3), AxisIndex::from(..2)]).unwrap();
        assert_eq!(sub.shape(), &[2, 2]);
        assert_eq!(sub.to_vec(), vec![4, 5, 8, 9]);
    }

    #[test]
    fn range_bounds_clamp() {
        let sub = grid().get(&[AxisIndex::from(-10..10)]).unwrap();
        assert_eq!(sub.shape(), &[3, 4]);
        let empty = grid().get(&[AxisIndex::from(2..1)]).unwrap();
        assert_eq!(empty.shape(), &[0, 4]);
    }

    #[test]
    fn positive_step() {
        let sub = grid()
            .get(&[AxisIndex::FULL, AxisIndex::stepped(None, None, 2)])
            .unwrap();
        assert_eq!(sub.to_vec(), vec![0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn negative_step_reverses() {
        let rev = grid()
            .get(&[AxisIndex::stepped(None, None, -1), AxisIndex::from(0)])
            .unwrap();
        assert_eq!(rev.to_vec(), vec![8, 4, 0]);

        let partial = grid()
            .get(&[AxisIndex::from(0), AxisIndex::stepped(Some(3), Some(0), -2)])
            .unwrap();
        assert_eq!(partial.to_vec(), vec![3, 1]);

        let empty = grid()
            .get(&[AxisIndex::from(0), AxisIndex::stepped(Some(0), Some(3), -1)])
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn new_axis_inserts_dimension() {
        let sub = grid()
            .get(&[AxisIndex::NewAxis, AxisIndex::from(0)])
            .unwrap();
        assert_eq!(sub.shape(), &[1, 4]);
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(
            grid().get(&[AxisIndex::from(3)]).unwrap_err(),
            ShapeError::IndexOutOfRange {
                index: 3,
                axis: 0,
                len: 3,
            }
        );
        assert!(grid().get(&[AxisIndex::from(-4)]).is_err());
    }

    #[test]
    fn too_many_indices() {
        let idx = [AxisIndex::from(0), AxisIndex::from(0), AxisIndex::from(0)];
        assert_eq!(
            grid().get(&idx).unwrap_err(),
            ShapeError::TooManyIndices { given: 3, ndim: 2 }
        );
    }

    #[test]
    fn zero_step_rejected() {
        assert_eq!(
            grid().get(&[AxisIndex::stepped(None, None, 0)]).unwrap_err(),
            ShapeError::ZeroStep { axis: 0 }
        );
    }
}
