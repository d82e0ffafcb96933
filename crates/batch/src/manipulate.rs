//! Shape manipulation: stacking, concatenation, axis insertion and removal.

use ndarray::{ArrayViewD, Axis, IxDyn};

use crate::batch::{Batch, Element};
use crate::error::ShapeError;

/// Normalizes a possibly negative axis against `ndim` valid positions.
pub(crate) fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, ShapeError> {
    let n = ndim as isize;
    let a = if axis < 0 { axis + n } else { axis };
    if !(0..n).contains(&a) {
        return Err(ShapeError::AxisOutOfRange { axis, ndim });
    }
    Ok(a as usize)
}

fn check_same_shapes<T: Element>(batches: &[Batch<T>]) -> Result<&[usize], ShapeError> {
    let first = batches.first().ok_or(ShapeError::EmptyStack)?;
    for (position, b) in batches.iter().enumerate().skip(1) {
        if b.shape() != first.shape() {
            return Err(ShapeError::StackMismatch {
                expected: first.shape().to_vec(),
                found: b.shape().to_vec(),
                position,
            });
        }
    }
    Ok(first.shape())
}

impl<T: Element> Batch<T> {
    /// Joins equally shaped batches along a new axis.
    ///
    /// `axis` may be negative and ranges over `ndim + 1` positions, so
    /// `-1` stacks along a new trailing axis.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyStack`] for no inputs,
    /// [`ShapeError::StackMismatch`] if the shapes differ, and
    /// [`ShapeError::AxisOutOfRange`] for a bad axis.
    pub fn stack(batches: &[Batch<T>], axis: isize) -> Result<Batch<T>, ShapeError> {
        let shape = check_same_shapes(batches)?;
        let axis = normalize_axis(axis, shape.len() + 1)?;
        let views: Vec<ArrayViewD<'_, T>> = batches.iter().map(|b| b.as_array().view()).collect();
        let data = ndarray::stack(Axis(axis), &views).map_err(|_| ShapeError::StackMismatch {
            expected: shape.to_vec(),
            found: shape.to_vec(),
            position: 0,
        })?;
        Ok(Batch::from_array(data))
    }

    /// Joins batches along an existing axis.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyStack`] for no inputs,
    /// [`ShapeError::StackMismatch`] if shapes differ outside `axis`, and
    /// [`ShapeError::AxisOutOfRange`] for a bad axis.
    pub fn concat(batches: &[Batch<T>], axis: isize) -> Result<Batch<T>, ShapeError> {
        let first = batches.first().ok_or(ShapeError::EmptyStack)?;
        let axis = normalize_axis(axis, first.ndim())?;
        for (position, b) in batches.iter().enumerate().skip(1) {
            let agrees = b.ndim() == first.ndim()
                && b
                    .shape()
                    .iter()
                    .zip(first.shape())
                    .enumerate()
                    .all(|(i, (x, y))| i == axis || x == y);
            if !agrees {
                return Err(ShapeError::StackMismatch {
                    expected: first.shape().to_vec(),
                    found: b.shape().to_vec(),
                    position,
                });
            }
        }
        let views: Vec<ArrayViewD<'_, T>> = batches.iter().map(|b| b.as_array().view()).collect();
        let data = ndarray::concatenate(Axis(axis), &views).map_err(|_| {
            ShapeError::StackMismatch {
                expected: first.shape().to_vec(),
                found: first.shape().to_vec(),
                position: 0,
            }
        })?;
        Ok(Batch::from_array(data))
    }

    /// Inserts a length-1 axis at `axis` (negative counts from the end of
    /// the result's `ndim + 1` positions).
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::AxisOutOfRange`] for a bad axis.
    pub fn expand_dims(&self, axis: isize) -> Result<Batch<T>, ShapeError> {
        let axis = normalize_axis(axis, self.ndim() + 1)?;
        Ok(Batch::from_array(self.as_array().clone().insert_axis(Axis(axis))))
    }

    /// Reinterprets the row-major buffer with a new shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if the element counts differ.
    pub fn reshape(&self, shape: &[usize]) -> Result<Batch<T>, ShapeError> {
        Batch::from_vec(shape, self.to_vec())
    }

    /// Permutes the axes. `None` reverses them.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidPermutation`] if `axes` is not a
    /// permutation of `0..ndim`.
    pub fn transpose(&self, axes: Option<&[usize]>) -> Result<Batch<T>, ShapeError> {
        let Some(axes) = axes else {
            return Ok(Batch::from_array(self.as_array().t().to_owned()));
        };
        let ndim = self.ndim();
        let mut seen = vec![false; ndim];
        let valid = axes.len() == ndim
            && axes
                .iter()
                .all(|&a| a < ndim && !std::mem::replace(&mut seen[a], true));
        if !valid {
            return Err(ShapeError::InvalidPermutation {
                axes: axes.to_vec(),
                ndim,
            });
        }
        let view = self.as_array().view().permuted_axes(IxDyn(axes));
        Ok(Batch::from_array(view.to_owned()))
    }

    /// Removes length-1 axes: the given one, or all of them for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::AxisOutOfRange`] for a bad axis and
    /// [`ShapeError::NotSqueezable`] if that axis is not of length 1.
    pub fn squeeze(&self, axis: Option<isize>) -> Result<Batch<T>, ShapeError> {
        let shape: Vec<usize> = match axis {
            None => self.shape().iter().copied().filter(|&d| d != 1).collect(),
            Some(axis) => {
                let a = normalize_axis(axis, self.ndim())?;
                let len = self.shape()[a];
                if len != 1 {
                    return Err(ShapeError::NotSqueezable { axis: a, len });
                }
                let mut shape = self.shape().to_vec();
                shape.remove(a);
                shape
            }
        };
        self.reshape(&shape)
    }

    /// Keeps the sub-batches where `mask` is set.
    ///
    /// `mask` must match the leading dimensions of the batch; those
    /// dimensions are flattened into one of length `count(mask)`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MaskMismatch`] if the mask is zero-dimensional
    /// or its shape is not a prefix of the batch shape.
    pub fn boolean_mask(&self, mask: &Batch<bool>) -> Result<Batch<T>, ShapeError> {
        let m = mask.ndim();
        if m == 0 || m > self.ndim() || mask.shape() != &self.shape()[..m] {
            return Err(ShapeError::MaskMismatch {
                mask: mask.shape().to_vec(),
                shape: self.shape().to_vec(),
            });
        }
        let inner = &self.shape()[m..];
        let chunk: usize = inner.iter().product();
        let flat = self.to_vec();
        let mut kept = 0usize;
        let mut values = Vec::new();
        for (i, &keep) in mask.iter().enumerate() {
            if keep {
                kept += 1;
                values.extend_from_slice(&flat[i * chunk..(i + 1) * chunk]);
            }
        }
        let mut shape = Vec::with_capacity(inner.len() + 1);
        shape.push(kept);
        shape.extend_from_slice(inner);
        Batch::from_vec(&shape, values)
    }
}
