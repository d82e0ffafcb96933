//! Broadcasting and broadcast-aware element-wise operations.
//!
//! Shapes are aligned on their trailing dimensions. Two dimensions are
//! compatible when they are equal or one of them is 1; a missing leading
//! dimension behaves like 1.

use ndarray::{ArrayViewD, IxDyn, Zip};
use num_traits::{CheckedAdd, CheckedSub};
use tracing::trace;

use crate::batch::{Batch, Element, PARALLEL_THRESHOLD, collect_results, rebuild};
use crate::error::ShapeError;

/// Element-wise comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Comparison {
    /// Applies the comparison to a pair of values.
    pub fn apply<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }
}

/// Computes the shape two operands broadcast to.
///
/// # Errors
///
/// Returns [`ShapeError::Incompatible`] if some aligned pair of dimensions
/// differs and neither is 1.
pub fn broadcast_shapes(left: &[usize], right: &[usize]) -> Result<Vec<usize>, ShapeError> {
    let ndim = left.len().max(right.len());
    let mut shape = vec![0; ndim];
    for (i, out) in shape.iter_mut().enumerate() {
        let l = dim_from_end(left, ndim - 1 - i);
        let r = dim_from_end(right, ndim - 1 - i);
        *out = match (l, r) {
            (l, r) if l == r => l,
            (1, r) => r,
            (l, 1) => l,
            _ => {
                return Err(ShapeError::Incompatible {
                    left: left.to_vec(),
                    right: right.to_vec(),
                });
            }
        };
    }
    Ok(shape)
}

fn dim_from_end(shape: &[usize], offset: usize) -> usize {
    if offset < shape.len() {
        shape[shape.len() - 1 - offset]
    } else {
        1
    }
}

fn view_as<'a, T>(
    batch: &'a Batch<T>,
    shape: &[usize],
) -> Result<ArrayViewD<'a, T>, ShapeError>
where
    T: Element,
{
    batch
        .as_array()
        .broadcast(IxDyn(shape))
        .ok_or_else(|| ShapeError::NotBroadcastable {
            from: batch.shape().to_vec(),
            to: shape.to_vec(),
        })
}

impl<T: Element> Batch<T> {
    /// Broadcasts the batch to `target`, copying values along new or
    /// size-1 dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotBroadcastable`] if `target` has fewer
    /// dimensions than the batch, or an existing dimension is neither 1 nor
    /// equal to the aligned target dimension.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<Batch<T>, ShapeError> {
        let view = view_as(self, target)?;
        Ok(Batch::from_array(view.to_owned()))
    }

    /// Broadcasts `self` and `other` together and combines them element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Incompatible`] if the shapes cannot be broadcast
    /// together.
    pub fn zip_with<U, R, F>(&self, other: &Batch<U>, f: F) -> Result<Batch<R>, ShapeError>
    where
        U: Element,
        R: Element,
        F: Fn(T, U) -> R + Send + Sync,
    {
        let shape = broadcast_shapes(self.shape(), other.shape())?;
        if self.shape() != other.shape() {
            trace!(
                left = ?self.shape(),
                right = ?other.shape(),
                out = ?shape,
                "broadcasting operands"
            );
        }
        let a = view_as(self, &shape)?;
        let b = view_as(other, &shape)?;
        let zip = Zip::from(a).and(b);
        let data = if shape.iter().product::<usize>() >= PARALLEL_THRESHOLD {
            zip.par_map_collect(|&x, &y| f(x, y))
        } else {
            zip.map_collect(|&x, &y| f(x, y))
        };
        Ok(Batch::from_array(data))
    }

    /// Fallible variant of [`zip_with`](Self::zip_with).
    ///
    /// Fails with the first element error in row-major order of the
    /// broadcast shape. Shape errors are converted with `From`.
    pub fn try_zip_with<U, R, E, F>(&self, other: &Batch<U>, f: F) -> Result<Batch<R>, E>
    where
        U: Element,
        R: Element,
        E: From<ShapeError> + Send,
        F: Fn(T, U) -> Result<R, E> + Send + Sync,
    {
        let shape = broadcast_shapes(self.shape(), other.shape())?;
        let a = view_as(self, &shape)?;
        let b = view_as(other, &shape)?;
        let pairs: Vec<(T, U)> = a.iter().copied().zip(b.iter().copied()).collect();
        let values = collect_results(pairs, |(x, y)| f(x, y))?;
        Ok(Batch::from_array(rebuild(&shape, values)))
    }

    /// Element-wise comparison after broadcasting.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Incompatible`] if the shapes cannot be broadcast
    /// together.
    pub fn compare(&self, other: &Batch<T>, op: Comparison) -> Result<Batch<bool>, ShapeError>
    where
        T: PartialOrd,
    {
        self.zip_with(other, move |a, b| op.apply(&a, &b))
    }

    /// Element-wise sum after broadcasting.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Incompatible`] if the shapes cannot be broadcast
    /// together and [`ShapeError::Overflow`] if any sum overflows.
    pub fn try_add(&self, other: &Batch<T>) -> Result<Batch<T>, ShapeError>
    where
        T: CheckedAdd,
    {
        self.try_zip_with(other, |a, b| {
            a.checked_add(&b)
                .ok_or(ShapeError::Overflow { op: "addition" })
        })
    }

    /// Element-wise difference after broadcasting.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Incompatible`] if the shapes cannot be broadcast
    /// together and [`ShapeError::Overflow`] if any difference overflows.
    pub fn try_sub(&self, other: &Batch<T>) -> Result<Batch<T>, ShapeError>
    where
        T: CheckedSub,
    {
        self.try_zip_with(other, |a, b| {
            a.checked_sub(&b)
                .ok_or(ShapeError::Overflow { op: "subtraction" })
        })
    }

    /// Element-wise choice: `on_true` where `mask` is set, else `on_false`.
    ///
    /// All three operands are broadcast to a common shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Incompatible`] if the shapes cannot be broadcast
    /// together.
    pub fn select(
        mask: &Batch<bool>,
        on_true: &Batch<T>,
        on_false: &Batch<T>,
    ) -> Result<Batch<T>, ShapeError> {
        let shape = broadcast_shapes(mask.shape(), on_true.shape())?;
        let shape = broadcast_shapes(&shape, on_false.shape())?;
        let m = view_as(mask, &shape)?;
        let t = view_as(on_true, &shape)?;
        let f = view_as(on_false, &shape)?;
        let data = Zip::from(m)
            .and(t)
            .and(f)
            .map_collect(|&c, &x, &y| if c { x } else { y });
        Ok(Batch::from_array(data))
    }
}
