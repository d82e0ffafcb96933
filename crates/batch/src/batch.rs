//! The shape-aware batch container.

use ndarray::{ArrayD, IxDyn, Zip};
use rayon::prelude::*;

use crate::error::ShapeError;

/// Batches at or above this many elements are processed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 1 << 15;

/// Element types a [`Batch`] can hold.
pub trait Element: Copy + Send + Sync + 'static {}

impl<T: Copy + Send + Sync + 'static> Element for T {}

/// An N-dimensional, row-major batch of values.
///
/// A zero-dimensional batch holds exactly one value. The buffer length is
/// always the product of the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    data: ArrayD<T>,
}

impl<T: Element> Batch<T> {
    /// Creates a batch of the given shape from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if `data.len()` is not the
    /// product of `shape`.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .unwrap_or(usize::MAX);
        if expected != data.len() {
            return Err(ShapeError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: rebuild(shape, data),
        })
    }

    /// Creates a batch of the given shape with every element set to `value`.
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
        }
    }

    /// Creates a zero-dimensional batch holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::from_elem(&[], value)
    }

    /// Wraps an existing `ndarray` array.
    pub fn from_array(data: ArrayD<T>) -> Self {
        Self { data }
    }

    /// Shape of the batch.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the batch holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrows the underlying array.
    pub fn as_array(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Consumes the batch and returns the underlying array.
    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }

    /// Element at a full multi-dimensional index, or `None` if out of bounds.
    pub fn value_at(&self, index: &[usize]) -> Option<T> {
        self.data.get(IxDyn(index)).copied()
    }

    /// Iterates over elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Copies the elements into a row-major `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }

    /// Applies `f` to every element, producing a batch of the same shape.
    pub fn map<U, F>(&self, f: F) -> Batch<U>
    where
        U: Element,
        F: Fn(T) -> U + Send + Sync,
    {
        let zip = Zip::from(&self.data);
        let data = if self.len() >= PARALLEL_THRESHOLD {
            zip.par_map_collect(|&x| f(x))
        } else {
            zip.map_collect(|&x| f(x))
        };
        Batch { data }
    }

    /// Applies a fallible `f` to every element.
    ///
    /// The whole call fails if any element fails; the error reported is that
    /// of the first failing element in row-major order.
    pub fn try_map<U, E, F>(&self, f: F) -> Result<Batch<U>, E>
    where
        U: Element,
        E: Send,
        F: Fn(T) -> Result<U, E> + Send + Sync,
    {
        let flat = self.to_vec();
        let values = collect_results(flat, f)?;
        Ok(Batch {
            data: rebuild(self.shape(), values),
        })
    }
}

/// Maps `f` over `items`, in parallel for large inputs, and returns either
/// every value or the first error in input order.
pub(crate) fn collect_results<I, U, E, F>(items: Vec<I>, f: F) -> Result<Vec<U>, E>
where
    I: Send,
    U: Send,
    E: Send,
    F: Fn(I) -> Result<U, E> + Send + Sync,
{
    if items.len() >= PARALLEL_THRESHOLD {
        let results: Vec<Result<U, E>> = items.into_par_iter().map(f).collect();
        results.into_iter().collect()
    } else {
        items.into_iter().map(f).collect()
    }
}

/// Builds an array from a row-major buffer whose length is known to match.
pub(crate) fn rebuild<T>(shape: &[usize], values: Vec<T>) -> ArrayD<T> {
    ArrayD::from_shape_vec(IxDyn(shape), values).expect("buffer length matches its shape")
}

impl<T: Element> From<Vec<T>> for Batch<T> {
    /// Creates a one-dimensional batch.
    fn from(values: Vec<T>) -> Self {
        let len = values.len();
        Self {
            data: rebuild(&[len], values),
        }
    }
}

impl<T: Element> From<&[T]> for Batch<T> {
    fn from(values: &[T]) -> Self {
        Self::from(values.to_vec())
    }
}

impl<T: Element> From<ArrayD<T>> for Batch<T> {
    fn from(data: ArrayD<T>) -> Self {
        Self { data }
    }
}
