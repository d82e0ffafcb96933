//! # tenor-batch
//!
//! A shape-aware N-dimensional container for batched element-wise work.
//!
//! [`Batch<T>`] wraps an `ndarray` dynamic-rank array and exposes the fixed
//! set of operations batched date arithmetic needs: shape introspection,
//! numpy-style indexing, broadcasting, stacking and element-wise kernels.
//!
//! ```
//! use tenor_batch::{Batch, Comparison};
//!
//! let col = Batch::from_vec(&[2, 1], vec![10, 20]).unwrap();
//! let row = Batch::from(vec![1, 2, 3]);
//! let sum = col.try_add(&row).unwrap();
//! assert_eq!(sum.shape(), &[2, 3]);
//!
//! let big = sum.compare(&Batch::scalar(15), Comparison::Gt).unwrap();
//! assert_eq!(big.to_vec(), vec![false, false, false, true, true, true]);
//! ```
//!
//! Large batches (at least [`PARALLEL_THRESHOLD`] elements) are processed on
//! the rayon thread pool; results do not depend on which path runs.

mod batch;
mod broadcast;
mod error;
mod index;
mod manipulate;

pub use batch::{Batch, Element, PARALLEL_THRESHOLD};
pub use broadcast::{Comparison, broadcast_shapes};
pub use error::ShapeError;
pub use index::AxisIndex;
