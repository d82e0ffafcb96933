//! Error types for the tenor-batch crate.

/// Error type for all shape-related failures in the tenor-batch crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// Returned when two operand shapes cannot be broadcast together.
    #[error("shapes {left:?} and {right:?} are not broadcast-compatible")]
    Incompatible {
        /// Shape of the left operand.
        left: Vec<usize>,
        /// Shape of the right operand.
        right: Vec<usize>,
    },

    /// Returned when a batch cannot be broadcast to a requested shape.
    #[error("cannot broadcast shape {from:?} to {to:?}")]
    NotBroadcastable {
        /// Shape of the batch.
        from: Vec<usize>,
        /// Requested target shape.
        to: Vec<usize>,
    },

    /// Returned when batches passed to `stack`/`concat` disagree in shape.
    #[error("input {position} has shape {found:?}, expected {expected:?}")]
    StackMismatch {
        /// Shape of the first input.
        expected: Vec<usize>,
        /// Shape of the offending input.
        found: Vec<usize>,
        /// Position of the offending input.
        position: usize,
    },

    /// Returned when `stack`/`concat` receive no inputs.
    #[error("cannot stack an empty list of batches")]
    EmptyStack,

    /// Returned when an axis argument lies outside the valid range.
    #[error("axis {axis} is out of range for {ndim} dimensions")]
    AxisOutOfRange {
        /// The axis that was requested.
        axis: isize,
        /// Number of dimensions the axis is checked against.
        ndim: usize,
    },

    /// Returned when a single index is outside its axis.
    #[error("index {index} is out of range for axis {axis} of length {len}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: isize,
        /// Axis the index applies to.
        axis: usize,
        /// Length of that axis.
        len: usize,
    },

    /// Returned when more indices than dimensions are given.
    #[error("too many indices: {given} given for {ndim} dimensions")]
    TooManyIndices {
        /// Number of axis-consuming indices given.
        given: usize,
        /// Number of dimensions of the batch.
        ndim: usize,
    },

    /// Returned when a slice step is zero.
    #[error("slice step on axis {axis} must be non-zero")]
    ZeroStep {
        /// Axis the slice applies to.
        axis: usize,
    },

    /// Returned when a flat buffer does not match the product of a shape.
    #[error("shape requires {expected} elements, got {actual}")]
    LengthMismatch {
        /// Product of the requested shape.
        expected: usize,
        /// Number of elements available.
        actual: usize,
    },

    /// Returned when transpose axes are not a permutation of `0..ndim`.
    #[error("axes {axes:?} are not a permutation of 0..{ndim}")]
    InvalidPermutation {
        /// The requested axis order.
        axes: Vec<usize>,
        /// Number of dimensions of the batch.
        ndim: usize,
    },

    /// Returned when squeezing an axis whose length is not 1.
    #[error("cannot squeeze axis {axis} of length {len}")]
    NotSqueezable {
        /// Axis that was requested.
        axis: usize,
        /// Length of that axis.
        len: usize,
    },

    /// Returned when a boolean mask does not match the leading dimensions.
    #[error("mask shape {mask:?} does not match leading dimensions of {shape:?}")]
    MaskMismatch {
        /// Shape of the mask.
        mask: Vec<usize>,
        /// Shape of the masked batch.
        shape: Vec<usize>,
    },

    /// Returned when element-wise arithmetic leaves the element type's range.
    #[error("element-wise {op} overflowed")]
    Overflow {
        /// The operation, e.g. "addition".
        op: &'static str,
    },
}
