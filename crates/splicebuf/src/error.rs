use alloc::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by [`Buffer`](crate::Buffer) and
/// [`BufferSlot`](crate::BufferSlot) operations.
///
/// A failing call never leaves the buffer it was invoked on in a partially
/// updated state, and never touches the source of a [`splice`].
///
/// [`splice`]: crate::Buffer::splice
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A caller-supplied value violates a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Storage could not be obtained or grown.
    #[error("failed to allocate {requested} bytes: {source}")]
    Allocation {
        /// Total storage size that was asked for.
        requested: usize,
        /// The allocator's reason.
        source: TryReserveError,
    },

    /// A computed access would land outside the buffer's content.
    #[error("index {index} out of range for buffer of length {len}")]
    IndexOutOfRange {
        /// The first offending index in visiting order.
        index: usize,
        /// Length of the content that was indexed.
        len: usize,
    },

    /// The operation was invoked on an absent or destroyed buffer handle.
    #[error("buffer handle is absent")]
    NullReference,
}

/// Fieldless category of a [`BufferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`BufferError::InvalidArgument`].
    InvalidArgument,
    /// See [`BufferError::Allocation`].
    Allocation,
    /// See [`BufferError::IndexOutOfRange`].
    IndexOutOfRange,
    /// See [`BufferError::NullReference`].
    NullReference,
}

impl BufferError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::NullReference => ErrorKind::NullReference,
        }
    }
}
