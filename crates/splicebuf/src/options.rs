use crate::buffer::DEFAULT_CAPACITY;

/// How a buffer's storage grows when new content does not fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// Resize storage to exactly `length + 1` bytes on every [`set`].
    ///
    /// Every growing `set` reallocates, so repeated appends are quadratic.
    /// Storage also shrinks to fit when shorter content is set.
    ///
    /// [`set`]: crate::Buffer::set
    #[default]
    Exact,

    /// Grow to at least twice the current capacity when content does not fit,
    /// and never shrink on [`set`].
    ///
    /// [`set`]: crate::Buffer::set
    Doubling,
}

impl GrowthPolicy {
    /// Capacity to grow to so that `required` bytes (terminator included) fit
    /// into storage that currently holds `capacity` bytes.
    pub(crate) fn grown_capacity(self, capacity: usize, required: usize) -> usize {
        match self {
            Self::Exact => required,
            Self::Doubling => required.max(capacity.saturating_mul(2)),
        }
    }
}

/// Configuration for buffers created with [`Buffer::with_options`].
///
/// # Examples
///
/// ```rust
/// use splicebuf::{Buffer, BufferOptions, GrowthPolicy};
///
/// let buffer = Buffer::with_options(BufferOptions {
///     growth: GrowthPolicy::Doubling,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(buffer.capacity(), 32);
/// ```
///
/// [`Buffer::with_options`]: crate::Buffer::with_options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    /// Storage allocated up front, terminator included.
    ///
    /// # Default
    ///
    /// `32`
    pub default_capacity: usize,

    /// Growth policy used by [`set`](crate::Buffer::set) and
    /// [`try_reserve`](crate::Buffer::try_reserve).
    ///
    /// # Default
    ///
    /// [`GrowthPolicy::Exact`]
    pub growth: GrowthPolicy,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            growth: GrowthPolicy::Exact,
        }
    }
}
