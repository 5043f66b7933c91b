//! Owned, growable byte storage with an explicit capacity.
//!
//! A [`Buffer`] keeps its whole allocation initialised: the storage vector's
//! length *is* the buffer's capacity, and the content is its first `length`
//! bytes. The byte right after the content is always `0`, so
//! [`Buffer::as_bytes_with_nul`] can hand the content to consumers that expect
//! a terminated string.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::{
    diag,
    error::BufferError,
    options::{BufferOptions, GrowthPolicy},
};

/// Capacity of a buffer created with [`Buffer::new`].
pub const DEFAULT_CAPACITY: usize = 32;

/// Smallest capacity accepted by [`Buffer::with_capacity`]: one content byte
/// plus the terminator.
pub const MIN_CAPACITY: usize = 2;

/// A growable byte buffer whose capacity always exceeds its length.
///
/// # Examples
///
/// ```rust
/// use splicebuf::Buffer;
///
/// let mut buffer = Buffer::new();
/// assert_eq!(buffer.len(), 0);
/// assert_eq!(buffer.capacity(), 32);
///
/// buffer.set(b"dave", 4).unwrap();
/// assert_eq!(buffer.as_bytes(), b"dave");
/// assert_eq!(buffer.capacity(), 5);
/// ```
#[derive(Clone)]
pub struct Buffer {
    // `data.len()` is the capacity. `data[length]` is always zero.
    data: Vec<u8>,
    length: usize,
    growth: GrowthPolicy,
}

impl Buffer {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] bytes of storage.
    ///
    /// Like [`Vec`], this aborts if the allocator fails. Use
    /// [`Buffer::try_new`] to get an error instead.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: alloc::vec![0; DEFAULT_CAPACITY],
            length: 0,
            growth: GrowthPolicy::Exact,
        }
    }

    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] bytes of storage.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Allocation`] if the storage cannot be obtained.
    pub fn try_new() -> Result<Self, BufferError> {
        Self::with_options(BufferOptions::default())
    }

    /// Creates an empty buffer configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if
    /// `options.default_capacity` is below [`MIN_CAPACITY`], and
    /// [`BufferError::Allocation`] if the storage cannot be obtained.
    pub fn with_options(options: BufferOptions) -> Result<Self, BufferError> {
        let mut buffer = Self::with_capacity(options.default_capacity)?;
        buffer.growth = options.growth;
        Ok(buffer)
    }

    /// Creates an empty buffer with exactly `capacity` bytes of storage.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `capacity` is below
    /// [`MIN_CAPACITY`], and [`BufferError::Allocation`] if the storage cannot
    /// be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        if capacity < MIN_CAPACITY {
            return Err(BufferError::InvalidArgument(
                "capacity must hold at least one byte and the terminator",
            ));
        }

        Ok(Self {
            data: alloc_zeroed(capacity)?,
            length: 0,
            growth: GrowthPolicy::Exact,
        })
    }

    /// Creates a buffer holding the first `length` bytes of `content`.
    ///
    /// Storage is sized to exactly `length + 1` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `length` is zero or
    /// `content` holds fewer than `length` bytes, and
    /// [`BufferError::Allocation`] if the storage cannot be obtained.
    pub fn from_bytes(content: &[u8], length: usize) -> Result<Self, BufferError> {
        let content = checked_content(content, length)?;

        let mut data = alloc_zeroed(length + 1)?;
        data[..length].copy_from_slice(content);

        Ok(Self {
            data,
            length,
            growth: GrowthPolicy::Exact,
        })
    }

    /// Used by [`Buffer::splice`] to hand over storage it filled itself.
    pub(crate) fn from_parts(data: Vec<u8>, length: usize, growth: GrowthPolicy) -> Self {
        debug_assert!(length < data.len(), "capacity must exceed length");
        debug_assert_eq!(data[length], 0, "missing terminator");
        Self {
            data,
            length,
            growth,
        }
    }

    /// Number of content bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the buffer holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Total storage size in bytes, terminator included. Always greater than
    /// [`len`](Self::len).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The growth policy used by [`set`](Self::set) and
    /// [`try_reserve`](Self::try_reserve).
    #[must_use]
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    /// Changes the growth policy for future mutations.
    pub fn set_growth_policy(&mut self, growth: GrowthPolicy) {
        self.growth = growth;
    }

    /// The content bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.length]
    }

    /// The content bytes followed by the zero terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data[..=self.length]
    }

    /// The content as a byte string, for display and debugging.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// Replaces the content with the first `length` bytes of `content`.
    ///
    /// Under [`GrowthPolicy::Exact`] the storage is resized to exactly
    /// `length + 1` bytes. Under [`GrowthPolicy::Doubling`] it only grows, and
    /// only when `length` does not fit.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `length` is zero (use
    /// [`clear`](Self::clear) instead) or `content` holds fewer than `length`
    /// bytes, and [`BufferError::Allocation`] if the storage cannot grow. The
    /// buffer is unchanged on error.
    pub fn set(&mut self, content: &[u8], length: usize) -> Result<(), BufferError> {
        let content = checked_content(content, length)?;

        let required = length + 1;
        match self.growth {
            GrowthPolicy::Exact => resize_zeroed(&mut self.data, required)?,
            GrowthPolicy::Doubling if required > self.capacity() => {
                let capacity = self.growth.grown_capacity(self.capacity(), required);
                resize_zeroed(&mut self.data, capacity)?;
            }
            GrowthPolicy::Doubling => {}
        }

        self.data[..length].copy_from_slice(content);
        self.data[length] = 0;
        self.length = length;
        Ok(())
    }

    /// Replaces the content with all of `content`.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set).
    pub fn set_bytes(&mut self, content: &[u8]) -> Result<(), BufferError> {
        self.set(content, content.len())
    }

    /// Empties the buffer and zeroes all of its storage. Capacity is kept.
    pub fn clear(&mut self) {
        self.length = 0;
        self.data.fill(0);
    }

    /// Makes room for at least `additional` more content bytes.
    ///
    /// Storage is never shrunk. Under [`GrowthPolicy::Doubling`] it grows to
    /// at least twice its current size.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Allocation`] if the storage cannot grow. The
    /// buffer is unchanged on error.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), BufferError> {
        // An overflowing request saturates and is then refused by the
        // allocator as a capacity overflow.
        let required = self.length.saturating_add(additional).saturating_add(1);
        if required <= self.capacity() {
            return Ok(());
        }

        let capacity = self.growth.grown_capacity(self.capacity(), required);
        resize_zeroed(&mut self.data, capacity)
    }

    #[cfg(test)]
    pub(crate) fn data_is_zeroed(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Buffer {}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for Buffer {
    type Error = BufferError;

    fn try_from(content: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(content, content.len())
    }
}

impl TryFrom<&str> for Buffer {
    type Error = BufferError;

    fn try_from(content: &str) -> Result<Self, Self::Error> {
        Self::try_from(content.as_bytes())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("content", &self.as_bstr())
            .field("length", &self.length)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

fn checked_content(content: &[u8], length: usize) -> Result<&[u8], BufferError> {
    if length == 0 {
        return Err(BufferError::InvalidArgument("length must be non-zero"));
    }
    content
        .get(..length)
        .ok_or(BufferError::InvalidArgument("content is shorter than length"))
}

/// Allocates exactly `capacity` zeroed bytes.
pub(crate) fn alloc_zeroed(capacity: usize) -> Result<Vec<u8>, BufferError> {
    let mut data = Vec::new();
    resize_zeroed(&mut data, capacity)?;
    Ok(data)
}

/// Resizes `data` to exactly `capacity` bytes, zero-filling new ones.
///
/// Leaves `data` untouched if the allocation fails.
pub(crate) fn resize_zeroed(data: &mut Vec<u8>, capacity: usize) -> Result<(), BufferError> {
    if let Some(additional) = capacity.checked_sub(data.len()).filter(|n| *n > 0) {
        data.try_reserve_exact(additional).map_err(|source| {
            diag::emit_debug!(requested = capacity, "storage allocation failed");
            BufferError::Allocation {
                requested: capacity,
                source,
            }
        })?;
        diag::emit_debug!(from = data.len(), to = capacity, "growing storage");
    }
    data.resize(capacity, 0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};

    use super::*;
    use crate::error::ErrorKind;

    const LONGER: &[u8] = b"This is some text that I believe will be longer than the default 32 \
        characters that a string is initially given.";

    fn assert_invariants(buffer: &Buffer) {
        assert!(buffer.capacity() > buffer.len());
        assert_eq!(buffer.as_bytes_with_nul()[buffer.len()], 0);
    }

    #[test]
    fn new_has_default_capacity() {
        let buffer = Buffer::new();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_bytes_with_nul(), [0]);
        assert_eq!(Buffer::try_new().unwrap().capacity(), 32);
    }

    #[test]
    fn from_bytes_sizes_storage_exactly() {
        let buffer = Buffer::from_bytes(b"dave", 4).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.capacity(), 5);
        assert_eq!(buffer.as_bytes(), b"dave");
        assert_eq!(buffer.as_bytes_with_nul(), b"dave\0");

        let buffer = Buffer::from_bytes(LONGER, LONGER.len()).unwrap();
        assert_eq!(buffer.as_bytes(), LONGER);
        assert_invariants(&buffer);
    }

    #[test]
    fn from_bytes_takes_a_prefix() {
        let buffer = Buffer::from_bytes(b"programmer", 7).unwrap();
        assert_eq!(buffer.as_bytes(), b"program");
    }

    #[test]
    fn from_bytes_rejects_bad_lengths() {
        assert_eq!(
            Buffer::from_bytes(b"dave", 0).unwrap_err(),
            BufferError::InvalidArgument("length must be non-zero")
        );
        assert_eq!(
            Buffer::from_bytes(b"dave", 5).unwrap_err(),
            BufferError::InvalidArgument("content is shorter than length")
        );
        assert_eq!(
            Buffer::try_from("").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn with_capacity_enforces_minimum() {
        let buffer = Buffer::with_capacity(2).unwrap();
        assert_eq!((buffer.len(), buffer.capacity()), (0, 2));
        for capacity in [0, 1] {
            assert_eq!(
                Buffer::with_capacity(capacity).unwrap_err().kind(),
                ErrorKind::InvalidArgument
            );
        }
    }

    #[test]
    fn with_capacity_reports_allocation_failure() {
        let err = Buffer::with_capacity(usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            BufferError::Allocation {
                requested: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn with_options_applies_settings() {
        let buffer = Buffer::with_options(BufferOptions {
            default_capacity: 8,
            growth: GrowthPolicy::Doubling,
        })
        .unwrap();
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.growth_policy(), GrowthPolicy::Doubling);

        let err = Buffer::with_options(BufferOptions {
            default_capacity: 1,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn set_on_default_buffer_shrinks_to_fit() {
        let mut buffer = Buffer::new();
        buffer.set(b"dave", 4).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.capacity(), 5);
        assert_eq!(buffer.as_bytes(), b"dave");
        assert_invariants(&buffer);
    }

    #[test]
    fn set_grows_exactly_past_capacity() {
        let mut buffer = Buffer::new();
        buffer.set_bytes(LONGER).unwrap();
        assert_eq!(buffer.len(), LONGER.len());
        assert_eq!(buffer.capacity(), LONGER.len() + 1);
        assert_eq!(buffer.as_bytes(), LONGER);

        buffer.set_bytes(b"short").unwrap();
        assert_eq!(buffer.as_bytes_with_nul(), b"short\0");
        assert_eq!(buffer.capacity(), 6);
    }

    #[test]
    fn set_with_doubling_never_shrinks() {
        let mut buffer = Buffer::with_options(BufferOptions {
            growth: GrowthPolicy::Doubling,
            ..Default::default()
        })
        .unwrap();

        buffer.set_bytes(b"dave").unwrap();
        assert_eq!(buffer.capacity(), 32);

        buffer.set_bytes(LONGER).unwrap();
        assert_eq!(buffer.capacity(), LONGER.len() + 1);

        let before = buffer.capacity();
        buffer.set(&[b'x'; 200], before).unwrap();
        assert_eq!(buffer.capacity(), before * 2);

        buffer.set_bytes(b"dave").unwrap();
        assert_eq!(buffer.capacity(), before * 2);
        assert_eq!(buffer.as_bytes_with_nul(), b"dave\0");
    }

    #[test]
    fn set_rejects_bad_arguments_without_mutating() {
        let mut buffer = Buffer::from_bytes(b"dave", 4).unwrap();
        assert_eq!(
            buffer.set(b"", 0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            buffer.set(b"ab", 3).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(buffer.as_bytes(), b"dave");
        assert_eq!(buffer.capacity(), 5);
    }

    #[test]
    fn clear_zeroes_all_storage() {
        let mut buffer = Buffer::new();
        buffer.set_bytes(LONGER).unwrap();
        let capacity = buffer.capacity();

        buffer.clear();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), capacity);
        assert!(buffer.data_is_zeroed());
    }

    #[test]
    fn try_reserve_grows_per_policy() {
        let mut buffer = Buffer::from_bytes(b"dave", 4).unwrap();
        buffer.try_reserve(0).unwrap();
        assert_eq!(buffer.capacity(), 5);

        buffer.try_reserve(10).unwrap();
        assert_eq!(buffer.capacity(), 15);
        assert_eq!(buffer.as_bytes_with_nul(), b"dave\0");

        buffer.set_growth_policy(GrowthPolicy::Doubling);
        buffer.try_reserve(11).unwrap();
        assert_eq!(buffer.capacity(), 30);
    }

    #[test]
    fn failed_reserve_leaves_buffer_intact() {
        let mut buffer = Buffer::from_bytes(b"dave", 4).unwrap();
        let err = buffer.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Allocation);
        assert_eq!(buffer.as_bytes_with_nul(), b"dave\0");
        assert_eq!(buffer.capacity(), 5);
    }

    #[test]
    fn equality_ignores_capacity() {
        let mut a = Buffer::new();
        a.set_growth_policy(GrowthPolicy::Doubling);
        a.set_bytes(b"dave").unwrap();
        let b = Buffer::try_from("dave").unwrap();
        assert_ne!(a.capacity(), b.capacity());
        assert_eq!(a, b);
    }

    #[test]
    fn formats_content_as_byte_string() {
        let buffer = Buffer::from_bytes(b"da\xffve", 5).unwrap();
        assert_eq!(
            format!("{buffer:?}"),
            r#"Buffer { content: "da\xffve", length: 5, capacity: 6 }"#
        );
        assert_eq!(buffer.to_string(), "da\u{FFFD}ve");
    }
}
