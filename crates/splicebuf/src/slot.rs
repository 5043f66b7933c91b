use crate::{buffer::Buffer, diag, error::BufferError};

/// A named field that may or may not hold a [`Buffer`].
///
/// Records that own several buffers (an anchor's `href` and `text`, say) keep
/// them in slots so that every operation on a torn-down field reports
/// [`BufferError::NullReference`] instead of touching freed storage.
///
/// # Examples
///
/// ```rust
/// use splicebuf::{Buffer, BufferError, BufferSlot};
///
/// let mut href = BufferSlot::new(Buffer::new());
/// href.set(b"https://example.com", 19).unwrap();
/// assert!(href.destroy());
///
/// assert_eq!(href.clear(), Err(BufferError::NullReference));
/// assert!(!href.destroy());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSlot(Option<Buffer>);

impl BufferSlot {
    /// A slot holding no buffer.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }

    /// A slot holding `buffer`.
    #[must_use]
    pub fn new(buffer: Buffer) -> Self {
        Self(Some(buffer))
    }

    /// Returns `true` if the slot holds a buffer.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// The held buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NullReference`] if the slot is empty.
    pub fn get(&self) -> Result<&Buffer, BufferError> {
        self.0.as_ref().ok_or(BufferError::NullReference)
    }

    /// The held buffer, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NullReference`] if the slot is empty.
    pub fn get_mut(&mut self) -> Result<&mut Buffer, BufferError> {
        self.0.as_mut().ok_or(BufferError::NullReference)
    }

    /// Puts `buffer` into the slot and returns whatever was there before.
    pub fn replace(&mut self, buffer: Buffer) -> Option<Buffer> {
        self.0.replace(buffer)
    }

    /// Takes the buffer out, leaving the slot empty.
    pub fn take(&mut self) -> Option<Buffer> {
        self.0.take()
    }

    /// Forwards to [`Buffer::set`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NullReference`] if the slot is empty, otherwise
    /// whatever [`Buffer::set`] returns.
    pub fn set(&mut self, content: &[u8], length: usize) -> Result<(), BufferError> {
        self.get_mut()?.set(content, length)
    }

    /// Forwards to [`Buffer::clear`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NullReference`] if the slot is empty.
    pub fn clear(&mut self) -> Result<(), BufferError> {
        self.get_mut()?.clear();
        Ok(())
    }

    /// Forwards to [`Buffer::splice`].
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NullReference`] if the slot is empty, otherwise
    /// whatever [`Buffer::splice`] returns.
    pub fn splice(&self, start: usize, end: usize, step: isize) -> Result<Buffer, BufferError> {
        self.get()?.splice(start, end, step)
    }

    /// Releases the held buffer's storage and empties the slot.
    ///
    /// Destroying an empty slot does nothing beyond emitting a diagnostic.
    /// Returns whether a buffer was released.
    pub fn destroy(&mut self) -> bool {
        if self.0.take().is_some() {
            return true;
        }

        diag::emit_warn!("destroy called on an empty buffer slot");
        false
    }
}

impl From<Buffer> for BufferSlot {
    fn from(buffer: Buffer) -> Self {
        Self::new(buffer)
    }
}

impl From<Option<Buffer>> for BufferSlot {
    fn from(buffer: Option<Buffer>) -> Self {
        Self(buffer)
    }
}
