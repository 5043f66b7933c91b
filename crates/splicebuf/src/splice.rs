use crate::{
    buffer::{Buffer, alloc_zeroed, resize_zeroed},
    error::BufferError,
    stride::Stride,
};

impl Buffer {
    /// Copies the bytes visited by a stride walk into a new buffer.
    ///
    /// With a positive `step` the walk visits `start, start + step, ...` while
    /// the index is below `end`. With a negative `step` and `start > end` it
    /// visits `start, start - |step|, ...` while the index is above `end`,
    /// producing the bytes in descending index order. `end` is never visited.
    ///
    /// The new buffer shares no storage with `self` and inherits its growth
    /// policy. Its storage starts at `|end - start| / |step| + 1` bytes and
    /// doubles whenever the copied bytes would crowd out the terminator, so a
    /// walk whose distance is not a multiple of its step grows once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use splicebuf::Buffer;
    ///
    /// let text = Buffer::try_from("My name is Pink and I'm really glad to meet you.").unwrap();
    /// assert_eq!(text.splice(1, 7, 2).unwrap().as_bytes(), b"ynm");
    /// assert_eq!(text.splice(5, 0, -1).unwrap().as_bytes(), b"man y");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidArgument`] if `step` is zero, `start == end`,
    ///   or the sign of `step` does not lead from `start` toward `end`.
    /// - [`BufferError::IndexOutOfRange`] if any visited index is not below
    ///   [`len`](Self::len). Nothing is allocated in that case.
    /// - [`BufferError::Allocation`] if the new storage cannot be obtained.
    pub fn splice(&self, start: usize, end: usize, step: isize) -> Result<Buffer, BufferError> {
        let stride = Stride::new(start, end, step)?;
        if let Some(index) = stride.first_outside(self.len()) {
            return Err(BufferError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        let source = self.as_bytes();
        let mut data = alloc_zeroed(start.abs_diff(end) / stride.step() + 1)?;
        let mut length = 0;
        for index in stride {
            // Keep one byte free for the terminator.
            if length + 1 >= data.len() {
                let capacity = data.len().saturating_mul(2);
                resize_zeroed(&mut data, capacity)?;
            }
            data[length] = source[index];
            length += 1;
        }
        data[length] = 0;

        Ok(Buffer::from_parts(data, length, self.growth_policy()))
    }
}
