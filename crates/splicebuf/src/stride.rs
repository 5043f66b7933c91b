//! The index walk behind [`Buffer::splice`](crate::Buffer::splice).
//!
//! A walk with a positive step visits `start, start + step, ...` while the
//! index stays below `end`. A walk with a negative step visits
//! `start, start - |step|, ...` while the index stays above `end`. Either way
//! `end` itself is never visited.

use core::iter::FusedIterator;

use crate::error::BufferError;

/// Iterator over the indices visited by a stride walk.
///
/// # Examples
///
/// ```rust
/// use splicebuf::Stride;
///
/// let forward: Vec<usize> = Stride::new(1, 7, 2).unwrap().collect();
/// assert_eq!(forward, [1, 3, 5]);
///
/// let backward: Vec<usize> = Stride::new(7, 1, -2).unwrap().collect();
/// assert_eq!(backward, [7, 5, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stride {
    next: usize,
    step: usize,
    descending: bool,
    remaining: usize,
}

impl Stride {
    /// Validates the bounds and builds the walk.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `step` is zero, if `start`
    /// equals `end`, or if the sign of `step` does not lead from `start`
    /// toward `end`.
    pub fn new(start: usize, end: usize, step: isize) -> Result<Self, BufferError> {
        if step == 0 {
            return Err(BufferError::InvalidArgument("step must be non-zero"));
        }
        if start == end {
            return Err(BufferError::InvalidArgument("start and end must differ"));
        }

        let descending = step < 0;
        if descending != (start > end) {
            return Err(BufferError::InvalidArgument(
                "step does not advance from start toward end",
            ));
        }

        let step = step.unsigned_abs();
        Ok(Self {
            next: start,
            step,
            descending,
            remaining: start.abs_diff(end).div_ceil(step),
        })
    }

    /// Returns `true` if the walk runs from high indices to low ones.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// The distance between consecutive indices.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the first index still to be visited that is `>= len`, if any.
    ///
    /// Does not advance the walk.
    #[must_use]
    pub fn first_outside(&self, len: usize) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        if self.descending || self.next >= len {
            // A descending walk starts at its highest index.
            return (self.next >= len).then_some(self.next);
        }

        let last = self.next + (self.remaining - 1) * self.step;
        if last < len {
            return None;
        }

        let steps_to_len = (len - self.next).div_ceil(self.step);
        Some(self.next + steps_to_len * self.step)
    }
}

impl Iterator for Stride {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.next;
        self.remaining -= 1;
        // Only advance while there is somewhere to go, so the cursor never
        // leaves the `[start, end]` span and cannot overflow.
        if self.remaining > 0 {
            if self.descending {
                self.next -= self.step;
            } else {
                self.next += self.step;
            }
        }
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Stride {}

impl FusedIterator for Stride {}
