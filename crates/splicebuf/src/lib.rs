//! Growable, length-prefixed byte buffers with explicit capacity management
//! and stride-based splicing.
//!
//! A [`Buffer`] owns its storage, always keeps its capacity strictly above its
//! length, and zero-terminates its content. [`Buffer::splice`] copies the
//! bytes visited by a stride walk into a fresh buffer, walking backwards when
//! the step is negative. All operations work on raw bytes and report failures
//! through [`BufferError`].
//!
//! ```rust
//! use splicebuf::Buffer;
//!
//! let text = Buffer::try_from("My name is Dave and I am a programmer.").unwrap();
//! assert_eq!(text.splice(0, 5, 1).unwrap().as_bytes(), b"My na");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod diag;
mod error;
mod options;
#[cfg(any(test, feature = "serde"))]
mod serde_support;
mod slot;
mod splice;
mod stride;

#[cfg(test)]
mod tests;

pub use buffer::{Buffer, DEFAULT_CAPACITY, MIN_CAPACITY};
pub use error::{BufferError, ErrorKind};
pub use options::{BufferOptions, GrowthPolicy};
pub use slot::BufferSlot;
pub use stride::Stride;
