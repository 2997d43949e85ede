//! `wirebuf-buffers` — byte-level reader and writer for the wirebuf wire format.
//!
//! All multi-byte scalars are little-endian and fixed-width. The writer grows
//! its backing storage on demand; the reader never panics on malformed input,
//! every read is bounds-checked and returns a [`BufferError`] on a short
//! buffer.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error produced by bounds-checked buffer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A read would run past the end of the buffer.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
}
