//! An incremental tokenizer that sits in front of a byte sink.
//!
//! Producers rarely write along token boundaries: process output, socket
//! reads and file copies hand over whatever happens to be available. A
//! [`SplitWriter`] accepts those arbitrarily sized chunks, reassembles the
//! tokens that straddle chunk boundaries, and hands every completed token to a
//! [`Sink`] exactly once and in order.
//!
//! ```rust
//! use splitwriter::{ScanLines, SplitWriter};
//!
//! let mut lines = Vec::new();
//! let mut writer = SplitWriter::new(|token: &[u8]| {
//!     lines.push(token.to_vec());
//!     Ok::<(), core::convert::Infallible>(())
//! });
//! writer.set_split(ScanLines).unwrap();
//!
//! assert_eq!(writer.accept(b"one\ntw").unwrap(), 7);
//! assert_eq!(writer.pending_len(), 2);
//! assert_eq!(writer.accept(b"o\n").unwrap(), 2);
//! assert_eq!(writer.pending_len(), 0);
//! drop(writer);
//!
//! assert_eq!(lines, [b"one".to_vec(), b"two".to_vec()]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod chunk_utils;
mod error;
mod options;
mod scan;
mod sink;
mod split;
mod writer;

#[cfg(test)]
mod tests;

pub use chunk_utils::produce_chunks;
pub use error::{ErrorSource, InvalidUse, SplitWriterError};
pub use options::WriterOptions;
pub use scan::{ScanBytes, ScanLines, ScanRunes, ScanWords};
#[cfg(feature = "std")]
pub use sink::Forward;
pub use sink::{Callback, Handler, Rejection, Sink};
pub use split::{BoxError, ScanResult, Split, SplitResult, Token, without_eof};
pub use writer::SplitWriter;
