use bstr::BString;
use thiserror::Error;

use crate::split::BoxError;

/// An error returned by [`SplitWriter::accept`](crate::SplitWriter::accept).
///
/// Besides the cause, the error records how many bytes of the failing chunk
/// were delivered to the sink before the failure. Bytes that were pending
/// from earlier calls are never counted again.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct SplitWriterError<E> {
    pub(crate) source: ErrorSource<E>,
    pub(crate) accepted: usize,
}

impl<E> SplitWriterError<E> {
    pub(crate) fn new(source: ErrorSource<E>, accepted: usize) -> Self {
        Self { source, accepted }
    }

    /// Number of bytes of the failing chunk that reached the sink.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// The underlying cause.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource<E> {
        &self.source
    }

    /// Consume the error and return the underlying cause.
    #[must_use]
    pub fn into_kind(self) -> ErrorSource<E> {
        self.source
    }
}

/// The cause of a [`SplitWriterError`].
///
/// `E` is the sink's own error type: the handler error for
/// [`Callback`](crate::Callback) sinks and [`std::io::Error`] for
/// `Forward` sinks.
#[derive(Error, Debug)]
pub enum ErrorSource<E> {
    /// The split strategy reported a fault while scanning.
    #[error("failed to split: {0}")]
    Split(#[source] BoxError),
    /// The split strategy returned a token that violates its contract.
    #[error("failed to split: invalid advance {advance} for a {token_len} byte token in {available} bytes")]
    InvalidAdvance {
        /// Bytes the strategy asked to consume.
        advance: usize,
        /// Length of the returned token.
        token_len: usize,
        /// Bytes the strategy was given.
        available: usize,
    },
    /// A callback sink rejected a token.
    #[error("failed to handle token \"{token}\": {source}")]
    Handle {
        /// The rejected token.
        token: BString,
        /// The handler's error.
        source: E,
    },
    /// A forwarding sink failed while writing a token.
    #[error("failed to write token \"{token}\": {source}")]
    Write {
        /// The token being written.
        token: BString,
        /// The writer's error.
        source: E,
    },
    /// A forwarding sink accepted fewer bytes than the token holds.
    #[error("short write of token \"{token}\": {written} of {len} bytes accepted")]
    ShortWrite {
        /// The token being written.
        token: BString,
        /// Bytes the sink reported as written.
        written: usize,
        /// Length of the token.
        len: usize,
    },
    /// A forwarding sink claimed more bytes than the token holds.
    #[error("long write of token \"{token}\": {written} of {len} bytes accepted")]
    LongWrite {
        /// The token being written.
        token: BString,
        /// Bytes the sink reported as written.
        written: usize,
        /// Length of the token.
        len: usize,
    },
    /// The pending buffer would grow past
    /// [`WriterOptions::max_pending`](crate::WriterOptions::max_pending).
    #[error("pending token of {pending} bytes exceeds the limit of {limit} bytes")]
    PendingTooLong {
        /// Bytes that would have been pending.
        pending: usize,
        /// The configured limit.
        limit: usize,
    },
}

/// Misuse of a [`SplitWriter`](crate::SplitWriter).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidUse {
    /// The split strategy was replaced after the first write.
    #[error("split called after write")]
    SplitAfterWrite,
}
