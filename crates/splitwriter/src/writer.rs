//! The incremental forwarder.
//!
//! Overview
//! - `pending: Vec<u8>` holds every byte accepted so far that has not yet
//!   resolved into a delivered token. It is the only state carried between
//!   writes.
//! - Each write conceptually scans `pending ++ chunk`. When nothing is
//!   pending the chunk is scanned in place and only its unresolved tail is
//!   copied; otherwise the chunk is appended and scanning proceeds over the
//!   pending buffer with an explicit consumed offset, drained once the write
//!   finishes.
//!
//! Failure semantics
//! - A failure while completing the token that was already pending restores
//!   the pending buffer to its state before the write and reports zero bytes
//!   accepted. The caller may resubmit the same chunk.
//! - A failure after that point (or when nothing was pending) clears the
//!   pending buffer. Tokens already delivered during the write are counted,
//!   everything unresolved is dropped.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use bstr::{BString, ByteSlice};
use tracing::{debug, trace};

use crate::{
    error::{ErrorSource, InvalidUse, SplitWriterError},
    options::WriterOptions,
    scan::ScanLines,
    sink::{Callback, Handler, Rejection, Sink},
    split::Split,
};

/// Reassembles tokens from arbitrarily chunked writes and hands them to a
/// [`Sink`].
///
/// The default split strategy is [`ScanLines`].
pub struct SplitWriter<K> {
    sink: K,
    split: Box<dyn Split + Send + Sync>,
    pending: Vec<u8>,
    // `accept` has been called; the strategy is fixed from here on.
    written: bool,
    options: WriterOptions,
}

impl<H: Handler> SplitWriter<Callback<H>> {
    /// Create a writer that calls `handler` once per token.
    pub fn new(handler: H) -> Self {
        Self::with_sink(Callback::new(handler), WriterOptions::default())
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> SplitWriter<crate::sink::Forward<W>> {
    /// Create a writer that writes the raw bytes of each token to `writer`.
    pub fn forward(writer: W) -> Self {
        Self::with_sink(crate::sink::Forward::new(writer), WriterOptions::default())
    }
}

impl<K: Sink> SplitWriter<K> {
    /// Create a writer bound to `sink`.
    pub fn with_sink(sink: K, options: WriterOptions) -> Self {
        Self {
            sink,
            split: Box::new(ScanLines),
            pending: Vec::with_capacity(options.initial_capacity),
            written: false,
            options,
        }
    }

    /// Replace the split strategy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUse::SplitAfterWrite`] once [`accept`](Self::accept)
    /// has been called, whether or not that call succeeded.
    pub fn set_split<S>(&mut self, split: S) -> Result<&mut Self, InvalidUse>
    where
        S: Split + Send + Sync + 'static,
    {
        if self.written {
            return Err(InvalidUse::SplitAfterWrite);
        }
        self.split = Box::new(split);
        Ok(self)
    }

    /// Split `chunk`, together with any bytes pending from earlier writes,
    /// into tokens and deliver each complete token to the sink.
    ///
    /// Returns `chunk.len()` on success: every byte was either delivered as
    /// part of a token or is now pending.
    ///
    /// # Errors
    ///
    /// Fails when the strategy or the sink fails. The error reports how many
    /// bytes of `chunk` were delivered before the failure; see the module
    /// documentation for what remains pending.
    pub fn accept(&mut self, chunk: &[u8]) -> Result<usize, SplitWriterError<K::Error>> {
        self.written = true;
        match self.pending.len() {
            0 => self.accept_fresh(chunk),
            carried => self.accept_carried(carried, chunk),
        }
    }

    fn accept_fresh(&mut self, chunk: &[u8]) -> Result<usize, SplitWriterError<K::Error>> {
        let (consumed, outcome) = drain_tokens(&*self.split, &mut self.sink, chunk);
        if let Err(source) = outcome {
            debug!(
                consumed,
                dropped = chunk.len() - consumed,
                "dropping unresolved bytes after failure"
            );
            return Err(SplitWriterError::new(source, consumed));
        }

        let rest = &chunk[consumed..];
        check_pending(self.options, rest.len())
            .map_err(|source| SplitWriterError::new(source, consumed))?;
        self.pending.extend_from_slice(rest);
        Ok(chunk.len())
    }

    fn accept_carried(
        &mut self,
        carried: usize,
        chunk: &[u8],
    ) -> Result<usize, SplitWriterError<K::Error>> {
        self.pending.extend_from_slice(chunk);

        // First complete the token that was left over from the previous write.
        let first = next_token(&*self.split, &mut self.sink, &self.pending).and_then(|advance| {
            match advance {
                Some(advance) => Ok(Some(advance)),
                None => check_pending(self.options, self.pending.len()).map(|()| None),
            }
        });
        let advance = match first {
            Ok(Some(advance)) => advance,
            Ok(None) => {
                trace!(pending = self.pending.len(), "pending token still incomplete");
                return Ok(chunk.len());
            }
            Err(source) => {
                debug!(
                    carried,
                    discarded = chunk.len(),
                    "restoring pending token after failure"
                );
                self.pending.truncate(carried);
                return Err(SplitWriterError::new(source, 0));
            }
        };

        let (rest, outcome) = drain_tokens(&*self.split, &mut self.sink, &self.pending[advance..]);
        let consumed = advance + rest;
        let accepted = consumed.saturating_sub(carried);
        let outcome =
            outcome.and_then(|()| check_pending(self.options, self.pending.len() - consumed));
        if let Err(source) = outcome {
            debug!(
                accepted,
                dropped = self.pending.len() - consumed,
                "dropping unresolved bytes after failure"
            );
            self.pending.clear();
            return Err(SplitWriterError::new(source, accepted));
        }

        self.pending.drain(..consumed);
        Ok(chunk.len())
    }

    /// Number of bytes held for an incomplete token.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The bytes held for an incomplete token.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Whether [`accept`](Self::accept) has been called.
    #[must_use]
    pub fn has_written(&self) -> bool {
        self.written
    }

    /// The options this writer was created with.
    #[must_use]
    pub fn options(&self) -> WriterOptions {
        self.options
    }

    /// The sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// The sink, mutably.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Unwrap the sink. Pending bytes are discarded.
    pub fn into_inner(self) -> K {
        self.sink
    }
}

/// Run `split` once over `view` and deliver the token it finds.
///
/// Returns the advance of the delivered token, or `None` when `view` holds no
/// complete token.
fn next_token<K: Sink>(
    split: &dyn Split,
    sink: &mut K,
    view: &[u8],
) -> Result<Option<usize>, ErrorSource<K::Error>> {
    let Some(token) = split.split(view).map_err(ErrorSource::Split)? else {
        return Ok(None);
    };
    if !token.is_valid_for(view.len()) {
        return Err(ErrorSource::InvalidAdvance {
            advance: token.advance,
            token_len: token.bytes.len(),
            available: view.len(),
        });
    }

    trace!(advance = token.advance, len = token.bytes.len(), "delivering token");
    sink.deliver(&token.bytes).map_err(|rejection| rejected(rejection, &token.bytes))?;
    Ok(Some(token.advance))
}

/// Deliver tokens from the front of `view` until no complete token remains.
///
/// Returns the number of bytes consumed by delivered tokens alongside the
/// outcome, so callers can account for partial progress on failure.
fn drain_tokens<K: Sink>(
    split: &dyn Split,
    sink: &mut K,
    view: &[u8],
) -> (usize, Result<(), ErrorSource<K::Error>>) {
    let mut consumed = 0;
    while consumed < view.len() {
        match next_token(split, sink, &view[consumed..]) {
            Ok(Some(advance)) => consumed += advance,
            Ok(None) => break,
            Err(source) => return (consumed, Err(source)),
        }
    }
    (consumed, Ok(()))
}

fn check_pending<E>(options: WriterOptions, pending: usize) -> Result<(), ErrorSource<E>> {
    match options.max_pending {
        Some(limit) if pending > limit => Err(ErrorSource::PendingTooLong { pending, limit }),
        _ => Ok(()),
    }
}

fn rejected<E>(rejection: Rejection<E>, token: &[u8]) -> ErrorSource<E> {
    let len = token.len();
    let token = BString::from(token);
    match rejection {
        Rejection::Handle(source) => ErrorSource::Handle { token, source },
        Rejection::Write(source) => ErrorSource::Write { token, source },
        Rejection::ShortWrite { written } => ErrorSource::ShortWrite { token, written, len },
        Rejection::LongWrite { written } => ErrorSource::LongWrite { token, written, len },
    }
}

impl<K: fmt::Debug> fmt::Debug for SplitWriter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitWriter")
            .field("sink", &self.sink)
            .field("pending", &self.pending.as_bstr())
            .field("written", &self.written)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
impl<K> std::io::Write for SplitWriter<K>
where
    K: Sink,
    K::Error: core::error::Error + Send + Sync + 'static,
{
    /// Accepts the whole buffer or fails; the number of bytes delivered
    /// before a failure is available from the wrapped [`SplitWriterError`].
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.accept(buf).map_err(std::io::Error::other)
    }

    /// Flushes the sink. Pending bytes are never delivered by a flush.
    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush().map_err(std::io::Error::other)
    }
}
