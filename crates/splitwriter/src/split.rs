//! The tokenizer strategy contract.
//!
//! A strategy looks at the bytes that have not yet been turned into tokens
//! and finds at most one token at their front. It never learns whether the
//! stream has ended: a writer only ever sees pushed chunks, so "no token yet"
//! always means "wait for more data".

use alloc::{borrow::Cow, boxed::Box};

/// A type-erased strategy error.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// The outcome of a single [`Split::split`] call.
///
/// `Ok(None)` asks for more data. `Ok(Some(token))` consumes
/// `token.advance` bytes from the front of the candidate buffer.
pub type SplitResult<'a> = Result<Option<Token<'a>>, BoxError>;

/// A token found by a [`Split`] strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Bytes to drop from the front of the candidate buffer; at least the
    /// token's length and at least one.
    pub advance: usize,
    /// The token itself. Usually a borrow of the candidate buffer, owned when
    /// the strategy rewrites the bytes it consumed.
    pub bytes: Cow<'a, [u8]>,
}

impl<'a> Token<'a> {
    /// A token that borrows from the candidate buffer.
    #[must_use]
    pub fn borrowed(advance: usize, bytes: &'a [u8]) -> Self {
        Self {
            advance,
            bytes: Cow::Borrowed(bytes),
        }
    }

    /// A token whose bytes do not appear verbatim in the candidate buffer.
    #[must_use]
    pub fn owned(advance: usize, bytes: alloc::vec::Vec<u8>) -> Self {
        Self {
            advance,
            bytes: Cow::Owned(bytes),
        }
    }

    pub(crate) fn is_valid_for(&self, available: usize) -> bool {
        self.advance > 0 && self.advance <= available && self.bytes.len() <= self.advance
    }
}

/// A tokenizer strategy.
///
/// Implementations must be deterministic and free of side effects: the
/// writer may run a strategy over the same bytes more than once when earlier
/// calls did not yet complete a token.
pub trait Split {
    /// Find the token at the front of `data`, if it is complete.
    ///
    /// # Errors
    ///
    /// Any error aborts the current write; see
    /// [`SplitWriter::accept`](crate::SplitWriter::accept) for what happens to
    /// the buffered bytes.
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a>;
}

impl<F> Split for F
where
    F: for<'a> Fn(&'a [u8]) -> SplitResult<'a>,
{
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a> {
        self(data)
    }
}

/// The result of an end-of-stream aware scan primitive: `(advance, token)`.
pub type ScanResult<'a> = Result<(usize, Option<Cow<'a, [u8]>>), BoxError>;

/// Adapts an end-of-stream aware scan primitive into a [`Split`] strategy.
///
/// The primitive is always told that the stream has not ended, since a
/// writer has no way of knowing that. An advance of zero asks for more data;
/// a non-zero advance without a token is reported as a split error, because a
/// writer only consumes bytes as part of a delivered token.
///
/// ```rust
/// use std::borrow::Cow;
/// use splitwriter::{ScanResult, Split, without_eof};
///
/// fn comma<'a>(data: &'a [u8], _at_eof: bool) -> ScanResult<'a> {
///     Ok(match data.iter().position(|&b| b == b',') {
///         Some(i) => (i + 1, Some(Cow::Borrowed(&data[..i]))),
///         None => (0, None),
///     })
/// }
///
/// let split = without_eof(comma);
/// let token = split.split(b"a,b").unwrap().unwrap();
/// assert_eq!((token.advance, &*token.bytes), (2, &b"a"[..]));
/// assert!(split.split(b"b").unwrap().is_none());
/// ```
pub fn without_eof<F>(scan: F) -> impl Split + Send + Sync + 'static
where
    F: for<'a> Fn(&'a [u8], bool) -> ScanResult<'a> + Send + Sync + 'static,
{
    WithoutEof(scan)
}

struct WithoutEof<F>(F);

impl<F> Split for WithoutEof<F>
where
    F: for<'a> Fn(&'a [u8], bool) -> ScanResult<'a>,
{
    fn split<'a>(&self, data: &'a [u8]) -> SplitResult<'a> {
        match (self.0)(data, false)? {
            (0, _) => Ok(None),
            (advance, Some(bytes)) => Ok(Some(Token { advance, bytes })),
            (advance, None) => Err(alloc::format!("advanced {advance} bytes without a token").into()),
        }
    }
}
