/// Configuration options for a [`SplitWriter`](crate::SplitWriter).
///
/// # Examples
///
/// ```rust
/// use splitwriter::{Callback, SplitWriter, WriterOptions};
///
/// let options = WriterOptions {
///     max_pending: Some(4096),
///     ..Default::default()
/// };
/// let writer = SplitWriter::with_sink(
///     Callback::new(|_: &[u8]| Ok::<(), core::convert::Infallible>(())),
///     options,
/// );
/// assert_eq!(writer.pending_len(), 0);
/// ```
///
/// # Default
///
/// No pending limit and no pre-allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Upper bound on the number of bytes held for an incomplete token.
    ///
    /// When a write would leave more than this many bytes pending, it fails
    /// with [`ErrorSource::PendingTooLong`](crate::ErrorSource::PendingTooLong).
    /// If the bytes were completing a previously pending token, the pending
    /// buffer is restored to its state before the write; otherwise the
    /// unresolved remainder is dropped, as with any other mid-write failure.
    ///
    /// # Default
    ///
    /// `None`
    pub max_pending: Option<usize>,

    /// Bytes to reserve for the pending buffer up front.
    ///
    /// # Default
    ///
    /// `0`
    pub initial_capacity: usize,
}
