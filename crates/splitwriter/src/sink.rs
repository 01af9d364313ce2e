//! Downstream consumers of delivered tokens.

/// Why a [`Sink`] refused a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection<E> {
    /// A callback handler returned an error.
    Handle(E),
    /// A nested writer returned an error.
    Write(E),
    /// A nested writer accepted fewer bytes than the token holds.
    ShortWrite {
        /// Bytes the writer reported.
        written: usize,
    },
    /// A nested writer reported more bytes than the token holds.
    LongWrite {
        /// Bytes the writer reported.
        written: usize,
    },
}

/// A consumer of tokens.
///
/// The writer calls [`deliver`](Sink::deliver) once per token, in order,
/// and only ever from within [`SplitWriter::accept`](crate::SplitWriter::accept).
/// The token slice is only valid for the duration of the call.
pub trait Sink {
    /// The sink's error type.
    type Error;

    /// Consume one token.
    ///
    /// # Errors
    ///
    /// A rejection aborts the write that produced the token.
    fn deliver(&mut self, token: &[u8]) -> Result<(), Rejection<Self::Error>>;

    /// Flush any state buffered by the sink itself.
    ///
    /// This never sees the writer's pending bytes.
    ///
    /// # Errors
    ///
    /// Whatever the underlying sink reports.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A callback invoked once per token.
///
/// Implemented for every `FnMut(&[u8]) -> Result<(), E>`.
pub trait Handler {
    /// The handler's error type.
    type Error;

    /// Handle one token.
    ///
    /// # Errors
    ///
    /// Returning an error rejects the token.
    fn handle(&mut self, token: &[u8]) -> Result<(), Self::Error>;
}

impl<F, E> Handler for F
where
    F: FnMut(&[u8]) -> Result<(), E>,
{
    type Error = E;

    fn handle(&mut self, token: &[u8]) -> Result<(), E> {
        self(token)
    }
}

/// A [`Sink`] that passes every token to a [`Handler`].
#[derive(Debug, Clone, Default)]
pub struct Callback<H>(H);

impl<H: Handler> Callback<H> {
    /// Wrap a handler.
    pub fn new(handler: H) -> Self {
        Self(handler)
    }

    /// The wrapped handler.
    pub fn get_ref(&self) -> &H {
        &self.0
    }

    /// The wrapped handler, mutably.
    pub fn get_mut(&mut self) -> &mut H {
        &mut self.0
    }

    /// Unwrap the handler.
    pub fn into_inner(self) -> H {
        self.0
    }
}

impl<H: Handler> Sink for Callback<H> {
    type Error = H::Error;

    fn deliver(&mut self, token: &[u8]) -> Result<(), Rejection<H::Error>> {
        self.0.handle(token).map_err(Rejection::Handle)
    }
}

/// A [`Sink`] that writes the raw bytes of every token to a nested writer.
///
/// Each token is handed to a single [`std::io::Write::write`] call, which
/// must report exactly the token's length.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct Forward<W>(W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Forward<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.0
    }

    /// The wrapped writer, mutably.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.0
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.0
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for Forward<W> {
    type Error = std::io::Error;

    fn deliver(&mut self, token: &[u8]) -> Result<(), Rejection<std::io::Error>> {
        use core::cmp::Ordering;

        let written = self.0.write(token).map_err(Rejection::Write)?;
        match written.cmp(&token.len()) {
            Ordering::Equal => Ok(()),
            Ordering::Less => Err(Rejection::ShortWrite { written }),
            Ordering::Greater => Err(Rejection::LongWrite { written }),
        }
    }

    fn flush(&mut self) -> Result<(), std::io::Error> {
        self.0.flush()
    }
}
