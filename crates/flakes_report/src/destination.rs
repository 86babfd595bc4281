//! Text destinations the reporter writes into.

use std::io::{self, Write};

/// Something that accepts text.
///
/// This is the only capability the reporter needs from its outputs. The
/// destination owns buffering, flushing and encoding; the reporter hands it
/// whole `str` fragments and never closes or flushes it.
pub trait Destination {
    /// Writes `text` to the destination.
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// In-memory capture, mostly useful for asserting on reporter output.
impl Destination for String {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

impl<D: Destination + ?Sized> Destination for &mut D {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        (**self).write_text(text)
    }
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        (**self).write_text(text)
    }
}

/// Adapts any byte stream into a [`Destination`] by writing UTF-8.
///
/// Each fragment goes out through a single `write_all`. The stream is never
/// flushed here, so a `BufWriter` keeps its batching until the owner flushes
/// or drops it.
#[derive(Debug)]
pub struct Stream<W> {
    inner: W,
}

impl<W: io::Write> Stream<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Destination for Stream<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }
}

impl<W: io::Write> From<W> for Stream<W> {
    fn from(inner: W) -> Self {
        Self::new(inner)
    }
}
