use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::error::{EventError, Result};
use crate::event::{encode_event, Event, EVENT_SIZE};

/// Writes MIDI short messages to any `Write` stream.
///
/// A short message is written with a single `write` call. If the stream
/// accepts fewer than three bytes the message is reported as a
/// [`EventError::PartialWrite`] and the rest is not sent.
pub struct EventWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> EventWriter<T> {
    /// Create a new event writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(EVENT_SIZE),
        }
    }

    /// Write one short message (blocking).
    pub fn write_short(&mut self, event: &Event) -> Result<()> {
        self.buf.clear();
        encode_event(event, &mut self.buf);

        let written = loop {
            match self.inner.write(&self.buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EventError::Write(err)),
            }
        };

        if written != EVENT_SIZE {
            return Err(EventError::PartialWrite {
                written,
                expected: EVENT_SIZE,
            });
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EventError::Write(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
