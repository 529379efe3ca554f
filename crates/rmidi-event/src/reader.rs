use std::io::{ErrorKind, Read};
use std::time::SystemTime;

use bytes::BytesMut;
use tracing::trace;

use crate::error::{EventError, Result};
use crate::event::{decode_events, Event, EventConfig};

/// Reads batches of MIDI events from any `Read` stream.
///
/// Each call to [`read_events`](Self::read_events) issues exactly one read of
/// at most `max_read` bytes, rounded down to whole events so a full buffer
/// never splits one. Callers needing more data call it again.
pub struct EventReader<T> {
    inner: T,
    buf: BytesMut,
    config: EventConfig,
}

impl<T: Read> EventReader<T> {
    /// Create a new event reader with default configuration.
    pub fn new(inner: T) -> Self {
        let config = EventConfig::default();
        Self {
            inner,
            buf: BytesMut::zeroed(config.read_len()),
            config,
        }
    }

    /// Create a new event reader with explicit configuration.
    ///
    /// Fails with [`EventError::MaxReadTooSmall`] if `max_read` is below one event.
    pub fn with_config(inner: T, config: EventConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner,
            buf: BytesMut::zeroed(config.read_len()),
            config,
        })
    }

    /// Read one batch of events (blocking).
    ///
    /// A zero-byte read yields an empty batch. Every event in the batch
    /// carries the same timestamp, taken after the read returns.
    pub fn read_events(&mut self) -> Result<Vec<Event>> {
        let read = loop {
            match self.inner.read(&mut self.buf[..]) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EventError::Read(err)),
            }
        };

        let events = decode_events(&self.buf[..read], SystemTime::now())?;
        trace!(bytes = read, events = events.len(), "decoded midi batch");
        Ok(events)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current event reader configuration.
    pub fn config(&self) -> &EventConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_single_event() {
        let mut reader = EventReader::new(Cursor::new(vec![0x90, 60, 127]));
        let events = reader.read_events().unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, 0x90);
        assert_eq!(events[0].data1, 60);
        assert_eq!(events[0].data2, 127);
    }

    #[test]
    fn read_batch_shares_timestamp() {
        let wire = vec![0x90, 60, 100, 0x90, 64, 100, 0x80, 60, 0];
        let mut reader = EventReader::new(Cursor::new(wire));
        let events = reader.read_events().unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(
            events.iter().map(|e| e.data1).collect::<Vec<_>>(),
            vec![60, 64, 60]
        );
        assert!(events.iter().all(|e| e.timestamp == events[0].timestamp));
    }

    #[test]
    fn read_is_capped_at_max_read() {
        let wire: Vec<u8> = (0..4).flat_map(|i| [0x90, i, 1]).collect();
        let cfg = EventConfig { max_read: 6 };
        let mut reader = EventReader::with_config(Cursor::new(wire), cfg).unwrap();

        let first = reader.read_events().unwrap();
        let second = reader.read_events().unwrap();
        let third = reader.read_events().unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].data1, 3);
        assert!(third.is_empty());
    }

    #[test]
    fn full_default_read_stays_aligned() {
        // 400 events queued: more than one default read can take.
        let wire: Vec<u8> = (0..400u32).flat_map(|i| [0x90, (i % 128) as u8, 1]).collect();
        let mut reader = EventReader::new(Cursor::new(wire));

        let first = reader.read_events().unwrap();
        let second = reader.read_events().unwrap();

        assert_eq!(first.len(), 341);
        assert_eq!(second.len(), 59);
        assert!(second.iter().all(|e| e.status == 0x90 && e.data2 == 1));
        assert!(reader.read_events().unwrap().is_empty());
    }

    #[test]
    fn unaligned_max_read_rounds_down() {
        let wire: Vec<u8> = (0..3).flat_map(|i| [0x90, i, 1]).collect();
        let cfg = EventConfig { max_read: 8 };
        let mut reader = EventReader::with_config(Cursor::new(wire), cfg).unwrap();

        assert_eq!(reader.read_events().unwrap().len(), 2);
        assert_eq!(reader.read_events().unwrap().len(), 1);
    }

    #[test]
    fn max_read_below_one_event_is_rejected() {
        let cfg = EventConfig { max_read: 2 };
        let err = EventReader::with_config(Cursor::new(Vec::<u8>::new()), cfg)
            .err()
            .expect("max_read 2 should be rejected");
        assert!(matches!(err, EventError::MaxReadTooSmall { max_read: 2 }));
    }

    #[test]
    fn empty_read_is_empty_batch() {
        let mut reader = EventReader::new(Cursor::new(Vec::<u8>::new()));
        let events = reader.read_events().unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn misaligned_read_is_reported() {
        let mut reader = EventReader::new(Cursor::new(vec![0x90, 60, 127, 0x80]));
        let err = reader.read_events().unwrap_err();
        assert!(matches!(err, EventError::Misaligned { len: 4 }));
    }

    #[test]
    fn read_error_propagates() {
        let mut reader = EventReader::new(FailingReader(ErrorKind::TimedOut));
        let err = reader.read_events().unwrap_err();
        assert!(matches!(err, EventError::Read(e) if e.kind() == ErrorKind::TimedOut));
    }

    #[test]
    fn would_block_is_not_retried() {
        let mut reader = EventReader::new(FailingReader(ErrorKind::WouldBlock));
        let err = reader.read_events().unwrap_err();
        assert!(matches!(err, EventError::Read(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            interrupted: false,
            bytes: vec![0xB0, 7, 100],
        };
        let mut reader = EventReader::new(reader);
        let events = reader.read_events().unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, 0xB0);
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = EventReader::new(cursor);

        assert_eq!(reader.config().max_read, 1024);
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    struct FailingReader(ErrorKind);

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(self.0))
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let n = self.bytes.len().min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[..n]);
            self.bytes.drain(..n);
            Ok(n)
        }
    }
}
