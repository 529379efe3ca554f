use std::time::SystemTime;

use bytes::{BufMut, BytesMut};

use crate::error::{EventError, Result};

/// Wire size of a MIDI short message: status (1) + data1 (1) + data2 (1).
pub const EVENT_SIZE: usize = 3;

/// Default upper bound on the bytes requested by a single read.
pub const DEFAULT_MAX_READ: usize = 1024;

/// A MIDI short message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Message type and channel.
    pub status: u8,
    /// First data byte, reinterpreted as signed.
    pub data1: i8,
    /// Second data byte, reinterpreted as signed.
    pub data2: i8,
    /// When the batch containing this event was decoded.
    pub timestamp: SystemTime,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn new(status: u8, data1: i8, data2: i8) -> Self {
        Self {
            status,
            data1,
            data2,
            timestamp: SystemTime::now(),
        }
    }

    /// Build an event from its three wire bytes.
    pub fn from_wire(bytes: [u8; EVENT_SIZE], timestamp: SystemTime) -> Self {
        Self {
            status: bytes[0],
            data1: bytes[1] as i8,
            data2: bytes[2] as i8,
            timestamp,
        }
    }

    /// The three bytes this event occupies on the wire.
    pub fn to_wire(&self) -> [u8; EVENT_SIZE] {
        [self.status, self.data1 as u8, self.data2 as u8]
    }
}

/// Encode an event into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────┬──────────┐
/// │ Status   │ Data1    │ Data2    │
/// │ (1B u8)  │ (1B raw) │ (1B raw) │
/// └──────────┴──────────┴──────────┘
/// ```
pub fn encode_event(event: &Event, dst: &mut BytesMut) {
    dst.reserve(EVENT_SIZE);
    dst.put_slice(&event.to_wire());
}

/// Decode every three-byte group in `src`, in order.
///
/// All events share `timestamp`. An empty buffer decodes to no events.
pub fn decode_events(src: &[u8], timestamp: SystemTime) -> Result<Vec<Event>> {
    if src.len() % EVENT_SIZE != 0 {
        return Err(EventError::Misaligned { len: src.len() });
    }

    Ok(src
        .chunks_exact(EVENT_SIZE)
        .map(|chunk| Event::from_wire([chunk[0], chunk[1], chunk[2]], timestamp))
        .collect())
}

/// Configuration for event reads.
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// Maximum bytes requested by one read, rounded down to whole events. Default: 1024.
    pub max_read: usize,
}

impl EventConfig {
    /// Check that `max_read` can hold at least one event.
    pub fn validate(&self) -> Result<()> {
        if self.max_read < EVENT_SIZE {
            return Err(EventError::MaxReadTooSmall {
                max_read: self.max_read,
            });
        }
        Ok(())
    }

    /// Bytes actually requested per read: `max_read` rounded down to whole events.
    pub fn read_len(&self) -> usize {
        self.max_read - self.max_read % EVENT_SIZE
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            max_read: DEFAULT_MAX_READ,
        }
    }
}
