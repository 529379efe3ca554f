//! MIDI short message codec over blocking byte streams.
//!
//! Every message on the wire is exactly three bytes:
//! - a status byte (message type + channel)
//! - two data bytes, held in memory as signed values
//!
//! A single read is sliced into three-byte groups. A byte count that does
//! not divide by three is reported as [`EventError::Misaligned`].

pub mod error;
pub mod event;
pub mod reader;
pub mod writer;

pub use error::{EventError, Result};
pub use event::{decode_events, encode_event, Event, EventConfig, DEFAULT_MAX_READ, EVENT_SIZE};
pub use reader::EventReader;
pub use writer::EventWriter;
