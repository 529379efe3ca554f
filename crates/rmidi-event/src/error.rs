/// Errors that can occur while reading or writing MIDI events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// A read returned a byte count that is not a whole number of events.
    #[error("misaligned read ({len} bytes is not a multiple of 3)")]
    Misaligned { len: usize },

    /// The underlying read failed.
    #[error("midi read error: {0}")]
    Read(#[source] std::io::Error),

    /// The underlying write failed.
    #[error("midi write error: {0}")]
    Write(#[source] std::io::Error),

    /// The device accepted only part of a short message.
    #[error("midi: partial write ({written} of {expected} bytes)")]
    PartialWrite { written: usize, expected: usize },

    /// The configured read size cannot hold a single event.
    #[error("max_read must be at least 3 bytes (got {max_read})")]
    MaxReadTooSmall { max_read: usize },
}

impl EventError {
    /// The I/O error behind a `Read` or `Write` failure, if any.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            EventError::Read(err) | EventError::Write(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EventError>;
