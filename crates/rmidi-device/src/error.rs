use std::io::ErrorKind;
use std::path::PathBuf;

use rmidi_event::EventError;

/// Errors that can occur in MIDI device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Failed to open the device node.
    #[error("midi: failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading, decoding or writing events failed.
    #[error(transparent)]
    Event(#[from] EventError),

    /// Failed to signal blocked readers and writers while closing.
    #[error("midi: failed to close device: {0}")]
    Close(std::io::Error),
}

impl DeviceError {
    /// Whether this is a read or write that failed because the device was closed.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            DeviceError::Event(EventError::Read(err) | EventError::Write(err))
                if err.kind() == ErrorKind::TimedOut
        )
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;
