use std::fmt;
use std::io;

use rmidi_device::DeviceError;
use rmidi_event::EventError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound | io::ErrorKind::ResourceBusy => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn event_error(context: &str, err: EventError) -> CliError {
    match err {
        EventError::Read(source) | EventError::Write(source) => io_error(context, source),
        EventError::Misaligned { .. } | EventError::PartialWrite { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        EventError::MaxReadTooSmall { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Open { path, source } => {
            io_error(&format!("{context} ({})", path.display()), source)
        }
        DeviceError::Event(err) => event_error(context, err),
        DeviceError::Close(source) => io_error(context, source),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn maps_open_errors_by_kind() {
        let err = device_error(
            "open failed",
            DeviceError::Open {
                path: PathBuf::from("/dev/rmidi0"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            },
        );
        assert_eq!(err.code, PERMISSION_DENIED);
        assert!(err.message.contains("/dev/rmidi0"));

        let err = device_error(
            "open failed",
            DeviceError::Open {
                path: PathBuf::from("/dev/rmidi9"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        );
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn maps_wire_errors_to_data_invalid() {
        let err = device_error(
            "read failed",
            DeviceError::Event(EventError::Misaligned { len: 4 }),
        );
        assert_eq!(err.code, DATA_INVALID);

        let err = device_error(
            "write failed",
            DeviceError::Event(EventError::PartialWrite {
                written: 2,
                expected: 3,
            }),
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("partial write"));
    }

    #[test]
    fn maps_aborted_read_to_timeout() {
        let err = event_error(
            "read failed",
            EventError::Read(io::Error::new(io::ErrorKind::TimedOut, "device closed")),
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn maps_bad_read_size_to_failure() {
        let err = device_error(
            "open failed",
            DeviceError::Event(EventError::MaxReadTooSmall { max_read: 1 }),
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("max_read"));
    }
}
