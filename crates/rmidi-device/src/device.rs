use std::path::Path;

use rmidi_event::{Event, EventReader, EventWriter};

use crate::config::DeviceConfig;
use crate::error::{DeviceError, Result};
use crate::stream::DeviceStream;

/// An open MIDI device.
///
/// `read` and `write_short` take `&mut self`, so a single owner serializes
/// them. The one operation allowed from another thread is closing through a
/// [`CloseHandle`], which makes a blocked [`read`](Self::read) or
/// [`write_short`](Self::write_short) return an error promptly.
///
/// Dropping the device closes it.
pub struct Device {
    reader: EventReader<DeviceStream>,
    writer: EventWriter<DeviceStream>,
}

impl Device {
    /// Open a device by name (e.g. `"rmidi0"` for `/dev/rmidi0`).
    pub fn open(name: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(name, &DeviceConfig::default())
    }

    /// Open a device by name, resolved against `config.device_dir`.
    pub fn open_with_config(name: impl AsRef<Path>, config: &DeviceConfig) -> Result<Self> {
        Self::open_path(config.resolve(name), config)
    }

    /// Open a device node at an explicit path.
    ///
    /// The configuration is checked before the node is touched.
    pub fn open_path(path: impl AsRef<Path>, config: &DeviceConfig) -> Result<Self> {
        let event_config = config.event_config();
        event_config.validate()?;

        let stream = DeviceStream::open(path)?;
        Ok(Self {
            reader: EventReader::with_config(stream.clone(), event_config)?,
            writer: EventWriter::new(stream),
        })
    }

    /// Read one batch of events (blocking).
    ///
    /// Performs a single read of up to `max_read` bytes. An empty read gives
    /// an empty batch; a byte count that is not a multiple of three is an
    /// [`EventError::Misaligned`](rmidi_event::EventError::Misaligned) error.
    pub fn read(&mut self) -> Result<Vec<Event>> {
        Ok(self.reader.read_events()?)
    }

    /// Write one short message (blocking).
    pub fn write_short(&mut self, event: &Event) -> Result<()> {
        Ok(self.writer.write_short(event)?)
    }

    /// A handle that can close this device from another thread.
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            stream: self.stream().clone(),
        }
    }

    /// Close the device, unblocking any concurrent read or write first.
    ///
    /// Closing an already closed device is a no-op.
    pub fn close(self) -> Result<()> {
        close_stream(self.stream())
    }

    /// The device node path.
    pub fn path(&self) -> &Path {
        self.stream().path()
    }

    /// Whether the device has been closed (possibly through a [`CloseHandle`]).
    pub fn is_closed(&self) -> bool {
        self.stream().is_closed()
    }

    fn stream(&self) -> &DeviceStream {
        self.writer.get_ref()
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("path", &self.path())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        let _ = self.stream().close();
    }
}

/// Closes a [`Device`] from any thread.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    stream: DeviceStream,
}

impl CloseHandle {
    /// Close the device, unblocking any concurrent read or write first.
    ///
    /// Closing an already closed device is a no-op.
    pub fn close(&self) -> Result<()> {
        close_stream(&self.stream)
    }

    /// Whether the device has been closed.
    pub fn is_closed(&self) -> bool {
        self.stream.is_closed()
    }
}

fn close_stream(stream: &DeviceStream) -> Result<()> {
    stream.close().map(|_| ()).map_err(DeviceError::Close)
}
