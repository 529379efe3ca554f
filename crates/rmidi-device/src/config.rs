use std::path::{Path, PathBuf};

use rmidi_event::{EventConfig, DEFAULT_MAX_READ};

/// Directory device names are resolved against.
pub const DEFAULT_DEVICE_DIR: &str = "/dev";

/// Configuration for opening a MIDI device.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Directory holding device nodes. Default: `/dev`.
    pub device_dir: PathBuf,
    /// Maximum bytes requested by one read, rounded down to whole events. Default: 1024.
    pub max_read: usize,
}

impl DeviceConfig {
    /// Resolve a device name (e.g. `rmidi0`) to its node path.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.device_dir.join(name)
    }

    pub(crate) fn event_config(&self) -> EventConfig {
        EventConfig {
            max_read: self.max_read,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
            max_read: DEFAULT_MAX_READ,
        }
    }
}
