//! Raw MIDI device node access.
//!
//! Opens a character device such as `/dev/rmidi0` for reading and writing,
//! reads batches of [`Event`]s and writes short messages. [`Device::close`]
//! (or a [`CloseHandle`] held by another thread) unblocks a pending read or write
//! before releasing the descriptor.
//!
//! This crate builds on [`rmidi_event`] for the wire codec.

pub mod config;
pub mod error;

#[cfg(unix)]
pub mod device;
#[cfg(unix)]
pub mod stream;

#[cfg(all(test, unix))]
mod testutil;

pub use config::{DeviceConfig, DEFAULT_DEVICE_DIR};
pub use error::{DeviceError, Result};
pub use rmidi_event::{Event, EventError};

#[cfg(unix)]
pub use device::{CloseHandle, Device};
#[cfg(unix)]
pub use stream::DeviceStream;
