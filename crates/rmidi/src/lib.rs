//! Raw MIDI device access.
//!
//! rmidi opens a MIDI character device (e.g. OpenBSD's `/dev/rmidi0`), reads
//! batches of 3-byte short messages and writes them back out.
//!
//! # Crate Structure
//!
//! - [`event`] — The `Event` type and its 3-byte wire codec
//! - [`device`] — Device node handle with cancel-on-close reads (Unix)
//!
//! ```no_run
//! use rmidi::{Device, Event};
//!
//! let mut device = Device::open("rmidi0")?;
//! device.write_short(&Event::new(0x90, 60, 127))?;
//! for event in device.read()? {
//!     println!("{:#04x} {} {}", event.status, event.data1, event.data2);
//! }
//! device.close()?;
//! # Ok::<(), rmidi::device::DeviceError>(())
//! ```

/// Re-export event types.
pub mod event {
    pub use rmidi_event::*;
}

/// Re-export device types.
pub mod device {
    pub use rmidi_device::*;
}

pub use rmidi_event::Event;

#[cfg(unix)]
pub use rmidi_device::{CloseHandle, Device};
