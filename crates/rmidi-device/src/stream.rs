use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{DeviceError, Result};

/// An open MIDI device node implementing Read + Write.
///
/// Clones share the same descriptor. Reads and writes wait on the device and an
/// internal wake socket, so [`close`](Self::close) from another thread makes
/// a blocked read or write return `ErrorKind::TimedOut` instead of hanging.
#[derive(Clone)]
pub struct DeviceStream {
    shared: Arc<Shared>,
}

struct Shared {
    path: PathBuf,
    // Read-locked for the duration of every read/write, write-locked to release.
    file: RwLock<Option<File>>,
    closed: AtomicBool,
    wake_tx: UnixStream,
    wake_rx: UnixStream,
}

impl DeviceStream {
    /// Open a device node for reading and writing.
    ///
    /// The node must already exist; it is never created or truncated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| DeviceError::Open {
                path: path.clone(),
                source: e,
            })?;

        let (wake_tx, wake_rx) = UnixStream::pair().map_err(|e| DeviceError::Open {
            path: path.clone(),
            source: e,
        })?;

        debug!(?path, "opened midi device");

        Ok(Self {
            shared: Arc::new(Shared {
                path,
                file: RwLock::new(Some(file)),
                closed: AtomicBool::new(false),
                wake_tx,
                wake_rx,
            }),
        })
    }

    /// The path this stream was opened from.
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Whether the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Wake any blocked reader or writer, then release the descriptor.
    ///
    /// Returns `Ok(false)` if the stream was already closed. If the wake
    /// signal cannot be sent the stream stays open and the call may be retried.
    pub fn close(&self) -> io::Result<bool> {
        if self.is_closed() {
            return Ok(false);
        }

        // The wake byte is never drained, so every later poll sees it too.
        (&self.shared.wake_tx).write_all(&[1])?;

        if self.shared.closed.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        let file = self
            .shared
            .file
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(file);

        debug!(path = ?self.shared.path, "closed midi device");
        Ok(true)
    }
}

impl Read for DeviceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let guard = self
            .shared
            .file
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut file: &File = guard.as_ref().ok_or_else(closed_error)?;
        if self.is_closed() {
            return Err(closed_error());
        }

        wait_ready(file.as_raw_fd(), libc::POLLIN, self.shared.wake_rx.as_raw_fd())?;
        file.read(buf)
    }
}

impl Write for DeviceStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let guard = self
            .shared
            .file
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut file: &File = guard.as_ref().ok_or_else(closed_error)?;
        if self.is_closed() {
            return Err(closed_error());
        }

        wait_ready(file.as_raw_fd(), libc::POLLOUT, self.shared.wake_rx.as_raw_fd())?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let guard = self
            .shared
            .file
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(mut file) => file.flush(),
            None => Err(closed_error()),
        }
    }
}

impl std::fmt::Debug for DeviceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceStream")
            .field("path", &self.shared.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Error returned by reads and writes on a closed device.
fn closed_error() -> io::Error {
    io::Error::new(ErrorKind::TimedOut, "device closed")
}

/// Block until `device` is ready for `events` or `wake` is signalled.
fn wait_ready(device: RawFd, events: libc::c_short, wake: RawFd) -> io::Result<()> {
    let mut fds = [
        libc::pollfd {
            fd: device,
            events,
            revents: 0,
        },
        libc::pollfd {
            fd: wake,
            events: libc::POLLIN,
            revents: 0,
        },
    ];

    loop {
        // SAFETY: `fds` is a valid array of `pollfd` for its full length and
        // both descriptors stay open while the caller holds the file lock.
        let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }

        if fds[1].revents != 0 {
            return Err(closed_error());
        }
        // POLLHUP/POLLERR fall through to the read or write, which reports them.
        if fds[0].revents != 0 {
            return Ok(());
        }
    }
}
