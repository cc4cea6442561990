//! Serial tty heartbeat source.
//!
//! The link is opened non-blocking and configured raw: the supervisor polls
//! for single bytes between heartbeat checks and must never stall on a quiet
//! line. Stale input buffered before the watch started is flushed away so an
//! old heartbeat cannot mask a link that is already dead.

use crate::source::HeartbeatSource;
use comwatch_common::{WatchError, WatchResult};
use std::path::Path;

#[cfg(unix)]
use std::fs::{File, OpenOptions};
#[cfg(unix)]
use std::io::Read;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use tracing::info;

/// Serial device delivering heartbeat bytes (Unix tty).
#[cfg(unix)]
#[derive(Debug)]
pub struct SerialPort {
    file: File,
    path: PathBuf,
}

#[cfg(unix)]
impl SerialPort {
    /// Open `path` as a raw 8N1 line at `baud`, non-blocking.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unsupported baud rates and an I/O
    /// error when the device cannot be opened or configured.
    pub fn open(path: &Path, baud: u32) -> WatchResult<Self> {
        use nix::sys::termios::{
            cfmakeraw, cfsetspeed, tcflush, tcgetattr, tcsetattr, FlushArg, SetArg,
            SpecialCharacterIndices,
        };

        let rate = baud_rate(baud)?;

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK | libc::O_NOCTTY)
            .open(path)
            .map_err(|e| {
                WatchError::IoError(format!("failed to open {}: {e}", path.display()))
            })?;

        let mut termios = tcgetattr(&file)
            .map_err(|e| WatchError::IoError(format!("tcgetattr {}: {e}", path.display())))?;
        cfmakeraw(&mut termios);
        // Poll semantics: read returns immediately, with or without data.
        termios.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        termios.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        cfsetspeed(&mut termios, rate)
            .map_err(|e| WatchError::IoError(format!("cfsetspeed {baud}: {e}")))?;
        tcsetattr(&file, SetArg::TCSANOW, &termios)
            .map_err(|e| WatchError::IoError(format!("tcsetattr {}: {e}", path.display())))?;
        tcflush(&file, FlushArg::TCIFLUSH)
            .map_err(|e| WatchError::IoError(format!("tcflush {}: {e}", path.display())))?;

        info!(device = %path.display(), baud, "Serial heartbeat source opened");

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(unix)]
impl HeartbeatSource for SerialPort {
    fn read_byte(&mut self) -> WatchResult<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.file.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(WatchError::SourceError(format!(
                "read from {} failed: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(unix)]
fn baud_rate(baud: u32) -> WatchResult<nix::sys::termios::BaudRate> {
    use nix::sys::termios::BaudRate;

    match baud {
        4_800 => Ok(BaudRate::B4800),
        9_600 => Ok(BaudRate::B9600),
        19_200 => Ok(BaudRate::B19200),
        38_400 => Ok(BaudRate::B38400),
        57_600 => Ok(BaudRate::B57600),
        115_200 => Ok(BaudRate::B115200),
        other => Err(WatchError::Config(format!(
            "unsupported baud rate {other}"
        ))),
    }
}

/// Placeholder for non-Unix systems.
#[cfg(not(unix))]
#[derive(Debug)]
pub struct SerialPort {
    _private: (),
}

#[cfg(not(unix))]
impl SerialPort {
    /// Serial heartbeat sources need a Unix tty.
    ///
    /// # Errors
    ///
    /// Always returns a configuration error on this platform.
    pub fn open(_path: &Path, _baud: u32) -> WatchResult<Self> {
        Err(WatchError::Config(
            "serial heartbeat source not available on this platform".into(),
        ))
    }
}

#[cfg(not(unix))]
impl HeartbeatSource for SerialPort {
    fn read_byte(&mut self) -> WatchResult<Option<u8>> {
        Ok(None)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_baud_rate_mapping() {
        assert!(baud_rate(9_600).is_ok());
        assert!(baud_rate(115_200).is_ok());
        assert!(matches!(baud_rate(1_234), Err(WatchError::Config(_))));
    }

    #[test]
    fn test_unsupported_baud_rejected_before_open() {
        // The rate check runs first, so no device access happens.
        let err = SerialPort::open(Path::new("/dev/null"), 1_234).unwrap_err();
        assert!(matches!(err, WatchError::Config(_)));
    }

    #[test]
    fn test_open_missing_device_fails() {
        let err = SerialPort::open(Path::new("/nonexistent/tty-comwatch"), 9_600).unwrap_err();
        assert!(matches!(err, WatchError::IoError(_)));
    }
}
