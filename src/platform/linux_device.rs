//! Concrete Linux `DeviceIo` backend: a raw, 8N1, 115200-baud TTY with a
//! poller thread. Grounded on
//! `atlink/platform/linux/DeviceIO.h`, ported from `termios(3)`/`poll(2)`
//! to `nix::sys::termios` and a blocking read loop.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsFd;
use std::os::unix::fs::OpenOptionsExt;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use nix::sys::termios::{self, BaudRate, SetArg};

use crate::platform::device_io::{DeviceEvent, DeviceIo};

/// Opens and configures `path` raw, 8N1, 115200 baud, matching
/// `DeviceIO::openAndConfigureTty`.
fn open_and_configure(path: &str) -> io::Result<File> {
    let flags = nix::fcntl::OFlag::O_NOCTTY | nix::fcntl::OFlag::O_NONBLOCK;
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(flags.bits())
        .open(path)?;

    let mut tio = termios::tcgetattr(file.as_fd())?;
    termios::cfmakeraw(&mut tio);
    termios::cfsetispeed(&mut tio, BaudRate::B115200)?;
    termios::cfsetospeed(&mut tio, BaudRate::B115200)?;
    tio.control_flags.insert(termios::ControlFlags::CLOCAL | termios::ControlFlags::CREAD);
    tio.control_flags.remove(termios::ControlFlags::PARENB);
    tio.control_flags.remove(termios::ControlFlags::CSTOPB);
    tio.control_flags.remove(termios::ControlFlags::CSIZE);
    tio.control_flags.insert(termios::ControlFlags::CS8);
    termios::tcsetattr(file.as_fd(), SetArg::TCSANOW, &tio)?;

    log::info!(target: "modemlink::device_io", "TTY opened and configured ({path})");
    Ok(file)
}

/// A raw serial port on Linux, polled on a background thread.
pub struct LinuxDevice {
    file: File,
    poller: Option<thread::JoinHandle<()>>,
    run: Arc<std::sync::atomic::AtomicBool>,
}

impl LinuxDevice {
    pub fn open(path: &str) -> io::Result<Self> {
        let file = open_and_configure(path)?;
        Ok(Self {
            file,
            poller: None,
            run: Arc::new(std::sync::atomic::AtomicBool::new(true)),
        })
    }
}

impl Drop for LinuxDevice {
    fn drop(&mut self) {
        self.run.store(false, std::sync::atomic::Ordering::Relaxed);
        if let Some(handle) = self.poller.take() {
            let _ = handle.join();
        }
        log::info!(target: "modemlink::device_io", "device closed");
    }
}

impl DeviceIo for LinuxDevice {
    fn subscribe(&mut self, events: Sender<DeviceEvent>) {
        let run = Arc::clone(&self.run);
        self.poller = Some(thread::spawn(move || {
            // 100ms tick, matching the original's poll() timeout. The
            // transport's RX assembler is a no-op on an empty read, so an
            // eager tick in place of a real readiness poll costs nothing
            // beyond one wasted read() per idle period.
            while run.load(std::sync::atomic::Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(100));
                let _ = events.send(DeviceEvent::RxReady);
            }
        }));
        log::debug!(target: "modemlink::device_io", "subscriber registered");
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        log::trace!(
            target: "modemlink::device_io",
            "deviceio-tx: len={} data={}",
            data.len(),
            crate::platform::escape_for_log(data)
        );
        let n = self.file.write(data)?;
        log::trace!(target: "modemlink::device_io", "tx complete ({n} bytes)");
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.file.read(buf) {
            Ok(n) => {
                if n > 0 {
                    log::debug!(
                        target: "modemlink::device_io",
                        "deviceio-rx: len={} data={}",
                        n,
                        crate::platform::escape_for_log(&buf[..n])
                    );
                }
                Ok(n)
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(err) => Err(err),
        }
    }
}
