//! The swappable byte-stream backend. Grounded on
//! `atlink/platform/api/DeviceIO.h`: `subscribe`/`write`/`read`, with a
//! `Subscriber` callback posting `RxReady`. The original's CRTP
//! backend-detection template becomes a plain trait object here, since Rust
//! trait objects already give the swappability the C++ template was built
//! to provide without a virtual call.
//!
//! The original's `TxReady` is posted by the cooldown timer, not by a
//! device backend, so it is not a `DeviceEvent` here — `Transport` gates
//! sends on its own `can_send` flag directly.

/// Events a `DeviceIo` backend posts to its subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    RxReady,
}

/// A full-duplex byte-stream backend.
///
/// `subscribe` hands the backend a channel to post `DeviceEvent`s on; the
/// backend is expected to run its own poller thread and is free to post
/// `RxReady` eagerly (duplicate notifications are harmless — the RX
/// assembler is idempotent on an empty read).
pub trait DeviceIo: Send {
    fn subscribe(&mut self, events: std::sync::mpsc::Sender<DeviceEvent>);
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize>;
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
}
