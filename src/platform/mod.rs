//! Platform abstraction layer. The original expresses
//! each primitive as a CRTP wrapper around a compile-time-selected backend,
//! verified with C++ detection idioms; Rust has no equivalent need for that
//! ceremony where the standard library already supplies the primitive, so
//! `Mutex`/`CondVar` are used directly from `std::sync` at call sites.
//! What remains here are the pieces the standard library does not hand you
//! for free: a bounded priority-aware queue (`MessageQueue`), a
//! restartable one-shot timer (`Timer`), a per-exchange completion slot
//! (`Completion`), and the swappable device backend (`DeviceIo`).

pub mod device_io;
pub mod message_queue;
pub mod timer;

#[cfg(feature = "linux-device")]
pub mod linux_device;

pub use device_io::{DeviceEvent, DeviceIo};
pub use message_queue::MessageQueue;
pub use timer::Timer;

/// Render `bytes` for a log line, escaping `CR`, `LF`, and other
/// non-printable bytes, matching the original's `Logger::Line::operator<<`.
pub fn escape_for_log(bytes: &[u8]) -> heapless::String<256> {
    let mut out = heapless::String::new();
    for &b in bytes {
        let _ = match b {
            b'\r' => out.push_str("<CR>"),
            b'\n' => out.push_str("<LF>"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let mut tmp = heapless::String::<6>::new();
                let _ = core::fmt::Write::write_fmt(&mut tmp, format_args!("<0x{b:02X}>"));
                out.push_str(&tmp)
            }
        };
        if out.len() == out.capacity() {
            break;
        }
    }
    out
}

/// The outcome delivered to a blocked caller when its exchange completes:
/// a bound final result code, a failed/partial device write, or a
/// transport shutdown. A write failure is distinct from shutdown so a
/// caller can tell "this exchange failed, the transport is still usable"
/// from "the transport is gone" — the first might be worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Done,
    WriteFailed,
    ShuttingDown,
}

/// A one-shot rendezvous between the FSM worker thread and the caller
/// blocked in `send_command`, standing in for the original's per-exchange
/// `Semaphore`.
#[derive(Default)]
pub struct CompletionSlot {
    state: std::sync::Mutex<Option<Completion>>,
    ready: std::sync::Condvar,
}

impl CompletionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `signal` is called, returning what it was called with.
    pub fn wait(&self) -> Completion {
        let mut guard = self.state.lock().unwrap();
        loop {
            if let Some(outcome) = *guard {
                return outcome;
            }
            guard = self.ready.wait(guard).unwrap();
        }
    }

    pub fn signal(&self, outcome: Completion) {
        let mut guard = self.state.lock().unwrap();
        *guard = Some(outcome);
        self.ready.notify_all();
    }
}
