//! Shared fixture types for the integration tests: a concrete command,
//! concrete responses, and concrete URC/result packs exercising every
//! field kind and macro the core provides. Not part of the library —
//! concrete command/response catalogs are out of scope for the crate
//! itself, which only supplies the framing primitives and macros.
//!
//! Each test binary only uses a subset of these fixtures; the rest are
//! legitimately unused in that binary.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use modemlink::core::codec::{Deserializer, Serializer};
use modemlink::core::command::CommandFrame;
use modemlink::core::response::{EncodeField, LineFrame};
use modemlink::core::types::Term;
use modemlink::platform::{DeviceEvent, DeviceIo};
use modemlink::{final_result_code, multi_line_response, numeric_enum, response_frame, string_enum, urc_pack};

numeric_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum IntEnum {
        One = 1,
        Two = 2,
        Three = 3,
        Four = 4,
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StrEnum {
        Five => "Five",
        Seven => "Seven",
    }
}

/// `+TEST CMD:<int>,<quoted>,<int-enum>,<str-enum>`, default (query) form.
pub struct TestCmd {
    pub n: i32,
    pub text: heapless::Vec<u8, 32>,
    pub ie: IntEnum,
    pub se: StrEnum,
}

impl CommandFrame for TestCmd {
    fn tag(&self) -> &str {
        "+TEST CMD:"
    }

    fn encode_fields(&self, ser: &mut Serializer<'_>) {
        self.n.encode_field(ser);
        ser.comma();
        self.text.encode_field(ser);
        ser.comma();
        self.ie.encode_field(ser);
        ser.comma();
        self.se.encode_field(ser);
    }
}

response_frame! {
    /// `+TEST: <int>, <quoted>, <int-enum>, <str-enum>`.
    pub struct TestResponse {
        tag: "+TEST:",
        fields: { n: i32, text: heapless::Vec<u8, 32>, ie: IntEnum, se: StrEnum }
    }
}

/// A free-text line within `TestMultiLine`: no tag, raw bytes up to the
/// next `CRLF` (not quoted, unlike a regular response field).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestLine {
    pub text: heapless::Vec<u8, 32>,
}

impl LineFrame for TestLine {
    const TAG: &'static str = "";

    fn encode_fields(&self, ser: &mut Serializer<'_>) {
        ser.line_text(&self.text);
    }

    fn decode_fields(de: &mut Deserializer<'_>) -> Self {
        let mut text = heapless::Vec::new();
        de.line_text_into(Term::CrLf, &mut text);
        Self { text }
    }
}

multi_line_response! {
    /// `+TEST:` followed by three free-text lines.
    pub struct TestMultiLine {
        tag: "+TEST:",
        lines: { a: TestLine, b: TestLine, c: TestLine }
    }
}

response_frame! {
    pub struct Foo {
        tag: "+FOO:",
        fields: { n: i32 }
    }
}

urc_pack! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum SingleUrc {
        Foo(Foo),
    } catch_all_capacity: 64
}

response_frame! {
    pub struct IntOnly {
        tag: "+DUP:",
        fields: { n: i32 }
    }
}

response_frame! {
    pub struct IntStr {
        tag: "+DUP:",
        fields: { n: i32, s: heapless::Vec<u8, 16> }
    }
}

modemlink::response_pack! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum DupPack {
        IntOnly(IntOnly),
        IntStr(IntStr),
    }
}

final_result_code! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum TestFinalResult {
        extras: {}
    }
}

modemlink::response_pack! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum TestResponsePack {
        Info(TestResponse),
    }
}

#[derive(Default)]
struct MockDeviceInner {
    tx_log: Mutex<Vec<u8>>,
    rx_queue: Mutex<VecDeque<u8>>,
    subscriber: Mutex<Option<Sender<DeviceEvent>>>,
    fail_writes: std::sync::atomic::AtomicBool,
}

/// An in-memory `DeviceIo` standing in for a real serial port, grounded on
/// `atat`'s mock-client test pattern: bytes pushed by the test become the
/// transport's RX stream, and every write is recorded for inspection.
#[derive(Clone, Default)]
pub struct MockDevice(Arc<MockDeviceInner>);

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `bytes` for the next `read` and wake the transport's RX path,
    /// simulating device-side bytes arriving on the wire.
    pub fn push_rx(&self, bytes: &[u8]) {
        self.0.rx_queue.lock().unwrap().extend(bytes.iter().copied());
        if let Some(sender) = self.0.subscriber.lock().unwrap().as_ref() {
            let _ = sender.send(DeviceEvent::RxReady);
        }
    }

    pub fn tx_log(&self) -> Vec<u8> {
        self.0.tx_log.lock().unwrap().clone()
    }

    /// Make every subsequent `write` fail, simulating a disconnected or
    /// jammed device.
    pub fn fail_writes(&self) {
        self.0.fail_writes.store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

impl DeviceIo for MockDevice {
    fn subscribe(&mut self, events: Sender<DeviceEvent>) {
        *self.0.subscriber.lock().unwrap() = Some(events);
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.0.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "mock write failure"));
        }
        self.0.tx_log.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut queue = self.0.rx_queue.lock().unwrap();
        let n = buf.len().min(queue.len());
        for slot in buf.iter_mut().take(n) {
            *slot = queue.pop_front().unwrap();
        }
        Ok(n)
    }
}
