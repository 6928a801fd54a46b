//! Universal invariants the codec, dispatch, and transport layers must
//! hold regardless of which concrete command/response types are in play.

mod common;

use std::time::Duration;

use common::{
    DupPack, IntEnum, IntOnly, IntStr, MockDevice, StrEnum, TestFinalResult, TestResponsePack,
};
use modemlink::core::codec::{Decode, Deserializer, Encode, Serializer};
use modemlink::core::enum_codec::SortedStringTable;
use modemlink::error::ErrorCode;
use modemlink::protocol::{ErrorResponse, OkResponse};
use modemlink::transport::Transport;

#[test]
fn round_trip_integer() {
    let mut buf = [0u8; 16];
    let mut ser = Serializer::new(&mut buf);
    ser.integer(-4200);
    assert!(ser.is_valid());
    let written = ser.output().to_vec();

    let mut de = Deserializer::new(&written);
    let value = de.integer();
    assert!(de.is_valid());
    assert_eq!(value, -4200);
    assert_eq!(de.bytes_consumed(), written.len());
}

#[test]
fn round_trip_enum_field() {
    let mut buf = [0u8; 16];
    let mut ser = Serializer::new(&mut buf);
    ser.enum_field(&IntEnum::Three);
    let written = ser.output().to_vec();

    let mut de = Deserializer::new(&written);
    let value: IntEnum = de.enum_field().unwrap();
    assert_eq!(value, IntEnum::Three);
    assert_eq!(de.bytes_consumed(), written.len());
}

#[test]
fn leftmost_wins_for_duplicate_tag_pack() {
    // IntOnly is declared first; an input it can parse cleanly must never
    // bind IntStr, even though IntStr's tag also matches.
    let (value, _) = DupPack::parse(b"+DUP: 7\r\n").unwrap();
    assert_eq!(value, DupPack::IntOnly(IntOnly { n: 7 }));
    let (value, _) = DupPack::parse(b"+DUP: 7, \"x\"\r\n").unwrap();
    assert_eq!(
        value,
        DupPack::IntStr(IntStr { n: 7, s: heapless::Vec::from_slice(b"x").unwrap() })
    );
}

#[test]
fn urc_catch_all_consumes_any_complete_line() {
    use common::SingleUrc;
    let mut seen = Vec::new();
    let consumed =
        modemlink::core::urc::dispatch_all::<SingleUrc>(b"garbage line\r\n", |u| seen.push(u));
    assert!(consumed > 0);
    assert_eq!(seen.len(), 1);
}

#[test]
fn urc_catch_all_still_dispatches_a_line_longer_than_its_capacity() {
    use common::SingleUrc;
    let long_line = "x".repeat(200);
    let input = format!("{long_line}\r\n");
    let mut seen = Vec::new();
    let consumed =
        modemlink::core::urc::dispatch_all::<SingleUrc>(input.as_bytes(), |u| seen.push(u));
    assert_eq!(consumed, input.len());
    assert_eq!(seen.len(), 1);
}

#[test]
fn sequence_parse_does_not_advance_on_mismatch() {
    let mut de = Deserializer::new(b"ERROR\r\n");
    de.tag("OK");
    assert!(!de.is_valid());
    assert_eq!(de.bytes_consumed(), 0);
}

#[test]
fn whitespace_is_skipped_before_fields_but_not_in_line_text() {
    let mut de = Deserializer::new(b"   123");
    let value = de.integer();
    assert!(de.is_valid());
    assert_eq!(value, 123);

    let mut de = Deserializer::new(b"   raw text\r\n");
    let mut out: heapless::Vec<u8, 32> = heapless::Vec::new();
    de.line_text_into(modemlink::core::types::Term::CrLf, &mut out);
    assert_eq!(out.as_slice(), b"   raw text");
}

#[test]
fn line_text_longer_than_capacity_truncates_but_still_succeeds() {
    let mut de = Deserializer::new(b"this line is far too long for a tiny buffer\r\n");
    let mut out: heapless::Vec<u8, 8> = heapless::Vec::new();
    de.line_text_into(modemlink::core::types::Term::CrLf, &mut out);
    assert!(de.is_valid());
    assert_eq!(out.as_slice(), b"this lin");
    assert_eq!(de.bytes_consumed(), 43);
}

#[test]
fn string_enum_table_construction_panics_when_unsorted() {
    let table: SortedStringTable<i32> =
        SortedStringTable::new(&[("Zebra", 1), ("Apple", 2)]);
    let result = std::panic::catch_unwind(|| table.assert_sorted());
    assert!(result.is_err());
}

#[test]
fn final_result_code_tries_terminal_set_left_to_right() {
    let (value, _) = TestFinalResult::parse(b"OK\r\n").unwrap();
    assert_eq!(value, TestFinalResult::Ok(OkResponse::default()));
    let (value, _) = TestFinalResult::parse(b"ERROR\r\n").unwrap();
    assert_eq!(value, TestFinalResult::Error(ErrorResponse::default()));
}

#[test]
fn write_failure_resolves_to_write_failed_not_shutdown() {
    let device = MockDevice::new();
    device.fail_writes();
    let transport: Transport<MockDevice, TestFinalResult, common::SingleUrc> =
        Transport::start_with_config(device.clone(), |_| {}, Duration::from_millis(5), 256, 256);

    assert_eq!(transport.send_command(&AtCommand), Err(ErrorCode::WriteFailed));
    transport.shut_down();
}

#[test]
fn single_exchange_blocks_a_second_caller_until_the_first_completes() {
    let device = MockDevice::new();
    let transport: Transport<MockDevice, TestFinalResult, common::SingleUrc> =
        Transport::start_with_config(device.clone(), |_| {}, Duration::from_millis(5), 256, 256);

    // With no response ever injected, the first call stays in flight; a
    // concurrent call must observe the transport busy rather than silently
    // starting a second exchange.
    std::thread::scope(|scope| {
        let first = scope.spawn(|| transport.send_command(&AtCommand));
        std::thread::sleep(Duration::from_millis(20));
        let second = transport.send_command(&AtCommand);
        assert_eq!(second, Err(ErrorCode::InternalError));
        transport.shut_down();
        assert_eq!(first.join().unwrap(), Err(ErrorCode::ShuttingDown));
    });
}

#[test]
fn shutdown_releases_a_blocked_caller() {
    let device = MockDevice::new();
    let transport: Transport<MockDevice, TestFinalResult, common::SingleUrc> =
        Transport::start_with_config(device, |_| {}, Duration::from_millis(5), 256, 256);

    std::thread::scope(|scope| {
        let result = scope.spawn(|| transport.send_command(&AtCommand));
        std::thread::sleep(Duration::from_millis(20));
        transport.shut_down();
        assert_eq!(result.join().unwrap(), Err(ErrorCode::ShuttingDown));
    });
}

#[test]
fn cooldown_gates_the_send_after_a_completed_exchange() {
    let device = MockDevice::new();
    let cooldown = Duration::from_millis(40);
    let transport: Transport<MockDevice, TestFinalResult, common::SingleUrc> =
        Transport::start_with_config(device.clone(), |_| {}, cooldown, 256, 256);

    // `AtCommand` writes exactly 3 bytes ("AT\r"); wait for the write to
    // actually land on the device before injecting its response, so the
    // response can never race ahead of the FSM reaching `Waiting`.
    fn respond_to_next_write(device: &MockDevice, writes_so_far: usize) {
        while device.tx_log().len() < (writes_so_far + 1) * 3 {
            std::thread::sleep(Duration::from_millis(1));
        }
        device.push_rx(b"\r\nOK\r\n");
    }

    std::thread::scope(|scope| {
        let responder = device.clone();
        scope.spawn(move || respond_to_next_write(&responder, 0));
        let started = std::time::Instant::now();
        let first = transport.send_command(&AtCommand);
        assert_eq!(first, Ok(TestFinalResult::Ok(OkResponse::default())));

        let responder = device.clone();
        scope.spawn(move || respond_to_next_write(&responder, 1));
        let second = transport.send_command(&AtCommand);
        assert_eq!(second, Ok(TestFinalResult::Ok(OkResponse::default())));
        assert!(started.elapsed() >= cooldown);
        transport.shut_down();
    });
}

#[test]
fn send_command_with_response_captures_the_intermediate_line() {
    let device = MockDevice::new();
    let transport: Transport<MockDevice, TestFinalResult, common::SingleUrc, TestResponsePack> =
        Transport::start_with_config(device.clone(), |_| {}, Duration::from_millis(5), 256, 256);

    fn respond_to_next_write(device: &MockDevice, writes_so_far: usize) {
        while device.tx_log().len() < (writes_so_far + 1) * 3 {
            std::thread::sleep(Duration::from_millis(1));
        }
        device.push_rx(b"\r\n+TEST: 7, \"hi\", 1, Five\r\n\r\nOK\r\n");
    }

    std::thread::scope(|scope| {
        let responder = device.clone();
        scope.spawn(move || respond_to_next_write(&responder, 0));
        let (result, response) = transport.send_command_with_response(&AtCommand).unwrap();
        assert_eq!(result, TestFinalResult::Ok(OkResponse::default()));
        match response {
            Some(TestResponsePack::Info(info)) => {
                assert_eq!(info.n, 7);
                assert_eq!(info.text.as_slice(), b"hi");
            }
            other => panic!("expected a captured response, got {other:?}"),
        }
        transport.shut_down();
    });
}

#[test]
fn send_command_without_response_leaves_it_none() {
    let device = MockDevice::new();
    let transport: Transport<MockDevice, TestFinalResult, common::SingleUrc, TestResponsePack> =
        Transport::start_with_config(device.clone(), |_| {}, Duration::from_millis(5), 256, 256);

    fn respond_to_next_write(device: &MockDevice, writes_so_far: usize) {
        while device.tx_log().len() < (writes_so_far + 1) * 3 {
            std::thread::sleep(Duration::from_millis(1));
        }
        device.push_rx(b"\r\nOK\r\n");
    }

    std::thread::scope(|scope| {
        let responder = device.clone();
        scope.spawn(move || respond_to_next_write(&responder, 0));
        let result = transport.send_command(&AtCommand).unwrap();
        assert_eq!(result, TestFinalResult::Ok(OkResponse::default()));
        transport.shut_down();
    });
}

struct AtCommand;

impl Encode for AtCommand {
    fn encode(&self, ser: &mut Serializer<'_>) {
        ser.tag("AT");
        ser.term(modemlink::core::types::Term::Cr);
    }
}
