//! The command/response transport: owns the device, the worker thread, the
//! cooldown timer, the RX assembler, and the `Idle`/`Sending`/`Waiting`
//! state machine. Grounded on `atlink/core/fsm/Orchestrator.h` and, for the
//! generic `Client<Urc, Res>` shape, the `atat` crate's `Client`.
//!
//! The FSM state here is a tagged variant with the in-flight request living
//! inside the active variant, rather than a separate "is a request
//! pending" flag alongside an `Idle` state — `State` below does exactly
//! that. All device I/O happens on the single worker thread; `send_command`
//! hands the serialized frame across the bounded queue rather than touching
//! the device directly, so `D` never needs to be shared behind a lock.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::core::codec::Encode;
use crate::core::response_pack::{NoResponsePack, ParsePack};
use crate::error::ErrorCode;
use crate::platform::device_io::{DeviceEvent, DeviceIo};
use crate::platform::message_queue::MessageQueue;
use crate::platform::timer::Timer;
use crate::platform::{Completion, CompletionSlot};

const DEFAULT_COOLDOWN: Duration = Duration::from_millis(20);
const DEFAULT_RX_CAPACITY: usize = 4096;
const DEFAULT_TX_CAPACITY: usize = 512;

/// Internal worker-thread events, ordered through the same bounded queue so
/// `ShutDown` can jump the line via `put_front`.
enum Event {
    Write(Vec<u8>),
    RxReady,
    ShutDown,
}

/// The command in flight while the FSM is in `Sending` or `Waiting` — it
/// lives inside the active state variant, not beside it. `response` is
/// `None` for an exchange that didn't ask to capture one (the common case:
/// a bare `OK`/`ERROR` with no intermediate line), `Some(slot)` otherwise.
struct InFlight<F, R> {
    completion: Arc<CompletionSlot>,
    result: Arc<Mutex<Option<F>>>,
    response: Option<Arc<Mutex<Option<R>>>>,
}

impl<F, R> Clone for InFlight<F, R> {
    fn clone(&self) -> Self {
        Self {
            completion: Arc::clone(&self.completion),
            result: Arc::clone(&self.result),
            response: self.response.clone(),
        }
    }
}

enum State<F, R> {
    Idle,
    Sending(InFlight<F, R>),
    Waiting(InFlight<F, R>),
}

/// A host-side driver for one command/response session over `D`, with a
/// single final-result-code alternative set `F`, a single URC alternative
/// set `U`, and an optional intermediate-response alternative set `R`
/// shared by every exchange. Most commands resolve directly to a final
/// result code and have no intermediate response line, so `R` defaults to
/// [`NoResponsePack`] — a response type that never matches — and callers
/// that never need one can ignore it entirely.
pub struct Transport<D, F, U, R = NoResponsePack>
where
    D: DeviceIo + 'static,
    F: ParsePack + Send + 'static,
    U: ParsePack + Send + 'static,
    R: ParsePack + Send + 'static,
{
    queue: Arc<MessageQueue<Event>>,
    state: Arc<Mutex<State<F, R>>>,
    cooldown: Timer,
    cooldown_duration: Duration,
    can_send: Arc<std::sync::atomic::AtomicBool>,
    tx_capacity: usize,
    worker: Option<JoinHandle<()>>,
    _marker: std::marker::PhantomData<(D, U)>,
}

impl<D, F, U, R> Transport<D, F, U, R>
where
    D: DeviceIo + Send + 'static,
    F: ParsePack + Send + 'static,
    U: ParsePack + Send + 'static,
    R: ParsePack + Send + 'static,
{
    /// Start the transport with the default 20ms cooldown and a 4096-byte
    /// RX window.
    pub fn start(device: D, on_urc: impl Fn(U) + Send + 'static) -> Self {
        Self::start_with_config(
            device,
            on_urc,
            DEFAULT_COOLDOWN,
            DEFAULT_RX_CAPACITY,
            DEFAULT_TX_CAPACITY,
        )
    }

    pub fn start_with_config(
        mut device: D,
        on_urc: impl Fn(U) + Send + 'static,
        cooldown_duration: Duration,
        rx_capacity: usize,
        tx_capacity: usize,
    ) -> Self {
        let queue = Arc::new(MessageQueue::<Event>::new(64));
        let state: Arc<Mutex<State<F, R>>> = Arc::new(Mutex::new(State::Idle));
        let can_send = Arc::new(std::sync::atomic::AtomicBool::new(true));
        let cooldown = Timer::new();

        let (device_events_tx, device_events_rx): (Sender<DeviceEvent>, Receiver<DeviceEvent>) =
            channel();
        device.subscribe(device_events_tx);

        {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                for event in device_events_rx {
                    if let DeviceEvent::RxReady = event {
                        queue.put(Event::RxReady);
                    }
                }
            });
        }

        {
            let can_send = Arc::clone(&can_send);
            cooldown.set_handler(move || {
                can_send.store(true, std::sync::atomic::Ordering::SeqCst);
            });
        }

        let worker = {
            let queue = Arc::clone(&queue);
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                run_worker::<D, F, U, R>(device, queue, state, on_urc, rx_capacity);
            })
        };

        Self {
            queue,
            state,
            cooldown,
            cooldown_duration,
            can_send,
            tx_capacity,
            worker: Some(worker),
            _marker: std::marker::PhantomData,
        }
    }

    /// Serialize and send `command`, blocking until a final result code is
    /// bound or the transport shuts down.
    ///
    /// There is deliberately no deadline parameter here — a per-command
    /// timeout was considered and resolved against adding one, see
    /// `DESIGN.md`.
    pub fn send_command(&self, command: &impl Encode) -> Result<F, ErrorCode> {
        self.exchange(command, false).map(|(result, _)| result)
    }

    /// Like [`send_command`](Self::send_command), but also captures an
    /// intermediate response line — the common AT-command shape where a
    /// reply line precedes the terminating `OK`/`ERROR`. The response slot
    /// is tried against the front of the RX window on every pass before the
    /// final result code is tried, so a response that arrives ahead of the
    /// final result is captured rather than mistaken for a URC; a command
    /// whose reply is a bare final result code with no intermediate line
    /// leaves it `None`.
    pub fn send_command_with_response(
        &self,
        command: &impl Encode,
    ) -> Result<(F, Option<R>), ErrorCode> {
        self.exchange(command, true)
    }

    fn exchange(
        &self,
        command: &impl Encode,
        want_response: bool,
    ) -> Result<(F, Option<R>), ErrorCode> {
        let mut buf = vec![0u8; self.tx_capacity];
        let mut ser = crate::core::codec::Serializer::new(&mut buf);
        command.encode(&mut ser);
        if !ser.is_valid() {
            return Err(ErrorCode::SerializationFailed);
        }
        let frame = ser.output().to_vec();

        let in_flight = {
            let mut state = self.state.lock().unwrap();
            if !matches!(*state, State::Idle) {
                return Err(ErrorCode::InternalError);
            }
            let in_flight = InFlight {
                completion: Arc::new(CompletionSlot::new()),
                result: Arc::new(Mutex::new(None)),
                response: want_response.then(|| Arc::new(Mutex::new(None))),
            };
            *state = State::Sending(in_flight.clone());
            in_flight
        };

        if !self.can_send.swap(false, std::sync::atomic::Ordering::SeqCst) {
            // Cooldown still running from a prior exchange: no command may
            // be sent until it elapses, so block the caller rather than the
            // worker thread.
            std::thread::sleep(self.cooldown_duration);
        }
        self.cooldown.start(self.cooldown_duration);

        self.queue.put(Event::Write(frame));

        match in_flight.completion.wait() {
            Completion::ShuttingDown => Err(ErrorCode::ShuttingDown),
            Completion::WriteFailed => Err(ErrorCode::WriteFailed),
            Completion::Done => {
                let result = in_flight
                    .result
                    .lock()
                    .unwrap()
                    .take()
                    .ok_or(ErrorCode::InternalError)?;
                let response = in_flight
                    .response
                    .as_ref()
                    .and_then(|slot| slot.lock().unwrap().take());
                Ok((result, response))
            }
        }
    }

    /// Post `ShutDown` to the front of the FSM queue, releasing every
    /// blocked caller with `ErrorCode::ShuttingDown` and ending the worker
    /// loop. Does not block; the worker thread is joined when `self` drops.
    pub fn shut_down(&self) {
        self.queue.put_front(Event::ShutDown);
    }
}

impl<D, F, U, R> Drop for Transport<D, F, U, R>
where
    D: DeviceIo + 'static,
    F: ParsePack + Send + 'static,
    U: ParsePack + Send + 'static,
    R: ParsePack + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

fn run_worker<D, F, U, R>(
    mut device: D,
    queue: Arc<MessageQueue<Event>>,
    state: Arc<Mutex<State<F, R>>>,
    on_urc: impl Fn(U),
    rx_capacity: usize,
) where
    D: DeviceIo,
    F: ParsePack,
    U: ParsePack,
    R: ParsePack,
{
    let mut rx_window: Vec<u8> = Vec::with_capacity(rx_capacity);

    loop {
        match queue.get() {
            Event::ShutDown => {
                let mut guard = state.lock().unwrap();
                if let State::Waiting(in_flight) | State::Sending(in_flight) = &*guard {
                    in_flight.completion.signal(Completion::ShuttingDown);
                }
                *guard = State::Idle;
                log::info!(target: "modemlink::transport", "shutting down");
                return;
            }
            Event::Write(frame) => {
                log::trace!(
                    target: "modemlink::transport",
                    "tx: {}",
                    crate::platform::escape_for_log(&frame)
                );
                match device.write(&frame) {
                    Ok(n) if n == frame.len() => {
                        let mut guard = state.lock().unwrap();
                        if let State::Sending(in_flight) = &*guard {
                            *guard = State::Waiting(in_flight.clone());
                        }
                    }
                    _ => {
                        let mut guard = state.lock().unwrap();
                        if let State::Sending(in_flight) = &*guard {
                            in_flight.completion.signal(Completion::WriteFailed);
                        }
                        *guard = State::Idle;
                        log::error!(target: "modemlink::transport", "write failed");
                    }
                }
            }
            Event::RxReady => {
                let mut read_buf = [0u8; 256];
                loop {
                    match device.read(&mut read_buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            if rx_window.len() + n > rx_capacity {
                                log::warn!(target: "modemlink::transport", "rx window overflow, dropping bytes");
                                rx_window.clear();
                            }
                            rx_window.extend_from_slice(&read_buf[..n]);
                        }
                        Err(_) => break,
                    }
                }
                assemble(&mut rx_window, &state, &on_urc);
            }
        }
    }
}

/// Fixed-point RX assembly loop: repeatedly try, in order, a still-unfilled
/// intermediate response (if one is awaited), the pending final result code
/// (if one is awaited), and the URC pack, against the front of the window,
/// dropping consumed bytes each time, until none of the three make
/// progress. The response is tried separately from the final result pack
/// and ahead of it so a response line followed by a terminating `OK` is
/// captured in full, rather than the response line being mistaken for a URC
/// before the final result arrives.
fn assemble<F: ParsePack, U: ParsePack, R: ParsePack>(
    window: &mut Vec<u8>,
    state: &Arc<Mutex<State<F, R>>>,
    on_urc: &impl Fn(U),
) {
    loop {
        let (awaiting, needs_response) = {
            let guard = state.lock().unwrap();
            match &*guard {
                State::Waiting(in_flight) => (
                    true,
                    in_flight
                        .response
                        .as_ref()
                        .is_some_and(|slot| slot.lock().unwrap().is_none()),
                ),
                _ => (false, false),
            }
        };

        if awaiting && needs_response {
            if let Some((value, consumed)) = R::parse_pack(window) {
                window.drain(..consumed);
                let guard = state.lock().unwrap();
                if let State::Waiting(in_flight) = &*guard {
                    if let Some(slot) = &in_flight.response {
                        *slot.lock().unwrap() = Some(value);
                    }
                }
                continue;
            }
        }

        if awaiting {
            if let Some((value, consumed)) = F::parse_pack(window) {
                window.drain(..consumed);
                let mut guard = state.lock().unwrap();
                if let State::Waiting(in_flight) = &*guard {
                    *in_flight.result.lock().unwrap() = Some(value);
                    in_flight.completion.signal(Completion::Done);
                }
                *guard = State::Idle;
                continue;
            }
        }

        if let Some((urc, consumed)) = U::parse_pack(window) {
            window.drain(..consumed);
            on_urc(urc);
            continue;
        }

        break;
    }
}
