//! `modemlink`: a host-side driver for text-framed, modem-style
//! command/response protocols run over a full-duplex byte stream.
//!
//! The crate is a transport engine, not a command catalog: a framing and
//! field codec, an ordered response-pack trial matcher, a URC dispatcher,
//! a command/response finite-state machine, and the platform primitives
//! the FSM needs (bounded queue, timer, completion slot, swappable device
//! backend). Concrete AT-command catalogs, port enumeration, and CLI
//! front-ends are left to applications; [`protocol`] carries only the
//! terminal result set every exchange resolves through.
//!
//! Start with [`transport::Transport`].

pub mod config;
pub mod core;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod transport;

pub use config::DriverConfig;
pub use core::{Decode, Encode};
pub use error::ErrorCode;
pub use transport::Transport;
