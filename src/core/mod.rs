//! Low-level frame grammar: wire constants, field codecs, the (de)serializer
//! visitors, and the response-matching machinery built on top of them.

pub mod codec;
pub mod command;
pub mod enum_codec;
pub mod response;
pub mod response_pack;
pub mod types;
pub mod urc;

pub use codec::{Decode, Encode};
