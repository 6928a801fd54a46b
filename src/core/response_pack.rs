//! `ResponsePack<R1..Rn>`: ordered trial-parse over a closed set of
//! response alternatives, leftmost-wins. Grounded on
//! `atlink/core/ResponsePack.h`, whose `tryAll` recurses left to right over
//! a `std::variant`, rewinding the shared visitor between attempts.
//!
//! The original exposes a long-lived `ResponsePack` object with `reset()`
//! and `getValue()`. Here a tagged variant over the closed set replaces
//! that virtual dispatch; the natural Rust shape for "try these in order,
//! keep the first match" is a `parse(&[u8]) -> Option<(Self, usize)>`
//! associated function returning a fresh enum value, not a mutable object
//! with reset semantics.

/// Implemented by every `response_pack!`/`urc_pack!`-generated enum, so
/// generic machinery (the URC dispatcher loop, the transport FSM) can call
/// `parse` without naming the concrete enum.
pub trait ParsePack: Sized {
    fn parse_pack(input: &[u8]) -> Option<(Self, usize)>;
}

/// The default response-pack type for a `Transport` that doesn't capture an
/// intermediate response: never matches, so it costs nothing beyond a
/// trial that always fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoResponsePack;

impl ParsePack for NoResponsePack {
    fn parse_pack(_input: &[u8]) -> Option<(Self, usize)> {
        None
    }
}

/// Declares a closed response-pack enum: each variant wraps a distinct
/// `Decode` type, tried left to right; the first alternative that parses
/// wins.
#[macro_export]
macro_rules! response_pack {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $name {
            /// Try each alternative in declaration order against `input`,
            /// returning the first match and the bytes it consumed.
            pub fn parse(input: &[u8]) -> Option<(Self, usize)> {
                let mut de = $crate::core::codec::Deserializer::new(input);
                $(
                    de.rewind();
                    let candidate = <$ty as $crate::core::codec::Decode>::decode_from(&mut de);
                    if de.is_valid() {
                        return Some(($name::$variant(candidate), de.bytes_consumed()));
                    }
                )+
                None
            }
        }

        impl $crate::core::response_pack::ParsePack for $name {
            fn parse_pack(input: &[u8]) -> Option<(Self, usize)> {
                $name::parse(input)
            }
        }
    };
}

/// Wraps `response_pack!` with the always-present terminal set
/// (`Ok`/`Error`/`CmsError`/`CmeError`): the per-command extras are tried
/// first, the terminal set last.
#[macro_export]
macro_rules! final_result_code {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            extras: { $($variant:ident($ty:ty)),* $(,)? }
        }
    ) => {
        $crate::response_pack! {
            $(#[$meta])*
            $vis enum $name {
                $($variant($ty),)*
                Ok($crate::protocol::OkResponse),
                Error($crate::protocol::ErrorResponse),
                CmsError($crate::protocol::CmsError),
                CmeError($crate::protocol::CmeError),
            }
        }
    };
}
