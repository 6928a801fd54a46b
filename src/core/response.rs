//! Response framing: single-line responses, their constituent `Line`s, and
//! `MultiLineResponse`. Grounded on `atlink/core/Response.h`.
//!
//! The original tolerates an optional leading `CRLF` before a response on
//! the wire; this implementation applies that as a decode-time parsing
//! rule rather than a type-level flag.

use crate::core::codec::{Decode, Deserializer, Encode, Serializer};
use crate::core::types::Term;

fn skip_optional_leading_crlf(de: &mut Deserializer<'_>) {
    de.term(Term::CrLf);
    de.clear_failure();
}

/// A single-line response: `(CRLF) TAG (,FIELD)* CRLF`.
pub trait ResponseFrame: Sized {
    const TAG: &'static str;
    fn encode_fields(&self, ser: &mut Serializer<'_>);
    fn decode_fields(de: &mut Deserializer<'_>) -> Self;
}

impl<T: ResponseFrame> Decode for T {
    fn decode_from(de: &mut Deserializer<'_>) -> Self {
        skip_optional_leading_crlf(de);
        de.tag_here(Self::TAG);
        let value = Self::decode_fields(de);
        de.term(Term::CrLf);
        value
    }
}

/// Declares a single-line response type: a tag plus an ordered field list.
#[macro_export]
macro_rules! response_frame {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            tag: $tag:expr,
            fields: { $($field:ident : $ty:ty),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(pub $field: $ty),*
        }

        impl $crate::core::codec::Encode for $name {
            fn encode(&self, ser: &mut $crate::core::codec::Serializer<'_>) {
                use $crate::core::response::ResponseFrame as _;
                use $crate::core::types::Term;
                ser.term(Term::CrLf);
                ser.tag(<$name as $crate::core::response::ResponseFrame>::TAG);
                self.encode_fields(ser);
                ser.term(Term::CrLf);
            }
        }

        impl $crate::core::response::ResponseFrame for $name {
            const TAG: &'static str = $tag;

            #[allow(unused_variables)]
            fn encode_fields(&self, ser: &mut $crate::core::codec::Serializer<'_>) {
                let mut first = true;
                $(
                    if !first { ser.comma(); }
                    first = false;
                    $crate::core::response::EncodeField::encode_field(&self.$field, ser);
                )*
            }

            #[allow(unused_variables, unused_mut)]
            fn decode_fields(de: &mut $crate::core::codec::Deserializer<'_>) -> Self {
                let mut first = true;
                $(
                    if !first { de.comma(); }
                    first = false;
                    let $field = <$ty as $crate::core::response::DecodeField>::decode_field(de);
                )*
                Self { $($field),* }
            }
        }
    };
}

/// Per-type field encode/decode, so `response_frame!` can stay generic over
/// `Integer`, `Quoted(heapless::Vec<u8, N>)`, and enum fields alike.
pub trait EncodeField {
    fn encode_field(&self, ser: &mut Serializer<'_>);
}

pub trait DecodeField: Sized {
    fn decode_field(de: &mut Deserializer<'_>) -> Self;
}

impl EncodeField for i32 {
    fn encode_field(&self, ser: &mut Serializer<'_>) {
        ser.integer(*self);
    }
}

impl DecodeField for i32 {
    fn decode_field(de: &mut Deserializer<'_>) -> Self {
        de.integer()
    }
}

impl<const N: usize> EncodeField for heapless::Vec<u8, N> {
    fn encode_field(&self, ser: &mut Serializer<'_>) {
        ser.quoted(self);
    }
}

impl<const N: usize> DecodeField for heapless::Vec<u8, N> {
    fn decode_field(de: &mut Deserializer<'_>) -> Self {
        let mut out = heapless::Vec::new();
        de.quoted_into(&mut out);
        out
    }
}

/// A line within a `MultiLineResponse`: an optional tag, fields, `CRLF`, no
/// leading `CRLF` of its own.
pub trait LineFrame: Sized {
    const TAG: &'static str;
    fn encode_fields(&self, ser: &mut Serializer<'_>);
    fn decode_fields(de: &mut Deserializer<'_>) -> Self;
}

/// Declares a line type used inside a `MultiLineResponse`. Identical shape
/// to `response_frame!` but without the per-line leading/trailing `CRLF`
/// framing, which the parent `MultiLineResponse` owns.
#[macro_export]
macro_rules! line_frame {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            tag: $tag:expr,
            fields: { $($field:ident : $ty:ty),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(pub $field: $ty),*
        }

        impl $crate::core::response::LineFrame for $name {
            const TAG: &'static str = $tag;

            #[allow(unused_variables)]
            fn encode_fields(&self, ser: &mut $crate::core::codec::Serializer<'_>) {
                let mut first = true;
                $(
                    if !first { ser.comma(); }
                    first = false;
                    $crate::core::response::EncodeField::encode_field(&self.$field, ser);
                )*
            }

            #[allow(unused_variables, unused_mut)]
            fn decode_fields(de: &mut $crate::core::codec::Deserializer<'_>) -> Self {
                let mut first = true;
                $(
                    if !first { de.comma(); }
                    first = false;
                    let $field = <$ty as $crate::core::response::DecodeField>::decode_field(de);
                )*
                Self { $($field),* }
            }
        }
    };
}

/// Declares a `MultiLineResponse`: a parent tag plus an ordered sequence of
/// `Line` types, each decoded/encoded in turn — leading `CRLF`, parent tag,
/// `CRLF`, each child `Line` plus its own `CRLF`, then one more trailing
/// `CRLF`.
#[macro_export]
macro_rules! multi_line_response {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            tag: $tag:expr,
            lines: { $($field:ident : $ty:ty),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(pub $field: $ty),*
        }

        impl $crate::core::codec::Encode for $name {
            fn encode(&self, ser: &mut $crate::core::codec::Serializer<'_>) {
                use $crate::core::types::Term;
                use $crate::core::response::LineFrame as _;
                ser.term(Term::CrLf);
                if !$tag.is_empty() {
                    ser.tag($tag);
                    ser.term(Term::CrLf);
                }
                $(
                    ser.tag(<$ty as $crate::core::response::LineFrame>::TAG);
                    self.$field.encode_fields(ser);
                    ser.term(Term::CrLf);
                )*
                ser.term(Term::CrLf);
            }
        }

        impl $crate::core::codec::Decode for $name {
            fn decode_from(de: &mut $crate::core::codec::Deserializer<'_>) -> Self {
                use $crate::core::types::Term;
                de.term(Term::CrLf);
                de.clear_failure();
                if !$tag.is_empty() {
                    de.tag_here($tag);
                    de.term(Term::CrLf);
                }
                $(
                    de.tag_here(<$ty as $crate::core::response::LineFrame>::TAG);
                    let $field = <$ty as $crate::core::response::LineFrame>::decode_fields(de);
                    de.term(Term::CrLf);
                )*
                de.term(Term::CrLf);
                Self { $($field),* }
            }
        }
    };
}
