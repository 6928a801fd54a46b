//! The `Encode`/`Decode` traits and their concrete visitor implementations.
//! Grounded on `atlink/utils/Serializer.h` and `atlink/utils/Deserializer.h`:
//! the original dispatches per field kind through an abstract visitor; here
//! there is exactly one codec per direction, so the visitor is a concrete
//! struct rather than a trait object.

use crate::core::enum_codec::EnumCodec;
use crate::core::types::{skip_whitespace, Term, COMMA};
use crate::error::DecodeError;

/// Implemented by every frame type that can be written to the wire.
pub trait Encode {
    fn encode(&self, ser: &mut Serializer<'_>);
}

/// Implemented by every frame type that can be read off the wire.
///
/// `decode_from` drives a shared `Deserializer` and reports success via
/// `Deserializer::is_valid`; `decode` is the standalone convenience wrapper
/// used by tests and non-FSM callers.
pub trait Decode: Sized {
    fn decode_from(de: &mut Deserializer<'_>) -> Self;

    fn decode(input: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut de = Deserializer::new(input);
        let value = Self::decode_from(&mut de);
        if de.is_valid() {
            Ok((value, de.bytes_consumed()))
        } else if de.bytes_consumed() == 0 && input.is_empty() {
            Err(DecodeError::Incomplete)
        } else {
            Err(DecodeError::Failed)
        }
    }
}

/// Output visitor: writes a frame into a caller-owned buffer, all-or-nothing
/// per field, mirroring `Serializer::visit` in the original.
pub struct Serializer<'a> {
    buf: &'a mut [u8],
    written: usize,
    valid: bool,
}

impl<'a> Serializer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            valid: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn bytes_written(&self) -> usize {
        self.written
    }

    pub fn output(&self) -> &[u8] {
        &self.buf[..self.written]
    }

    fn rest(&mut self) -> &mut [u8] {
        &mut self.buf[self.written..]
    }

    fn advance(&mut self, ok: bool, n: usize) {
        self.valid = self.valid && ok;
        if self.valid {
            self.written += n;
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if !self.valid {
            return;
        }
        let fits = bytes.len() <= self.rest().len();
        if fits {
            let start = self.written;
            self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        }
        self.advance(fits, bytes.len());
    }

    pub fn tag(&mut self, tag: &str) {
        self.write_bytes(tag.as_bytes());
    }

    pub fn comma(&mut self) {
        self.write_bytes(&[COMMA]);
    }

    pub fn term(&mut self, term: Term) {
        self.write_bytes(term.bytes());
    }

    pub fn integer(&mut self, value: i32) {
        if !self.valid {
            return;
        }
        match crate::core::enum_codec::stringify_i32(value, self.rest()) {
            Some(n) => self.advance(true, n),
            None => self.advance(false, 0),
        }
    }

    pub fn enum_field<E: EnumCodec>(&mut self, value: &E) {
        if !self.valid {
            return;
        }
        match value.stringify(self.rest()) {
            Some(n) => self.advance(true, n),
            None => self.advance(false, 0),
        }
    }

    /// Write `text` as a double-quoted field, doubling embedded `"` with a
    /// backslash escape, matching `Serializer::writeQuoted`.
    pub fn quoted(&mut self, text: &[u8]) {
        if !self.valid {
            return;
        }
        let extra = text.iter().filter(|&&c| c == b'"').count();
        let need = 2 + text.len() + extra;
        if need > self.rest().len() {
            self.advance(false, 0);
            return;
        }
        let start = self.written;
        let mut n = 0usize;
        self.buf[start + n] = b'"';
        n += 1;
        for &c in text {
            if c == b'"' {
                self.buf[start + n] = b'\\';
                n += 1;
            }
            self.buf[start + n] = c;
            n += 1;
        }
        self.buf[start + n] = b'"';
        n += 1;
        self.advance(true, n);
    }

    /// Write `text` verbatim with no delimiters — used for raw-until-term
    /// line payloads (`LineText`).
    pub fn line_text(&mut self, text: &[u8]) {
        self.write_bytes(text);
    }
}

/// Input visitor: reads a frame out of a shared cursor over the input,
/// mirroring `Deserializer::visit` in the original.
pub struct Deserializer<'a> {
    input: &'a [u8],
    consumed: usize,
    valid: bool,
}

impl<'a> Deserializer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            consumed: 0,
            valid: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Reset the cursor to the start of `input`, used by `ResponsePack`'s
    /// ordered trial-parse between alternatives.
    pub fn rewind(&mut self) {
        self.consumed = 0;
        self.valid = true;
    }

    /// Clear a failed speculative match without touching the cursor,
    /// because a literal match only advances the cursor on success.
    pub fn clear_failure(&mut self) {
        self.valid = true;
    }

    fn rest(&self) -> &[u8] {
        &self.input[self.consumed..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = skip_whitespace(rest);
        self.consumed += rest.len() - trimmed.len();
    }

    fn match_literal(&mut self, literal: &[u8]) {
        self.skip_whitespace();
        let rest = self.rest();
        if rest.len() >= literal.len() && &rest[..literal.len()] == literal {
            self.consumed += literal.len();
        } else {
            self.valid = false;
        }
    }

    /// The `Tag` field resets the cursor on entry, matching the original's
    /// `Deserializer::visit(Tag)` resetting `length` before parsing — a
    /// `Tag` always begins a fresh frame.
    pub fn tag(&mut self, tag: &str) {
        self.consumed = 0;
        self.valid = true;
        self.match_literal(tag.as_bytes());
    }

    /// Match a tag literal without resetting the cursor, used once the
    /// optional leading `CRLF` before a response has already been consumed.
    pub fn tag_here(&mut self, tag: &str) {
        self.match_literal(tag.as_bytes());
    }

    pub fn comma(&mut self) {
        self.match_literal(&[COMMA]);
    }

    pub fn term(&mut self, term: Term) {
        self.match_literal(term.bytes());
    }

    pub fn integer(&mut self) -> i32 {
        if !self.valid {
            return 0;
        }
        self.skip_whitespace();
        match crate::core::enum_codec::parse_i32(self.rest()) {
            Some((value, n)) => {
                self.consumed += n;
                value
            }
            None => {
                self.valid = false;
                0
            }
        }
    }

    pub fn enum_field<E: EnumCodec>(&mut self) -> Option<E> {
        if !self.valid {
            return None;
        }
        self.skip_whitespace();
        match E::parse(self.rest()) {
            Some((value, n)) => {
                self.consumed += n;
                Some(value)
            }
            None => {
                self.valid = false;
                None
            }
        }
    }

    /// Read a double-quoted field into `out`, failing cleanly (no cursor
    /// advance) on overflow or malformed quoting. The original's
    /// two-byte-consumed overflow quirk is not carried over.
    pub fn quoted_into<const N: usize>(&mut self, out: &mut heapless::Vec<u8, N>) {
        if !self.valid {
            return;
        }
        self.skip_whitespace();
        let rest = self.rest();
        if rest.first() != Some(&b'"') {
            self.valid = false;
            return;
        }
        let mut i = 1usize;
        let mut value: heapless::Vec<u8, N> = heapless::Vec::new();
        loop {
            match rest.get(i) {
                None => {
                    self.valid = false;
                    return;
                }
                Some(b'"') => {
                    i += 1;
                    break;
                }
                Some(b'\\') if rest.get(i + 1) == Some(&b'"') => {
                    if value.push(b'"').is_err() {
                        self.valid = false;
                        return;
                    }
                    i += 2;
                }
                Some(&c) => {
                    if value.push(c).is_err() {
                        self.valid = false;
                        return;
                    }
                    i += 1;
                }
            }
        }
        *out = value;
        self.consumed += i;
    }

    /// Read every remaining byte up to (but not including) `term` into
    /// `out`, used for `LineText` free-form payloads. Content longer than
    /// `out`'s capacity is truncated, not rejected, matching the original's
    /// `Deserializer::visit(LineText)`: the read still succeeds and the
    /// cursor still advances past the full line, it just doesn't all make it
    /// into `out`.
    pub fn line_text_into<const N: usize>(
        &mut self,
        term: Term,
        out: &mut heapless::Vec<u8, N>,
    ) {
        if !self.valid {
            return;
        }
        let rest = self.rest();
        let needle = term.bytes();
        let end = rest
            .windows(needle.len().max(1))
            .position(|w| w == needle)
            .unwrap_or(rest.len());
        let copy_len = end.min(out.capacity() - out.len());
        let _ = out.extend_from_slice(&rest[..copy_len]);
        self.consumed += end;
    }
}
