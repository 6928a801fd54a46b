//! Atomic wire constants shared by every frame.

/// `CR LF`, the default response/command terminator.
pub const CRLF: &[u8] = b"\r\n";
/// Bare `CR`, used by write-form commands.
pub const CR: &[u8] = b"\r";
/// Single field separator.
pub const COMMA: u8 = b',';

/// A command's terminator, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Query form: `CR LF`.
    CrLf,
    /// Write form: `CR` only.
    Cr,
}

impl Term {
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Term::CrLf => CRLF,
            Term::Cr => CR,
        }
    }
}

/// A bounded byte buffer whose capacity is fixed at declaration — backs
/// `Quoted` and raw-until-term storage. Fixed-capacity inline buffers
/// throughout, never a growable container, so a single field's memory
/// footprint is known at compile time.
pub type BoundedBytes<const N: usize> = heapless::Vec<u8, N>;

/// Skip leading ASCII space/tab, required before every non-line field.
pub fn skip_whitespace(input: &[u8]) -> &[u8] {
    let mut i = 0;
    while i < input.len() && (input[i] == b' ' || input[i] == b'\t') {
        i += 1;
    }
    &input[i..]
}
