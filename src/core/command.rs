//! Command framing: `TAG (,FIELD)* TERM`.
//!
//! Grounded on `atlink/core/Command.h`: a command is a `Tag` plus an
//! ordered field list, terminated by `CR` for write-form commands or
//! `CR LF` for the default/query form, fixed per command type. Concrete
//! commands implement `CommandFrame` and get `Encode` for free.

use crate::core::codec::{Encode, Serializer};
use crate::core::types::Term;

/// A command frame: a fixed tag, an ordered list of fields, terminated by
/// `CR` (write form) or `CR LF` (default/query form), fixed per command
/// type at construction. Implementors only need to describe their own
/// fields and terminator; tag and commas are handled once here.
pub trait CommandFrame {
    /// The command's literal tag, e.g. `"AT+CPIN"`.
    fn tag(&self) -> &str;

    /// The command's terminator. Defaults to the query form, `CR LF`; a
    /// write-form command overrides this to `Term::Cr`.
    fn term(&self) -> Term {
        Term::CrLf
    }

    /// Write this command's fields, separated by commas, with no leading or
    /// trailing comma. A command with no fields leaves this empty.
    fn encode_fields(&self, ser: &mut Serializer<'_>);
}

impl<T: CommandFrame> Encode for T {
    fn encode(&self, ser: &mut Serializer<'_>) {
        ser.tag(self.tag());
        self.encode_fields(ser);
        ser.term(self.term());
    }
}
