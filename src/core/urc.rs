//! Unsolicited result codes: `AnyUrc` catch-all and the `urc_pack!` macro.
//! Grounded on `atlink/core/Urc.h`: `Urc<Rs...>` is
//! `ResponsePack<Rs..., AnyUrc>` — the known URC shapes are tried first,
//! and an always-present catch-all with an empty tag and a raw payload
//! absorbs anything else up to the terminator.

use crate::core::codec::{Decode, Deserializer, Encode, Serializer};
use crate::core::types::Term;

/// Catch-all URC: empty tag, a single raw-until-terminator payload. Always
/// matches, so it must be the last alternative in any `urc_pack!`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnyUrc<const N: usize> {
    pub payload: heapless::Vec<u8, N>,
}

impl<const N: usize> Encode for AnyUrc<N> {
    fn encode(&self, ser: &mut Serializer<'_>) {
        ser.term(Term::CrLf);
        ser.line_text(&self.payload);
        ser.term(Term::CrLf);
    }
}

impl<const N: usize> Decode for AnyUrc<N> {
    fn decode_from(de: &mut Deserializer<'_>) -> Self {
        de.term(Term::CrLf);
        de.clear_failure();
        let mut payload = heapless::Vec::new();
        de.line_text_into(Term::CrLf, &mut payload);
        de.term(Term::CrLf);
        Self { payload }
    }
}

/// Declares a closed URC enum: known shapes tried in order, an `AnyUrc`
/// catch-all appended automatically so a URC frame is never left
/// undispatched.
#[macro_export]
macro_rules! urc_pack {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),* $(,)?
        } catch_all_capacity: $cap:expr
    ) => {
        $crate::response_pack! {
            $(#[$meta])*
            $vis enum $name {
                $($variant($ty),)*
                Other($crate::core::urc::AnyUrc<$cap>),
            }
        }
    };
}

use crate::core::response_pack::ParsePack;

/// Runs the URC dispatcher loop against `input`: parses one URC frame at a
/// time from the front and hands it to `on_urc`, stopping once the
/// remainder can no longer parse as a URC (either it is empty or it is a
/// partial frame awaiting more bytes), matching the original's
/// `UrcDispatcher::dispatch` — consume as many complete URC frames as are
/// present and return the total bytes consumed.
pub fn dispatch_all<T: ParsePack>(input: &[u8], mut on_urc: impl FnMut(T)) -> usize {
    let mut total = 0usize;
    loop {
        match T::parse_pack(&input[total..]) {
            Some((urc, consumed)) if consumed > 0 => {
                on_urc(urc);
                total += consumed;
            }
            _ => break,
        }
    }
    total
}
