//! Enum stringify/parse strategies.
//!
//! The C++ source dispatches between a numeric and a custom-string codec via
//! a user-specialized trait template. Here that becomes one explicit trait,
//! `EnumCodec`, with two macro-generated implementations — a tagged variant
//! over a closed, user-supplied strategy rather than ambient compile-time
//! dispatch.

use core::fmt::Write as _;

/// Stringify/parse contract each enum field type supplies.
pub trait EnumCodec: Sized + Copy {
    /// Write the decimal/string form into `out`, returning the number of
    /// bytes written, or `None` if it would not fit.
    fn stringify(&self, out: &mut [u8]) -> Option<usize>;

    /// Parse a value as a prefix of `input`, returning the value and the
    /// number of bytes consumed, or `None` on mismatch.
    fn parse(input: &[u8]) -> Option<(Self, usize)>;
}

/// A sorted `{key, variant}` table for a custom-string enum, shared by the
/// `string_enum!` macro output. Construction panics if the table is not
/// strictly sorted by key — callers are expected to cover this with a test,
/// since the check only runs when `assert_sorted` is actually called.
pub struct SortedStringTable<T: Copy + 'static> {
    pub entries: &'static [(&'static str, T)],
}

impl<T: Copy + 'static> SortedStringTable<T> {
    pub const fn new(entries: &'static [(&'static str, T)]) -> Self {
        Self { entries }
    }

    pub fn assert_sorted(&self) {
        for w in self.entries.windows(2) {
            assert!(
                w[0].0 < w[1].0,
                "custom-string enum table must be strictly sorted by key: {:?} >= {:?}",
                w[0].0,
                w[1].0
            );
        }
    }

    pub fn stringify(&self, variant_eq: impl Fn(&T) -> bool, out: &mut [u8]) -> Option<usize> {
        let (key, _) = self.entries.iter().find(|(_, v)| variant_eq(v))?;
        if key.len() > out.len() {
            return None;
        }
        out[..key.len()].copy_from_slice(key.as_bytes());
        Some(key.len())
    }

    /// `lower_bound` on the key prefix, then a prefix-equality check —
    /// O(log n) comparisons.
    pub fn parse(&self, input: &[u8]) -> Option<(T, usize)> {
        if input.is_empty() {
            return None;
        }
        let mut lo = 0usize;
        let mut hi = self.entries.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let key = self.entries[mid].0.as_bytes();
            let cmp_len = key.len().min(input.len());
            if key < &input[..cmp_len] {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo < self.entries.len() {
            let (key, variant) = self.entries[lo];
            let key = key.as_bytes();
            if key.len() <= input.len() && &input[..key.len()] == key {
                return Some((variant, key.len()));
            }
        }
        None
    }
}

/// Render a signed 32-bit integer into `out`, matching the decimal
/// stringify rule numeric enums share with the plain `Integer` field.
pub fn stringify_i32(value: i32, out: &mut [u8]) -> Option<usize> {
    let mut buf = heapless::String::<16>::new();
    write!(buf, "{value}").ok()?;
    let bytes = buf.as_bytes();
    if bytes.len() > out.len() {
        return None;
    }
    out[..bytes.len()].copy_from_slice(bytes);
    Some(bytes.len())
}

/// Parse a signed decimal prefix, returning the value and bytes consumed.
pub fn parse_i32(input: &[u8]) -> Option<(i32, usize)> {
    let mut end = 0usize;
    if end < input.len() && (input[end] == b'-' || input[end] == b'+') {
        end += 1;
    }
    let digits_start = end;
    while end < input.len() && input[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    let text = core::str::from_utf8(&input[..end]).ok()?;
    let value: i32 = text.parse().ok()?;
    Some((value, end))
}

/// Declares a numeric enum codec: stringify as signed decimal, parse as
/// signed decimal followed by a validity check that the number names a
/// declared variant.
#[macro_export]
macro_rules! numeric_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident = $firstval:expr $(, $variant:ident = $value:expr)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $first = $firstval,
            $($variant = $value),*
        }

        impl $crate::core::enum_codec::EnumCodec for $name {
            fn stringify(&self, out: &mut [u8]) -> Option<usize> {
                $crate::core::enum_codec::stringify_i32(*self as i32, out)
            }

            fn parse(input: &[u8]) -> Option<(Self, usize)> {
                let (value, consumed) = $crate::core::enum_codec::parse_i32(input)?;
                match value {
                    $firstval => Some(($name::$first, consumed)),
                    $($value => Some(($name::$variant, consumed)),)*
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        $crate::enum_codec_field!($name);
    };
}

/// Forwards `EncodeField`/`DecodeField` to a type's `EnumCodec`
/// implementation — shared by `numeric_enum!` and `string_enum!`, since a
/// blanket impl over `EnumCodec` would conflict with the plain `i32`
/// `EncodeField` impl under Rust's coherence rules. `decode_field` has no
/// failure channel of its own; on a parse miss it returns the type's
/// `Default`, and the caller discovers the miss via the deserializer's own
/// validity flag, which `enum_field` has already cleared.
#[macro_export]
macro_rules! enum_codec_field {
    ($name:ident) => {
        impl $crate::core::response::EncodeField for $name {
            fn encode_field(&self, ser: &mut $crate::core::codec::Serializer<'_>) {
                ser.enum_field(self);
            }
        }

        impl $crate::core::response::DecodeField for $name {
            fn decode_field(de: &mut $crate::core::codec::Deserializer<'_>) -> Self {
                de.enum_field::<$name>().unwrap_or_default()
            }
        }
    };
}

/// Declares a custom-string enum codec backed by a strictly-sorted static
/// table.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident => $firstkey:expr $(, $variant:ident => $key:expr)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $first,
            $($variant),*
        }

        impl $name {
            pub fn table() -> $crate::core::enum_codec::SortedStringTable<$name> {
                $crate::core::enum_codec::SortedStringTable::new(&[
                    ($firstkey, $name::$first),
                    $(($key, $name::$variant)),*
                ])
            }
        }

        impl $crate::core::enum_codec::EnumCodec for $name {
            fn stringify(&self, out: &mut [u8]) -> Option<usize> {
                let table = $name::table();
                table.stringify(|v| v == self, out)
            }

            fn parse(input: &[u8]) -> Option<(Self, usize)> {
                let table = $name::table();
                table.parse(input)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        $crate::enum_codec_field!($name);
    };
}
