//! Escape decoding for keys and values.
//!
//! [`load_convert`] turns the raw units of one key or one value into decoded
//! UTF-16 code units:
//!
//! - `\uXXXX` becomes the code unit `0xXXXX`. Exactly four hex digits are
//!   required.
//! - `\t`, `\r`, `\n` and `\f` become TAB, CR, LF and FF.
//! - A backslash before anything else yields that character, which is how
//!   `\\`, `\#`, `\=`, `\:` and `\ ` survive.
//! - An unescaped NUL ends the substring early.
//!
//! [`decode_units`] then maps the units onto a `String` according to the
//! [`DecodeMode`].

use crate::{DecodeMode, SyntaxError, line_reader::BACKSLASH};

/// Character class of a unit inside a `\uXXXX` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HexClass {
    Digit(u8),
    HexLetterLower(u8),
    HexLetterUpper(u8),
    Other,
}

impl HexClass {
    /// Nibble value, `None` for [`HexClass::Other`].
    #[inline]
    pub(crate) fn value(self) -> Option<u16> {
        match self {
            Self::Digit(n) | Self::HexLetterLower(n) | Self::HexLetterUpper(n) => {
                Some(u16::from(n))
            }
            Self::Other => None,
        }
    }
}

#[inline]
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn classify_hex(unit: u16) -> HexClass {
    // every arm below is < 0x80, so the casts are lossless
    match unit {
        0x30..=0x39 => HexClass::Digit((unit - 0x30) as u8),
        0x61..=0x66 => HexClass::HexLetterLower((unit - 0x61) as u8 + 10),
        0x41..=0x46 => HexClass::HexLetterUpper((unit - 0x41) as u8 + 10),
        _ => HexClass::Other,
    }
}

/// Accumulates the four digits of one `\uXXXX` escape.
#[derive(Debug, Default)]
struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Feeds the next unit of the window.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been seen.
    /// - Returns `Ok(Some(unit))` on the fourth digit and resets.
    /// - Returns `Err` if `unit` is not a hex digit.
    fn feed(&mut self, unit: u16) -> Result<Option<u16>, SyntaxError> {
        let Some(nibble) = classify_hex(unit).value() else {
            let ch = char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(SyntaxError::InvalidUnicodeEscapeChar(ch));
        };
        self.acc = (self.acc << 4) | nibble;
        self.len += 1;
        if self.len == 4 {
            let value = self.acc;
            *self = Self::default();
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}

/// Decodes the escapes in `input`, appending the result to `out`.
///
/// # Errors
/// [`SyntaxError::InvalidUnicodeEscapeChar`] for a non-hex digit inside
/// `\uXXXX` and [`SyntaxError::TruncatedUnicodeEscape`] when `input` ends
/// inside the window.
pub(crate) fn load_convert(input: &[u16], out: &mut Vec<u16>) -> Result<(), SyntaxError> {
    let mut units = input.iter().copied();
    while let Some(unit) = units.next() {
        if unit != BACKSLASH {
            if unit == 0 {
                break;
            }
            out.push(unit);
            continue;
        }

        // A lone trailing backslash has nothing to escape.
        let Some(escaped) = units.next() else {
            break;
        };
        let decoded = match escaped {
            0x75 /* u */ => {
                let mut buf = UnicodeEscapeBuffer::default();
                let mut value = None;
                while value.is_none() {
                    let digit = units.next().ok_or(SyntaxError::TruncatedUnicodeEscape)?;
                    value = buf.feed(digit)?;
                }
                value.unwrap_or_default()
            }
            0x74 /* t */ => 0x09,
            0x72 /* r */ => 0x0D,
            0x6E /* n */ => 0x0A,
            0x66 /* f */ => 0x0C,
            other => other,
        };
        out.push(decoded);
    }
    Ok(())
}

/// Turns decoded UTF-16 units into a `String`.
///
/// # Errors
/// [`SyntaxError::UnpairedSurrogate`] in [`DecodeMode::Strict`].
pub(crate) fn decode_units(units: &[u16], mode: DecodeMode) -> Result<String, SyntaxError> {
    let mut out = String::with_capacity(units.len());
    for decoded in char::decode_utf16(units.iter().copied()) {
        match (decoded, mode) {
            (Ok(ch), _) => out.push(ch),
            (Err(_), DecodeMode::ReplaceInvalid) => out.push(char::REPLACEMENT_CHARACTER),
            (Err(e), DecodeMode::Strict) => {
                return Err(SyntaxError::UnpairedSurrogate(e.unpaired_surrogate()));
            }
        }
    }
    Ok(out)
}
