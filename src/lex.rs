//! Fixed-width hexadecimal field lexing over a blocking byte stream.

use std::io::{Bytes, Read};

/// Failure modes when lexing one fixed-width hex field. Only `Io` escapes
/// the interpreter; the other two become an invalid command.
#[derive(thiserror::Error, Debug)]
pub enum LexError {
    /// Non-digit, non-whitespace byte. Consumed, not pushed back.
    #[error("invalid hexadecimal digit")]
    InvalidDigit,

    /// The stream ended before the field was complete.
    #[error("unexpected end of stream")]
    UnexpectedEnd,

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads exactly `digit_count` lowercase hex digits, most-significant
/// first, skipping spaces and newlines. `digit_count` is at most 4.
pub fn parse_fixed_hex<R: Read>(
    bytes: &mut Bytes<R>,
    digit_count: u32,
) -> Result<u16, LexError> {
    debug_assert!(digit_count <= 4);

    let mut total: u16 = 0;
    let mut remaining = digit_count;
    while remaining > 0 {
        let b = match bytes.next() {
            Some(b) => b?,
            None => return Err(LexError::UnexpectedEnd),
        };
        if b == b' ' || b == b'\n' {
            continue;
        }
        let digit = hex_value(b).ok_or(LexError::InvalidDigit)?;
        total = total << 4 | u16::from(digit);
        remaining -= 1;
    }
    Ok(total)
}

/// Parses a two-digit hex byte field.
pub fn parse_byte<R: Read>(bytes: &mut Bytes<R>) -> Result<u8, LexError> {
    parse_fixed_hex(bytes, 2).map(|v| v as u8)
}

/// Parses a four-digit hex word field.
pub fn parse_word<R: Read>(bytes: &mut Bytes<R>) -> Result<u16, LexError> {
    parse_fixed_hex(bytes, 4)
}

// The wire format is lowercase-only; `A`-`F` are invalid digits.
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;

    fn bytes(s: &str) -> Bytes<&[u8]> {
        s.as_bytes().bytes()
    }

    #[test]
    fn parse_byte_matches_hex_value_for_all_bytes() {
        for v in 0..=255u16 {
            let s = format!("{v:02x}");
            assert_eq!(parse_byte(&mut bytes(&s)).unwrap(), v as u8, "input {s}");
        }
    }

    #[test]
    fn parse_word_matches_hex_value() {
        for (s, v) in [
            ("0000", 0x0000),
            ("0010", 0x0010),
            ("abcd", 0xabcd),
            ("ffff", 0xffff),
            ("0500", 0x0500),
        ] {
            assert_eq!(parse_word(&mut bytes(s)).unwrap(), v, "input {s}");
        }
    }

    #[test]
    fn whitespace_between_digits_is_skipped() {
        assert_eq!(parse_byte(&mut bytes("f f")).unwrap(), 0xff);
        assert_eq!(parse_word(&mut bytes(" 0\n01 0")).unwrap(), 0x0010);
    }

    #[test]
    fn uppercase_digits_are_invalid() {
        assert!(matches!(
            parse_byte(&mut bytes("FF")),
            Err(LexError::InvalidDigit)
        ));
    }

    #[test]
    fn non_hex_byte_is_invalid() {
        assert!(matches!(
            parse_word(&mut bytes("00z0")),
            Err(LexError::InvalidDigit)
        ));
    }

    #[test]
    fn short_stream_is_unexpected_end() {
        assert!(matches!(
            parse_word(&mut bytes("0f")),
            Err(LexError::UnexpectedEnd)
        ));
        assert!(matches!(
            parse_byte(&mut bytes("")),
            Err(LexError::UnexpectedEnd)
        ));
    }

    #[test]
    fn offending_byte_is_consumed_not_pushed_back() {
        let mut b = bytes("zg");
        assert!(matches!(parse_byte(&mut b), Err(LexError::InvalidDigit)));
        // The `z` is gone; the next read sees `g`.
        assert_eq!(b.next().unwrap().unwrap(), b'g');
    }
}
