//! Command decoding: one opcode byte, then arity-driven hex parameter fields.
//!
//! The opcode alone determines how many hex digits follow; there is no
//! command terminator. A failed parameter field invalidates the whole
//! command without resynchronization: the remaining fields are still read
//! (and their values discarded), the command reports once, and whatever
//! bytes follow are read as the next opcode.

use std::io;
use std::io::Read;

use crate::lex::{self, LexError};

/// A fully decoded protocol command.
///
/// Coordinates and extents are word fields, color channels byte fields.
/// Values are not validated against surface bounds here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `C rrggbb` — select the foreground color for subsequent drawing.
    SetColor { r: u8, g: u8, b: u8 },
    /// `P xxxxyyyy` — plot one point.
    Plot { x: u16, y: u16 },
    /// `L xxxxyyyyxxxxyyyy` — draw a line between two points.
    Line { x1: u16, y1: u16, x2: u16, y2: u16 },
    /// `R xxxxyyyywwwwhhhh` — draw a rectangle outline.
    Rect { x: u16, y: u16, w: u16, h: u16 },
    /// `F xxxxyyyywwwwhhhh` — fill a rectangle.
    FillRect { x: u16, y: u16, w: u16, h: u16 },
    /// `U` — copy the back buffer to the visible surface.
    Present,
    /// `Q` — end the session.
    Quit,
    /// Space or newline at an opcode position.
    Noop,
    /// A command that failed to decode. Reported, then dropped.
    Invalid(InvalidReason),
}

/// Why a command failed to decode. `Display` is the wire diagnostic text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    BadByteValue,
    BadWordValue,
    UnknownOpcode(u8),
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadByteValue => f.write_str("bad byte value"),
            Self::BadWordValue => f.write_str("bad word value"),
            Self::UnknownOpcode(_) => f.write_str("bad operation code"),
        }
    }
}

/// Pulls commands off a blocking byte stream, one at a time.
pub struct Decoder<R: Read> {
    bytes: io::Bytes<R>,
}

impl<R: Read> Decoder<R> {
    pub fn new(input: R) -> Self {
        Self {
            bytes: input.bytes(),
        }
    }

    /// Decodes the next command.
    ///
    /// Returns `Ok(None)` on end of stream at an opcode boundary — the clean
    /// termination signal. Malformed protocol input never produces an `Err`;
    /// it becomes [`Command::Invalid`]. Only reader failures propagate.
    pub fn next_command(&mut self) -> Result<Option<Command>, io::Error> {
        let opcode = match self.bytes.next() {
            Some(b) => b?,
            None => return Ok(None),
        };

        let cmd = match opcode {
            b'C' => match self.byte_fields::<3>()? {
                Some([r, g, b]) => Command::SetColor { r, g, b },
                None => Command::Invalid(InvalidReason::BadByteValue),
            },
            b'P' => match self.word_fields::<2>()? {
                Some([x, y]) => Command::Plot { x, y },
                None => Command::Invalid(InvalidReason::BadWordValue),
            },
            b'L' => match self.word_fields::<4>()? {
                Some([x1, y1, x2, y2]) => Command::Line { x1, y1, x2, y2 },
                None => Command::Invalid(InvalidReason::BadWordValue),
            },
            b'R' => match self.word_fields::<4>()? {
                Some([x, y, w, h]) => Command::Rect { x, y, w, h },
                None => Command::Invalid(InvalidReason::BadWordValue),
            },
            b'F' => match self.word_fields::<4>()? {
                Some([x, y, w, h]) => Command::FillRect { x, y, w, h },
                None => Command::Invalid(InvalidReason::BadWordValue),
            },
            b'U' => Command::Present,
            b'Q' => Command::Quit,
            b' ' | b'\n' => Command::Noop,
            other => Command::Invalid(InvalidReason::UnknownOpcode(other)),
        };

        tracing::debug!(?cmd, "decoded");
        Ok(Some(cmd))
    }

    // Field helpers return `Ok(None)` when any field failed as protocol
    // input (bad digit or truncated stream) and `Err` only for reader
    // failures. Every field is attempted even after one fails, so a bad
    // field consumes one byte and the stream resumes after the last field's
    // failure point, never at it.

    fn byte_fields<const N: usize>(&mut self) -> Result<Option<[u8; N]>, io::Error> {
        let mut out = [0u8; N];
        let mut failed = false;
        for slot in &mut out {
            match lex::parse_byte(&mut self.bytes) {
                Ok(v) => *slot = v,
                Err(LexError::Io(err)) => return Err(err),
                Err(_) => failed = true,
            }
        }
        Ok(if failed { None } else { Some(out) })
    }

    fn word_fields<const N: usize>(&mut self) -> Result<Option<[u16; N]>, io::Error> {
        let mut out = [0u16; N];
        let mut failed = false;
        for slot in &mut out {
            match lex::parse_word(&mut self.bytes) {
                Ok(v) => *slot = v,
                Err(LexError::Io(err)) => return Err(err),
                Err(_) => failed = true,
            }
        }
        Ok(if failed { None } else { Some(out) })
    }
}
