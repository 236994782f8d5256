//! Pixwire interprets a streaming ASCII command protocol into raster drawing.
//!
//! An external process writes single-character opcodes followed by fixed-width
//! lowercase-hex parameters (`C ff0000` selects red, `P 00100020` plots a
//! point at (16, 32), `U` presents the frame). Pixwire turns that stream into
//! calls against a double-buffered [`Canvas`]: lex the hex fields, decode a
//! [`Command`], dispatch it against [`DrawState`] and the back buffer.
//!
//! Malformed commands are reported and dropped; the session keeps running.
//! Only transport failures end a run early. Coordinates are passed through
//! unvalidated — bounds are the canvas implementation's concern.
#![forbid(unsafe_code)]

mod canvas;
mod decode;
mod dispatch;
mod foundation;
mod interp;
mod lex;

pub use canvas::{Canvas, DEFAULT_HEIGHT, DEFAULT_WIDTH, PixmapCanvas, Rgb8};
pub use decode::{Command, Decoder, InvalidReason};
pub use dispatch::{Control, DrawState, apply};
pub use foundation::error::{PixwireError, PixwireResult};
pub use interp::{ExitStatus, run};
pub use lex::{LexError, parse_byte, parse_fixed_hex, parse_word};
