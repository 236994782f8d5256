//! The blocking interpreter loop.

use std::io::Read;

use crate::canvas::Canvas;
use crate::decode::Decoder;
use crate::dispatch::{self, Control, DrawState};
use crate::foundation::error::PixwireResult;

/// How a protocol session ended. Both stop triggers (end of stream, `Q`)
/// are orderly, so `Clean` is the only status; failures surface as `Err`
/// from [`run`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Clean,
}

/// Drives the decode/dispatch loop until the stream ends or a quit command
/// arrives. Single-threaded and blocking; a stalled producer stalls the
/// loop, there is no timeout and no external cancellation.
pub fn run<R: Read, C: Canvas>(input: R, canvas: &mut C) -> PixwireResult<ExitStatus> {
    let mut decoder = Decoder::new(input);
    let mut state = DrawState::default();

    while let Some(cmd) = decoder.next_command()? {
        if dispatch::apply(cmd, &mut state, canvas)? == Control::Quit {
            return Ok(ExitStatus::Clean);
        }
    }
    Ok(ExitStatus::Clean)
}
