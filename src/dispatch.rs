//! Dispatch: decoded commands become canvas operations.

use crate::canvas::{Canvas, Rgb8};
use crate::decode::Command;
use crate::foundation::error::PixwireResult;

/// The interpreter's mutable drawing state, threaded through dispatch.
/// Created once per session; only `SetColor` mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawState {
    /// Foreground color for subsequent drawing operations.
    pub color: Rgb8,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { color: Rgb8::BLACK }
    }
}

/// What the loop should do after a command has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Applies one command against the draw state and canvas. Invalid commands
/// report their diagnostic and change nothing; only `present` can fail.
pub fn apply<C: Canvas>(
    cmd: Command,
    state: &mut DrawState,
    canvas: &mut C,
) -> PixwireResult<Control> {
    match cmd {
        Command::SetColor { r, g, b } => state.color = Rgb8::new(r, g, b),
        Command::Plot { x, y } => canvas.draw_point(x, y, state.color),
        Command::Line { x1, y1, x2, y2 } => canvas.draw_line(x1, y1, x2, y2, state.color),
        Command::Rect { x, y, w, h } => canvas.draw_rect_outline(x, y, w, h, state.color),
        Command::FillRect { x, y, w, h } => canvas.draw_rect_filled(x, y, w, h, state.color),
        Command::Present => canvas.present()?,
        Command::Quit => return Ok(Control::Quit),
        Command::Noop => {}
        Command::Invalid(reason) => tracing::warn!("{reason}"),
    }
    Ok(Control::Continue)
}
