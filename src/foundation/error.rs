/// Convenience result type used across pixwire.
pub type PixwireResult<T> = Result<T, PixwireError>;

/// Top-level error taxonomy used by interpreter APIs. Malformed protocol
/// input is absent here: a bad command is reported and dropped, never raised.
#[derive(thiserror::Error, Debug)]
pub enum PixwireError {
    /// Invalid canvas construction or drawing-surface data.
    #[error("canvas error: {0}")]
    Canvas(String),

    /// Transport failure on the command input stream (not end-of-stream,
    /// which is a clean exit).
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixwireError {
    /// Build a [`PixwireError::Canvas`] value.
    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }
}
