use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// The clipboard rejected the write or is not available at all
    /// (headless session, SSH without a display, ...).
    #[error("clipboard write failed: {0}")]
    ClipboardWriteFailed(String),
}

impl CopyError {
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::ClipboardWriteFailed(reason.into())
    }
}
