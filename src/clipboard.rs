use crate::copy::CopyError;
use anyhow::{Context, Result};
use arboard::Clipboard;
use std::future::Future;

/// Something a domain can be written to.
///
/// The copy session only cares whether the write landed; the reason for a
/// failure is carried along for logging but never acted upon.
pub trait ClipboardWriter {
    fn write(&self, text: &str) -> impl Future<Output = Result<(), CopyError>> + Send;
}

/// The real system clipboard, backed by `arboard`.
///
/// `arboard` blocks while it talks to the display server, so every write runs
/// on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    async fn write(&self, text: &str) -> Result<(), CopyError> {
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
            .await
            .map_err(|e| CopyError::write_failed(e.to_string()))?
            .map_err(|e| CopyError::write_failed(format!("{e:#}")))
    }
}

/// Copy text to the system clipboard.
///
/// On Linux, clipboard contents persist while the application is running.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy text to clipboard")?;
    Ok(())
}

/// Check if a clipboard can be opened at all.
pub fn clipboard_available() -> bool {
    Clipboard::new().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_clipboard_never_panics() {
        // CI machines usually have no display; either outcome is fine
        let result = SystemClipboard.write("example.com").await;
        if let Err(CopyError::ClipboardWriteFailed(reason)) = result {
            assert!(!reason.is_empty());
        }
    }

    #[test]
    fn test_clipboard_available_returns_bool() {
        let _ = clipboard_available();
    }
}
