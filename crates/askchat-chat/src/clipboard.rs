//! Clipboard collaborator.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};

/// Accepts text and places it on a clipboard
pub trait Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard.
///
/// The handle is opened on first use and kept for the life of the session,
/// since on X11 the copied text is only served while the handle exists.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let handle = arboard::Clipboard::new().context("Failed to open system clipboard")?;
            self.inner = Some(handle);
        }

        match self.inner.as_mut() {
            Some(handle) => handle
                .set_text(text.to_string())
                .context("Failed to write to system clipboard"),
            None => anyhow::bail!("System clipboard unavailable"),
        }
    }
}

/// Clipboard that just remembers what was copied. Clones share contents.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_last_copy() {
        let clipboard = MemoryClipboard::new();
        let mut handle = clipboard.clone();

        assert_eq!(clipboard.contents(), None);
        handle.copy_text("first").unwrap();
        handle.copy_text("second").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("second"));
    }
}
