//! Clipboard access for the table bridge.
//!
//! The bridge only talks to the [`Clipboard`] trait. [`SystemClipboard`] goes
//! through `arboard`, [`MemoryClipboard`] keeps everything in process and is
//! what the tests (and any headless caller) use.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

pub trait Clipboard {
    /// Plain text on the clipboard, empty when there is none.
    fn get_text(&mut self) -> Result<String, ClipboardError>;

    /// HTML representation, if the clipboard carries one.
    fn get_html(&mut self) -> Result<Option<String>, ClipboardError>;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Publish `html` together with `alt_text` as its plain-text form.
    fn set_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. A backend handle is opened per call, so holding
/// one of these never keeps the clipboard locked.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn open() -> Result<arboard::Clipboard, ClipboardError> {
        Ok(arboard::Clipboard::new()?)
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        match Self::open()?.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_html(&mut self) -> Result<Option<String>, ClipboardError> {
        match Self::open()?.get().html() {
            Ok(html) => Ok(Some(html)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        Self::open()?.set_text(text)?;
        Ok(())
    }

    fn set_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        Self::open()?.set_html(html, Some(alt_text))?;
        Ok(())
    }
}

/// In-process clipboard. Setting text clears any HTML, mirroring how a
/// desktop clipboard replaces all representations on every write.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryClipboard {
    text: String,
    html: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            html: None,
        }
    }

    pub fn with_html(html: &str, alt_text: &str) -> Self {
        Self {
            text: alt_text.to_string(),
            html: Some(html.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.clone())
    }

    fn get_html(&mut self) -> Result<Option<String>, ClipboardError> {
        Ok(self.html.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = text.to_string();
        self.html = None;
        Ok(())
    }

    fn set_html(&mut self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        self.text = alt_text.to_string();
        self.html = Some(html.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_text_replaces_html() {
        let mut clipboard = MemoryClipboard::with_html("<table/>", "alt");
        assert_eq!(clipboard.get_html().unwrap().as_deref(), Some("<table/>"));

        clipboard.set_text("1\t2").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "1\t2");
        assert_eq!(clipboard.get_html().unwrap(), None);
    }

    #[test]
    fn test_memory_clipboard_html_sets_alt_text() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_html("<table><tr><td>1</td></tr></table>", "1").unwrap();
        assert_eq!(clipboard.text(), "1");
        assert!(clipboard.html().unwrap().starts_with("<table>"));
    }
}
