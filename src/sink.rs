use anyhow::{Context, Result};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::io::Write;

/// Receives the concatenated tags.
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// Shows the run summary or a standalone error to the user.
pub trait DisplaySink {
    fn show(&mut self, title: &str, body: &str) -> Result<()>;
    fn show_error(&mut self, message: &str) -> Result<()>;
}

/// The desktop clipboard.
///
/// On X11 the selection is served by the process that owns it, so the
/// handle is kept until this value is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Clipboard is not available")?,
        };
        self.handle
            .insert(clipboard)
            .set_text(text)
            .context("Failed to copy tags to the clipboard")?;
        log::debug!("copied {} bytes to the clipboard", text.len());
        Ok(())
    }
}

/// Writes the tags to stdout instead of the clipboard.
pub struct StdoutClipboard;

impl ClipboardSink for StdoutClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .context("Failed to write tags to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        Ok(())
    }
}

/// Native message boxes.
pub struct DialogDisplay;

impl DisplaySink for DialogDisplay {
    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(body)
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Error")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }
}

/// Prints to stderr, for terminals and scripts.
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn show(&mut self, title: &str, body: &str) -> Result<()> {
        eprintln!("{title}");
        if !body.is_empty() {
            eprintln!("{body}");
        }
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        eprintln!("Error: {message}");
        Ok(())
    }
}
