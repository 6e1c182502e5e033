use std::fmt;

use arboard::Clipboard;

/// System clipboard connection, opened on first use.
///
/// On X11 and Wayland the copied text is only served while the connection
/// is alive, so one service is kept for the whole session.
#[derive(Default)]
pub struct ClipboardService {
    clipboard: Option<Clipboard>,
}

impl ClipboardService {
    /// Places `text` on the system clipboard.
    pub fn copy(&mut self, text: &str) -> Result<(), String> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|e| e.to_string())?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard.set_text(text.to_string()).map_err(|e| e.to_string())
    }

    /// Whether a clipboard connection is currently held.
    pub fn is_connected(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl fmt::Debug for ClipboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardService")
            .field("connected", &self.is_connected())
            .finish()
    }
}
