//! Clipboard integration with a stdout fallback.

/// Copies `text` to the system clipboard.
///
/// Returns false when no clipboard is available (headless session, missing
/// display server); callers should then fall back to printing the text.
pub fn copy(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => {
                tracing::debug!(bytes = text.len(), "copied to clipboard");
                true
            }
            Err(error) => {
                tracing::debug!(%error, "clipboard write failed");
                false
            }
        },
        Err(error) => {
            tracing::debug!(%error, "clipboard unavailable");
            false
        }
    }
}

/// Copies `text` to the clipboard, printing it under `label` when the
/// clipboard is unavailable so the content is never silently lost.
pub fn copy_or_print(label: &str, text: &str) {
    if copy(text) {
        println!("{label} copied to clipboard.");
    } else {
        println!("clipboard unavailable; {label} below:");
        println!("{text}");
    }
}
