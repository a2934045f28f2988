//! The yank register.
//!
//! The register is always kept locally. When sharing is enabled, every yank is also
//! copied to the clipboard provided by the OS, but pastes always come from the local
//! copy so the editor behaves the same with or without a desktop session.

use arboard::Clipboard as GlobalClipboard;
use tracing::debug;

pub struct Register {
    local: Option<String>,
    share: bool,
}

impl Register {
    pub fn new(share: bool) -> Register {
        Register { local: None, share }
    }

    /// Replaces the contents of the register with `text`.
    pub fn set(&mut self, text: String) {
        if self.share {
            // OS clipboards may be unavailable, such as on a headless device, so
            // failures are ignored.
            if let Err(e) = GlobalClipboard::new().and_then(|mut clip| clip.set_text(text.clone()))
            {
                debug!("global clipboard: {e}");
            }
        }
        self.local = Some(text);
    }

    /// Returns the contents of the register, which is empty if nothing was yanked.
    pub fn get(&self) -> &str {
        self.local.as_deref().unwrap_or("")
    }
}

impl Default for Register {
    fn default() -> Register {
        Register::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_set() {
        let mut register = Register::default();
        assert_eq!(register.get(), "");
        register.set("word".to_string());
        assert_eq!(register.get(), "word");
        register.set("line\n".to_string());
        assert_eq!(register.get(), "line\n");
    }
}
