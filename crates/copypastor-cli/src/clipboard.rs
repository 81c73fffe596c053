//! System clipboard access.

use anyhow::{Context, Result};

/// Somewhere copied snippet content can be placed.
pub trait Clipboard {
  fn copy_text(&mut self, text: String) -> Result<()>;
}

impl Clipboard for arboard::Clipboard {
  fn copy_text(&mut self, text: String) -> Result<()> {
    self.set_text(text).context("writing to clipboard")
  }
}

/// The system clipboard, or `None` when no display server is reachable.
pub fn system() -> Option<Box<dyn Clipboard>> {
  arboard::Clipboard::new()
    .ok()
    .map(|c| Box::new(c) as Box<dyn Clipboard>)
}
