//! Terminal-side implementations of the optional session capabilities.

use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use arboard::Clipboard;
use async_trait::async_trait;
use client_core::{Capabilities, Haptics, ShareTarget};
use shared::domain::{SharePayload, VibratePattern};
use tracing::{debug, info};

use crate::config::Settings;

/// Rings the terminal bell in place of a vibration motor.
pub struct TerminalBell;

impl TerminalBell {
    pub fn detect() -> Option<Self> {
        std::io::stderr().is_terminal().then_some(Self)
    }
}

impl Haptics for TerminalBell {
    fn vibrate(&self, pattern: &VibratePattern) {
        debug!(?pattern, total_ms = pattern.total_ms(), "haptics: vibrate");
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x07").and_then(|()| stderr.flush());
    }
}

/// Shares by placing the payload text on the system clipboard.
pub struct ClipboardShare;

impl ClipboardShare {
    pub fn detect() -> Option<Self> {
        match Clipboard::new() {
            Ok(_) => Some(Self),
            Err(err) => {
                info!(error = %err, "share: clipboard unavailable; sharing disabled");
                None
            }
        }
    }
}

#[async_trait]
impl ShareTarget for ClipboardShare {
    async fn share(&self, payload: &SharePayload) -> Result<()> {
        let mut clipboard = Clipboard::new().context("failed to open clipboard")?;
        clipboard
            .set_text(payload.text.clone())
            .context("failed to copy prompt to clipboard")?;
        debug!(title = %payload.title, "share: copied to clipboard");
        Ok(())
    }
}

/// Probes each enabled capability exactly once.
pub fn detect_capabilities(settings: &Settings) -> Capabilities {
    let mut capabilities = Capabilities::none();
    if settings.haptics {
        if let Some(bell) = TerminalBell::detect() {
            capabilities = capabilities.with_haptics(bell);
        }
    }
    if settings.share {
        if let Some(clipboard) = ClipboardShare::detect() {
            capabilities = capabilities.with_share(clipboard);
        }
    }
    capabilities
}
