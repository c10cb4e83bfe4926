//! Platform capabilities for a desktop terminal
//!
//! Real implementations of the clipboard and share capabilities, plus the OS
//! URL opener used to hand links to WhatsApp Web.

use crate::prelude::*;
use async_trait::async_trait;
use std::process::Command;
use std::time::Duration;
use zink_core::bridge::{ClipboardCapability, PlatformError, ShareCapability, SharePayload};

/// System clipboard through `arboard`
///
/// A fresh handle is opened per write; headless sessions (no display server)
/// report [`PlatformError::Unavailable`].
///
/// On X11 the copied text lives in the process that set it. A clipboard built
/// with [`SystemClipboard::holding`] keeps serving it after the write, until
/// another application takes the selection or the hold runs out. One-shot
/// commands need this; the interactive session outlives its writes anyway.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemClipboard {
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(hold: Duration) -> Self {
        Self {
            hold: Some(hold).filter(|hold| !hold.is_zero()),
        }
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }
}

#[async_trait]
impl ClipboardCapability for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        log::debug!("Writing {} bytes to the system clipboard", text.len());

        let text = text.to_string();
        let hold = self.hold;
        // arboard is synchronous
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| PlatformError::Unavailable(e.to_string()))?;
            set_clipboard_text(&mut clipboard, text, hold)
                .map_err(|e| PlatformError::Denied(e.to_string()))
        })
        .await
        .map_err(|e| PlatformError::Unavailable(e.to_string()))?
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_clipboard_text(
    clipboard: &mut arboard::Clipboard,
    text: String,
    hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match hold {
        Some(hold) => {
            log::info!("Serving the clipboard for up to {} ms", hold.as_millis());
            clipboard
                .set()
                .wait_until(std::time::Instant::now() + hold)
                .text(text)
        }
        None => clipboard.set_text(text),
    }
}

// Other platforms keep the contents after the process exits
#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_clipboard_text(
    clipboard: &mut arboard::Clipboard,
    text: String,
    _hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

/// Share capability of a terminal session
///
/// Terminals have no native share sheet, so this always reports itself as
/// unavailable and the share bridge never calls it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalShare;

#[async_trait]
impl ShareCapability for TerminalShare {
    fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, payload: &SharePayload) -> Result<(), PlatformError> {
        log::debug!("Share requested for {} without a share sheet", payload.url);
        Err(PlatformError::Unavailable(
            "no native share sheet in a terminal".to_string(),
        ))
    }
}

/// Open `url` with the OS default handler (browser, WhatsApp Desktop, ...)
pub fn open_url(url: &str) -> std::result::Result<(), Error> {
    let mut command = opener_command(url)?;
    log::info!("Opening {url}");

    let status = command.status().map_err(|e| Error::OpenFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !status.success() {
        return Err(Error::OpenFailed {
            url: url.to_string(),
            reason: f!("opener exited with {status}"),
        });
    }

    Ok(())
}

fn opener_command(url: &str) -> std::result::Result<Command, Error> {
    let mut command = match std::env::consts::OS {
        "macos" => Command::new("open"),
        "linux" | "freebsd" | "openbsd" | "netbsd" => Command::new("xdg-open"),
        "windows" => {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        }
        os => return Err(Error::UnsupportedPlatform(os.to_string())),
    };
    command.arg(url);
    Ok(command)
}
