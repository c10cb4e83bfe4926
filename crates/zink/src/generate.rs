use crate::notify::notify;
use crate::platform::{open_url, SystemClipboard};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;
use std::time::Duration;
use zink_core::bridge::copy;
use zink_core::link::{build_link, ValidationError, WhatsAppLink};
use zink_core::notice::Notice;
use zink_core::phone::format_phone;
use zink_core::qr::{qr_image_url, render_qr, DEFAULT_QR_SIZE};

/// Cosmetic pause before a generated link is revealed.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// How long `--copy` keeps serving the clipboard before the command exits.
pub const DEFAULT_COPY_HOLD_MS: u64 = 5000;

#[derive(Debug, clap::Args, Serialize, serde::Deserialize, Clone)]
pub struct GenerateOptions {
    /// Phone number with DDD (e.g. "(11) 99999-8888")
    pub phone: String,

    /// Message prefilled in the chat
    pub message: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Copy the link to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Milliseconds to keep serving the copied link on X11 before exiting
    #[arg(long, env = "ZINK_COPY_HOLD_MS", default_value_t = DEFAULT_COPY_HOLD_MS)]
    pub copy_hold_ms: u64,

    /// Open the link in WhatsApp Web
    #[arg(long)]
    pub open: bool,

    /// Skip the terminal QR code
    #[arg(long)]
    pub no_qr: bool,

    /// Edge length in pixels of the QR image URL
    #[arg(long, env = "ZINK_QR_SIZE", default_value_t = DEFAULT_QR_SIZE)]
    pub qr_size: u32,

    /// Milliseconds to wait before revealing the link
    #[arg(long, env = "ZINK_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,
}

/// Timing of link generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateConfig {
    pub delay: Duration,
}

impl GenerateConfig {
    pub fn from_millis(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Wait out the configured delay; not cancellable
    pub async fn settle(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DELAY_MS)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub link: WhatsAppLink,
    pub qr_image_url: String,
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let config = GenerateConfig::from_millis(options.delay_ms);
    let message = options.message.clone().unwrap_or_default();

    if global.verbose {
        eprintln!("Delay: {} ms", options.delay_ms);
        eprintln!("QR size: {}x{}", options.qr_size, options.qr_size);
    }

    if !options.json && !config.delay.is_zero() && std::io::stderr().is_terminal() {
        notify(&Notice::generation_in_progress());
    }

    let output = generate_link_data(&options.phone, &message, config, options.qr_size)
        .await
        .map_err(|err| {
            notify(&Notice::validation(&err));
            Error::from(err)
        })?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_formatted(&output, &options);
        notify(&Notice::link_generated());
    }

    if options.open {
        notify(&Notice::opening_whatsapp());
        open_url(output.link.as_str())?;
    }

    // Last, since the hold may keep the command alive
    if options.copy {
        let clipboard = SystemClipboard::holding(Duration::from_millis(options.copy_hold_ms));
        let outcome = copy(&clipboard, output.link.as_str()).await;
        notify(&Notice::copy(outcome));
    }

    Ok(())
}

/// Validate, wait out the delay, and describe the generated link
///
/// Validation errors return immediately, without waiting.
pub async fn generate_link_data(
    phone: &str,
    message: &str,
    config: GenerateConfig,
    qr_size: u32,
) -> std::result::Result<GenerateOutput, ValidationError> {
    let link = build_link(phone, message)?;
    config.settle().await;

    Ok(GenerateOutput {
        phone: format_phone(phone),
        message: link.message(),
        qr_image_url: qr_image_url(link.as_str(), qr_size),
        link,
    })
}

fn output_formatted(output: &GenerateOutput, options: &GenerateOptions) {
    let is_tty = std::io::stdout().is_terminal();

    // Pipes only get the bare link
    if !is_tty {
        println!("{}", output.link);
        return;
    }

    println!("\n{}\n", "Your link is ready! 🎉".bright_green().bold());

    let mut table = new_table();
    table.add_row(prettytable::row!["Phone", output.phone]);
    if let Some(message) = &output.message {
        table.add_row(prettytable::row!["Message", message]);
    }
    table.add_row(prettytable::row!["Link", output.link]);
    table.add_row(prettytable::row!["QR image", output.qr_image_url]);
    table.printstd();

    if !options.no_qr {
        match terminal_qr(&output.link) {
            Some(qr) => {
                println!("\n{qr}");
                println!("{}", "📱 Scan with your phone".bright_white().bold());
            }
            None => println!(
                "\n{}",
                "Link too long for a terminal QR code; use the QR image URL instead.".dimmed()
            ),
        }
    }
}

/// Terminal QR for `link`, or `None` when the link does not fit in a QR code
fn terminal_qr(link: &WhatsAppLink) -> Option<String> {
    match render_qr(link.as_str()) {
        Ok(qr) => Some(qr),
        Err(err) => {
            log::warn!("Skipping QR code for a {} byte link: {err}", link.as_str().len());
            None
        }
    }
}
