//! Line-oriented session that drives the form reducer
//!
//! Each command turns into one or more [`Event`]s applied to the session's
//! [`FormState`]. Link generation and the "copied" indicator run in the
//! background so input stays responsive while they are pending.

use crate::generate::{GenerateConfig, DEFAULT_DELAY_MS};
use crate::notify::notify;
use crate::platform::{open_url, SystemClipboard, TerminalShare};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;
use zink_core::bridge::{
    copy, share, ClipboardCapability, CopyOutcome, ShareCapability, SharePayload,
};
use zink_core::link::{build_link, WhatsAppLink};
use zink_core::notice::Notice;
use zink_core::qr::render_qr;
use zink_core::state::{reduce, Event, FormState, COPIED_INDICATOR_MS};

const HELP: &str = "\
Commands:
  phone <number>     Set the phone number with DDD
  message <text>     Set the prefilled message (empty clears it)
  generate           Generate the WhatsApp link
  copy               Copy the generated link
  open               Open the generated link in WhatsApp Web
  share [url]        Share zink (or the given URL)
  reset              Clear the form
  show               Show the form and the generated link
  help               Show this help
  quit               Leave the session";

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct InteractiveOptions {
    /// Milliseconds to wait before revealing a generated link
    #[arg(long, env = "ZINK_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Address shared by the `share` command
    #[arg(long, env = "ZINK_SHARE_URL")]
    pub share_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Phone(String),
    Message(String),
    Generate,
    Copy,
    Open,
    Share(Option<String>),
    Reset,
    Show,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let command = match name.to_lowercase().as_str() {
        "phone" => Command::Phone(rest.to_string()),
        "message" | "msg" => Command::Message(rest.to_string()),
        "generate" | "gen" => Command::Generate,
        "copy" => Command::Copy,
        "open" => Command::Open,
        "share" => Command::Share(Some(rest.trim()).filter(|u| !u.is_empty()).map(str::to_string)),
        "reset" => Command::Reset,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };

    Some(command)
}

/// A link whose delay has elapsed, tagged with the form it was generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub form_id: u64,
    pub link: WhatsAppLink,
}

pub struct Session {
    state: FormState,
    config: GenerateConfig,
    share_url: Option<String>,
    clipboard: Box<dyn ClipboardCapability>,
    sharer: Box<dyn ShareCapability>,
    generated: mpsc::UnboundedSender<Generated>,
    copied_until: Option<Instant>,
}

impl Session {
    pub fn new(
        config: GenerateConfig,
        share_url: Option<String>,
        clipboard: Box<dyn ClipboardCapability>,
        sharer: Box<dyn ShareCapability>,
        generated: mpsc::UnboundedSender<Generated>,
    ) -> Self {
        Self {
            state: FormState::default(),
            config,
            share_url,
            clipboard,
            sharer,
            generated,
            copied_until: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    fn dispatch(&mut self, event: Event) {
        log::debug!("Dispatching {event:?}");
        self.state = reduce(&self.state, event);
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Phone(raw) => {
                self.dispatch(Event::PhoneEdited(raw));
                println!("Phone: {}", self.state.phone_display());
            }
            Command::Message(raw) => {
                self.dispatch(Event::MessageEdited(raw));
                println!("Message: {}", self.state.message_counter());
            }
            Command::Generate => self.generate(),
            Command::Copy => self.copy_link().await,
            Command::Open => self.open_link(),
            Command::Share(url) => self.share(url).await,
            Command::Reset => {
                self.copied_until = None;
                self.dispatch(Event::Reset);
                notify(&Notice::form_reset());
            }
            Command::Show => self.show(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
            Command::Unknown(name) => {
                eprintln!("Unknown command: {name}. Type `help` for the list.");
            }
        }

        Flow::Continue
    }

    /// Validate now, reveal the link once the delay has elapsed
    fn generate(&mut self) {
        if !self.state.can_generate() {
            notify(&Notice::generation_in_progress());
            return;
        }

        let link = match build_link(&self.state.phone, &self.state.message) {
            Ok(link) => link,
            Err(err) => {
                notify(&Notice::validation(&err));
                return;
            }
        };

        self.dispatch(Event::GenerationStarted);
        notify(&Notice::generation_in_progress());

        let config = self.config;
        let form_id = self.state.form_id;
        let generated = self.generated.clone();
        tokio::spawn(async move {
            config.settle().await;
            // The receiver only goes away when the session ends
            let _ = generated.send(Generated { form_id, link });
        });
    }

    pub fn finish_generation(&mut self, generated: Generated) {
        let Generated { form_id, link } = generated;
        self.dispatch(Event::GenerationFinished { form_id, link });

        if form_id != self.state.form_id {
            log::debug!("Dropping link generated before the form was reset");
            return;
        }
        notify(&Notice::link_generated());
        self.show();
    }

    async fn copy_link(&mut self) {
        let Some(link) = self.state.generated_link.clone() else {
            notify(&Notice::no_link_yet());
            return;
        };

        let outcome = copy(&*self.clipboard, link.as_str()).await;
        if outcome == CopyOutcome::Success {
            self.dispatch(Event::CopySucceeded);
            self.copied_until = Some(Instant::now() + Duration::from_millis(COPIED_INDICATOR_MS));
        }
        notify(&Notice::copy(outcome));
    }

    pub fn copied_until(&self) -> Option<Instant> {
        self.copied_until
    }

    pub fn expire_copied(&mut self) {
        self.copied_until = None;
        self.dispatch(Event::CopiedIndicatorExpired);
    }

    fn open_link(&self) {
        let Some(link) = &self.state.generated_link else {
            notify(&Notice::no_link_yet());
            return;
        };

        notify(&Notice::opening_whatsapp());
        if let Err(err) = open_url(link.as_str()) {
            notify(&Notice::open_failed(&err.to_string()));
        }
    }

    /// Share `url`, the configured address, or the generated link, in that order
    async fn share(&self, url: Option<String>) {
        let url = url
            .or_else(|| self.share_url.clone())
            .or_else(|| self.state.generated_link.clone().map(WhatsAppLink::into_string));

        let Some(url) = url else {
            notify(&Notice::no_link_yet());
            return;
        };

        let outcome = share(&*self.sharer, &SharePayload::for_tool(url)).await;
        notify(&Notice::share(outcome));
    }

    fn show(&self) {
        let state = &self.state;
        let mut table = new_table();

        let mut phone = state.phone_display();
        if phone.is_empty() {
            phone = "-".to_string();
        }
        table.add_row(prettytable::row!["Phone", phone]);
        table.add_row(prettytable::row!["Message", state.message_counter()]);

        match &state.generated_link {
            Some(link) if state.copied => {
                table.add_row(prettytable::row!["Link", f!("{link} {}", "✔ copied".green())]);
            }
            Some(link) => {
                table.add_row(prettytable::row!["Link", link]);
            }
            None if state.is_generating => {
                table.add_row(prettytable::row!["Link", "Generating link...".dimmed()]);
            }
            None => {}
        }
        table.printstd();

        if let Some(link) = &state.generated_link {
            match render_qr(link.as_str()) {
                Ok(qr) => println!("\n{qr}"),
                Err(err) => log::warn!("Skipping QR code: {err}"),
            }
        }
    }
}

pub async fn run(options: InteractiveOptions, global: crate::Global) -> Result<()> {
    let (generated_tx, mut generated_rx) = mpsc::unbounded_channel();
    let mut session = Session::new(
        GenerateConfig::from_millis(options.delay_ms),
        options.share_url,
        Box::new(SystemClipboard::new()),
        Box::new(TerminalShare),
        generated_tx,
    );

    if global.verbose {
        eprintln!("Delay: {} ms", options.delay_ms);
    }

    println!("{}", "Zink - WhatsApp Link Generator".bright_green().bold());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let copied_until = session.copied_until();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break; // EOF
                };
                if let Some(command) = parse_command(&line) {
                    if session.handle(command).await == Flow::Quit {
                        break;
                    }
                }
            }
            Some(generated) = generated_rx.recv() => session.finish_generation(generated),
            _ = tokio::time::sleep_until(copied_until.unwrap_or_else(Instant::now)), if copied_until.is_some() => {
                session.expire_copied();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use zink_core::bridge::PlatformError;

    #[derive(Clone, Default)]
    struct MemoryClipboard {
        contents: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ClipboardCapability for MemoryClipboard {
        async fn write_text(&self, text: &str) -> std::result::Result<(), PlatformError> {
            self.contents.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    #[async_trait]
    impl ClipboardCapability for DeniedClipboard {
        async fn write_text(&self, _text: &str) -> std::result::Result<(), PlatformError> {
            Err(PlatformError::Denied("test".to_string()))
        }
    }

    fn session_with(
        clipboard: Box<dyn ClipboardCapability>,
    ) -> (Session, mpsc::UnboundedReceiver<Generated>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session::new(
            GenerateConfig::from_millis(0),
            None,
            clipboard,
            Box::new(TerminalShare),
            tx,
        );
        (session, rx)
    }

    async fn generated_session(
        clipboard: Box<dyn ClipboardCapability>,
    ) -> (Session, mpsc::UnboundedReceiver<Generated>) {
        let (mut session, mut rx) = session_with(clipboard);
        session.handle(Command::Phone("(11) 99999-8888".into())).await;
        session.handle(Command::Message("Olá!".into())).await;
        session.handle(Command::Generate).await;
        let generated = rx.recv().await.unwrap();
        session.finish_generation(generated);
        (session, rx)
    }

    // ============================================================================
    // parse_command tests
    // ============================================================================

    #[test]
    fn test_parse_command_with_arguments() {
        assert_eq!(
            parse_command("phone (11) 99999-8888"),
            Some(Command::Phone("(11) 99999-8888".to_string()))
        );
        assert_eq!(
            parse_command("message Olá, tudo bem?"),
            Some(Command::Message("Olá, tudo bem?".to_string()))
        );
    }

    #[test]
    fn test_parse_command_without_arguments() {
        assert_eq!(parse_command("generate"), Some(Command::Generate));
        assert_eq!(parse_command("  COPY\r\n"), Some(Command::Copy));
        assert_eq!(parse_command("message"), Some(Command::Message(String::new())));
        assert_eq!(parse_command("share"), Some(Command::Share(None)));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_command_share_url() {
        assert_eq!(
            parse_command("share https://example.com "),
            Some(Command::Share(Some("https://example.com".to_string())))
        );
    }

    #[test]
    fn test_parse_command_splits_on_any_whitespace() {
        assert_eq!(
            parse_command("phone\t11999998888"),
            Some(Command::Phone("11999998888".to_string()))
        );
        assert_eq!(
            parse_command("message\tOlá"),
            Some(Command::Message("Olá".to_string()))
        );
    }

    #[test]
    fn test_parse_command_blank_and_unknown() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("launch"),
            Some(Command::Unknown("launch".to_string()))
        );
    }

    // ============================================================================
    // Session tests
    // ============================================================================

    #[tokio::test]
    async fn test_generate_without_phone_does_not_start() {
        let (mut session, mut rx) = session_with(Box::new(MemoryClipboard::default()));
        session.handle(Command::Phone("--".into())).await;
        session.handle(Command::Generate).await;

        assert!(!session.state().is_generating);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_generate_reveals_link() {
        let (session, _rx) = generated_session(Box::new(MemoryClipboard::default())).await;

        let link = session.state().generated_link.as_ref().unwrap();
        assert_eq!(link.as_str(), "https://wa.me/5511999998888?text=Ol%C3%A1!");
        assert!(!session.state().is_generating);
    }

    #[tokio::test]
    async fn test_generate_while_pending_is_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new(
            GenerateConfig::from_millis(50),
            None,
            Box::new(MemoryClipboard::default()),
            Box::new(TerminalShare),
            tx,
        );
        session.handle(Command::Phone("11999998888".into())).await;
        session.handle(Command::Generate).await;
        session.handle(Command::Generate).await;
        assert!(session.state().is_generating);

        let generated = rx.recv().await.unwrap();
        session.finish_generation(generated);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reset_while_generating_drops_stale_link() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new(
            GenerateConfig::from_millis(50),
            None,
            Box::new(MemoryClipboard::default()),
            Box::new(TerminalShare),
            tx,
        );
        session.handle(Command::Phone("11999998888".into())).await;
        session.handle(Command::Generate).await;
        session.handle(Command::Reset).await;
        assert!(session.state().is_generating);

        session.handle(Command::Phone("21988887777".into())).await;
        session.handle(Command::Generate).await;

        let stale = rx.recv().await.unwrap();
        session.finish_generation(stale);
        assert_eq!(session.state().generated_link, None);
        assert_eq!(session.state().phone, "21988887777");
        assert!(!session.state().is_generating);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());

        session.handle(Command::Generate).await;
        let fresh = rx.recv().await.unwrap();
        session.finish_generation(fresh);
        assert_eq!(
            session.state().generated_link.as_ref().map(WhatsAppLink::as_str),
            Some("https://wa.me/5521988887777")
        );
    }

    #[tokio::test]
    async fn test_copy_sets_and_expires_indicator() {
        let clipboard = MemoryClipboard::default();
        let (mut session, _rx) = generated_session(Box::new(clipboard.clone())).await;

        session.handle(Command::Copy).await;
        assert!(session.state().copied);
        assert!(session.copied_until().is_some());
        assert_eq!(
            clipboard.contents.lock().unwrap().as_slice(),
            ["https://wa.me/5511999998888?text=Ol%C3%A1!".to_string()]
        );

        session.expire_copied();
        assert!(!session.state().copied);
        assert!(session.copied_until().is_none());
    }

    #[tokio::test]
    async fn test_copy_failure_leaves_indicator_off() {
        let (mut session, _rx) = generated_session(Box::new(DeniedClipboard)).await;
        session.handle(Command::Copy).await;

        assert!(!session.state().copied);
        assert!(session.copied_until().is_none());
    }

    #[tokio::test]
    async fn test_copy_before_generate_does_nothing() {
        let clipboard = MemoryClipboard::default();
        let (mut session, _rx) = session_with(Box::new(clipboard.clone()));
        session.handle(Command::Copy).await;

        assert!(clipboard.contents.lock().unwrap().is_empty());
        assert!(!session.state().copied);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let (mut session, _rx) = generated_session(Box::new(MemoryClipboard::default())).await;
        session.handle(Command::Copy).await;
        session.handle(Command::Reset).await;

        assert_eq!(
            session.state(),
            &FormState {
                form_id: 1,
                ..FormState::default()
            }
        );
        assert!(session.copied_until().is_none());
    }

    #[tokio::test]
    async fn test_quit_stops_session() {
        let (mut session, _rx) = session_with(Box::new(MemoryClipboard::default()));
        assert_eq!(session.handle(Command::Show).await, Flow::Continue);
        assert_eq!(session.handle(Command::Quit).await, Flow::Quit);
    }
}
