//! Clipboard and share bridges
//!
//! The platform's clipboard and native share sheet are reached only through
//! the capability traits below. The shell provides real implementations; tests
//! provide in-memory ones. Each bridge makes a single attempt and turns every
//! platform error into an outcome, never a panic.

use async_trait::async_trait;
use serde::Serialize;

/// Title used when sharing the tool itself.
pub const SHARE_TITLE: &str = "Zink - WhatsApp Link Generator";

/// Blurb used when sharing the tool itself.
pub const SHARE_TEXT: &str = "Check out this tool for generating WhatsApp links in seconds!";

/// Errors reported by platform capabilities
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    Denied(String),

    #[error("Platform rejected the request: {0}")]
    Rejected(String),

    #[error("Cancelled by the user")]
    Cancelled,
}

/// Write access to the system clipboard
#[async_trait]
pub trait ClipboardCapability: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError>;
}

/// Access to a native share affordance
#[async_trait]
pub trait ShareCapability: Send + Sync {
    /// Whether the platform exposes a share affordance at all
    fn is_available(&self) -> bool;

    async fn share(&self, payload: &SharePayload) -> Result<(), PlatformError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Payload promoting the tool, pointing at `url`
    pub fn for_tool(url: impl Into<String>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyOutcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareOutcome {
    Success,
    Failure,
    Unsupported,
}

/// Copy `text` to the clipboard
///
/// Unavailable and denied clipboards both report [`CopyOutcome::Failure`].
pub async fn copy<C>(clipboard: &C, text: &str) -> CopyOutcome
where
    C: ClipboardCapability + ?Sized,
{
    match clipboard.write_text(text).await {
        Ok(()) => CopyOutcome::Success,
        Err(_) => CopyOutcome::Failure,
    }
}

/// Share `payload` through the native share affordance
///
/// Returns [`ShareOutcome::Unsupported`] without calling the capability when
/// the platform has none; cancellation and rejection are [`ShareOutcome::Failure`].
pub async fn share<S>(sharer: &S, payload: &SharePayload) -> ShareOutcome
where
    S: ShareCapability + ?Sized,
{
    if !sharer.is_available() {
        return ShareOutcome::Unsupported;
    }

    match sharer.share(payload).await {
        Ok(()) => ShareOutcome::Success,
        Err(_) => ShareOutcome::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MemoryClipboard {
        contents: Mutex<Option<String>>,
        failure: Option<PlatformError>,
    }

    impl MemoryClipboard {
        fn working() -> Self {
            Self {
                contents: Mutex::new(None),
                failure: None,
            }
        }

        fn failing(error: PlatformError) -> Self {
            Self {
                contents: Mutex::new(None),
                failure: Some(error),
            }
        }
    }

    #[async_trait]
    impl ClipboardCapability for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    struct RecordingSharer {
        available: bool,
        result: Result<(), PlatformError>,
        calls: AtomicUsize,
    }

    impl RecordingSharer {
        fn new(available: bool, result: Result<(), PlatformError>) -> Self {
            Self {
                available,
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ShareCapability for RecordingSharer {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn share(&self, _payload: &SharePayload) -> Result<(), PlatformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    // ============================================================================
    // copy tests
    // ============================================================================

    #[tokio::test]
    async fn test_copy_success_writes_text() {
        let clipboard = MemoryClipboard::working();
        let outcome = copy(&clipboard, "https://wa.me/5511999998888").await;

        assert_eq!(outcome, CopyOutcome::Success);
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some("https://wa.me/5511999998888")
        );
    }

    #[tokio::test]
    async fn test_copy_unavailable_and_denied_collapse_to_failure() {
        let unavailable = MemoryClipboard::failing(PlatformError::Unavailable("headless".into()));
        let denied = MemoryClipboard::failing(PlatformError::Denied("no permission".into()));

        assert_eq!(copy(&unavailable, "x").await, CopyOutcome::Failure);
        assert_eq!(copy(&denied, "x").await, CopyOutcome::Failure);
    }

    #[tokio::test]
    async fn test_copy_is_deterministic() {
        let clipboard = MemoryClipboard::working();
        let first = copy(&clipboard, "same").await;
        let second = copy(&clipboard, "same").await;
        assert_eq!(first, second);
        assert_eq!(clipboard.contents.lock().unwrap().as_deref(), Some("same"));

        let broken = MemoryClipboard::failing(PlatformError::Denied("no".into()));
        assert_eq!(copy(&broken, "same").await, copy(&broken, "same").await);
    }

    #[tokio::test]
    async fn test_copy_through_trait_object() {
        let clipboard: Box<dyn ClipboardCapability> = Box::new(MemoryClipboard::working());
        assert_eq!(copy(&*clipboard, "dyn").await, CopyOutcome::Success);
    }

    // ============================================================================
    // share tests
    // ============================================================================

    #[tokio::test]
    async fn test_share_unsupported_skips_call() {
        let sharer = RecordingSharer::new(false, Ok(()));
        let outcome = share(&sharer, &SharePayload::for_tool("https://example.com")).await;

        assert_eq!(outcome, ShareOutcome::Unsupported);
        assert_eq!(sharer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_share_success() {
        let sharer = RecordingSharer::new(true, Ok(()));
        let outcome = share(&sharer, &SharePayload::for_tool("https://example.com")).await;

        assert_eq!(outcome, ShareOutcome::Success);
        assert_eq!(sharer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_share_cancel_and_reject_are_failures() {
        let cancelled = RecordingSharer::new(true, Err(PlatformError::Cancelled));
        let rejected = RecordingSharer::new(true, Err(PlatformError::Rejected("nope".into())));
        let payload = SharePayload::for_tool("https://example.com");

        assert_eq!(share(&cancelled, &payload).await, ShareOutcome::Failure);
        assert_eq!(share(&rejected, &payload).await, ShareOutcome::Failure);
        assert_eq!(rejected.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_share_payload_for_tool() {
        let payload = SharePayload::for_tool("https://example.com/zink");
        assert_eq!(payload.title, SHARE_TITLE);
        assert_eq!(payload.text, SHARE_TEXT);
        assert_eq!(payload.url, "https://example.com/zink");
    }

    #[test]
    fn test_outcomes_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ShareOutcome::Unsupported).unwrap(),
            "\"unsupported\""
        );
        assert_eq!(
            serde_json::to_string(&CopyOutcome::Success).unwrap(),
            "\"success\""
        );
    }
}
