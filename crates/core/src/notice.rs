//! User-facing notifications
//!
//! Every outcome the shell reports maps to one [`Notice`]. Building them here
//! keeps the wording testable and identical across one-shot commands and the
//! interactive session.

use crate::bridge::{CopyOutcome, ShareOutcome};
use crate::link::ValidationError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    fn new(level: Level, title: &str, description: Option<&str>) -> Self {
        Self {
            level,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    pub fn validation(error: &ValidationError) -> Self {
        match error {
            ValidationError::MissingPhone => Self::new(
                Level::Error,
                "Please enter a phone number.",
                Some("The number is required to generate the link."),
            ),
        }
    }

    pub fn link_generated() -> Self {
        Self::new(
            Level::Success,
            "Link generated successfully!",
            Some("Your WhatsApp link is ready to use."),
        )
    }

    pub fn copy(outcome: CopyOutcome) -> Self {
        match outcome {
            CopyOutcome::Success => Self::new(
                Level::Success,
                "Link copied!",
                Some("The link was copied to your clipboard."),
            ),
            CopyOutcome::Failure => Self::new(
                Level::Error,
                "Copy failed",
                Some("The link could not be copied."),
            ),
        }
    }

    pub fn share(outcome: ShareOutcome) -> Self {
        match outcome {
            ShareOutcome::Success => Self::new(Level::Success, "Shared successfully!", None),
            ShareOutcome::Failure => Self::new(Level::Error, "Sharing failed.", None),
            ShareOutcome::Unsupported => Self::new(
                Level::Error,
                "Sharing is not supported on this platform.",
                None,
            ),
        }
    }

    pub fn opening_whatsapp() -> Self {
        Self::new(
            Level::Info,
            "Opening WhatsApp Web...",
            Some("The link will open in your browser."),
        )
    }

    pub fn open_failed(reason: &str) -> Self {
        Self::new(Level::Error, "Could not open WhatsApp", Some(reason))
    }

    pub fn form_reset() -> Self {
        Self::new(
            Level::Info,
            "Form reset",
            Some("All fields were cleared."),
        )
    }

    pub fn no_link_yet() -> Self {
        Self::new(
            Level::Error,
            "No link generated yet",
            Some("Generate a link first."),
        )
    }

    pub fn generation_in_progress() -> Self {
        Self::new(Level::Info, "Generating link...", None)
    }
}
