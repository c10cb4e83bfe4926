//! Form state and its reducer
//!
//! The shell owns a [`FormState`] snapshot and replaces it with the result of
//! [`reduce`] after every user action or completed effect. Snapshots are never
//! mutated in place.

use crate::link::WhatsAppLink;
use crate::phone::{format_phone, strip_non_digits, PHONE_INPUT_MAX_LEN};
use serde::Serialize;

/// Longest message accepted by the form, in characters.
pub const MESSAGE_MAX_CHARS: usize = 500;

/// How long the "copied" indicator stays on after a successful copy.
pub const COPIED_INDICATOR_MS: u64 = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    /// Digits only
    pub phone: String,
    pub message: String,
    pub generated_link: Option<WhatsAppLink>,
    pub copied: bool,
    pub is_generating: bool,
    /// Bumped by every reset; a generation only lands on the form it started from
    pub form_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PhoneEdited(String),
    MessageEdited(String),
    GenerationStarted,
    GenerationFinished { form_id: u64, link: WhatsAppLink },
    CopySucceeded,
    CopiedIndicatorExpired,
    Reset,
}

impl FormState {
    /// Phone as shown in the input field
    pub fn phone_display(&self) -> String {
        format_phone(&self.phone)
    }

    /// Character counter shown under the message field, e.g. "12/500"
    pub fn message_counter(&self) -> String {
        format!("{}/{}", self.message.chars().count(), MESSAGE_MAX_CHARS)
    }

    pub fn can_generate(&self) -> bool {
        !self.is_generating
    }
}

/// Apply `event` to `state`, returning the next snapshot
pub fn reduce(state: &FormState, event: Event) -> FormState {
    match event {
        Event::PhoneEdited(raw) => {
            let capped: String = raw.chars().take(PHONE_INPUT_MAX_LEN).collect();
            FormState {
                phone: strip_non_digits(&capped),
                ..state.clone()
            }
        }
        Event::MessageEdited(raw) => FormState {
            message: raw.chars().take(MESSAGE_MAX_CHARS).collect(),
            ..state.clone()
        },
        Event::GenerationStarted => FormState {
            is_generating: true,
            ..state.clone()
        },
        Event::GenerationFinished { form_id, link } if form_id == state.form_id => FormState {
            generated_link: Some(link),
            is_generating: false,
            ..state.clone()
        },
        // Started before a reset: the request is over, its link is stale
        Event::GenerationFinished { .. } => FormState {
            is_generating: false,
            ..state.clone()
        },
        Event::CopySucceeded => FormState {
            copied: true,
            ..state.clone()
        },
        Event::CopiedIndicatorExpired => FormState {
            copied: false,
            ..state.clone()
        },
        Event::Reset => FormState {
            is_generating: state.is_generating,
            form_id: state.form_id.wrapping_add(1),
            ..FormState::default()
        },
    }
}
