//! WhatsApp deep link construction
//!
//! Builds links following WhatsApp's public `wa.me` convention:
//! `https://wa.me/55<digits>` with an optional `?text=<message>` query.

use crate::phone::strip_non_digits;
use serde::Serialize;
use std::fmt;

/// Brazil's country calling code, prepended to every number.
pub const COUNTRY_CODE: &str = "55";

/// Every generated link starts with this prefix.
pub const LINK_PREFIX: &str = "https://wa.me/55";

const TEXT_QUERY: &str = "?text=";

/// Marks that `encodeURIComponent` leaves alone but `urlencoding` escapes.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

/// Reasons a link cannot be generated
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Phone number is required")]
    MissingPhone,
}

/// A generated `wa.me` link
///
/// Always starts with [`LINK_PREFIX`]; carries a `?text=` query only when the
/// trimmed message was non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WhatsAppLink(String);

impl WhatsAppLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Destination digits, without the country code
    pub fn digits(&self) -> &str {
        let rest = &self.0[LINK_PREFIX.len()..];
        rest.split_once(TEXT_QUERY).map_or(rest, |(digits, _)| digits)
    }

    /// Prefilled message, percent-decoded
    pub fn message(&self) -> Option<String> {
        let (_, encoded) = self.0.split_once(TEXT_QUERY)?;
        urlencoding::decode(encoded).ok().map(|m| m.into_owned())
    }
}

impl fmt::Display for WhatsAppLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WhatsAppLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Percent-encode a URL component the way `encodeURIComponent` does
///
/// Every UTF-8 byte is escaped except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
/// Each `%` in the `urlencoding` output starts an escape triple, so restoring
/// the five marks cannot touch an escaped literal `%` (`%25`).
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = urlencoding::encode(input).into_owned();
    for (escaped, mark) in UNRESERVED_MARKS {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, mark);
        }
    }
    encoded
}

/// Build a `wa.me` link from raw form input
///
/// The emptiness check runs on the trimmed raw phone, not on its digits, so
/// symbol-only input such as "--" still produces `https://wa.me/55`.
/// No digit-count validation is performed.
pub fn build_link(raw_phone: &str, raw_message: &str) -> Result<WhatsAppLink, ValidationError> {
    if raw_phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }

    let digits = strip_non_digits(raw_phone);
    let message = raw_message.trim();

    let mut link = format!("{LINK_PREFIX}{digits}");
    if !message.is_empty() {
        link.push_str(TEXT_QUERY);
        link.push_str(&encode_uri_component(message));
    }

    Ok(WhatsAppLink(link))
}
