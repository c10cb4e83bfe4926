//! Phone number sanitizing and display formatting
//!
//! Pure functions over Brazilian phone numbers typed with their DDD (area code)
//! but without the country code. Formatting is display-only: the digits that
//! end up in a link always come from [`strip_non_digits`].

/// Number of digits in a Brazilian mobile number with DDD (`(DD) 9DDDD-DDDD`).
pub const MOBILE_DIGITS: usize = 11;

/// Longest raw phone input accepted by the form, the length of `(DD) DDDDD-DDDD`.
pub const PHONE_INPUT_MAX_LEN: usize = 15;

const AREA_CODE_LEN: usize = 2;
const LANDLINE_PREFIX_LEN: usize = 4;
const MOBILE_PREFIX_LEN: usize = 5;

/// Remove every character that is not an ASCII digit
///
/// Converts "(11) 99999-8888" to "11999998888". Non-ASCII digits (e.g. Arabic-Indic)
/// are removed as well, so the result only ever contains `0`-`9`.
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone number for display
///
/// - empty input formats to ""
/// - 11 digits format as `(DD) DDDDD-DDDD`
/// - 1 to 10 digits format progressively as `(DD) DDDD-DDDD`, leaving out groups
///   that have no digits yet along with their separator
/// - anything longer than 11 digits is returned as bare digits
pub fn format_phone(raw: &str) -> String {
    let digits = strip_non_digits(raw);

    match digits.len() {
        0 => String::new(),
        MOBILE_DIGITS => group(&digits, MOBILE_PREFIX_LEN),
        len if len < MOBILE_DIGITS => group(&digits, LANDLINE_PREFIX_LEN),
        _ => digits,
    }
}

/// Split ASCII digits into area code, prefix and line number groups
fn group(digits: &str, prefix_len: usize) -> String {
    let area_end = digits.len().min(AREA_CODE_LEN);
    let prefix_end = digits.len().min(AREA_CODE_LEN + prefix_len);

    let area = &digits[..area_end];
    let prefix = &digits[area_end..prefix_end];
    let line = &digits[prefix_end..];

    let mut out = format!("({area})");
    if !prefix.is_empty() {
        out.push(' ');
        out.push_str(prefix);
    }
    if !line.is_empty() {
        out.push('-');
        out.push_str(line);
    }
    out
}
