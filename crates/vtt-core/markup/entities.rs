//! HTML-style character references in cue text
//!
//! Only the four references WebVTT defines for cue text are decoded. The
//! serializer uses [`escape_text`] so that decoding restores content exactly.

use std::borrow::Cow;

/// Decode a named reference (without `&` and `;`)
#[must_use]
pub fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "nbsp" => Some(' '),
        _ => None,
    }
}

/// Escape `&`, `<` and `>` so the text survives a markup parse unchanged
#[must_use]
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
