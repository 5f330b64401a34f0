//! Telegram MarkdownV2 escaping and length limits.
//!
//! Every piece of user-supplied text interpolated into a message goes through
//! [`escape_markdown`]. Link targets inside `(...)` are the only exception.

/// Characters MarkdownV2 treats as markup.
///
/// Backslash is included so that a trailing `\` in user text cannot escape
/// the markup that follows it.
pub const RESERVED_CHARS: [char; 19] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    '\\',
];

/// Marker appended to truncated text (before escaping).
pub const ELLIPSIS: &str = "...";

/// Returns `true` if `c` must be escaped in MarkdownV2.
pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// Prefixes every reserved character with a backslash.
///
/// # Examples
///
/// ```
/// use linear_relay::message::escape_markdown;
///
/// assert_eq!(escape_markdown("v1.2 [beta]"), r"v1\.2 \[beta\]");
/// assert_eq!(escape_markdown("plain"), "plain");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if is_reserved(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Cuts `text` to `limit` characters and appends [`ELLIPSIS`] if it was longer.
///
/// Counts Unicode scalar values, not bytes, so multi-byte text is never split
/// inside a character.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Truncates first, then escapes, so the limit applies to what the reader sees.
pub fn escape_truncated(text: &str, limit: usize) -> String {
    escape_markdown(&truncate_chars(text, limit))
}

/// Returns `true` if `text` contains a reserved character not preceded by an
/// escaping backslash.
#[cfg(test)]
pub(crate) fn has_unescaped_reserved(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if chars.next().is_none() {
                return true;
            }
        } else if is_reserved(c) {
            return true;
        }
    }
    false
}
