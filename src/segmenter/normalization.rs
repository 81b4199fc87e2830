// WHY: standalone normalization logic shared by the segmentation pipeline
// Line-ending unification runs before the boundary scan, whitespace collapse after it

use std::borrow::Cow;

/// Rewrite `\r\n` and lone `\r` to `\n`
/// WHY: borrowed fast path, most guide files never contain a carriage return
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            // Handle \r\n as single break (peek ahead for \n)
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            result.push('\n');
        } else {
            result.push(ch);
        }
    }

    Cow::Owned(result)
}

/// Whitespace class used for separators and trimming
///
/// Unicode `White_Space` plus U+FEFF, so a byte-order mark at the head of a
/// guide file is dropped like any other leading space.
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Collapse whitespace runs to a single space and trim both ends
pub fn normalize_sentence(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_sentence_into(text, &mut result);
    result
}

/// Normalize sentence into supplied buffer to avoid allocation
/// WHY: enables buffer reuse when a whole document is segmented at once
pub fn normalize_sentence_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // Leading whitespace never reaches the buffer, trailing is popped below
    let mut pending_space = false;

    for ch in text.chars() {
        if is_space(ch) {
            pending_space = !buffer.is_empty();
        } else {
            if pending_space {
                buffer.push(' ');
                pending_space = false;
            }
            buffer.push(ch);
        }
    }
}
