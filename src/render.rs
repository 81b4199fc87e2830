// WHY: Presentation helpers turning segmented guides into display markup or plain text
// Every sentence and name is escaped here so callers never emit raw document text

use std::borrow::Cow;
use std::fmt::Write;

use crate::segmenter::{is_space, Segmenter};

/// Escape `& < > " '` for HTML text and attribute contexts
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

pub fn render_placeholder(message: &str) -> String {
    format!("<div class=\"placeholder\">{}</div>", escape_html(message))
}

pub fn render_loading() -> String {
    "<div class=\"loading\">Loading...</div>".to_string()
}

pub fn render_error(message: &str) -> String {
    format!("<div class=\"error\">{}</div>", escape_html(message))
}

fn render_header(display_name: &str, count_label: &str) -> String {
    format!(
        "<div class=\"file-header\"><span class=\"file-name\">{}</span><span class=\"count\">{}</span></div>",
        escape_html(display_name),
        escape_html(count_label)
    )
}

/// Render a guide document as an HTML sentence list
///
/// Blank documents get the empty-file header and a placeholder instead of a list.
pub fn render_html(segmenter: &Segmenter, display_name: &str, content: &str) -> String {
    if content.chars().all(is_space) {
        return render_header(display_name, "empty file") + &render_placeholder("No content");
    }

    let sentences = segmenter.segment(content);
    let mut html = render_header(display_name, &format!("{} sentences", sentences.len()));
    html.push_str("<div class=\"sentence-list\">");
    for sentence in &sentences {
        // String writes are infallible
        let _ = write!(html, "<div class=\"sentence-item\">{}</div>", escape_html(sentence));
    }
    html.push_str("</div>");
    html
}

/// Format sentences as `index<TAB>sentence` lines, 0-based
pub fn render_text<S: AsRef<str>>(sentences: &[S]) -> String {
    let mut output = String::new();
    for (index, sentence) in sentences.iter().enumerate() {
        let _ = writeln!(output, "{}\t{}", index, sentence.as_ref());
    }
    output
}
