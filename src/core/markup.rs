//! HTML rendition of transcript entries.
//!
//! The terminal renderer draws entries from their structured fields; this
//! module produces the embeddable markup printed by `moodbot say --html`.
//! Every piece of user- or service-provided text goes through
//! [`escape_html`] before it is interpolated.

use super::message::{ChatEntry, ERROR_HEADLINE, ERROR_RETRY_HINT, RESULT_CAPTION};

/// Escape markup-significant characters and turn newlines into `<br>`.
///
/// `\r\n` counts as a single newline; a lone `\r` is dropped.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\n' => escaped.push_str("<br>"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl ChatEntry {
    pub fn to_html(&self) -> String {
        match self {
            ChatEntry::User { text } => format!(
                concat!(
                    "<div class=\"user-message\">",
                    "<div class=\"user-avatar\">YOU</div>",
                    "<div class=\"message-bubble\"><div class=\"message-text\">{}</div></div>",
                    "</div>"
                ),
                escape_html(text)
            ),
            ChatEntry::Bot { text, card } => format!(
                concat!(
                    "<div class=\"bot-message\">",
                    "<div class=\"bot-avatar\">MB</div>",
                    "<div class=\"message-bubble\">",
                    "<div class=\"message-text\">{text}</div>",
                    "<div class=\"result-card {class}\">",
                    "<h3><span style=\"color: {color};\">{glyph}</span> {label} ",
                    "<span class=\"confidence-badge\">{confidence}</span></h3>",
                    "<p class=\"result-message\">{caption}</p>",
                    "</div></div></div>"
                ),
                text = escape_html(text),
                class = card.category.as_str(),
                color = card.category.hex_color(),
                glyph = card.category.glyph(),
                label = escape_html(&card.label),
                confidence = card.confidence_text,
                caption = RESULT_CAPTION,
            ),
            ChatEntry::Error { description } => format!(
                concat!(
                    "<div class=\"bot-message\">",
                    "<div class=\"bot-avatar\">MB</div>",
                    "<div class=\"message-bubble\"><div class=\"message-text\">",
                    "<strong>{}</strong><br><br>{}<br><br>{}",
                    "</div></div></div>"
                ),
                ERROR_HEADLINE,
                escape_html(description),
                ERROR_RETRY_HINT
            ),
        }
    }
}
