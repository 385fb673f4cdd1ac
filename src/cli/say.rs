//! TUI-less "say" command

use std::error::Error;

use tracing::warn;

use crate::api::MoodService;
use crate::core::constants::MAX_INPUT_CHARS;
use crate::core::controller::ExchangeController;
use crate::core::message::ChatEntry;

/// Push one message through a fresh controller and return the entry it produced.
///
/// Returns `None` when the text is blank.
pub async fn exchange_once<S: MoodService + ?Sized>(service: &S, text: &str) -> Option<ChatEntry> {
    let mut controller = ExchangeController::new();
    if text.chars().count() > MAX_INPUT_CHARS {
        warn!(limit = MAX_INPUT_CHARS, "message truncated to the input limit");
    }
    controller.composer_mut().set_text(text);
    if !controller.submit(service).await {
        return None;
    }
    controller.entries().last().cloned()
}

pub fn render_entry(entry: &ChatEntry, html: bool) -> String {
    if html {
        entry.to_html()
    } else {
        entry.to_plain_text()
    }
}

/// Returns false when the exchange ended in an error entry.
pub async fn run_say<S: MoodService + ?Sized>(
    service: &S,
    text: Vec<String>,
    html: bool,
) -> Result<bool, Box<dyn Error>> {
    let text = text.join(" ");
    let Some(entry) = exchange_once(service, &text).await else {
        eprintln!("Usage: moodbot say <message>");
        return Ok(false);
    };

    let rendered = render_entry(&entry, html);
    match entry {
        ChatEntry::Error { .. } => {
            eprintln!("{rendered}");
            Ok(false)
        }
        _ => {
            println!("{rendered}");
            Ok(true)
        }
    }
}
