//! The multi-line input field and the state derived from it.
//!
//! Character counter, auto-grow height and the submit gate are all pure
//! functions of the composer text plus the processing flag, so the renderer
//! reads them instead of caching copies.

use ratatui::style::{Color, Modifier, Style};
use tui_textarea::{Input, Key, TextArea};

use super::constants::{
    COUNTER_CRITICAL_AFTER, COUNTER_WARNING_AFTER, INPUT_LINE_UNITS, MAX_INPUT_CHARS,
    MAX_INPUT_HEIGHT_UNITS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTier {
    Normal,
    Warning,
    Critical,
}

impl CounterTier {
    pub fn for_count(count: usize) -> Self {
        if count > COUNTER_CRITICAL_AFTER {
            CounterTier::Critical
        } else if count > COUNTER_WARNING_AFTER {
            CounterTier::Warning
        } else {
            CounterTier::Normal
        }
    }

    pub fn color(self) -> Color {
        match self {
            CounterTier::Normal => Color::Rgb(0x64, 0x74, 0x8b),
            CounterTier::Warning => Color::Rgb(0xd9, 0x77, 0x06),
            CounterTier::Critical => Color::Rgb(0xdc, 0x26, 0x26),
        }
    }
}

pub fn counter_text(count: usize) -> String {
    format!("{count}/{MAX_INPUT_CHARS}")
}

/// Height in layout units for a given number of text lines, never below one
/// line and never above the ceiling.
pub fn height_units_for_lines(lines: usize) -> u16 {
    let lines = u16::try_from(lines.max(1)).unwrap_or(u16::MAX);
    lines
        .saturating_mul(INPUT_LINE_UNITS)
        .min(MAX_INPUT_HEIGHT_UNITS)
}

/// Submission is allowed iff there is non-blank text and nothing in flight.
pub fn submit_enabled(text: &str, is_processing: bool) -> bool {
    !text.trim().is_empty() && !is_processing
}

pub struct Composer {
    textarea: TextArea<'static>,
    focused: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            focused: true,
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn char_count(&self) -> usize {
        let lines = self.textarea.lines();
        let chars: usize = lines.iter().map(|line| line.chars().count()).sum();
        chars + lines.len().saturating_sub(1)
    }

    pub fn remaining(&self) -> usize {
        MAX_INPUT_CHARS.saturating_sub(self.char_count())
    }

    pub fn counter_text(&self) -> String {
        counter_text(self.char_count())
    }

    pub fn counter_tier(&self) -> CounterTier {
        CounterTier::for_count(self.char_count())
    }

    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    pub fn height_units(&self) -> u16 {
        height_units_for_lines(self.line_count())
    }

    pub fn height_rows(&self) -> u16 {
        self.height_units() / INPUT_LINE_UNITS
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// An unfocused composer draws no cursor.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.apply_focus_style();
    }

    fn apply_focus_style(&mut self) {
        let cursor = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Replace the contents, truncated to the character limit.
    pub fn set_text(&mut self, text: &str) {
        let capped: String = text.chars().take(MAX_INPUT_CHARS).collect();
        let lines: Vec<String> = capped.split('\n').map(str::to_string).collect();
        self.textarea = TextArea::new(lines);
        self.textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
        self.apply_focus_style();
    }

    pub fn clear(&mut self) {
        self.textarea = TextArea::default();
        self.apply_focus_style();
    }

    /// Feed one key to the editor. Insertions past the limit are dropped.
    pub fn apply_input(&mut self, input: Input) -> bool {
        if is_insertion(&input) && self.remaining() == 0 {
            return false;
        }
        let modified = self.textarea.input(input);
        if modified {
            self.enforce_limit();
        }
        modified
    }

    /// Tab, yank and the editor's own newline keys can overshoot the limit;
    /// the overshoot sits right before the cursor, so backspace it away.
    fn enforce_limit(&mut self) {
        let excess = self.char_count().saturating_sub(MAX_INPUT_CHARS);
        for _ in 0..excess {
            if !self.textarea.delete_char() {
                break;
            }
        }
    }

    pub fn insert_newline(&mut self) -> bool {
        if self.remaining() == 0 {
            return false;
        }
        self.textarea.insert_newline();
        true
    }

    /// Insert pasted text, keeping only what fits under the limit.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let fitting: String = text.chars().take(self.remaining()).collect();
        if fitting.is_empty() {
            return false;
        }
        self.textarea.insert_str(fitting)
    }
}

fn is_insertion(input: &Input) -> bool {
    match input.key {
        Key::Char(_) => !input.ctrl && !input.alt,
        Key::Enter | Key::Tab => true,
        _ => false,
    }
}
