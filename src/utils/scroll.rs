//! Transcript scrolling.
//!
//! Transcript lines are pre-wrapped to the viewport width so the line count
//! used for scroll bounds is exactly what ratatui renders (the paragraph is
//! drawn without its own wrapping).

use std::time::Instant;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::core::constants::SCROLL_SETTLE_DELAY;

pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Wrap styled lines at word boundaries, splitting words wider than the viewport.
    pub fn prewrap_lines(lines: &[Line], width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut out = Vec::with_capacity(lines.len());

        for line in lines {
            if width == 0 || line.spans.is_empty() {
                out.push(owned_line(line));
                continue;
            }

            let mut wrapper = LineWrapper::new(width);
            for span in &line.spans {
                for token in split_tokens(&span.content) {
                    wrapper.push_token(token, span.style);
                }
            }
            wrapper.finish(&mut out);
        }

        out
    }

    /// Offset that shows the last `viewport` lines.
    pub fn scroll_to_bottom(total_lines: usize, viewport: u16) -> u16 {
        let max = total_lines.saturating_sub(viewport as usize);
        u16::try_from(max).unwrap_or(u16::MAX)
    }
}

fn owned_line(line: &Line) -> Line<'static> {
    Line::from(
        line.spans
            .iter()
            .map(|span| Span::styled(span.content.to_string(), span.style))
            .collect::<Vec<_>>(),
    )
}

fn text_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

/// Split into alternating runs of spaces and non-spaces.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let is_space = ch == ' ';
        match in_space {
            Some(prev) if prev != is_space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

struct LineWrapper {
    width: usize,
    current: Vec<Span<'static>>,
    current_width: usize,
    emitted: Vec<Line<'static>>,
}

impl LineWrapper {
    fn new(width: usize) -> Self {
        Self {
            width,
            current: Vec::new(),
            current_width: 0,
            emitted: Vec::new(),
        }
    }

    fn append(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        self.current_width += text_width(text);
        if let Some(last) = self.current.last_mut() {
            if last.style == style {
                let combined = format!("{}{}", last.content, text);
                *last = Span::styled(combined, style);
                return;
            }
        }
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn break_line(&mut self) {
        if let Some(last) = self.current.last_mut() {
            let trimmed = last.content.trim_end_matches(' ');
            if trimmed.len() != last.content.len() {
                let style = last.style;
                *last = Span::styled(trimmed.to_string(), style);
            }
        }
        self.emitted
            .push(Line::from(std::mem::take(&mut self.current)));
        self.current_width = 0;
    }

    fn push_token(&mut self, token: &str, style: Style) {
        let token_width = text_width(token);
        if token.starts_with(' ') {
            let room = self.width.saturating_sub(self.current_width);
            if token_width <= room {
                self.append(token, style);
            } else if self.current_width > 0 {
                // Spaces at a wrap point are swallowed.
                self.break_line();
            }
            return;
        }

        if self.current_width > 0 && self.current_width + token_width > self.width {
            self.break_line();
        }
        if token_width <= self.width {
            self.append(token, style);
            return;
        }

        let mut chunk = String::new();
        let mut chunk_width = 0;
        for ch in token.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if self.current_width + chunk_width + ch_width > self.width && chunk_width > 0 {
                self.append(&chunk, style);
                chunk.clear();
                chunk_width = 0;
                self.break_line();
            }
            chunk.push(ch);
            chunk_width += ch_width;
        }
        self.append(&chunk, style);
    }

    fn finish(mut self, out: &mut Vec<Line<'static>>) {
        if !self.current.is_empty() || self.emitted.is_empty() {
            self.break_line();
        }
        out.append(&mut self.emitted);
    }
}

/// Scroll position of the transcript.
///
/// Appends do not jump the view immediately: [`ScrollState::request_bottom`]
/// arms a short deadline and the event loop pins the view to the end once
/// [`ScrollState::poll`] sees it has passed, after the frame with the new
/// entry has been laid out.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: u16,
    follow_bottom: bool,
    pending_bottom_at: Option<Instant>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            follow_bottom: true,
            pending_bottom_at: None,
        }
    }

    pub fn is_following_bottom(&self) -> bool {
        self.follow_bottom
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_bottom_at.is_some()
    }

    pub fn request_bottom(&mut self, now: Instant) {
        self.pending_bottom_at = Some(now + SCROLL_SETTLE_DELAY);
    }

    /// Apply a due scroll request. Returns true when the view changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_bottom_at {
            Some(due) if now >= due => {
                self.pending_bottom_at = None;
                self.follow_bottom = true;
                true
            }
            _ => false,
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_bottom = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16, max_offset: u16) {
        self.offset = self.offset.saturating_add(lines).min(max_offset);
        if self.offset >= max_offset {
            self.follow_bottom = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.follow_bottom = false;
        self.offset = 0;
    }

    pub fn scroll_to_end(&mut self) {
        self.follow_bottom = true;
    }

    /// Clamp against the current content and return the offset to render.
    pub fn resolve(&mut self, total_lines: usize, viewport: u16) -> u16 {
        let max = ScrollCalculator::scroll_to_bottom(total_lines, viewport);
        if self.follow_bottom {
            self.offset = max;
        }
        self.offset = self.offset.min(max);
        self.offset
    }
}
